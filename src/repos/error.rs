/*
 * Responsibility
 * - what the store layer reports upward
 * - callers map every variant to an upstream failure (no masking, no retry)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("document decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("stored document is not a JSON object")]
    NotAnObject,
}
