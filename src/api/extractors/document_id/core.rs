/*
 * Responsibility
 * - take the `{id}` path segment and check it is a document id (UUID)
 * - reject malformed ids with 400 INVALID_ID before any store call
 * - the tag type keeps item ids and order ids from being mixed up in handlers
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub struct DocumentId<T> {
    id: String,
    _marker: PhantomData<T>,
}

impl<T> DocumentId<T> {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let uuid = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::bad_request("INVALID_ID", "invalid id"))?;

        Ok(Self {
            // Stored ids are the hyphenated lowercase form.
            id: uuid.to_string(),
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> FromRequestParts<AppState> for DocumentId<T>
where
    T: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_ID", "invalid id"))?;
        Self::parse(&raw)
    }
}

impl<T> std::fmt::Debug for DocumentId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentId").field("id", &self.id).finish()
    }
}
