/*
 * Responsibility
 * - the identity a handler sees once the bearer token has been verified
 * - inserted into request extensions by middleware::auth::access
 */

/// Verified identity of the caller, valid for one request.
///
/// - `email` is the claim the token was issued for (user records are keyed by it)
/// - `issued_at` / `expires_at` are the token's `iat` / `exp` (unix seconds)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub email: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl AuthCtx {
    pub fn new(email: String, issued_at: i64, expires_at: i64) -> Self {
        Self {
            email,
            issued_at,
            expires_at,
        }
    }
}
