/*
 * Responsibility
 * - request/response DTOs of the /user and /admin routes
 * - the profile body stays an opaque JSON object; only reserved keys are touched
 */
use serde::Serialize;

use crate::repos::{Document, store::UpdateResult};

/// Keys a client may not set through the profile upsert.
const RESERVED_PROFILE_FIELDS: [&str; 3] = ["_id", "role", "email"];

/// Strip reserved fields and pin `email` to the path value.
///
/// Role changes go through the admin-elevation route only.
pub fn profile_fields(mut body: Document, email: &str) -> Document {
    for key in RESERVED_PROFILE_FIELDS {
        body.remove(key);
    }
    body.insert("email".to_string(), email.into());
    body
}

#[derive(Debug, Serialize)]
pub struct UpsertUserResponse {
    pub result: UpdateResult,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}
