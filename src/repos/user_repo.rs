/*
 * Responsibility
 * - typed access to the `user` collection on top of DocumentStore
 * - only `email` and `role` are interpreted; other fields stay opaque
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repos::store::{
    Collection, Document, DocumentStore, Filter, RepoResult, Update, UpdateOptions, UpdateResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub email: String,
    // Any value other than "admin" (or no value) means no role.
    #[serde(default)]
    pub role: Option<Value>,
    #[serde(flatten)]
    pub rest: Document,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        matches!(&self.role, Some(Value::String(r)) if r == Role::Admin.as_str())
    }
}

pub async fn list(store: &dyn DocumentStore) -> RepoResult<Vec<Document>> {
    store.find(Collection::User, &Filter::all()).await
}

pub async fn find_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> RepoResult<Option<UserRecord>> {
    let Some(doc) = store
        .find_one(Collection::User, &Filter::by_email(email))
        .await?
    else {
        return Ok(None);
    };

    let record = serde_json::from_value(Value::Object(doc))?;
    Ok(Some(record))
}

/// Set `role` on the user with `email`. Never creates a user.
pub async fn set_role(
    store: &dyn DocumentStore,
    email: &str,
    role: Role,
) -> RepoResult<UpdateResult> {
    store
        .update_one(
            Collection::User,
            &Filter::by_email(email),
            &Update::set("role", role.as_str()),
            UpdateOptions::default(),
        )
        .await
}

/// Create or update the profile of `email` with `fields`.
pub async fn upsert_profile(
    store: &dyn DocumentStore,
    email: &str,
    fields: Document,
) -> RepoResult<UpdateResult> {
    store
        .update_one(
            Collection::User,
            &Filter::by_email(email),
            &Update::set_all(fields),
            UpdateOptions::upsert(),
        )
        .await
}
