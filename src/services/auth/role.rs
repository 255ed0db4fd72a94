//! Role-gated mutations (admin elevation).
//!
//! Requires an `AuthCtx` produced by the access middleware. The decision is
//! computed first, then consumed by a single `match` whose arms both return:
//! the store update is only reachable from `Authorized`.
use std::sync::Arc;

use crate::api::extractors::AuthCtx;
use crate::repos::{
    DocumentStore, RepoError,
    store::UpdateResult,
    user_repo::{self, Role},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    // No user record for the requester's email.
    UnknownRequester,
    // Record exists but has no admin role.
    NotAdmin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminDecision {
    Authorized { requester: AuthCtx },
    Denied { reason: DenyReason },
}

/// Outcome of an elevation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Elevation {
    Applied(UpdateResult),
    Denied(DenyReason),
}

#[derive(Clone)]
pub struct RoleAuthorizer {
    store: Arc<dyn DocumentStore>,
}

impl RoleAuthorizer {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Decide whether `requester` may perform admin-only mutations.
    pub async fn decide(&self, requester: &AuthCtx) -> Result<AdminDecision, RepoError> {
        let record = user_repo::find_by_email(self.store.as_ref(), &requester.email).await?;

        let decision = match record {
            Some(user) if user.is_admin() => AdminDecision::Authorized {
                requester: requester.clone(),
            },
            Some(_) => AdminDecision::Denied {
                reason: DenyReason::NotAdmin,
            },
            None => AdminDecision::Denied {
                reason: DenyReason::UnknownRequester,
            },
        };

        Ok(decision)
    }

    /// Grant the admin role to `target_email` if `requester` is an admin.
    ///
    /// An unknown target is a store-level no-op (matched 0, modified 0).
    pub async fn elevate_to_admin(
        &self,
        requester: &AuthCtx,
        target_email: &str,
    ) -> Result<Elevation, RepoError> {
        match self.decide(requester).await? {
            AdminDecision::Authorized { requester } => {
                let result =
                    user_repo::set_role(self.store.as_ref(), target_email, Role::Admin).await?;
                tracing::info!(
                    requester = %requester.email,
                    target = %target_email,
                    matched = result.matched_count,
                    modified = result.modified_count,
                    "admin role granted"
                );
                Ok(Elevation::Applied(result))
            }
            AdminDecision::Denied { reason } => {
                tracing::warn!(
                    requester = %requester.email,
                    target = %target_email,
                    ?reason,
                    "admin elevation denied"
                );
                Ok(Elevation::Denied(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{Collection, Filter, MemoryStore};
    use crate::test_support::{CountingStore, seed_user};

    fn ctx(email: &str) -> AuthCtx {
        AuthCtx::new(email.to_string(), 0, 0)
    }

    async fn role_of(store: &dyn DocumentStore, email: &str) -> Option<serde_json::Value> {
        user_repo::find_by_email(store, email)
            .await
            .unwrap()
            .and_then(|u| u.role)
    }

    #[tokio::test]
    async fn admin_requester_is_authorized() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "boss@example.com", Some("admin")).await;

        let authz = RoleAuthorizer::new(store);
        let decision = authz.decide(&ctx("boss@example.com")).await.unwrap();
        assert_eq!(
            decision,
            AdminDecision::Authorized {
                requester: ctx("boss@example.com")
            }
        );
    }

    #[tokio::test]
    async fn unknown_requester_is_denied() {
        let authz = RoleAuthorizer::new(Arc::new(MemoryStore::new()));
        let decision = authz.decide(&ctx("nobody@example.com")).await.unwrap();
        assert_eq!(
            decision,
            AdminDecision::Denied {
                reason: DenyReason::UnknownRequester
            }
        );
    }

    #[tokio::test]
    async fn admin_elevates_existing_target_once_then_idempotently() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "boss@example.com", Some("admin")).await;
        seed_user(store.as_ref(), "target@example.com", None).await;
        let authz = RoleAuthorizer::new(store.clone());

        let first = authz
            .elevate_to_admin(&ctx("boss@example.com"), "target@example.com")
            .await
            .unwrap();
        assert_eq!(first, Elevation::Applied(UpdateResult::matched(true)));
        assert_eq!(
            role_of(store.as_ref(), "target@example.com").await,
            Some(serde_json::json!("admin"))
        );

        let second = authz
            .elevate_to_admin(&ctx("boss@example.com"), "target@example.com")
            .await
            .unwrap();
        assert_eq!(second, Elevation::Applied(UpdateResult::matched(false)));
        assert_eq!(
            role_of(store.as_ref(), "target@example.com").await,
            Some(serde_json::json!("admin"))
        );
    }

    #[tokio::test]
    async fn admin_elevating_missing_target_is_a_noop() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "boss@example.com", Some("admin")).await;
        let authz = RoleAuthorizer::new(store.clone());

        let res = authz
            .elevate_to_admin(&ctx("boss@example.com"), "ghost@example.com")
            .await
            .unwrap();
        assert_eq!(res, Elevation::Applied(UpdateResult::no_match()));

        let users = store.find(Collection::User, &Filter::all()).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn denied_requester_never_reaches_the_update() {
        let inner = Arc::new(MemoryStore::new());
        seed_user(inner.as_ref(), "user@example.com", None).await;
        seed_user(inner.as_ref(), "target@example.com", None).await;
        let store = Arc::new(CountingStore::new(inner.clone()));
        let authz = RoleAuthorizer::new(store.clone());

        let res = authz
            .elevate_to_admin(&ctx("user@example.com"), "target@example.com")
            .await
            .unwrap();

        assert_eq!(res, Elevation::Denied(DenyReason::NotAdmin));
        assert_eq!(store.updates(), 0);
        assert_eq!(role_of(inner.as_ref(), "target@example.com").await, None);
    }
}
