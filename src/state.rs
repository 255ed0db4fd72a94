/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 * - every dependency is injected here; handlers never reach for globals
 * - Clone is cheap (everything behind Arc)
 */
use std::sync::Arc;

use crate::repos::DocumentStore;
use crate::services::{
    auth::{RoleAuthorizer, TokenService},
    payment::PaymentProvider,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<TokenService>,
    pub payments: Option<Arc<dyn PaymentProvider>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: Arc<TokenService>,
        payments: Option<Arc<dyn PaymentProvider>>,
    ) -> Self {
        Self {
            store,
            auth,
            payments,
        }
    }

    pub fn role_authorizer(&self) -> RoleAuthorizer {
        RoleAuthorizer::new(self.store.clone())
    }
}
