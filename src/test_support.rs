//! Shared fixtures for in-crate tests.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::api::routes;
use crate::repos::store::{
    Collection, DeleteResult, Document, DocumentStore, Filter, InsertOneResult, RepoResult,
    Update, UpdateOptions, UpdateResult,
};
use crate::repos::MemoryStore;
use crate::services::auth::{TokenService, token::DEFAULT_TTL_SECONDS};
use crate::services::payment::{PaymentError, PaymentIntent, PaymentProvider};
use crate::state::AppState;

pub const SECRET: &str = "test-access-token-secret";

/// Wraps a store and counts calls, so tests can assert a request never touched it.
pub struct CountingStore {
    inner: Arc<dyn DocumentStore>,
    calls: AtomicUsize,
    updates: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    fn backend_name(&self) -> &'static str {
        "counting"
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> RepoResult<Vec<Document>> {
        self.hit();
        self.inner.find(collection, filter).await
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> RepoResult<Option<Document>> {
        self.hit();
        self.inner.find_one(collection, filter).await
    }

    async fn insert_one(
        &self,
        collection: Collection,
        doc: Document,
    ) -> RepoResult<InsertOneResult> {
        self.hit();
        self.inner.insert_one(collection, doc).await
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
        options: UpdateOptions,
    ) -> RepoResult<UpdateResult> {
        self.hit();
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner
            .update_one(collection, filter, update, options)
            .await
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> RepoResult<DeleteResult> {
        self.hit();
        self.inner.delete_one(collection, filter).await
    }
}

/// Payment provider that returns a fixed client secret and records the last amount.
#[derive(Default)]
pub struct FakePayments {
    pub last_amount: std::sync::Mutex<Option<i64>>,
}

#[async_trait]
impl PaymentProvider for FakePayments {
    async fn create_intent(
        &self,
        amount: i64,
        _currency: &str,
        _method_types: &[&str],
    ) -> Result<PaymentIntent, PaymentError> {
        if let Ok(mut last) = self.last_amount.lock() {
            *last = Some(amount);
        }
        Ok(PaymentIntent {
            client_secret: format!("pi_test_secret_{amount}"),
        })
    }
}

pub async fn seed_user(store: &dyn DocumentStore, email: &str, role: Option<&str>) {
    let mut doc = json!({ "email": email, "name": email });
    if let Some(role) = role {
        doc["role"] = Value::String(role.to_string());
    }
    let Value::Object(doc) = doc else {
        unreachable!()
    };
    store.insert_one(Collection::User, doc).await.unwrap();
}

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(SECRET, DEFAULT_TTL_SECONDS))
}

pub fn bearer_for(email: &str) -> String {
    format!("Bearer {}", token_service().issue(email).unwrap())
}

pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<CountingStore>,
    pub backing: Arc<MemoryStore>,
    pub payments: Arc<FakePayments>,
}

pub fn test_app() -> TestApp {
    let backing = Arc::new(MemoryStore::new());
    let store = Arc::new(CountingStore::new(backing.clone()));
    let payments = Arc::new(FakePayments::default());

    let provider: Arc<dyn PaymentProvider> = payments.clone();
    let state = AppState::new(store.clone(), token_service(), Some(provider));
    let router = routes(state.clone()).with_state(state);

    TestApp {
        router,
        store,
        backing,
        payments,
    }
}
