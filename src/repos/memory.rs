use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repos::store::{
    Collection, DeleteResult, Document, DocumentStore, Filter, InsertOneResult, RepoResult,
    Update, UpdateOptions, UpdateResult, assign_id, upsert_document,
};

/// In-process document store.
///
/// Used when no `DATABASE_URL` is configured in development, and as the
/// substitutable store in tests. Documents keep insertion order per collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> RepoResult<Vec<Document>> {
        let guard = self.collections.read().await;
        let docs = guard
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();
        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> RepoResult<Option<Document>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut doc: Document,
    ) -> RepoResult<InsertOneResult> {
        let inserted_id = assign_id(&mut doc);
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(doc);

        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
        options: UpdateOptions,
    ) -> RepoResult<UpdateResult> {
        // Single write lock: find + modify happen atomically.
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();

        if let Some(doc) = docs.iter_mut().find(|d| filter.matches(d)) {
            let modified = update.apply(doc);
            return Ok(UpdateResult::matched(modified));
        }

        if !options.upsert {
            return Ok(UpdateResult::no_match());
        }

        let mut doc = upsert_document(filter, update);
        let id = assign_id(&mut doc);
        docs.push(doc);
        Ok(UpdateResult::upserted(id))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> RepoResult<DeleteResult> {
        let mut guard = self.collections.write().await;
        let deleted_count = match guard.get_mut(&collection) {
            Some(docs) => match docs.iter().position(|d| filter.matches(d)) {
                Some(pos) => {
                    docs.remove(pos);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count,
        })
    }
}
