/*
 * Responsibility
 * - DocumentStore backed by a single Postgres JSONB table
 * - filter: `body @> $filter` (top-level equality for scalar fields)
 * - update: `body || $set` on the first matching row (by insertion order)
 */
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, postgres::PgPoolOptions, types::Json};

use crate::repos::error::RepoError;
use crate::repos::store::{
    Collection, DeleteResult, Document, DocumentStore, Filter, InsertOneResult, RepoResult,
    Update, UpdateOptions, UpdateResult, assign_id, upsert_document,
};

#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Connect and make sure the `documents` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq         BIGSERIAL PRIMARY KEY,
                collection  TEXT NOT NULL,
                id          TEXT NOT NULL,
                body        JSONB NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                UNIQUE (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS documents_body_idx
            ON documents USING GIN (body jsonb_path_ops)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert(&self, collection: Collection, id: &str, doc: Document) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(Value::Object(doc)))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn filter_json(filter: &Filter) -> Json<Value> {
    Json(Value::Object(filter.as_document().clone()))
}

fn into_document(Json(value): Json<Value>) -> RepoResult<Document> {
    match value {
        Value::Object(doc) => Ok(doc),
        _ => Err(RepoError::NotAnObject),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> RepoResult<Vec<Document>> {
        let rows = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            "#,
        )
        .bind(collection.name())
        .bind(filter_json(filter))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(into_document).collect()
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> RepoResult<Option<Document>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(collection.name())
        .bind(filter_json(filter))
        .fetch_optional(&self.pool)
        .await?;

        row.map(into_document).transpose()
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut doc: Document,
    ) -> RepoResult<InsertOneResult> {
        let inserted_id = assign_id(&mut doc);
        self.insert(collection, &inserted_id, doc).await?;

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
        let set = Json(Value::Object(update.fields().clone()));

        // `modified` is computed against the locked pre-update row.
        let modified = sqlx::query_scalar::<_, bool>(
            r#"
            WITH target AS (
                SELECT seq, body
                FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
                FOR UPDATE
            )
            UPDATE documents AS d
            SET body = d.body || $3
            FROM target
            WHERE d.seq = target.seq
            RETURNING NOT (target.body @> $3)
            "#,
        )
        .bind(collection.name())
        .bind(filter_json(filter))
        .bind(&set)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(modified) = modified {
            return Ok(UpdateResult::matched(modified));
        }

        if !options.upsert {
            return Ok(UpdateResult::no_match());
        }

        let mut doc = upsert_document(filter, update);
        let id = assign_id(&mut doc);
        self.insert(collection, &id, doc).await?;
        Ok(UpdateResult::upserted(id))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> RepoResult<DeleteResult> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE seq = (
                SELECT seq
                FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT 1
            )
            "#,
        )
        .bind(collection.name())
        .bind(filter_json(filter))
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: result.rows_affected(),
        })
    }
}
