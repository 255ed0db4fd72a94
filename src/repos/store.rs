//! Document store interface used by handlers and the role authorizer.
//!
//! The store is an opaque key-based CRUD service. Backends only need to
//! understand top-level field equality for filters and `$set` for updates.
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::repos::error::RepoError;

/// A stored document. Always a JSON object.
pub type Document = Map<String, Value>;

pub type RepoResult<T> = Result<T, RepoError>;

/// Field that carries the document identifier.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Item,
    User,
    Order,
    Review,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::User => "user",
            Self::Order => "order",
            Self::Review => "review",
        }
    }
}

/// Equality filter over top-level fields. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Self {
        Self::field(ID_FIELD, id)
    }

    pub fn by_email(email: &str) -> Self {
        Self::field("email", email)
    }

    pub fn field(field: &str, value: impl Into<Value>) -> Self {
        let mut doc = Document::new();
        doc.insert(field.to_string(), value.into());
        Self(doc)
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.0.iter().all(|(k, v)| doc.get(k) == Some(v))
    }

    pub fn as_document(&self) -> &Document {
        &self.0
    }
}

/// `$set` style update instruction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set: Document,
}

impl Update {
    pub fn set(field: &str, value: impl Into<Value>) -> Self {
        let mut set = Document::new();
        set.insert(field.to_string(), value.into());
        Self { set }
    }

    pub fn set_all(fields: Document) -> Self {
        Self { set: fields }
    }

    pub fn fields(&self) -> &Document {
        &self.set
    }

    /// Apply to `doc` in place. Returns whether any field actually changed.
    pub fn apply(&self, doc: &mut Document) -> bool {
        let mut changed = false;
        for (k, v) in &self.set {
            if doc.get(k) != Some(v) {
                doc.insert(k.clone(), v.clone());
                changed = true;
            }
        }
        changed
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    pub upsert: bool,
}

impl UpdateOptions {
    pub fn upsert() -> Self {
        Self { upsert: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

impl UpdateResult {
    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            upserted_id: None,
            upserted_count: 0,
        }
    }

    pub fn no_match() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
            upserted_count: 0,
        }
    }

    pub fn upserted(id: String) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
            upserted_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Ensure `doc` has an `_id`, generating a UUID when missing. Returns the id.
pub fn assign_id(doc: &mut Document) -> String {
    match doc.get(ID_FIELD) {
        Some(Value::String(id)) => id.clone(),
        _ => {
            let id = uuid::Uuid::new_v4().to_string();
            doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            id
        }
    }
}

/// Build the document inserted by an upsert: filter fields, then `$set` fields.
pub fn upsert_document(filter: &Filter, update: &Update) -> Document {
    let mut doc = filter.as_document().clone();
    update.apply(&mut doc);
    doc.remove(ID_FIELD);
    doc
}

/// Opaque CRUD interface over the document database.
///
/// Implementations must be safe to share across requests (`Arc<dyn DocumentStore>`).
/// Per-document reads and writes are expected to be atomic; nothing here
/// coordinates across documents.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn find(&self, collection: Collection, filter: &Filter) -> RepoResult<Vec<Document>>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> RepoResult<Option<Document>>;

    async fn insert_one(&self, collection: Collection, doc: Document)
    -> RepoResult<InsertOneResult>;

    // Update the first matching document.
    //
    // - no match, `upsert == false` => no-op, matched/modified 0
    // - no match, `upsert == true`  => insert `filter ∪ set` with a fresh `_id`
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
        options: UpdateOptions,
    ) -> RepoResult<UpdateResult>;

    async fn delete_one(&self, collection: Collection, filter: &Filter)
    -> RepoResult<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::all().matches(&doc(json!({"a": 1}))));
        assert!(Filter::all().matches(&Document::new()));
    }

    #[test]
    fn filter_requires_every_field_to_match() {
        let d = doc(json!({"email": "a@example.com", "role": "admin"}));
        assert!(Filter::by_email("a@example.com").matches(&d));
        assert!(!Filter::by_email("b@example.com").matches(&d));
        assert!(!Filter::field("missing", "x").matches(&d));
    }

    #[test]
    fn update_reports_whether_anything_changed() {
        let mut d = doc(json!({"email": "a@example.com"}));
        let update = Update::set("role", "admin");

        assert!(update.apply(&mut d));
        assert_eq!(d.get("role"), Some(&json!("admin")));
        assert!(!update.apply(&mut d));
    }

    #[test]
    fn assign_id_keeps_existing_string_id() {
        let mut d = doc(json!({"_id": "fixed"}));
        assert_eq!(assign_id(&mut d), "fixed");

        let mut fresh = Document::new();
        let id = assign_id(&mut fresh);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_eq!(fresh.get(ID_FIELD), Some(&json!(id)));
    }

    #[test]
    fn upsert_document_merges_filter_and_set() {
        let d = upsert_document(
            &Filter::by_email("a@example.com"),
            &Update::set_all(doc(json!({"name": "A"}))),
        );
        assert_eq!(d, doc(json!({"email": "a@example.com", "name": "A"})));
    }

    #[test]
    fn results_serialize_in_camel_case() {
        let v = serde_json::to_value(UpdateResult::matched(true)).unwrap();
        assert_eq!(
            v,
            json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 1,
                "upsertedId": null,
                "upsertedCount": 0
            })
        );
    }
}
