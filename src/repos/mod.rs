pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod user_repo;

pub use error::RepoError;
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use store::{Collection, Document, DocumentStore, Filter};
