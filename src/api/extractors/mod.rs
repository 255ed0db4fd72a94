pub mod auth_ctx;
pub mod document_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use document_id::{ItemId, OrderId};
