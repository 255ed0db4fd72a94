/**
 * Responsibility
 *  - per-collection id types used in `/{id}` paths
 *  - decode logic and the extractor live in core
 */
use super::core::DocumentId;

// item
pub enum ItemTag {}
pub type ItemId = DocumentId<ItemTag>;

// order
pub enum OrderTag {}
pub type OrderId = DocumentId<OrderTag>;
