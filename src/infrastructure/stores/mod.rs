// Document store adapters
// Implementations of the domain DocumentStore port

pub mod memory_document_store;
pub mod postgres_document_store;

pub use memory_document_store::{CallCounts, MemoryDocumentStore};
pub use postgres_document_store::PostgresDocumentStore;
