//! # Rollbook Alloc
//!
//! The allocation service for rollbook identifiers.
//!
//! This crate turns the pure codec from `rollbook-core` into a safe
//! allocation pipeline:
//!
//! - [`store`]: the collaborator traits ([`SequenceStore`],
//!   [`CategoryDirectory`]) the portal's persistence layer implements
//! - [`memory`]: in-memory collaborators (reference semantics, tests)
//! - [`postgres`]: the sqlx/Postgres-backed store
//! - [`service`]: [`Allocator`], the per-category-serialized
//!   read-max-then-insert sequence with bounded retry
//! - [`config`]: allocator tunables, loadable from the environment
//! - [`errors`]: the allocation error taxonomy
//!
//! # Example
//!
//! ```
//! use rollbook_alloc::{Allocator, AllocatorConfig, MemoryDirectory, MemoryStore};
//! use rollbook_core::{Category, CategoryKey};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = MemoryDirectory::new().with_subjects(["ICT"]);
//! let allocator = Allocator::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(directory),
//!     AllocatorConfig::default(),
//! );
//!
//! let category = Category::book(CategoryKey::new("ICT")?)?;
//! let record = allocator
//!     .allocate(category, serde_json::json!({"title": "Networks"}))
//!     .await?;
//! assert_eq!(record.identifier.as_str(), "ICT0001");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod service;
pub mod store;

// Re-export commonly used types at crate root
pub use config::AllocatorConfig;
pub use errors::AllocError;
pub use memory::{MemoryDirectory, MemoryStore};
pub use postgres::PgStore;
pub use record::{AllocationRecord, RecordId};
pub use service::Allocator;
pub use store::{CategoryDirectory, SequenceStore};
