//! Collaborator interfaces the allocation service depends on.
//!
//! The portal's persistence engine and reference tables are external to
//! this core; these traits are the whole contract. `rollbook-alloc` ships
//! an in-memory implementation (tests, reference semantics) and a
//! Postgres implementation (production wiring).

use crate::errors::AllocError;
use crate::record::AllocationRecord;
use async_trait::async_trait;
use rollbook_core::Category;

/// Category-partitioned persistence for allocation records.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// The record with the highest sequence number in `category`, or
    /// `None` if the category has no records yet.
    async fn find_max(
        &self,
        category: &Category,
    ) -> Result<Option<AllocationRecord>, AllocError>;

    /// Inserts a record, keyed on `(category, sequence)`.
    ///
    /// This is the atomic commit boundary of an allocation: the record is
    /// either fully persisted or not persisted at all. A collision on the
    /// key — or on the display identifier within the same namespace kind,
    /// which two prefix-aliasing categories can produce — fails with
    /// [`AllocError::DuplicateKey`] and must leave the store unchanged.
    async fn insert(&self, record: AllocationRecord) -> Result<AllocationRecord, AllocError>;
}

/// Reference-data lookup for category validity (batch, stream and subject
/// tables in the portal).
#[async_trait]
pub trait CategoryDirectory: Send + Sync {
    async fn exists(&self, category: &Category) -> Result<bool, AllocError>;
}
