//! The persisted allocation record.
//!
//! Category and sequence are stored as structured fields; the display
//! identifier is derived data carried alongside them for the response
//! boundary. Records are identified by a surrogate UUID so the display
//! string never has to serve as a primary key.

use chrono::{DateTime, Utc};
use rollbook_core::{Category, Identifier, SequenceNumber};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Strongly-typed surrogate ID for allocation records.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Create a new random ID.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ID from an existing UUID.
    #[inline]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID value.
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RecordId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<RecordId> for Uuid {
    #[inline]
    fn from(id: RecordId) -> Uuid {
        id.0
    }
}

/// A record created by a successful allocation.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationRecord {
    pub id: RecordId,
    pub category: Category,
    pub sequence: SequenceNumber,
    pub identifier: Identifier,
    /// Opaque payload supplied by the routing layer (student details, book
    /// details). The core never inspects it.
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AllocationRecord {
    pub fn new(
        category: Category,
        sequence: SequenceNumber,
        identifier: Identifier,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: RecordId::new(),
            category,
            sequence,
            identifier,
            payload,
            created_at: Utc::now(),
        }
    }
}
