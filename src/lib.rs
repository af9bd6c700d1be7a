//! # Rollbook
//!
//! Sequential identifier allocation for an educational-institution portal.
//!
//! Student registration numbers (`"24SC0001"`) and library book IDs
//! (`"ICT0003"`) are human-readable identifiers: a categorical prefix
//! (batch + stream, or subject) followed by a zero-padded per-category
//! sequence. Rollbook owns composing these identifiers, parsing them back,
//! and allocating the next one safely under concurrent creation requests.
//!
//! ## Architecture
//!
//! The workspace splits the scheme into two crates:
//!
//! ```text
//! crates/
//! ├── rollbook-core/    # Pure leaf: categories, sequence numbers, codec
//! └── rollbook-alloc/   # Allocation service, collaborator traits, stores
//! ```
//!
//! - [`rollbook_core`] has no I/O: it validates category keys, bounds
//!   sequence numbers to the four-digit space, and encodes/decodes
//!   identifiers.
//! - [`rollbook_alloc`] serializes read-max-then-insert per category
//!   behind an advisory lock with a bounded wait, retries duplicate-key
//!   races a bounded number of times, and defines the persistence
//!   ([`SequenceStore`](rollbook_alloc::SequenceStore)) and
//!   reference-data ([`CategoryDirectory`](rollbook_alloc::CategoryDirectory))
//!   seams the rest of the portal plugs into.
//!
//! HTTP routing, request validation, auth and the portal's own schema are
//! collaborators, not part of this library: callers validate input, call
//! [`Allocator::allocate`](rollbook_alloc::Allocator::allocate), and map
//! the typed errors to responses.
//!
//! ## Guarantees
//!
//! For a fixed category, serialized allocation issues exactly
//! `{1, 2, …, N}` after `N` successful calls: no gaps, no duplicates.
//! Every error is a typed [`AllocError`](rollbook_alloc::AllocError);
//! nothing is silently swallowed, and an aborted allocation either
//! committed its record or left no trace.

pub use rollbook_alloc;
pub use rollbook_core;

// Re-export the everyday surface at the crate root
pub use rollbook_alloc::{
    AllocError, AllocationRecord, Allocator, AllocatorConfig, CategoryDirectory, MemoryDirectory,
    MemoryStore, PgStore, RecordId, SequenceStore,
};
pub use rollbook_core::{Category, CategoryKey, CodecError, Identifier, SequenceNumber, codec};
