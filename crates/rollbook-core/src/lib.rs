//! # Rollbook Core
//!
//! Pure types and codec for the rollbook identifier scheme.
//!
//! This crate owns the leaf pieces of sequential identifier allocation:
//!
//! - [`category`]: validated category keys and the two identifier
//!   namespaces (registration numbers, book IDs)
//! - [`sequence`]: the bounded per-category sequence number
//! - [`codec`]: encode/decode between `(category, sequence)` and the
//!   display identifier string
//! - [`errors`]: the codec error taxonomy
//!
//! Everything here is synchronous and side-effect free; persistence and
//! concurrency live in `rollbook-alloc`.
//!
//! # Example
//!
//! ```
//! use rollbook_core::{Category, CategoryKey, SequenceNumber, codec};
//!
//! let category = Category::registration(
//!     CategoryKey::new("24")?,
//!     CategoryKey::new("SC")?,
//! )?;
//!
//! let first = codec::encode(&category, SequenceNumber::ZERO)?;
//! assert_eq!(first.as_str(), "24SC0001");
//!
//! let issued = codec::decode(first.as_str(), &category)?;
//! assert_eq!(issued.get(), 1);
//! # Ok::<(), rollbook_core::CodecError>(())
//! ```

pub mod category;
pub mod codec;
pub mod errors;
pub mod sequence;

// Re-export commonly used types at crate root
pub use category::{Category, CategoryKey};
pub use codec::Identifier;
pub use errors::CodecError;
pub use sequence::SequenceNumber;
