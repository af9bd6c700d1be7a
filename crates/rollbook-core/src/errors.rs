use crate::sequence::SequenceNumber;
use thiserror::Error;

/// Errors produced by the identifier codec and the category/sequence types.
///
/// These are all data-shape errors: none of them is retryable, and every one
/// of them indicates either bad input (key validation) or corrupt stored
/// data (decode failures).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A category key failed validation (empty, too long, non-alphanumeric,
    /// or a prefix-final key ending in a digit).
    #[error("invalid category key {key:?}: {reason}")]
    InvalidKey {
        key: String,
        reason: &'static str,
    },

    /// An identifier does not match the expected `prefix + 4-digit-suffix`
    /// shape for the given category. Indicates corrupt stored data.
    #[error("identifier {identifier:?} does not match category prefix {prefix:?}")]
    Format { identifier: String, prefix: String },

    /// The next sequence number for the category would exceed
    /// [`SequenceNumber::MAX`]. Fatal for that category.
    #[error("sequence space exhausted (max {})", SequenceNumber::MAX)]
    SpaceExhausted,
}
