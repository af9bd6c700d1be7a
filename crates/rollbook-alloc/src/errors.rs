use anyhow::Error;
use rollbook_core::CodecError;
use thiserror::Error as ThisError;

/// Errors surfaced by [`Allocator::allocate`] and the store collaborators.
///
/// The excluded routing layer owns the HTTP mapping; the intended one is
/// 409 for `DuplicateKey`/`Busy`, 404 for `CategoryNotFound`, 422 for
/// `Codec`, 500 for `SpaceExhausted` and `Storage`.
///
/// [`Allocator::allocate`]: crate::service::Allocator::allocate
#[derive(Debug, ThisError)]
pub enum AllocError {
    /// Key validation or identifier decode failure. Decode failures mean
    /// the stored data is corrupt; never retried.
    #[error(transparent)]
    Codec(CodecError),

    /// The category's four-digit sequence space is full. Fatal for that
    /// category; never retried.
    #[error("sequence space exhausted for this category")]
    SpaceExhausted,

    /// The category does not exist in reference data. The caller is
    /// expected to pre-check; the service re-checks and fails fast.
    #[error("category {0} not found")]
    CategoryNotFound(String),

    /// Two allocations raced to the same identifier and the store rejected
    /// the loser. Retried in-service a bounded number of times before
    /// being surfaced.
    #[error("identifier already allocated for this category")]
    DuplicateKey,

    /// The per-category allocation lock could not be acquired within the
    /// configured timeout. Retryable by the caller.
    #[error("allocation for this category is busy")]
    Busy,

    /// The persistence collaborator failed. Carries full context from the
    /// storage seam.
    #[error("storage failure: {0}")]
    Storage(Error),
}

impl From<CodecError> for AllocError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::SpaceExhausted => Self::SpaceExhausted,
            other => Self::Codec(other),
        }
    }
}

impl AllocError {
    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::Storage(err.into())
    }

    /// Whether the caller may reasonably retry the whole allocation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DuplicateKey | Self::Busy)
    }
}
