use crate::errors::CodecError;
use serde::Serialize;
use std::fmt;

/// A per-category sequence number in the range `0..=9999`.
///
/// `0` is the "no identifier issued yet" sentinel: it is a valid
/// [`SequenceNumber`] value but never appears inside a persisted
/// identifier. Issued numbers start at `1` and advance by exactly one per
/// successful allocation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SequenceNumber(u16);

impl SequenceNumber {
    /// The "none issued yet" sentinel.
    pub const ZERO: Self = Self(0);

    /// The largest issuable sequence number (four decimal digits).
    pub const MAX: Self = Self(9999);

    /// Creates a sequence number, rejecting values above [`Self::MAX`].
    pub fn new(value: u16) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    /// The raw numeric value.
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Whether this is the "none issued yet" sentinel.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The next sequence number, or [`CodecError::SpaceExhausted`] if the
    /// successor would not fit in four digits.
    pub fn succ(self) -> Result<Self, CodecError> {
        Self::new(self.0 + 1).ok_or(CodecError::SpaceExhausted)
    }
}

impl fmt::Debug for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SequenceNumber({})", self.0)
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
