//! Encoding and decoding of display identifiers.
//!
//! An identifier is the category prefix followed by the sequence number
//! zero-padded to four digits: batch `"24"` + stream `"SC"` + sequence 1
//! is `"24SC0001"`. Because the suffix width is fixed, lexicographic order
//! of identifiers within one category coincides with numeric order of
//! their sequence numbers; stores rely on this only as a sanity property,
//! ordering on the structured sequence column instead.

use crate::category::Category;
use crate::errors::CodecError;
use crate::sequence::SequenceNumber;
use serde::Serialize;
use std::fmt;

/// Fixed width of the numeric suffix.
const SUFFIX_WIDTH: usize = 4;

/// A composed display identifier, e.g. `"24SC0001"` or `"ICT0003"`.
///
/// Produced by [`encode`] at allocation time, or rehydrated verbatim from
/// storage via [`Identifier::from_stored`]. The display string is derived
/// data: the structured category and sequence fields are authoritative.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wraps an identifier string read back from storage.
    ///
    /// No validation happens here: stored data is checked when it is
    /// decoded, so corruption surfaces as [`CodecError::Format`] at the
    /// point of use rather than being silently reinterpreted.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({:?})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Composes the identifier for the allocation *after* `previous`.
///
/// Takes the previously issued sequence number (or
/// [`SequenceNumber::ZERO`] for a first-ever allocation), increments it,
/// and pads the successor to four digits behind the category prefix.
/// Fails with [`CodecError::SpaceExhausted`] when the successor would
/// exceed 9999.
pub fn encode(category: &Category, previous: SequenceNumber) -> Result<Identifier, CodecError> {
    let next = previous.succ()?;
    Ok(Identifier(format!(
        "{}{:0width$}",
        category.prefix(),
        next.get(),
        width = SUFFIX_WIDTH
    )))
}

/// Recovers the sequence number from an identifier issued for `category`.
///
/// The identifier must be exactly the category prefix followed by four
/// ASCII digits; anything else is [`CodecError::Format`]. A `0000` suffix
/// is also a format error: zero is the "none issued" sentinel and never
/// appears in a persisted identifier. Callers map "no prior identifier
/// exists" to [`SequenceNumber::ZERO`] themselves instead of decoding.
pub fn decode(identifier: &str, category: &Category) -> Result<SequenceNumber, CodecError> {
    let prefix = category.prefix();
    let format_err = || CodecError::Format {
        identifier: identifier.to_string(),
        prefix: prefix.clone(),
    };

    let suffix = identifier.strip_prefix(prefix.as_str()).ok_or_else(format_err)?;
    if suffix.len() != SUFFIX_WIDTH || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_err());
    }
    let value: u16 = suffix.parse().map_err(|_| format_err())?;
    if value == 0 {
        return Err(format_err());
    }
    SequenceNumber::new(value).ok_or_else(format_err)
}
