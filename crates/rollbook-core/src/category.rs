//! Category keys and the two identifier namespaces.
//!
//! A [`Category`] names a partition of the identifier space. The portal has
//! exactly two kinds: student registration numbers are partitioned by
//! batch + stream (`"24" + "SC"`), library book IDs by subject (`"ICT"`).
//! Categories are supplied by the caller (after reference-data validation);
//! the core never invents them.

use crate::errors::CodecError;
use serde::Serialize;
use std::fmt;

/// Maximum byte length of a single category key.
const MAX_KEY_LEN: usize = 16;

/// A validated short alphanumeric key, one segment of a category prefix.
///
/// Keys are non-empty, at most 16 bytes, and ASCII alphanumeric. Whether a
/// key may end in a digit depends on its position in the prefix and is
/// enforced by the [`Category`] constructors, not here.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Result<Self, CodecError> {
        let key = key.into();
        let reason = if key.is_empty() {
            Some("key is empty")
        } else if key.len() > MAX_KEY_LEN {
            Some("key is longer than 16 bytes")
        } else if !key.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some("key must be ASCII alphanumeric")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(CodecError::InvalidKey { key, reason }),
            None => Ok(Self(key)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn ends_in_digit(&self) -> bool {
        self.0.bytes().next_back().is_some_and(|b| b.is_ascii_digit())
    }
}

impl fmt::Debug for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryKey({:?})", self.0)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A partition of the identifier space.
///
/// The concatenated keys form the identifier prefix. The final key of a
/// prefix must not end in a digit: otherwise the boundary between prefix
/// and the four-digit suffix is ambiguous (`"B2" + "0001"` reads the same
/// as `"B" + "2000" + "1…"`). The constructors reject such keys with
/// [`CodecError::InvalidKey`], so every constructible category decodes
/// unambiguously. A batch key like `"24"` is fine because the stream key
/// always follows it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Category {
    /// Student registration numbers, partitioned by batch and stream.
    Registration {
        batch: CategoryKey,
        stream: CategoryKey,
    },
    /// Library book IDs, partitioned by subject.
    Book { subject: CategoryKey },
}

impl Category {
    /// A registration-number category. The stream key is prefix-final and
    /// must not end in a digit.
    pub fn registration(batch: CategoryKey, stream: CategoryKey) -> Result<Self, CodecError> {
        if stream.ends_in_digit() {
            return Err(CodecError::InvalidKey {
                key: stream.0,
                reason: "prefix-final key must not end in a digit",
            });
        }
        Ok(Self::Registration { batch, stream })
    }

    /// A book-ID category. The subject key is prefix-final and must not end
    /// in a digit.
    pub fn book(subject: CategoryKey) -> Result<Self, CodecError> {
        if subject.ends_in_digit() {
            return Err(CodecError::InvalidKey {
                key: subject.0,
                reason: "prefix-final key must not end in a digit",
            });
        }
        Ok(Self::Book { subject })
    }

    /// The identifier prefix: the category's keys concatenated in fixed
    /// order.
    pub fn prefix(&self) -> String {
        match self {
            Self::Registration { batch, stream } => format!("{batch}{stream}"),
            Self::Book { subject } => subject.0.clone(),
        }
    }

    /// Short label for the namespace, used in logs and storage rows.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Registration { .. } => "registration",
            Self::Book { .. } => "book",
        }
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({}:{})", self.kind(), self.prefix())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.prefix())
    }
}
