//! In-memory collaborator implementations.
//!
//! [`MemoryStore`] is the reference semantics for [`SequenceStore`] and
//! the backend used by the test suite. [`MemoryDirectory`] is a seeded
//! stand-in for the batch/stream/subject reference tables.

use crate::errors::AllocError;
use crate::record::AllocationRecord;
use crate::store::{CategoryDirectory, SequenceStore};
use anyhow::anyhow;
use async_trait::async_trait;
use rollbook_core::{Category, SequenceNumber};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

/// In-memory [`SequenceStore`] keyed on `(category, sequence)`.
///
/// Also enforces display-identifier uniqueness per namespace kind: two
/// categories whose key concatenations alias each other (batch `"2"` +
/// stream `"4SC"` vs batch `"24"` + stream `"SC"`) must never both issue
/// `"24SC0001"`. The original system got this from the display string
/// being the table's primary key, one table per kind.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<Category, BTreeMap<SequenceNumber, AllocationRecord>>,
    // (kind, display identifier) of everything issued so far.
    issued: HashSet<(&'static str, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held for a category.
    pub fn count(&self, category: &Category) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.records.get(category).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }

    /// All records for a category in sequence order.
    pub fn records(&self, category: &Category) -> Vec<AllocationRecord> {
        self.inner
            .lock()
            .map(|inner| {
                inner
                    .records
                    .get(category)
                    .map(|per_cat| per_cat.values().cloned().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl SequenceStore for MemoryStore {
    async fn find_max(
        &self,
        category: &Category,
    ) -> Result<Option<AllocationRecord>, AllocError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| AllocError::storage(anyhow!("memory store lock poisoned")))?;

        Ok(inner
            .records
            .get(category)
            .and_then(|per_cat| per_cat.last_key_value())
            .map(|(_, record)| record.clone()))
    }

    async fn insert(&self, record: AllocationRecord) -> Result<AllocationRecord, AllocError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AllocError::storage(anyhow!("memory store lock poisoned")))?;

        let issued_key = (record.category.kind(), record.identifier.as_str().to_string());
        if inner.issued.contains(&issued_key) {
            return Err(AllocError::DuplicateKey);
        }
        let per_cat = inner.records.entry(record.category.clone()).or_default();
        if per_cat.contains_key(&record.sequence) {
            return Err(AllocError::DuplicateKey);
        }
        per_cat.insert(record.sequence, record.clone());
        inner.issued.insert(issued_key);
        Ok(record)
    }
}

/// Seeded reference data: which batches, streams and subjects exist.
#[derive(Default)]
pub struct MemoryDirectory {
    batches: HashSet<String>,
    streams: HashSet<String>,
    subjects: HashSet<String>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batches<I, S>(mut self, batches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.batches.extend(batches.into_iter().map(Into::into));
        self
    }

    pub fn with_streams<I, S>(mut self, streams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.streams.extend(streams.into_iter().map(Into::into));
        self
    }

    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects.extend(subjects.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl CategoryDirectory for MemoryDirectory {
    async fn exists(&self, category: &Category) -> Result<bool, AllocError> {
        Ok(match category {
            Category::Registration { batch, stream } => {
                self.batches.contains(batch.as_str()) && self.streams.contains(stream.as_str())
            }
            Category::Book { subject } => self.subjects.contains(subject.as_str()),
        })
    }
}
