//! The allocation service.
//!
//! Allocation is a read-max-then-insert sequence against shared persisted
//! state, so it is serialized per category: each category has an advisory
//! lock in an in-process registry, acquired with a bounded wait. The lock
//! covers the race between concurrent requests in this process; a race
//! with another process surfaces as a duplicate-key rejection from the
//! store and is retried a bounded number of times under the same lock.
//!
//! An allocation's only side effect is the store's atomic insert, so a
//! caller dropping the future mid-flight either committed the record or
//! left no trace.

use crate::config::AllocatorConfig;
use crate::errors::AllocError;
use crate::record::AllocationRecord;
use crate::store::{CategoryDirectory, SequenceStore};
use anyhow::anyhow;
use rollbook_core::{Category, SequenceNumber, codec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

pub struct Allocator<S, D> {
    store: Arc<S>,
    directory: Arc<D>,
    config: AllocatorConfig,
    // One advisory lock per category, created on first use. Category
    // cardinality is tiny (batches x streams + subjects), so entries are
    // never reclaimed.
    locks: StdMutex<HashMap<Category, Arc<Mutex<()>>>>,
}

impl<S, D> Allocator<S, D>
where
    S: SequenceStore,
    D: CategoryDirectory,
{
    pub fn new(store: Arc<S>, directory: Arc<D>, config: AllocatorConfig) -> Self {
        Self {
            store,
            directory,
            config,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Allocates the next identifier in `category` and persists a record
    /// carrying `payload` under it.
    ///
    /// May block up to the configured lock timeout waiting for an earlier
    /// allocation in the same category; fails with [`AllocError::Busy`]
    /// rather than waiting longer.
    #[instrument(skip(self, payload), fields(category = %category))]
    pub async fn allocate(
        &self,
        category: Category,
        payload: serde_json::Value,
    ) -> Result<AllocationRecord, AllocError> {
        // Defensive re-check; the routing layer is expected to have
        // validated the category against reference data already.
        if !self.directory.exists(&category).await? {
            return Err(AllocError::CategoryNotFound(category.to_string()));
        }

        let lock = self.category_lock(&category)?;
        let _guard = timeout(self.config.lock_timeout, lock.lock())
            .await
            .map_err(|_| AllocError::Busy)?;

        let mut attempt = 1;
        loop {
            match self.try_allocate(&category, payload.clone()).await {
                Err(AllocError::DuplicateKey) if attempt < self.config.max_attempts => {
                    warn!(attempt, "identifier collision, retrying allocation");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// One pass of the read-max-then-insert sequence.
    async fn try_allocate(
        &self,
        category: &Category,
        payload: serde_json::Value,
    ) -> Result<AllocationRecord, AllocError> {
        let previous = match self.store.find_max(category).await? {
            Some(existing) => codec::decode(existing.identifier.as_str(), category)?,
            None => SequenceNumber::ZERO,
        };

        let sequence = previous.succ()?;
        let identifier = codec::encode(category, previous)?;
        debug!(%identifier, previous = %previous, "composed next identifier");

        let record = AllocationRecord::new(category.clone(), sequence, identifier, payload);
        self.store.insert(record).await
    }

    fn category_lock(&self, category: &Category) -> Result<Arc<Mutex<()>>, AllocError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| AllocError::storage(anyhow!("allocator lock registry poisoned")))?;
        Ok(locks.entry(category.clone()).or_default().clone())
    }
}
