use async_trait::async_trait;
use rollbook::{
    AllocError, AllocationRecord, Allocator, AllocatorConfig, Category, CategoryKey,
    MemoryDirectory, MemoryStore, SequenceStore,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Opt-in test logging: `RUST_LOG=debug cargo test -- --nocapture`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn registration(batch: &str, stream: &str) -> Category {
    Category::registration(
        CategoryKey::new(batch).unwrap(),
        CategoryKey::new(stream).unwrap(),
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn book(subject: &str) -> Category {
    Category::book(CategoryKey::new(subject).unwrap()).unwrap()
}

/// Reference data matching the portal fixtures: two batches, two streams,
/// two library subjects.
#[allow(dead_code)]
pub fn seeded_directory() -> MemoryDirectory {
    MemoryDirectory::new()
        .with_batches(["24", "25"])
        .with_streams(["SC", "AR"])
        .with_subjects(["ICT", "BIO"])
}

#[allow(dead_code)]
pub fn allocator_over<S: SequenceStore>(
    store: Arc<S>,
    config: AllocatorConfig,
) -> Allocator<S, MemoryDirectory> {
    Allocator::new(store, Arc::new(seeded_directory()), config)
}

#[allow(dead_code)]
pub fn allocator() -> Allocator<MemoryStore, MemoryDirectory> {
    allocator_over(Arc::new(MemoryStore::new()), AllocatorConfig::default())
}

/// A store that rejects the first `failures` inserts with `DuplicateKey`,
/// simulating another process winning the race, then behaves normally.
#[allow(dead_code)]
pub struct CollidingStore {
    inner: MemoryStore,
    failures: AtomicU32,
}

#[allow(dead_code)]
impl CollidingStore {
    pub fn new(failures: u32) -> Self {
        Self {
            inner: MemoryStore::new(),
            failures: AtomicU32::new(failures),
        }
    }
}

#[async_trait]
impl SequenceStore for CollidingStore {
    async fn find_max(
        &self,
        category: &Category,
    ) -> Result<Option<AllocationRecord>, AllocError> {
        self.inner.find_max(category).await
    }

    async fn insert(&self, record: AllocationRecord) -> Result<AllocationRecord, AllocError> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(AllocError::DuplicateKey);
        }
        self.inner.insert(record).await
    }
}

/// A store whose reads stall, to keep the per-category lock held long
/// enough for a second caller to hit its acquisition timeout.
#[allow(dead_code)]
pub struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

#[allow(dead_code)]
impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl SequenceStore for SlowStore {
    async fn find_max(
        &self,
        category: &Category,
    ) -> Result<Option<AllocationRecord>, AllocError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_max(category).await
    }

    async fn insert(&self, record: AllocationRecord) -> Result<AllocationRecord, AllocError> {
        self.inner.insert(record).await
    }
}
