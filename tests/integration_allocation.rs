mod common;

use common::{CollidingStore, allocator, allocator_over, book, registration};
use rollbook::{
    AllocError, AllocationRecord, AllocatorConfig, CodecError, Identifier, MemoryStore,
    SequenceNumber, SequenceStore, codec,
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_first_student_in_batch_and_stream_gets_0001() {
    let allocator = allocator();
    let record = allocator
        .allocate(
            registration("24", "SC"),
            json!({"full_name": "A. Perera", "email": "a.perera@example.com"}),
        )
        .await
        .unwrap();

    assert_eq!(record.identifier.as_str(), "24SC0001");
    assert_eq!(record.sequence.get(), 1);
    assert_eq!(record.payload["full_name"], "A. Perera");
}

#[tokio::test]
async fn test_second_student_gets_0002() {
    let allocator = allocator();
    let category = registration("24", "SC");

    allocator.allocate(category.clone(), json!({})).await.unwrap();
    let second = allocator.allocate(category, json!({})).await.unwrap();

    assert_eq!(second.identifier.as_str(), "24SC0002");
}

#[tokio::test]
async fn test_first_book_in_empty_subject_gets_0001() {
    let allocator = allocator();
    let record = allocator
        .allocate(book("ICT"), json!({"title": "Computer Networks"}))
        .await
        .unwrap();

    assert_eq!(record.identifier.as_str(), "ICT0001");
}

#[tokio::test]
async fn test_serialized_allocation_is_gap_free() {
    let store = Arc::new(MemoryStore::new());
    let allocator = allocator_over(store.clone(), AllocatorConfig::default());
    let category = registration("24", "SC");

    for _ in 0..25 {
        allocator.allocate(category.clone(), json!({})).await.unwrap();
    }

    let issued: Vec<u16> = store
        .records(&category)
        .iter()
        .map(|r| codec::decode(r.identifier.as_str(), &category).unwrap().get())
        .collect();
    let expected: Vec<u16> = (1..=25).collect();
    assert_eq!(issued, expected);
}

#[tokio::test]
async fn test_categories_allocate_independently() {
    let allocator = allocator();

    let ict = allocator.allocate(book("ICT"), json!({})).await.unwrap();
    let bio = allocator.allocate(book("BIO"), json!({})).await.unwrap();
    let reg = allocator
        .allocate(registration("25", "AR"), json!({}))
        .await
        .unwrap();

    assert_eq!(ict.identifier.as_str(), "ICT0001");
    assert_eq!(bio.identifier.as_str(), "BIO0001");
    assert_eq!(reg.identifier.as_str(), "25AR0001");
}

#[tokio::test]
async fn test_prefix_aliasing_categories_never_share_an_identifier() {
    // batch "2" + stream "4SC" concatenates to the same prefix as batch
    // "24" + stream "SC". Both are valid categories, but only one of them
    // may ever hold "24SC0001".
    let store = Arc::new(MemoryStore::new());
    let directory = rollbook::MemoryDirectory::new()
        .with_batches(["24", "2"])
        .with_streams(["SC", "4SC"]);
    let allocator = rollbook::Allocator::new(
        store.clone(),
        Arc::new(directory),
        AllocatorConfig::default(),
    );

    let first = allocator
        .allocate(registration("24", "SC"), json!({}))
        .await
        .unwrap();
    assert_eq!(first.identifier.as_str(), "24SC0001");

    let err = allocator
        .allocate(registration("2", "4SC"), json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, AllocError::DuplicateKey));
    assert_eq!(store.count(&registration("2", "4SC")), 0);
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let allocator = allocator();
    let err = allocator
        .allocate(book("LAW"), json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, AllocError::CategoryNotFound(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_corrupt_stored_identifier_surfaces_as_format_error() {
    let store = Arc::new(MemoryStore::new());
    let category = registration("24", "SC");

    // A record whose display identifier was mangled upstream.
    store
        .insert(AllocationRecord::new(
            category.clone(),
            SequenceNumber::new(1).unwrap(),
            Identifier::from_stored("24SC00XX"),
            json!({}),
        ))
        .await
        .unwrap();

    let allocator = allocator_over(store, AllocatorConfig::default());
    let err = allocator.allocate(category, json!({})).await.unwrap_err();
    assert!(matches!(
        err,
        AllocError::Codec(CodecError::Format { .. })
    ));
}

#[tokio::test]
async fn test_exhausted_category_fails_and_stays_full() {
    let store = Arc::new(MemoryStore::new());
    let category = book("ICT");

    // Seed the category at capacity.
    let last = SequenceNumber::new(9998).unwrap();
    store
        .insert(AllocationRecord::new(
            category.clone(),
            last.succ().unwrap(),
            codec::encode(&category, last).unwrap(),
            json!({}),
        ))
        .await
        .unwrap();

    let allocator = allocator_over(store.clone(), AllocatorConfig::default());
    let err = allocator.allocate(category.clone(), json!({})).await.unwrap_err();

    assert!(matches!(err, AllocError::SpaceExhausted));
    assert_eq!(store.count(&category), 1);
}

#[tokio::test]
async fn test_duplicate_key_race_is_retried_and_recovers() {
    // One simulated lost race; the bounded retry should win the second
    // attempt transparently.
    let store = Arc::new(CollidingStore::new(1));
    let allocator = allocator_over(store, AllocatorConfig::default());

    let record = allocator
        .allocate(book("ICT"), json!({}))
        .await
        .unwrap();
    assert_eq!(record.identifier.as_str(), "ICT0001");
}

#[tokio::test]
async fn test_duplicate_key_surfaces_after_attempts_exhausted() {
    let store = Arc::new(CollidingStore::new(10));
    let allocator = allocator_over(
        store,
        AllocatorConfig {
            max_attempts: 3,
            ..AllocatorConfig::default()
        },
    );

    let err = allocator.allocate(book("ICT"), json!({})).await.unwrap_err();
    assert!(matches!(err, AllocError::DuplicateKey));
    assert!(err.is_retryable());
}
