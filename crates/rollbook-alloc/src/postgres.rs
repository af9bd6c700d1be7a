//! Postgres-backed [`SequenceStore`].
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE allocations (
//!     id UUID PRIMARY KEY,
//!     category_kind TEXT NOT NULL,
//!     batch TEXT,
//!     stream TEXT,
//!     subject TEXT,
//!     seq INT NOT NULL,
//!     identifier TEXT NOT NULL,
//!     payload JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     UNIQUE (category_kind, batch, stream, subject, seq),
//!     UNIQUE (category_kind, identifier)
//! );
//! ```
//!
//! The unique constraint on the structured `(category, seq)` columns is
//! what turns a cross-process allocation race into a clean
//! [`AllocError::DuplicateKey`] instead of silent duplicate issuance. The
//! display identifier is stored as derived data, but still carries a
//! per-kind unique constraint of its own: categories whose keys
//! concatenate to the same prefix (batch `"2"` + stream `"4SC"` vs batch
//! `"24"` + stream `"SC"`) would otherwise both issue `"24SC0001"`.
//! Scoping it to `category_kind` matches the original layout, where
//! registration numbers and book IDs were primary keys of separate
//! tables.
//!
//! Queries use the runtime sqlx API rather than the compile-time-checked
//! macros so the crate builds without a reachable database.

use crate::errors::AllocError;
use crate::record::{AllocationRecord, RecordId};
use crate::store::SequenceStore;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rollbook_core::{Category, CategoryKey, Identifier, SequenceNumber};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AllocationRow {
    id: Uuid,
    category_kind: String,
    batch: Option<String>,
    stream: Option<String>,
    subject: Option<String>,
    seq: i32,
    identifier: String,
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl AllocationRow {
    fn into_record(self) -> Result<AllocationRecord, AllocError> {
        let category = match (self.category_kind.as_str(), self.batch, self.stream, self.subject) {
            ("registration", Some(batch), Some(stream), None) => {
                Category::registration(CategoryKey::new(batch)?, CategoryKey::new(stream)?)?
            }
            ("book", None, None, Some(subject)) => Category::book(CategoryKey::new(subject)?)?,
            (kind, ..) => {
                return Err(AllocError::storage(anyhow!(
                    "allocation row {} has inconsistent category columns (kind {kind:?})",
                    self.id
                )));
            }
        };

        let sequence = u16::try_from(self.seq)
            .ok()
            .and_then(SequenceNumber::new)
            .ok_or_else(|| {
                AllocError::storage(anyhow!(
                    "allocation row {} has out-of-range seq {}",
                    self.id,
                    self.seq
                ))
            })?;

        Ok(AllocationRecord {
            id: RecordId::from_uuid(self.id),
            category,
            sequence,
            identifier: Identifier::from_stored(self.identifier),
            payload: self.payload,
            created_at: self.created_at,
        })
    }
}

/// The nullable category columns for a given category value.
fn category_columns(category: &Category) -> (Option<&str>, Option<&str>, Option<&str>) {
    match category {
        Category::Registration { batch, stream } => {
            (Some(batch.as_str()), Some(stream.as_str()), None)
        }
        Category::Book { subject } => (None, None, Some(subject.as_str())),
    }
}

#[async_trait]
impl SequenceStore for PgStore {
    #[instrument(skip(self), fields(category = %category))]
    async fn find_max(
        &self,
        category: &Category,
    ) -> Result<Option<AllocationRecord>, AllocError> {
        let (batch, stream, subject) = category_columns(category);

        let row = sqlx::query_as::<_, AllocationRow>(
            r#"
            SELECT id, category_kind, batch, stream, subject, seq, identifier, payload, created_at
            FROM allocations
            WHERE category_kind = $1
              AND batch IS NOT DISTINCT FROM $2
              AND stream IS NOT DISTINCT FROM $3
              AND subject IS NOT DISTINCT FROM $4
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .bind(category.kind())
        .bind(batch)
        .bind(stream)
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch max allocation for category")
        .map_err(AllocError::storage)?;

        row.map(AllocationRow::into_record).transpose()
    }

    #[instrument(skip(self, record), fields(category = %record.category, identifier = %record.identifier))]
    async fn insert(&self, record: AllocationRecord) -> Result<AllocationRecord, AllocError> {
        let (batch, stream, subject) = category_columns(&record.category);

        let row = sqlx::query_as::<_, AllocationRow>(
            r#"
            INSERT INTO allocations (id, category_kind, batch, stream, subject, seq, identifier, payload, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, category_kind, batch, stream, subject, seq, identifier, payload, created_at
            "#,
        )
        .bind(record.id.into_inner())
        .bind(record.category.kind())
        .bind(batch)
        .bind(stream)
        .bind(subject)
        .bind(i32::from(record.sequence.get()))
        .bind(record.identifier.as_str())
        .bind(&record.payload)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AllocError::DuplicateKey;
                }
            }
            AllocError::storage(anyhow::Error::from(e).context("Failed to insert allocation"))
        })?;

        row.into_record()
    }
}
