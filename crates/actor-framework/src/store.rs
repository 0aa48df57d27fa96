//! # Storage Handles
//!
//! Each actor owns exactly one storage handle, constructed explicitly by whoever wires the
//! system and passed into [`ResourceActor::new`](crate::ResourceActor::new). There is no
//! process-wide pool: two components never share a handle, and no component ever reads another
//! component's records except through that component's client.
//!
//! ## The `Store` contract
//!
//! | Operation | Semantics |
//! |-----------|-----------|
//! | `insert`  | single-row write; a duplicate primary key is [`StoreError::Conflict`] |
//! | `fetch`   | point lookup, `Ok(None)` when absent |
//! | `list`    | empty filter = all rows; otherwise distinct matches only |
//!
//! Concurrency safety is the store's job. The actor dispatches requests concurrently and does
//! no locking of its own.

use crate::entity::ActorEntity;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, Semaphore};
use tracing::debug;

/// Errors raised by a storage backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Primary key already present (e.g., an identifier collision).
    #[error("duplicate key {id} in {table}")]
    Conflict { table: &'static str, id: String },
    /// No connection could be acquired within the configured timeout.
    #[error("timed out acquiring a {table} connection after {waited:?}")]
    PoolTimeout {
        table: &'static str,
        waited: Duration,
    },
    /// The backend is closed or otherwise unreachable.
    #[error("{table} store unavailable: {reason}")]
    Unavailable { table: &'static str, reason: String },
    /// The row cannot be represented by the backend's schema.
    #[error("{table} store rejected the row: {reason}")]
    Rejected { table: &'static str, reason: String },
}

/// Storage backend for a single record type.
#[async_trait]
pub trait Store<T: ActorEntity>: Send + Sync + 'static {
    /// Writes a new row. Never overwrites.
    async fn insert(&self, record: T) -> Result<(), StoreError>;

    /// Loads a single row by primary key.
    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, StoreError>;

    /// Loads the rows whose key is in `ids`, or every row when `ids` is empty.
    async fn list(&self, ids: &[T::Id]) -> Result<Vec<T>, StoreError>;
}

#[async_trait]
impl<T: ActorEntity, S: Store<T> + ?Sized> Store<T> for Arc<S> {
    async fn insert(&self, record: T) -> Result<(), StoreError> {
        (**self).insert(record).await
    }

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        (**self).fetch(id).await
    }

    async fn list(&self, ids: &[T::Id]) -> Result<Vec<T>, StoreError> {
        (**self).list(ids).await
    }
}

/// Sizing for a [`MemoryStore`] connection pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    /// Maximum number of operations in flight at once.
    pub max_connections: usize,
    /// How long an operation waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// In-memory table behind a bounded pool of "connections".
///
/// The pool is a semaphore: every operation holds one permit for its duration, and waits at
/// most `acquire_timeout` for it. This is the only load shedding in the system.
pub struct MemoryStore<T: ActorEntity> {
    rows: RwLock<HashMap<T::Id, T>>,
    pool: Semaphore,
    options: PoolOptions,
}

impl<T: ActorEntity> MemoryStore<T> {
    /// Builds an empty store. `max_connections` is capped at [`Semaphore::MAX_PERMITS`].
    pub fn new(options: PoolOptions) -> Self {
        let max_connections = options.max_connections.min(Semaphore::MAX_PERMITS);
        Self {
            rows: RwLock::new(HashMap::new()),
            pool: Semaphore::new(max_connections),
            options: PoolOptions {
                max_connections,
                ..options
            },
        }
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, StoreError> {
        let waited = self.options.acquire_timeout;
        match tokio::time::timeout(waited, self.pool.acquire()).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(StoreError::Unavailable {
                table: T::TABLE,
                reason: "pool closed".to_string(),
            }),
            Err(_) => Err(StoreError::PoolTimeout {
                table: T::TABLE,
                waited,
            }),
        }
    }
}

impl<T: ActorEntity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(PoolOptions::default())
    }
}

#[async_trait]
impl<T: ActorEntity> Store<T> for MemoryStore<T> {
    async fn insert(&self, record: T) -> Result<(), StoreError> {
        let _conn = self.acquire().await?;
        let mut rows = self.rows.write().await;
        let id = record.id().clone();
        if rows.contains_key(&id) {
            return Err(StoreError::Conflict {
                table: T::TABLE,
                id: id.to_string(),
            });
        }
        rows.insert(id, record);
        debug!(table = T::TABLE, rows = rows.len(), "insert");
        Ok(())
    }

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        let _conn = self.acquire().await?;
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn list(&self, ids: &[T::Id]) -> Result<Vec<T>, StoreError> {
        let _conn = self.acquire().await?;
        let rows = self.rows.read().await;
        if ids.is_empty() {
            return Ok(rows.values().cloned().collect());
        }
        let wanted: HashSet<&T::Id> = ids.iter().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| rows.get(id).cloned())
            .collect())
    }
}
