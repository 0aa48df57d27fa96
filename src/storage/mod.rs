//! Storage backends beyond the framework's [`MemoryStore`](actor_framework::MemoryStore).
//!
//! With the `postgres` feature, [`postgres`] keeps each component's records in its own
//! table. [`Stores::from_config`](crate::lifecycle::Stores::from_config) picks it when
//! `DATABASE_URL` is set.

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use self::postgres::{PgRecord, PgStore};
