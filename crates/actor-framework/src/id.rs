//! # Identifier Generation
//!
//! IDs are minted by the actor, not the caller. The strategy is pluggable through
//! [`IdGenerator`], so a longer token or a collision-checking generator can replace the default
//! without touching any calling code.
//!
//! Any `Fn() -> Id` closure is a generator, which keeps tests deterministic:
//!
//! ```rust
//! use actor_framework::IdGenerator;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! let counter = AtomicU64::new(1);
//! let next = move || format!("order_{}", counter.fetch_add(1, Ordering::SeqCst));
//! assert_eq!(next.next_id(), "order_1");
//! assert_eq!(next.next_id(), "order_2");
//! ```

use uuid::Uuid;

/// Produces fresh identifiers for newly created records.
pub trait IdGenerator<Id>: Send + Sync + 'static {
    fn next_id(&self) -> Id;
}

impl<Id, F> IdGenerator<Id> for F
where
    F: Fn() -> Id + Send + Sync + 'static,
{
    fn next_id(&self) -> Id {
        self()
    }
}

/// Short uppercase token: the leading hex characters of a random v4 UUID.
///
/// Eight characters give 32 bits of randomness. Collisions are possible and are not retried
/// here; a duplicate surfaces as a storage conflict on insert.
#[derive(Debug, Clone, Copy)]
pub struct ShortToken {
    len: usize,
}

impl ShortToken {
    pub const DEFAULT_LEN: usize = 8;

    /// `len` is clamped to the 32 hex digits a UUID provides.
    pub fn with_len(len: usize) -> Self {
        Self { len: len.clamp(1, 32) }
    }
}

impl Default for ShortToken {
    fn default() -> Self {
        Self::with_len(Self::DEFAULT_LEN)
    }
}

impl IdGenerator<String> for ShortToken {
    fn next_id(&self) -> String {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(self.len);
        token.make_ascii_uppercase();
        token
    }
}
