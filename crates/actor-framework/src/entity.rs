//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every record type (Product, Payment, Order, …)
//! must implement to be served by the generic `ResourceActor`. It specifies associated types for
//! IDs, creation DTOs, the injected context and errors, and provides the two lifecycle hooks the
//! workflow needs (`on_create`, `on_load`).
//!
//! # Architecture Note
//! Records are **immutable once written**. A create request builds the record in memory, lets
//! the entity run its `on_create` hook (which may call other actors through the context), and
//! only then performs a single storage write. There is no update or delete path.
//!
//! Reads go the other way: the record is fetched from storage and handed to `on_load`, which may
//! attach transient data (e.g. an enrichment pulled from another actor). Whatever `on_load`
//! attaches is returned to the caller and never written back.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_load`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks can await calls to other actors. The `Context` type is
/// injected into every hook at `run()` time ("late binding"), which keeps actor construction free
/// of dependency cycles.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this record (e.g., a short token).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync + 'static;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per actor rather than per message. Hook failures travel through the
    /// framework boxed and are recovered by the domain client with a downcast, so callers see
    /// the entity's own error type unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Logical table name, used in logs and by storage backends.
    const TABLE: &'static str;

    /// Returns the record's primary key.
    fn id(&self) -> &Self::Id;

    /// Construct the full record from the freshly minted ID and the payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built and before it is persisted.
    /// An error aborts the create; nothing is written.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called on every record returned by a read.
    /// Mutations made here are visible to the caller only.
    async fn on_load(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
