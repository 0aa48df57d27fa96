//! # Actor Framework
//!
//! This crate provides the building blocks for running independently owned record services
//! (a catalog, a payment ledger, an order book, …) as Tokio actors that talk to each other only
//! through typed request/response messages.
//!
//! ## Why Actors for Services?
//!
//! Each component must own its records exclusively and expose them only through a narrow
//! contract. An actor gives us exactly that shape:
//!
//! - **Isolation**: a component's storage handle lives inside its actor; nothing else can reach it
//! - **Uniform contracts**: every component answers the same `Create`/`Get`/`List` messages
//! - **Composition**: a component that depends on another receives that component's *client*
//!   as its context, and calls it from inside its lifecycle hooks
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model) - Foundational concurrency pattern by Carl Hewitt
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your record type and its hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message dispatch, one task per request
//! 3. **Storage Layer** ([`Store`], [`MemoryStore`]) - The component's own storage handle
//! 4. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Core Abstractions
//!
//! ### [`ActorEntity`] - The Record
//!
//! ```rust
//! use actor_framework::{ActorEntity, MemoryStore, ResourceActor};
//! use async_trait::async_trait;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! // 1. Define the Entity
//! #[derive(Clone, Debug)]
//! struct Account {
//!     id: String,
//!     owner: String,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("account error: {0}")]
//! struct AccountError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Account {
//!     type Id = String;
//!     type Create = String;
//!     type Context = ();
//!     type Error = AccountError;
//!     const TABLE: &'static str = "account";
//!
//!     fn id(&self) -> &String { &self.id }
//!
//!     fn from_create_params(id: String, owner: String) -> Result<Self, Self::Error> {
//!         if owner.is_empty() {
//!             return Err(AccountError("owner required".into()));
//!         }
//!         Ok(Self { id, owner })
//!     }
//! }
//!
//! // 2. Use the Actor
//! #[tokio::main]
//! async fn main() {
//!     let counter = AtomicU32::new(1);
//!     let next_id = move || format!("acct_{}", counter.fetch_add(1, Ordering::SeqCst));
//!
//!     // Create actor and client
//!     let (actor, client) = ResourceActor::<Account>::new(10, MemoryStore::default(), next_id);
//!
//!     // Spawn the actor
//!     tokio::spawn(actor.run(()));
//!
//!     // Use the client
//!     let created = client.create("Alice".into()).await.unwrap();
//!     let account = client.get(created.id).await.unwrap().unwrap();
//!     assert_eq!(account.owner, "Alice");
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at construction time.
//! A component that needs another one declares that component's client as its `Context`:
//!
//! ```rust,ignore
//! impl ActorEntity for Order {
//!     type Context = OrderContext; // { catalog: CatalogClient, payments: Arc<dyn PaymentGateway> }
//!     async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
//!         // price via ctx.catalog, charge via ctx.payments
//!     }
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and spawns one task per request
//! - Steps inside a request are sequential; there is no retry anywhere
//! - The store handle is the only shared mutable state; it synchronizes itself
//! - Dropping a pending call cancels the actor-side work for it
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, a scripted stand-in for any actor, so hooks that
//! call other components can be tested in isolation.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod id;
pub mod message;
pub mod mock;
pub mod store;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use id::{IdGenerator, ShortToken};
pub use message::{ResourceRequest, Response};
pub use store::{MemoryStore, PoolOptions, Store, StoreError};
