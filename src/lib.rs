//! # Order Workflow
//!
//! Three cooperating components, each a Tokio actor built on [`actor_framework`]:
//!
//! - **Catalog** ([`catalog_actor`]): owns the products and their prices.
//! - **Payment** ([`payment_actor`]): records a payment for every charge it is asked
//!   to take and approves it.
//! - **Order** ([`order_actor`]): places orders by pricing them against the catalog and
//!   charging the total, then reads them back enriched with product details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Records ([`model`])
//! Plain data: [`Product`](model::Product), [`Payment`](model::Payment),
//! [`Order`](model::Order) and their creation parameters.
//!
//! ### 2. The Components ([`catalog_actor`], [`payment_actor`], [`order_actor`])
//! Each implements [`ActorEntity`](actor_framework::ActorEntity) for its record and
//! defines its own error enum. The order workflow itself is the order entity's
//! `on_create` hook:
//!
//! ```text
//! INITIATED ──list products──▶ PRICED ──charge total──▶ CHARGED ──write once──▶ stored
//! ```
//!
//! A failure at any arrow aborts the request before the write, so no order is left
//! half-made. A payment taken before a failed write is not refunded.
//!
//! ### 3. The Interface ([`clients`], [`api`])
//! Domain clients hide the framework's messages; the services in [`api`] speak the
//! request/response contracts with their JSON field names.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`OrderSystem`](lifecycle::OrderSystem) builds the stores, spawns the actors, injects
//! the order actor's dependencies and shuts everything down in order.
//!
//! ### 5. Settings ([`config`]) and Storage ([`storage`])
//! Mailbox size, store pool limits, call deadlines and the log format, from the
//! environment. Records live in memory unless `DATABASE_URL` points at PostgreSQL and
//! the crate was built with the `postgres` feature.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run against PostgreSQL
//! DATABASE_URL=postgres://localhost/orders cargo run --features postgres
//!
//! # Run the tests
//! cargo test --workspace
//! ```

pub mod api;
pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod payment_actor;
pub mod storage;
