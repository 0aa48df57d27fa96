//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each component gets a cloneable client that speaks its own record and error types,
//! so callers never see framework messages or [`FrameworkError`](actor_framework::FrameworkError).

pub mod catalog_client;
pub mod order_client;
pub mod payment_client;

pub use catalog_client::*;
pub use order_client::*;
pub use payment_client::*;
