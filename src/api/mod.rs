//! Request/response contracts of the three services.
//!
//! The [`dto`] types carry the JSON field names callers see (`userId`, `productIds`,
//! `displayName`, `totalAmount`, ...). The services in [`service`] translate them to
//! client calls and back; they hold no state of their own.

pub mod dto;
pub mod service;

pub use dto::*;
pub use service::*;
