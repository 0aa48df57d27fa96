//! The payment component: records charges.
//!
//! There is no real processor behind it. Every charge that reaches the store is
//! recorded and approved, whatever the amount, and the order it names is never looked up.

pub mod entity;
pub mod error;

pub use error::*;

use actor_framework::{IdGenerator, ResourceActor, ShortToken, Store};

use crate::clients::PaymentClient;
use crate::model::{Payment, PaymentId};

/// Creates the payment actor over `store` and its client.
pub fn new<S: Store<Payment>>(mailbox: usize, store: S) -> (ResourceActor<Payment, S>, PaymentClient) {
    let token = ShortToken::default();
    let (actor, generic_client) =
        ResourceActor::new(mailbox, store, move || PaymentId::from(token.next_id()));
    (actor, PaymentClient::new(generic_client))
}
