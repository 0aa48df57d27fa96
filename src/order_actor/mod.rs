//! The order component: places orders and reads them back enriched.

pub mod entity;
pub mod error;

pub use entity::OrderContext;
pub use error::*;

use actor_framework::{IdGenerator, ResourceActor, ShortToken, Store};

use crate::clients::OrderClient;
use crate::model::{Order, OrderId};

/// Creates the order actor over `store` and its client.
///
/// The actor still needs an [`OrderContext`] passed to
/// [`run`](ResourceActor::run) before it can price and charge anything.
pub fn new<S: Store<Order>>(mailbox: usize, store: S) -> (ResourceActor<Order, S>, OrderClient) {
    let token = ShortToken::default();
    with_ids(mailbox, store, move || OrderId::from(token.next_id()))
}

/// Same as [`new`], minting ids with `ids` instead of random tokens.
pub fn with_ids<S: Store<Order>>(
    mailbox: usize,
    store: S,
    ids: impl IdGenerator<OrderId>,
) -> (ResourceActor<Order, S>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox, store, ids);
    (actor, OrderClient::new(generic_client))
}
