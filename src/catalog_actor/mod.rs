//! The catalog component: owns the product records.

pub mod entity;
pub mod error;

pub use error::*;

use actor_framework::{IdGenerator, ResourceActor, ShortToken, Store};

use crate::clients::CatalogClient;
use crate::model::{Product, ProductId};

/// Creates the catalog actor over `store` and its client.
///
/// Product ids are eight uppercase hexadecimal characters.
pub fn new<S: Store<Product>>(mailbox: usize, store: S) -> (ResourceActor<Product, S>, CatalogClient) {
    let token = ShortToken::default();
    let (actor, generic_client) =
        ResourceActor::new(mailbox, store, move || ProductId::from(token.next_id()));
    (actor, CatalogClient::new(generic_client))
}
