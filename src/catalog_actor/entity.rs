//! [`ActorEntity`] implementation for [`Product`].
//!
//! Products need nothing from other components, so the context is `()` and both hooks
//! keep their default no-op behavior.

use actor_framework::ActorEntity;
use async_trait::async_trait;

use crate::catalog_actor::CatalogError;
use crate::model::{Product, ProductCreate, ProductId};

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Context = ();
    type Error = CatalogError;

    const TABLE: &'static str = "product";

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, CatalogError> {
        Ok(Self::new(id, params.display_name, params.price))
    }
}
