use std::time::Duration;

use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::catalog_actor::CatalogError;
use crate::model::{Product, ProductCreate, ProductId};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    /// Gives every call made through this client a deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(timeout),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Products whose id is in `ids`, each at most once; unknown ids are skipped.
    /// An empty `ids` lists the whole catalog.
    #[instrument(skip(self))]
    pub async fn list_products(&self, ids: Vec<ProductId>) -> Result<Vec<Product>, CatalogError> {
        self.list(ids).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get(id.clone())
            .await?
            .ok_or(CatalogError::NotFound(id))
    }
}

#[async_trait]
impl ActorClient<Product> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CatalogError::from_framework(e)
    }
}
