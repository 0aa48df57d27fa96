use std::time::Duration;

use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::model::{Order, OrderCreate, OrderId};
use crate::order_actor::OrderError;

/// Client for interacting with the order actor.
///
/// Pricing and charging happen inside the actor's `on_create` hook; this client only
/// carries the request there and the result back.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Gives every call made through this client a deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(timeout),
        }
    }

    /// Places an order. Every call creates a new order and a new charge, even for an
    /// identical request.
    #[instrument(skip(self, params), fields(owner_id = %params.owner_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create_order called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.id, status = %order.status, total = order.total_amount, "Order placed");
        Ok(order)
    }

    /// Reads an order back with its products resolved from the catalog.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id.clone()).await?.ok_or(OrderError::NotFound(id))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from_framework(e)
    }
}
