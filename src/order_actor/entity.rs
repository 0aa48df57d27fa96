//! [`ActorEntity`] implementation for [`Order`].
//!
//! The order workflow lives in the hooks:
//!
//! * `on_create` prices the freshly initiated order against the catalog, rejects a
//!   total too large to represent, charges the total through the payment gateway and
//!   marks the order completed when the charge succeeds. The actor persists the order only after this hook returns `Ok`, so a
//!   failed pricing or charge step leaves no order behind.
//! * `on_load` attaches the catalog's current view of the order's products to every
//!   order read back. The stored total and status are left alone.

use std::sync::Arc;

use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::catalog_actor::CatalogError;
use crate::clients::{CatalogClient, PaymentGateway};
use crate::model::{Order, OrderCreate, OrderId, Product, ProductId};
use crate::order_actor::OrderError;

/// Dependencies injected into the order actor when it starts.
#[derive(Clone)]
pub struct OrderContext {
    pub catalog: CatalogClient,
    pub payments: Arc<dyn PaymentGateway>,
}

impl OrderContext {
    pub fn new(catalog: CatalogClient, payments: Arc<dyn PaymentGateway>) -> Self {
        Self { catalog, payments }
    }

    /// Resolves `ids` against the catalog.
    ///
    /// An empty list resolves to no products without calling the catalog, whose list
    /// operation would otherwise answer with every product it holds.
    async fn resolve(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.catalog.list_products(ids.to_vec()).await
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Context = OrderContext;
    type Error = OrderError;

    const TABLE: &'static str = "order";

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Order::new(id, params))
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let products = ctx.resolve(&self.product_ids).await?;
        if self.price(&products).is_none() {
            warn!(order_id = %self.id, resolved = products.len(), "Order total overflows, not charging");
            return Err(OrderError::TotalOverflow(self.id.clone()));
        }
        debug!(
            order_id = %self.id,
            requested = self.product_ids.len(),
            resolved = products.len(),
            total = self.total_amount,
            "Priced"
        );

        let receipt = ctx.payments.charge(self.id.clone(), self.total_amount).await?;
        if receipt.success {
            self.complete();
            info!(order_id = %self.id, transaction_id = %receipt.transaction_id, "Charged");
        } else {
            warn!(order_id = %self.id, transaction_id = %receipt.transaction_id, "Charge declined, order stays pending");
        }
        Ok(())
    }

    async fn on_load(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let products = ctx.resolve(&self.product_ids).await?;
        self.enrich(products);
        Ok(())
    }
}
