//! Service façades over the component clients.

use tracing::instrument;

use super::dto::*;
use crate::catalog_actor::CatalogError;
use crate::clients::{CatalogClient, OrderClient, PaymentClient};
use crate::model::{OrderCreate, ProductCreate};
use crate::order_actor::OrderError;
use crate::payment_actor::PaymentError;

#[derive(Clone)]
pub struct CatalogService {
    catalog: CatalogClient,
}

impl CatalogService {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    #[instrument(skip_all)]
    pub async fn create_product(
        &self,
        req: CreateProductRequest,
    ) -> Result<CreateProductResponse, CatalogError> {
        let product = self
            .catalog
            .create_product(ProductCreate::new(req.display_name, req.price))
            .await?;
        Ok(CreateProductResponse { product })
    }

    #[instrument(skip_all, fields(requested = req.ids.len()))]
    pub async fn list_products(
        &self,
        req: ListProductsRequest,
    ) -> Result<ListProductsResponse, CatalogError> {
        let products = self.catalog.list_products(req.ids).await?;
        Ok(ListProductsResponse { products })
    }

    #[instrument(skip_all, fields(product_id = %req.id))]
    pub async fn get_product(&self, req: GetProductRequest) -> Result<GetProductResponse, CatalogError> {
        let product = self.catalog.get_product(req.id).await?;
        Ok(GetProductResponse { product })
    }
}

#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentClient,
}

impl PaymentService {
    pub fn new(payments: PaymentClient) -> Self {
        Self { payments }
    }

    #[instrument(skip_all, fields(order_id = %req.order_id, amount = req.amount))]
    pub async fn charge(&self, req: ChargeRequest) -> Result<ChargeResponse, PaymentError> {
        let receipt = self.payments.charge(req.order_id, req.amount).await?;
        Ok(receipt.into())
    }
}

#[derive(Clone)]
pub struct OrderService {
    orders: OrderClient,
}

impl OrderService {
    pub fn new(orders: OrderClient) -> Self {
        Self { orders }
    }

    #[instrument(skip_all, fields(user_id = %req.user_id))]
    pub async fn create_order(&self, req: CreateOrderRequest) -> Result<CreateOrderResponse, OrderError> {
        let order = self
            .orders
            .create_order(OrderCreate::new(req.user_id, req.product_ids))
            .await?;
        Ok(order.into())
    }

    #[instrument(skip_all, fields(order_id = %req.order_id))]
    pub async fn get_order(&self, req: GetOrderRequest) -> Result<GetOrderResponse, OrderError> {
        let order = self.orders.get_order(req.order_id).await?;
        Ok(order.into())
    }
}
