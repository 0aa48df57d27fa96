use std::sync::{Arc, Mutex};
use std::time::Duration;

use actor_framework::mock::{create_mock_client, MockClient};
use actor_framework::{FrameworkError, MemoryStore, Store, StoreError};
use async_trait::async_trait;
use order_workflow::catalog_actor::CatalogError;
use order_workflow::clients::{CatalogClient, PaymentClient, PaymentGateway};
use order_workflow::error::ErrorKind;
use order_workflow::model::{
    ChargeReceipt, Order, OrderCreate, OrderId, OrderStatus, Payment, Product,
};
use order_workflow::order_actor::{self, OrderContext, OrderError};
use order_workflow::payment_actor::{self, PaymentError};

/// Gateway double that remembers every charge and answers with a fixed verdict.
struct RecordingGateway {
    approve: bool,
    charges: Mutex<Vec<(OrderId, u64)>>,
}

impl RecordingGateway {
    fn new(approve: bool) -> Arc<Self> {
        Arc::new(Self {
            approve,
            charges: Mutex::new(Vec::new()),
        })
    }

    fn charges(&self) -> Vec<(OrderId, u64)> {
        self.charges.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn charge(&self, order_id: OrderId, amount: u64) -> Result<ChargeReceipt, PaymentError> {
        self.charges.lock().unwrap().push((order_id, amount));
        Ok(ChargeReceipt {
            success: self.approve,
            transaction_id: "TX000001".into(),
        })
    }
}

/// Order store whose writes always fail.
struct BrokenStore;

#[async_trait]
impl Store<Order> for BrokenStore {
    async fn insert(&self, _record: Order) -> Result<(), StoreError> {
        Err(StoreError::Unavailable {
            table: "order",
            reason: "disk full".to_string(),
        })
    }

    async fn fetch(&self, _id: &OrderId) -> Result<Option<Order>, StoreError> {
        Ok(None)
    }

    async fn list(&self, _ids: &[OrderId]) -> Result<Vec<Order>, StoreError> {
        Ok(Vec::new())
    }
}

fn fixed_id() -> impl Fn() -> OrderId + Send + Sync + 'static {
    || OrderId::from("ORDER001")
}

/// Real Order actor with mocked catalog and payment dependencies.
/// The pricing and charging run in `Order::on_create`, the enrichment in `on_load`.
#[tokio::test]
async fn test_order_actor_with_mocked_dependencies() {
    let mut catalog_mock = MockClient::<Product>::new();
    let mut payment_mock = MockClient::<Payment>::new();

    let widget = Product::new("P1", "Widget", 100);
    let gadget = Product::new("P2", "Gadget", 250);

    // Order::on_create prices via list, then charges via create.
    catalog_mock
        .expect_list(vec!["P1".into(), "P2".into()])
        .return_ok(vec![widget.clone(), gadget.clone()]);
    payment_mock.expect_create().return_ok(Payment {
        id: "PAY00001".into(),
        order_id: "ORDER001".into(),
        amount: 350,
    });
    // Order::on_load resolves the products again on read.
    catalog_mock
        .expect_list(vec!["P1".into(), "P2".into()])
        .return_ok(vec![gadget.clone(), widget.clone()]);

    let orders = Arc::new(MemoryStore::<Order>::default());
    let (order_actor, order_client) = order_actor::with_ids(8, orders.clone(), fixed_id());
    let actor_handle = tokio::spawn(order_actor.run(OrderContext::new(
        CatalogClient::new(catalog_mock.client()),
        Arc::new(PaymentClient::new(payment_mock.client())),
    )));

    let order = order_client
        .create_order(OrderCreate::new("u1", vec!["P1".into(), "P2".into()]))
        .await
        .expect("Order creation failed");
    assert_eq!(order.id.as_str(), "ORDER001");
    assert_eq!(order.total_amount, 350);
    assert_eq!(order.status, OrderStatus::Completed);

    // Stored exactly once, without enrichment.
    let stored = orders.fetch(&order.id).await.unwrap().unwrap();
    assert!(stored.products.is_empty());
    assert_eq!(orders.len().await, 1);

    let fetched = order_client.get_order(order.id.clone()).await.unwrap();
    assert_eq!(fetched.products, vec![widget, gadget]);
    assert_eq!(fetched.total_amount, 350);

    catalog_mock.verify();
    payment_mock.verify();

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_declined_charge_leaves_order_pending() {
    let mut catalog_mock = MockClient::<Product>::new();
    catalog_mock
        .expect_list(vec!["P1".into()])
        .return_ok(vec![Product::new("P1", "Widget", 100)]);
    let gateway = RecordingGateway::new(false);

    let orders = Arc::new(MemoryStore::<Order>::default());
    let (order_actor, order_client) = order_actor::new(8, orders.clone());
    let actor_handle = tokio::spawn(order_actor.run(OrderContext::new(
        CatalogClient::new(catalog_mock.client()),
        gateway.clone(),
    )));

    let order = order_client
        .create_order(OrderCreate::new("u1", vec!["P1".into()]))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, 100);

    let stored = orders.fetch(&order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
    assert_eq!(gateway.charges(), vec![(order.id.clone(), 100)]);

    catalog_mock.verify();
    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_catalog_failure_stores_nothing_and_charges_nothing() {
    let mut catalog_mock = MockClient::<Product>::new();
    catalog_mock
        .expect_list(vec!["P1".into()])
        .return_err(FrameworkError::ActorClosed);
    let gateway = RecordingGateway::new(true);

    let orders = Arc::new(MemoryStore::<Order>::default());
    let (order_actor, order_client) = order_actor::new(8, orders.clone());
    let actor_handle = tokio::spawn(order_actor.run(OrderContext::new(
        CatalogClient::new(catalog_mock.client()),
        gateway.clone(),
    )));

    let err = order_client
        .create_order(OrderCreate::new("u1", vec!["P1".into()]))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Catalog(CatalogError::Upstream("Actor closed".to_string()))
    );
    assert!(orders.is_empty().await);
    assert!(gateway.charges().is_empty());

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_payment_failure_stores_nothing() {
    let mut catalog_mock = MockClient::<Product>::new();
    let mut payment_mock = MockClient::<Payment>::new();
    catalog_mock
        .expect_list(vec!["P1".into()])
        .return_ok(vec![Product::new("P1", "Widget", 100)]);
    payment_mock
        .expect_create()
        .return_err(FrameworkError::Store(StoreError::PoolTimeout {
            table: "payment",
            waited: Duration::from_millis(5),
        }));

    let orders = Arc::new(MemoryStore::<Order>::default());
    let (order_actor, order_client) = order_actor::new(8, orders.clone());
    let actor_handle = tokio::spawn(order_actor.run(OrderContext::new(
        CatalogClient::new(catalog_mock.client()),
        Arc::new(PaymentClient::new(payment_mock.client())),
    )));

    let err = order_client
        .create_order(OrderCreate::new("u1", vec!["P1".into()]))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Payment(PaymentError::Persistence(_))));
    assert!(orders.is_empty().await);

    catalog_mock.verify();
    payment_mock.verify();
    drop(order_client);
    actor_handle.await.unwrap();
}

/// A failed order write after a successful charge leaves the payment behind.
#[tokio::test]
async fn test_store_failure_after_charge_keeps_payment() {
    let mut catalog_mock = MockClient::<Product>::new();
    catalog_mock
        .expect_list(vec!["P1".into()])
        .return_ok(vec![Product::new("P1", "Widget", 100)]);

    let payments = Arc::new(MemoryStore::<Payment>::default());
    let (payment_actor, payment_client) = payment_actor::new(8, payments.clone());
    let payment_handle = tokio::spawn(payment_actor.run(()));

    let (order_actor, order_client) = order_actor::new(8, BrokenStore);
    let order_handle = tokio::spawn(order_actor.run(OrderContext::new(
        CatalogClient::new(catalog_mock.client()),
        Arc::new(payment_client),
    )));

    let err = order_client
        .create_order(OrderCreate::new("u1", vec!["P1".into()]))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Persistence(StoreError::Unavailable { .. })));

    let orphaned = payments.list(&[]).await.unwrap();
    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].amount, 100);

    drop(order_client);
    order_handle.await.unwrap();
    payment_handle.await.unwrap();
}

#[tokio::test]
async fn test_empty_order_skips_catalog() {
    // No expectations: any catalog call would fail the request.
    let catalog_mock = MockClient::<Product>::new();
    let gateway = RecordingGateway::new(true);

    let (order_actor, order_client) = order_actor::new(8, MemoryStore::<Order>::default());
    let actor_handle = tokio::spawn(order_actor.run(OrderContext::new(
        CatalogClient::new(catalog_mock.client()),
        gateway.clone(),
    )));

    let order = order_client
        .create_order(OrderCreate::new("u1", vec![]))
        .await
        .unwrap();
    assert_eq!(order.total_amount, 0);
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(gateway.charges(), vec![(order.id.clone(), 0)]);

    let fetched = order_client.get_order(order.id).await.unwrap();
    assert!(fetched.products.is_empty());

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_unresponsive_catalog_hits_deadline() {
    // The receiver is held but never answered.
    let (catalog, _catalog_rx) = create_mock_client::<Product>(8);
    let gateway = RecordingGateway::new(true);

    let orders = Arc::new(MemoryStore::<Order>::default());
    let (order_actor, order_client) = order_actor::new(8, orders.clone());
    let actor_handle = tokio::spawn(order_actor.run(OrderContext::new(
        CatalogClient::new(catalog).with_timeout(Duration::from_millis(50)),
        gateway.clone(),
    )));

    let err = order_client
        .create_order(OrderCreate::new("u1", vec!["P1".into()]))
        .await
        .unwrap_err();
    match err {
        OrderError::Catalog(CatalogError::Upstream(msg)) => assert!(msg.contains("Deadline")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(orders.is_empty().await);
    assert!(gateway.charges().is_empty());

    drop(order_client);
    actor_handle.await.unwrap();
}

/// Prices whose sum does not fit an amount reject the order before any charge.
#[tokio::test]
async fn test_total_overflow_is_rejected_before_charge() {
    let mut catalog_mock = MockClient::<Product>::new();
    catalog_mock
        .expect_list(vec!["P1".into(), "P2".into()])
        .return_ok(vec![
            Product::new("P1", "Yacht", u64::MAX),
            Product::new("P2", "Sticker", 1),
        ]);
    let gateway = RecordingGateway::new(true);

    let orders = Arc::new(MemoryStore::<Order>::default());
    let (order_actor, order_client) = order_actor::with_ids(8, orders.clone(), fixed_id());
    let actor_handle = tokio::spawn(order_actor.run(OrderContext::new(
        CatalogClient::new(catalog_mock.client()),
        gateway.clone(),
    )));

    let err = order_client
        .create_order(OrderCreate::new("u1", vec!["P1".into(), "P2".into()]))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::TotalOverflow("ORDER001".into()));
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert!(gateway.charges().is_empty());
    assert!(orders.is_empty().await);

    catalog_mock.verify();
    drop(order_client);
    actor_handle.await.unwrap();
}
