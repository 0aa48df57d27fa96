use actor_framework::{PoolOptions, Store};
use order_workflow::catalog_actor::CatalogError;
use order_workflow::config::Config;
use order_workflow::error::ErrorKind;
use order_workflow::lifecycle::{OrderSystem, Stores};
use order_workflow::model::{OrderCreate, OrderStatus, ProductCreate, ProductId};
use order_workflow::order_actor::OrderError;

fn is_short_token(id: &str) -> bool {
    id.len() == 8 && id.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

/// Full end-to-end test with all real actors: price, charge, store, read back.
#[tokio::test]
async fn test_place_and_read_order() {
    let stores = Stores::in_memory(PoolOptions::default());
    let payments = stores.payments.clone();
    let system = OrderSystem::start(&Config::default(), stores).unwrap();

    let widget = system
        .catalog_client
        .create_product(ProductCreate::new("Widget", 100))
        .await
        .expect("Failed to create product");
    let gadget = system
        .catalog_client
        .create_product(ProductCreate::new("Gadget", 250))
        .await
        .expect("Failed to create product");
    assert!(is_short_token(widget.id.as_str()));
    assert_ne!(widget.id, gadget.id);

    let order = system
        .order_client
        .create_order(OrderCreate::new("u1", vec![widget.id.clone(), gadget.id.clone()]))
        .await
        .expect("Failed to create order");
    assert!(is_short_token(order.id.as_str()));
    assert_eq!(order.total_amount, 350);
    assert_eq!(order.status, OrderStatus::Completed);

    // Exactly one payment, for the total, referencing the order.
    let recorded = payments.list(&[]).await.unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].amount, 350);
    assert_eq!(recorded[0].order_id, order.id);

    let fetched = system
        .order_client
        .get_order(order.id.clone())
        .await
        .expect("Failed to get order");
    assert_eq!(fetched.owner_id, "u1");
    assert_eq!(fetched.total_amount, 350);
    assert_eq!(fetched.status, OrderStatus::Completed);
    let names: Vec<_> = fetched.products.iter().map(|p| p.display_name.as_str()).collect();
    assert_eq!(names, ["Widget", "Gadget"]);

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_empty_and_unknown_products_price_to_zero() {
    let system = OrderSystem::new();
    system
        .catalog_client
        .create_product(ProductCreate::new("Widget", 100))
        .await
        .unwrap();

    let empty = system
        .order_client
        .create_order(OrderCreate::new("u1", vec![]))
        .await
        .unwrap();
    assert_eq!(empty.total_amount, 0);
    assert_eq!(empty.status, OrderStatus::Completed);
    assert!(system.order_client.get_order(empty.id).await.unwrap().products.is_empty());

    let ghost = system
        .order_client
        .create_order(OrderCreate::new("u1", vec![ProductId::from("ghost")]))
        .await
        .unwrap();
    assert_eq!(ghost.total_amount, 0);
    assert_eq!(ghost.status, OrderStatus::Completed);

    let fetched = system.order_client.get_order(ghost.id).await.unwrap();
    assert!(fetched.products.is_empty());
    assert_eq!(fetched.product_ids, vec![ProductId::from("ghost")]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_product_ids_count_once() {
    let system = OrderSystem::new();
    let widget = system
        .catalog_client
        .create_product(ProductCreate::new("Widget", 100))
        .await
        .unwrap();

    let order = system
        .order_client
        .create_order(OrderCreate::new("u1", vec![widget.id.clone(), widget.id.clone()]))
        .await
        .unwrap();
    assert_eq!(order.total_amount, 100);
    assert_eq!(order.product_ids.len(), 2);

    let fetched = system.order_client.get_order(order.id).await.unwrap();
    assert_eq!(fetched.products.len(), 1);
    assert_eq!(fetched.product_ids.len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_identical_requests_create_separate_orders() {
    let stores = Stores::in_memory(PoolOptions::default());
    let payments = stores.payments.clone();
    let orders = stores.orders.clone();
    let system = OrderSystem::start(&Config::default(), stores).unwrap();

    let widget = system
        .catalog_client
        .create_product(ProductCreate::new("Widget", 100))
        .await
        .unwrap();
    let request = OrderCreate::new("u1", vec![widget.id]);

    let first = system.order_client.create_order(request.clone()).await.unwrap();
    let second = system.order_client.create_order(request).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(orders.list(&[]).await.unwrap().len(), 2);
    assert_eq!(payments.list(&[]).await.unwrap().len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_not_found() {
    let system = OrderSystem::new();

    let err = system.order_client.get_order("NOPE0000".into()).await.unwrap_err();
    assert_eq!(err, OrderError::NotFound("NOPE0000".into()));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = system.catalog_client.get_product("NOPE0000".into()).await.unwrap_err();
    assert_eq!(err, CatalogError::NotFound("NOPE0000".into()));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_catalog_queries() {
    let system = OrderSystem::new();
    let widget = system
        .catalog_client
        .create_product(ProductCreate::new("Widget", 100))
        .await
        .unwrap();
    let gadget = system
        .catalog_client
        .create_product(ProductCreate::new("Gadget", 250))
        .await
        .unwrap();

    let fetched = system.catalog_client.get_product(widget.id.clone()).await.unwrap();
    assert_eq!(fetched, widget);

    // Empty filter lists everything.
    let all = system.catalog_client.list_products(vec![]).await.unwrap();
    assert_eq!(all.len(), 2);

    // Unknown ids are dropped, duplicates collapse.
    let some = system
        .catalog_client
        .list_products(vec![gadget.id.clone(), "ghost".into(), gadget.id.clone()])
        .await
        .unwrap();
    assert_eq!(some, vec![gadget]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_charge_records_payment_without_checking_order() {
    let stores = Stores::in_memory(PoolOptions::default());
    let payments = stores.payments.clone();
    let system = OrderSystem::start(&Config::default(), stores).unwrap();

    let receipt = system.payment_client.charge("NOT-AN-ORDER".into(), 42).await.unwrap();
    assert!(receipt.success);
    assert!(!receipt.transaction_id.as_str().is_empty());

    let recorded = payments.fetch(&receipt.transaction_id).await.unwrap().unwrap();
    assert_eq!(recorded.amount, 42);
    assert_eq!(recorded.order_id.as_str(), "NOT-AN-ORDER");

    system.shutdown().await.unwrap();
}

/// Concurrent order creation: every request gets its own order and its own charge.
#[tokio::test]
async fn test_concurrent_orders() {
    let stores = Stores::in_memory(PoolOptions::default());
    let payments = stores.payments.clone();
    let system = OrderSystem::start(&Config::default(), stores).unwrap();

    let widget = system
        .catalog_client
        .create_product(ProductCreate::new("Widget", 10))
        .await
        .unwrap();

    let mut handles = vec![];
    for i in 0..10 {
        let order_client = system.order_client.clone();
        let request = OrderCreate::new(format!("user_{}", i), vec![widget.id.clone()]);
        handles.push(tokio::spawn(async move { order_client.create_order(request).await }));
    }

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let order = handle.await.unwrap().expect("order should succeed");
        assert_eq!(order.total_amount, 10);
        ids.insert(order.id);
    }
    assert_eq!(ids.len(), 10);
    assert_eq!(payments.list(&[]).await.unwrap().len(), 10);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_request_timeout_is_applied() {
    let config = Config {
        request_timeout: Some(std::time::Duration::from_secs(5)),
        ..Config::default()
    };
    let system = OrderSystem::with_config(&config).unwrap();

    let widget = system
        .catalog_client
        .create_product(ProductCreate::new("Widget", 100))
        .await
        .unwrap();
    let order = system
        .order_client
        .create_order(OrderCreate::new("u1", vec![widget.id]))
        .await
        .unwrap();
    assert_eq!(order.total_amount, 100);

    system.shutdown().await.unwrap();
}

/// Settings that would make an actor or a store unusable are refused before anything runs.
#[tokio::test]
async fn test_start_rejects_invalid_config() {
    let no_mailbox = Config {
        mailbox_capacity: 0,
        ..Config::default()
    };
    let err = OrderSystem::start(&no_mailbox, Stores::in_memory(PoolOptions::default()))
        .err()
        .expect("zero mailbox must be refused");
    assert!(err.to_string().contains("MAILBOX_CAPACITY"));
    assert!(OrderSystem::with_config(&no_mailbox).is_err());

    let huge_pool = Config {
        store_pool_size: usize::MAX,
        ..Config::default()
    };
    let err = OrderSystem::with_config(&huge_pool)
        .err()
        .expect("oversized pool must be refused");
    assert!(err.to_string().contains("STORE_POOL_SIZE"));
}

#[tokio::test]
async fn test_stores_from_config_default_to_memory() {
    let stores = Stores::from_config(&Config::default()).await.unwrap();
    let system = OrderSystem::start(&Config::default(), stores).unwrap();

    let widget = system
        .catalog_client
        .create_product(ProductCreate::new("Widget", 100))
        .await
        .unwrap();
    assert_eq!(system.catalog_client.get_product(widget.id.clone()).await.unwrap(), widget);

    system.shutdown().await.unwrap();
}

#[cfg(not(feature = "postgres"))]
#[tokio::test]
async fn test_database_url_needs_postgres_feature() {
    let config = Config {
        database_url: Some("postgres://localhost/orders".to_string()),
        ..Config::default()
    };
    assert!(Stores::from_config(&config).await.is_err());
}
