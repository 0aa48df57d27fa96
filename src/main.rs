use anyhow::Result;
use order_workflow::api::{
    CatalogService, CreateOrderRequest, CreateProductRequest, GetOrderRequest, OrderService,
};
use order_workflow::config::Config;
use order_workflow::lifecycle::{setup_tracing, OrderSystem, Stores};
use tracing::{info, info_span, Instrument};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    setup_tracing(config.log_format);
    config.print_summary();

    let stores = Stores::from_config(&config).await?;
    let system = OrderSystem::start(&config, stores)?;
    let catalog = CatalogService::new(system.catalog_client.clone());
    let orders = OrderService::new(system.order_client.clone());

    async {
        let widget = catalog
            .create_product(CreateProductRequest {
                display_name: "Widget".to_string(),
                price: 100,
            })
            .await?
            .product;
        let gadget = catalog
            .create_product(CreateProductRequest {
                display_name: "Gadget".to_string(),
                price: 250,
            })
            .await?
            .product;
        info!(widget = %widget.id, gadget = %gadget.id, "Catalog ready");

        let placed = orders
            .create_order(CreateOrderRequest {
                user_id: "u1".to_string(),
                product_ids: vec![widget.id, gadget.id],
            })
            .await?;
        info!(order_id = %placed.order_id, total = placed.total_amount, status = %placed.status, "Order placed");

        let fetched = orders
            .get_order(GetOrderRequest {
                order_id: placed.order_id,
            })
            .await?;
        let names: Vec<&str> = fetched.products.iter().map(|p| p.display_name.as_str()).collect();
        info!(order_id = %fetched.order_id, user_id = %fetched.user_id, products = ?names, "Order fetched");

        anyhow::Ok(())
    }
    .instrument(info_span!("demo"))
    .await?;

    drop(catalog);
    drop(orders);
    system.shutdown().await?;
    Ok(())
}
