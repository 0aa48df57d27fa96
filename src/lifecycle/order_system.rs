use std::sync::Arc;

use actor_framework::{MemoryStore, PoolOptions, Store};
use anyhow::Result;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

use crate::clients::{CatalogClient, OrderClient, PaymentClient};
use crate::config::Config;
use crate::model::{Order, Payment, Product};
use crate::order_actor::OrderContext;
use crate::{catalog_actor, order_actor, payment_actor};

/// The storage each component writes to.
///
/// Every component owns exactly one store and nothing else writes to it. Handles are
/// shared pointers so a caller can keep one to inspect the rows after the system stops.
#[derive(Clone)]
pub struct Stores {
    pub catalog: Arc<dyn Store<Product>>,
    pub payments: Arc<dyn Store<Payment>>,
    pub orders: Arc<dyn Store<Order>>,
}

impl Stores {
    /// Three independent in-memory stores, each with its own pool of `options` size.
    pub fn in_memory(options: PoolOptions) -> Self {
        Self {
            catalog: Arc::new(MemoryStore::<Product>::new(options)),
            payments: Arc::new(MemoryStore::<Payment>::new(options)),
            orders: Arc::new(MemoryStore::<Order>::new(options)),
        }
    }

    /// One PostgreSQL table per component, each behind its own pool.
    #[cfg(feature = "postgres")]
    pub fn postgres(catalog: sqlx::PgPool, payments: sqlx::PgPool, orders: sqlx::PgPool) -> Self {
        use crate::storage::PgStore;

        Self {
            catalog: Arc::new(PgStore::<Product>::new(catalog)),
            payments: Arc::new(PgStore::<Payment>::new(payments)),
            orders: Arc::new(PgStore::<Order>::new(orders)),
        }
    }

    /// Builds the stores `config` asks for: PostgreSQL when `database_url` is set,
    /// in-memory otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or migrated, or if
    /// `database_url` is set in a build without the `postgres` feature.
    pub async fn from_config(config: &Config) -> Result<Self> {
        match config.database_url.as_deref() {
            None => Ok(Self::in_memory(config.pool_options())),
            #[cfg(feature = "postgres")]
            Some(url) => {
                use crate::storage::postgres;
                use anyhow::Context;

                let options = config.pool_options();
                let catalog = postgres::connect(url, options)
                    .await
                    .context("Failed to connect to PostgreSQL")?;
                postgres::migrate(&catalog)
                    .await
                    .context("Failed to run migrations")?;
                let payments = postgres::connect(url, options).await?;
                let orders = postgres::connect(url, options).await?;
                info!("Using PostgreSQL storage");
                Ok(Self::postgres(catalog, payments, orders))
            }
            #[cfg(not(feature = "postgres"))]
            Some(_) => {
                anyhow::bail!("DATABASE_URL is set but this build has no `postgres` feature")
            }
        }
    }
}

/// Runs the catalog, payment and order actors and wires them together.
///
/// The order actor is the only one with dependencies: it receives clients for the
/// catalog and the payment gateway as its context when it starts.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new();
///
/// let widget = system.catalog_client.create_product(ProductCreate::new("Widget", 100)).await?;
/// let order = system.order_client
///     .create_order(OrderCreate::new("u1", vec![widget.id]))
///     .await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub catalog_client: CatalogClient,
    pub payment_client: PaymentClient,

    /// Task handles for the running actors, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts the system with default settings and in-memory stores.
    pub fn new() -> Self {
        let config = Config::default();
        Self::spawn(&config, Stores::in_memory(config.pool_options()))
    }

    /// Starts the system over in-memory stores sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`Config::validate`].
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::spawn(config, Stores::in_memory(config.pool_options())))
    }

    /// Starts the actors over the given stores.
    ///
    /// When `config.request_timeout` is set, every client handed out, including the ones
    /// the order actor uses to reach the catalog and payment actors, carries that deadline.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`Config::validate`]. Nothing is spawned then.
    pub fn start(config: &Config, stores: Stores) -> Result<Self> {
        config.validate()?;
        Ok(Self::spawn(config, stores))
    }

    fn spawn(config: &Config, stores: Stores) -> Self {
        let mailbox = config.mailbox_capacity;

        // 1. Create actors
        let (catalog_actor, mut catalog_client) = catalog_actor::new(mailbox, stores.catalog);
        let (payment_actor, mut payment_client) = payment_actor::new(mailbox, stores.payments);
        let (order_actor, mut order_client) = order_actor::new(mailbox, stores.orders);

        if let Some(timeout) = config.request_timeout {
            catalog_client = catalog_client.with_timeout(timeout);
            payment_client = payment_client.with_timeout(timeout);
            order_client = order_client.with_timeout(timeout);
        }

        // 2. Start actors with injected context
        let catalog_handle = tokio::spawn(catalog_actor.run(()));
        let payment_handle = tokio::spawn(payment_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext::new(
            catalog_client.clone(),
            Arc::new(payment_client.clone()),
        )));

        info!(mailbox, timeout = ?config.request_timeout, "Order system started");

        Self {
            order_client,
            catalog_client,
            payment_client,
            handles: vec![order_handle, catalog_handle, payment_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the mailboxes. The order actor stops first, after
    /// finishing the requests it had in flight; that releases its catalog and payment
    /// clients, which lets those two actors stop in turn.
    ///
    /// Clones of the clients held elsewhere keep their actors alive, and this call waits
    /// for them to be dropped as well.
    ///
    /// # Errors
    ///
    /// Returns the join error of the first actor task that panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.catalog_client);
        drop(self.payment_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}
