//! PostgreSQL-backed [`Store`] for the catalog, payment and order tables.
//!
//! Amounts are `u64` in the records and `BIGINT` in the schema: a value above
//! `i64::MAX` is refused with [`StoreError::Rejected`] before it reaches the database.
//! The schema is in `migrations/` and is applied by [`migrate`].

use std::marker::PhantomData;
use std::time::Duration;

use actor_framework::{ActorEntity, PoolOptions, Store, StoreError};
use async_trait::async_trait;
use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use tracing::{debug, info};

use crate::model::{Order, OrderStatus, Payment, Product, ProductId};

pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Opens a pool against `url`, sized and timed like the in-memory stores.
pub async fn connect(url: &str, options: PoolOptions) -> Result<PgPool, sqlx::Error> {
    let max_connections = u32::try_from(options.max_connections).unwrap_or(u32::MAX);
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(options.acquire_timeout)
        .connect(url)
        .await?;
    debug!(max_connections, "PostgreSQL pool opened");
    Ok(pool)
}

/// Creates the `product`, `payment` and `"order"` tables when they are missing.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("PostgreSQL migrations applied");
    Ok(())
}

/// A record kept in its own table, keyed by a text `id` column.
pub trait PgRecord: ActorEntity {
    /// `SELECT` of every column [`from_row`](Self::from_row) reads, with no `WHERE`.
    const SELECT: &'static str;
    /// `INSERT` with one placeholder per value [`bind`](Self::bind) adds.
    const INSERT: &'static str;

    fn bind(self, query: PgQuery<'_>) -> Result<PgQuery<'_>, StoreError>;

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error>;
}

impl PgRecord for Product {
    const SELECT: &'static str = "SELECT id, display_name, price FROM product";
    const INSERT: &'static str =
        "INSERT INTO product (id, display_name, price) VALUES ($1, $2, $3)";

    fn bind(self, query: PgQuery<'_>) -> Result<PgQuery<'_>, StoreError> {
        let price = to_bigint(Self::TABLE, "price", self.price)?;
        Ok(query.bind(self.id.0).bind(self.display_name).bind(price))
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Product {
            id: row.try_get::<String, _>("id")?.into(),
            display_name: row.try_get("display_name")?,
            price: from_bigint(row, "price")?,
        })
    }
}

impl PgRecord for Payment {
    const SELECT: &'static str = "SELECT id, order_id, amount FROM payment";
    const INSERT: &'static str = "INSERT INTO payment (id, order_id, amount) VALUES ($1, $2, $3)";

    fn bind(self, query: PgQuery<'_>) -> Result<PgQuery<'_>, StoreError> {
        let amount = to_bigint(Self::TABLE, "amount", self.amount)?;
        Ok(query.bind(self.id.0).bind(self.order_id.0).bind(amount))
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Payment {
            id: row.try_get::<String, _>("id")?.into(),
            order_id: row.try_get::<String, _>("order_id")?.into(),
            amount: from_bigint(row, "amount")?,
        })
    }
}

impl PgRecord for Order {
    const SELECT: &'static str =
        r#"SELECT id, owner_id, product_ids, total_amount, status FROM "order""#;
    const INSERT: &'static str = r#"INSERT INTO "order" (id, owner_id, product_ids, total_amount, status) VALUES ($1, $2, $3, $4, $5)"#;

    fn bind(self, query: PgQuery<'_>) -> Result<PgQuery<'_>, StoreError> {
        let total_amount = to_bigint(Self::TABLE, "total_amount", self.total_amount)?;
        let product_ids: Vec<String> = self.product_ids.into_iter().map(|id| id.0).collect();
        Ok(query
            .bind(self.id.0)
            .bind(self.owner_id)
            .bind(product_ids)
            .bind(total_amount)
            .bind(self.status.as_str()))
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let raw_status: String = row.try_get("status")?;
        let status = OrderStatus::parse(&raw_status).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown order status '{}'", raw_status).into(),
        })?;

        Ok(Order {
            id: row.try_get::<String, _>("id")?.into(),
            owner_id: row.try_get("owner_id")?,
            product_ids: row
                .try_get::<Vec<String>, _>("product_ids")?
                .into_iter()
                .map(ProductId::from)
                .collect(),
            status,
            total_amount: from_bigint(row, "total_amount")?,
            products: Vec::new(),
        })
    }
}

/// One component's table behind its own [`PgPool`].
pub struct PgStore<T> {
    pool: PgPool,
    acquire_timeout: Duration,
    _record: PhantomData<fn() -> T>,
}

impl<T: PgRecord> PgStore<T> {
    pub fn new(pool: PgPool) -> Self {
        let acquire_timeout = pool.options().get_acquire_timeout();
        Self {
            pool,
            acquire_timeout,
            _record: PhantomData,
        }
    }

    fn error(&self, key: &str, e: sqlx::Error) -> StoreError {
        store_error(T::TABLE, key, self.acquire_timeout, e)
    }
}

#[async_trait]
impl<T: PgRecord> Store<T> for PgStore<T> {
    async fn insert(&self, record: T) -> Result<(), StoreError> {
        let key = record.id().to_string();
        record
            .bind(sqlx::query(T::INSERT))?
            .execute(&self.pool)
            .await
            .map_err(|e| self.error(&key, e))?;
        debug!(table = T::TABLE, id = %key, "insert");
        Ok(())
    }

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        let key = id.to_string();
        let sql = format!("{} WHERE id = $1", T::SELECT);
        let row = sqlx::query(&sql)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| self.error(&key, e))?;
        row.as_ref()
            .map(T::from_row)
            .transpose()
            .map_err(|e| self.error(&key, e))
    }

    async fn list(&self, ids: &[T::Id]) -> Result<Vec<T>, StoreError> {
        let rows = if ids.is_empty() {
            sqlx::query(T::SELECT).fetch_all(&self.pool).await
        } else {
            let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
            let sql = format!("{} WHERE id = ANY($1)", T::SELECT);
            sqlx::query(&sql).bind(keys).fetch_all(&self.pool).await
        }
        .map_err(|e| self.error("*", e))?;

        rows.iter()
            .map(T::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.error("*", e))
    }
}

fn to_bigint(table: &'static str, column: &str, value: u64) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::Rejected {
        table,
        reason: format!("{} {} does not fit in BIGINT", column, value),
    })
}

fn from_bigint(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(column)?;
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn store_error(table: &'static str, key: &str, waited: Duration, e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut => StoreError::PoolTimeout { table, waited },
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict {
            table,
            id: key.to_string(),
        },
        sqlx::Error::Database(db) if db.is_check_violation() => StoreError::Rejected {
            table,
            reason: db.message().to_string(),
        },
        other => StoreError::Unavailable {
            table,
            reason: other.to_string(),
        },
    }
}
