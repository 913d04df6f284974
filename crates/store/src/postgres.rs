use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    CatalogRecord, OrderRecord, Result, StoreError, UserRecord,
    store::{CatalogStore, OrderStore, UserStore},
};

/// PostgreSQL-backed store implementing every collection trait.
///
/// Each collection carries a `seq BIGSERIAL` column; list queries order by it
/// so results come back in insertion order.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and returns a store over the new pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        tracing::debug!("running storefront migrations");
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::debug!("migrations applied");
        Ok(())
    }

    fn row_to_user(row: PgRow) -> Result<UserRecord> {
        Ok(UserRecord {
            user_id: UserId::new(row.try_get::<String, _>("user_id")?),
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            encrypted_password: row.try_get("encrypted_password")?,
        })
    }

    fn row_to_order(row: PgRow) -> Result<OrderRecord> {
        Ok(OrderRecord {
            order_id: OrderId::new(row.try_get::<String, _>("order_id")?),
            user_id: UserId::new(row.try_get::<String, _>("user_id")?),
            product_id: row.try_get::<String, _>("product_id")?.into(),
            qty: row.try_get("qty")?,
            unit_price: row.try_get("unit_price")?,
            total_price: row.try_get("total_price")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }

    fn row_to_catalog(row: PgRow) -> Result<CatalogRecord> {
        Ok(CatalogRecord {
            product_id: row.try_get::<String, _>("product_id")?.into(),
            product_name: row.try_get("product_name")?,
            stock: row.try_get("stock")?,
            unit_price: row.try_get("unit_price")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

/// Maps a unique-constraint violation on `constraint` to `DuplicateKey`.
fn duplicate_or_database(
    err: sqlx::Error,
    constraint: &str,
    collection: &'static str,
    key: &str,
) -> StoreError {
    let duplicate = matches!(
        &err,
        sqlx::Error::Database(db_err) if db_err.constraint() == Some(constraint)
    );
    if duplicate {
        return StoreError::DuplicateKey {
            collection,
            key: key.to_string(),
        };
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PostgresStore {
    #[tracing::instrument(skip(self, record), fields(user_id = %record.user_id))]
    async fn insert_user(&self, record: UserRecord) -> Result<UserRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (user_id, email, display_name, encrypted_password)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, email, display_name, encrypted_password
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(&record.email)
        .bind(&record.display_name)
        .bind(&record.encrypted_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_or_database(e, "users_pkey", "users", record.user_id.as_str()))?;

        tracing::debug!("user row inserted");
        Self::row_to_user(row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserRecord>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT user_id, email, display_name, encrypted_password
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, email, display_name, encrypted_password
            FROM users
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_user).collect()
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    #[tracing::instrument(skip(self, record), fields(order_id = %record.order_id, user_id = %record.user_id))]
    async fn insert_order(&self, record: OrderRecord) -> Result<OrderRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO orders (order_id, user_id, product_id, qty, unit_price, total_price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING order_id, user_id, product_id, qty, unit_price, total_price, created_at
            "#,
        )
        .bind(record.order_id.as_str())
        .bind(record.user_id.as_str())
        .bind(record.product_id.as_str())
        .bind(record.qty)
        .bind(record.unit_price)
        .bind(record.total_price)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| duplicate_or_database(e, "orders_pkey", "orders", record.order_id.as_str()))?;

        tracing::debug!("order row inserted");
        Self::row_to_order(row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_order(&self, order_id: &OrderId) -> Result<Option<OrderRecord>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT order_id, user_id, product_id, qty, unit_price, total_price, created_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<OrderRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT order_id, user_id, product_id, qty, unit_price, total_price, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order).collect()
    }
}

#[async_trait]
impl CatalogStore for PostgresStore {
    #[tracing::instrument(skip(self))]
    async fn list_catalog_items(&self) -> Result<Vec<CatalogRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT product_id, product_name, stock, unit_price, created_at
            FROM catalogs
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "catalog rows fetched");
        rows.into_iter().map(Self::row_to_catalog).collect()
    }
}
