//! PostgreSQL integration tests
//!
//! These tests start a shared PostgreSQL container and need a Docker daemon.
//! Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration -- --ignored --test-threads=1
//! ```

use std::sync::Arc;

use chrono::Utc;
use store::{
    CatalogStore, OrderId, OrderRecord, OrderStore, PostgresStore, StoreError, UserId, UserRecord,
    UserStore,
};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let store = PostgresStore::connect(&connection_string).await.unwrap();
            store.run_migrations().await.unwrap();
            store.pool().close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresStore {
    let info = get_container_info().await;
    let store = PostgresStore::connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE users, orders")
        .execute(store.pool())
        .await
        .unwrap();

    store
}

fn order_for(user_id: &str, qty: i32, unit_price: i32) -> OrderRecord {
    OrderRecord {
        order_id: OrderId::generate(),
        user_id: UserId::new(user_id),
        product_id: "CATALOG-001".into(),
        qty,
        unit_price,
        total_price: i64::from(qty) * i64::from(unit_price),
        created_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn insert_and_find_user() {
    let store = get_test_store().await;
    let record = UserRecord {
        user_id: UserId::generate(),
        email: "a@b.com".to_string(),
        display_name: "A".to_string(),
        encrypted_password: "$2b$04$hash".to_string(),
    };

    let stored = store.insert_user(record.clone()).await.unwrap();
    assert_eq!(stored, record);

    let found = store.find_user(&record.user_id).await.unwrap();
    assert_eq!(found, Some(record));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn duplicate_user_id_maps_to_duplicate_key() {
    let store = get_test_store().await;
    let record = UserRecord {
        user_id: UserId::new("u1"),
        email: "a@b.com".to_string(),
        display_name: "A".to_string(),
        encrypted_password: "hash".to_string(),
    };

    store.insert_user(record.clone()).await.unwrap();
    let err = store.insert_user(record).await.unwrap_err();

    assert!(matches!(
        err,
        StoreError::DuplicateKey {
            collection: "users",
            ..
        }
    ));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn orders_for_user_are_isolated_and_ordered() {
    let store = get_test_store().await;
    let first = store.insert_order(order_for("u1", 1, 100)).await.unwrap();
    store.insert_order(order_for("u2", 2, 200)).await.unwrap();
    let second = store.insert_order(order_for("u1", 3, 300)).await.unwrap();

    let orders = store.orders_for_user(&UserId::new("u1")).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order_id, first.order_id);
    assert_eq!(orders[1].order_id, second.order_id);
    assert_eq!(orders[1].total_price, 900);

    let none = store
        .orders_for_user(&UserId::new("unknown-user"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn find_missing_order_returns_none() {
    let store = get_test_store().await;
    let found = store.find_order(&OrderId::generate()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn migrations_seed_catalog() {
    let store = get_test_store().await;
    let items = store.list_catalog_items().await.unwrap();

    let ids: Vec<_> = items.iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(ids, vec!["CATALOG-001", "CATALOG-002", "CATALOG-003"]);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn rerunning_migrations_is_a_no_op() {
    let store = get_test_store().await;
    store.run_migrations().await.unwrap();

    let items = store.list_catalog_items().await.unwrap();
    assert_eq!(items.len(), 3);
}
