pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::{OrderId, ProductId, UserId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use record::{CatalogRecord, OrderRecord, UserRecord};
pub use store::{CatalogStore, OrderStore, UserStore};
