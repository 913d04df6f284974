//! Shared application state and its wiring.

use std::sync::Arc;

use aggregator::{ClientBuildError, HttpOrderClient, LocalOrderClient, OrderClient, UserDetailAggregator};
use domain::{
    BcryptPasswordHasher, CatalogService, OrderService, PasswordHasher, ServiceObserver,
    ServiceTimeouts, TracingObserver, UserService,
};
use store::{CatalogStore, InMemoryStore, OrderStore, UserStore};

use crate::config::Config;

pub type Users = UserService<Arc<dyn UserStore>, dyn PasswordHasher>;
pub type Orders = OrderService<Arc<dyn OrderStore>>;
pub type Catalog = CatalogService<Arc<dyn CatalogStore>>;
pub type UserDetails = UserDetailAggregator<Arc<dyn UserStore>, dyn PasswordHasher, dyn OrderClient>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub users: Arc<Users>,
    pub orders: Arc<Orders>,
    pub catalog: Catalog,
    pub user_details: UserDetails,
    pub greeting: String,
    pub port: u16,
}

/// The storage collaborators behind the three services.
#[derive(Clone)]
pub struct Backends {
    pub users: Arc<dyn UserStore>,
    pub orders: Arc<dyn OrderStore>,
    pub catalog: Arc<dyn CatalogStore>,
}

impl Backends {
    /// One store serving every collection.
    pub fn shared<T>(store: Arc<T>) -> Self
    where
        T: UserStore + OrderStore + CatalogStore + 'static,
    {
        Self {
            users: store.clone(),
            orders: store.clone(),
            catalog: store,
        }
    }

    /// In-memory stores with the default catalog.
    pub fn in_memory() -> Self {
        Self::shared(Arc::new(InMemoryStore::seeded()))
    }
}

/// Creates the application state.
///
/// Order history is fetched over HTTP when `ORDER_SERVICE_URL` is set and
/// from the in-process order service otherwise.
pub fn create_state(
    config: &Config,
    backends: Backends,
) -> Result<Arc<AppState>, ClientBuildError> {
    let client = match config.order_service_url.clone() {
        Some(url) => {
            tracing::info!(%url, "fetching order history from remote order service");
            let client = HttpOrderClient::new(url, config.order_call_timeout)?;
            Some(Arc::new(client) as Arc<dyn OrderClient>)
        }
        None => None,
    };
    Ok(create_state_with_client(config, backends, client))
}

/// Creates the application state with an explicit order client; `None`
/// selects the in-process one.
pub fn create_state_with_client(
    config: &Config,
    backends: Backends,
    order_client: Option<Arc<dyn OrderClient>>,
) -> Arc<AppState> {
    let timeouts = ServiceTimeouts {
        storage: config.storage_timeout,
        password_hash: config.password_hash_timeout,
    };
    let observer: Arc<dyn ServiceObserver> = Arc::new(TracingObserver);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));

    let users = Arc::new(UserService::with_observer(
        backends.users,
        hasher,
        timeouts,
        Arc::clone(&observer),
    ));
    let orders = Arc::new(OrderService::with_observer(
        backends.orders,
        timeouts,
        Arc::clone(&observer),
    ));
    let catalog = CatalogService::with_observer(backends.catalog, timeouts, Arc::clone(&observer));

    let order_client = order_client.unwrap_or_else(|| {
        Arc::new(LocalOrderClient::new(Arc::clone(&orders))) as Arc<dyn OrderClient>
    });
    let user_details =
        UserDetailAggregator::new(Arc::clone(&users), order_client, config.aggregation_policy)
            .with_call_timeout(config.order_call_timeout)
            .with_observer(observer);

    Arc::new(AppState {
        users,
        orders,
        catalog,
        user_details,
        greeting: config.greeting.clone(),
        port: config.port,
    })
}
