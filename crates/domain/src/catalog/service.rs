use std::sync::Arc;

use store::CatalogStore;

use crate::error::DomainError;
use crate::observe::{Operation, ServiceObserver, TracingObserver, observed};
use crate::timeouts::{ServiceTimeouts, bounded};

use super::CatalogItem;

/// Read-only pass-through to the catalog store.
pub struct CatalogService<S: CatalogStore> {
    store: S,
    timeouts: ServiceTimeouts,
    observer: Arc<dyn ServiceObserver>,
}

impl<S: CatalogStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self::with_observer(store, ServiceTimeouts::default(), Arc::new(TracingObserver))
    }

    pub fn with_observer(
        store: S,
        timeouts: ServiceTimeouts,
        observer: Arc<dyn ServiceObserver>,
    ) -> Self {
        Self {
            store,
            timeouts,
            observer,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all_catalog_items(&self) -> Result<Vec<CatalogItem>, DomainError> {
        observed(self.observer.as_ref(), Operation::GetAllCatalogItems, async {
            let records = bounded(self.timeouts.storage, self.store.list_catalog_items()).await?;
            Ok::<_, DomainError>(records.into_iter().map(CatalogItem::from).collect())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{InMemoryStore, StoreError};

    #[tokio::test]
    async fn test_lists_seeded_catalog() {
        let service = CatalogService::new(InMemoryStore::seeded());

        let items = service.get_all_catalog_items().await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[1].product_id.as_str(), "CATALOG-002");
        assert_eq!(items[1].product_name, "Tokyo");
        assert_eq!(items[1].stock, 110);
        assert_eq!(items[1].unit_price, 1000);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let service = CatalogService::new(InMemoryStore::new());
        assert!(service.get_all_catalog_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let store = InMemoryStore::seeded();
        store.set_unavailable(true);
        let service = CatalogService::new(store);

        let err = service.get_all_catalog_items().await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(StoreError::Unavailable(_))));
    }
}
