use crate::core::CatalogProvider;
use crate::domain::model::Product;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Asks `primary` first and answers from `secondary` when it fails.
pub struct FallbackCatalog<P, S> {
    primary: P,
    secondary: S,
}

impl<P: CatalogProvider, S: CatalogProvider> FallbackCatalog<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P: CatalogProvider, S: CatalogProvider> CatalogProvider for FallbackCatalog<P, S> {
    async fn products(&self) -> Result<Vec<Product>> {
        match self.primary.products().await {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::warn!("Catalog unavailable, using static data: {}", e);
                self.secondary.products().await
            }
        }
    }

    async fn product(&self, id: u64) -> Result<Product> {
        match self.primary.product(id).await {
            Ok(product) => Ok(product),
            Err(e) => {
                tracing::warn!("Product {} unavailable, using static data: {}", id, e);
                self.secondary.product(id).await
            }
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>> {
        match self.primary.search(query).await {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::warn!("Catalog search unavailable, using static data: {}", e);
                self.secondary.search(query).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::{RemoteCatalog, StaticCatalog};
    use crate::domain::model::CatalogSnapshot;
    use crate::utils::error::StorefrontError;
    use httpmock::prelude::*;

    fn snapshot_catalog() -> StaticCatalog {
        StaticCatalog::new(CatalogSnapshot {
            products: vec![serde_json::from_value(serde_json::json!({
                "id": 1, "name": "KISA24 1gr", "categoryId": "gold-bar"
            }))
            .unwrap()],
            ..CatalogSnapshot::default()
        })
    }

    #[tokio::test]
    async fn test_falls_back_when_remote_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products");
                then.status(502);
            })
            .await;

        let catalog = FallbackCatalog::new(RemoteCatalog::new(server.base_url()), snapshot_catalog());
        let products = catalog.products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "KISA24 1gr");
    }

    #[tokio::test]
    async fn test_prefers_remote_when_available() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products/7");
                then.status(200).json_body(serde_json::json!({
                    "id": 7, "name": "Live Product", "categoryId": "gold-bar"
                }));
            })
            .await;

        let catalog = FallbackCatalog::new(RemoteCatalog::new(server.base_url()), snapshot_catalog());
        assert_eq!(catalog.product(7).await.unwrap().name, "Live Product");
    }

    #[tokio::test]
    async fn test_secondary_errors_are_returned() {
        let catalog = FallbackCatalog::new(StaticCatalog::default(), snapshot_catalog());
        assert!(matches!(
            catalog.product(5).await,
            Err(StorefrontError::ProductNotFound { id: 5 })
        ));
    }
}
