use crate::core::CatalogProvider;
use crate::domain::model::Product;
use crate::utils::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Catalog served by the storefront REST API.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    base_url: String,
    client: Client,
}

impl RemoteCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        Err(StorefrontError::RemoteApiError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CatalogProvider for RemoteCatalog {
    async fn products(&self) -> Result<Vec<Product>> {
        let url = self.endpoint("/products");
        tracing::debug!("Fetching products from: {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn product(&self, id: u64) -> Result<Product> {
        let url = self.endpoint(&format!("/products/{}", id));
        tracing::debug!("Fetching product from: {}", url);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorefrontError::ProductNotFound { id });
        }
        Self::decode(response).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let url = self.endpoint("/products/search");
        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_products_and_search() {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products");
                then.status(200).json_body(serde_json::json!([
                    {"id": 1, "name": "KISA24 1gr", "categoryId": "gold-bar"},
                    {"id": 2, "name": "KISA24 5gr", "categoryId": "gold-bar"}
                ]));
            })
            .await;
        let search = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/products/search")
                    .query_param("q", "5gr");
                then.status(200).json_body(serde_json::json!([
                    {"id": 2, "name": "KISA24 5gr", "categoryId": "gold-bar"}
                ]));
            })
            .await;

        let catalog = RemoteCatalog::new(format!("{}/", server.url("/api")));
        assert_eq!(catalog.products().await.unwrap().len(), 2);
        assert_eq!(catalog.search("5gr").await.unwrap()[0].id, 2);

        list.assert_async().await;
        search.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products/9");
                then.status(404);
            })
            .await;

        let catalog = RemoteCatalog::new(server.base_url());
        assert!(matches!(
            catalog.product(9).await,
            Err(StorefrontError::ProductNotFound { id: 9 })
        ));
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products");
                then.status(500)
                    .json_body(serde_json::json!({"message": "catalog offline"}));
            })
            .await;

        let catalog = RemoteCatalog::new(server.base_url());
        match catalog.products().await {
            Err(StorefrontError::RemoteApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "catalog offline");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
