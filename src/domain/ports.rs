use crate::domain::model::Product;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Endpoints of the two live price feeds.
pub trait ConfigProvider: Send + Sync {
    fn price_feed_url(&self) -> &str;
    fn update_feed_url(&self) -> &str;
}

/// Source of catalog products.
///
/// Only the three base lookups are required; the filtered views are built
/// on top of [`CatalogProvider::products`].
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn products(&self) -> Result<Vec<Product>>;
    async fn product(&self, id: u64) -> Result<Product>;
    async fn search(&self, query: &str) -> Result<Vec<Product>>;

    /// `"all"` or an empty id returns every product.
    async fn products_by_category(&self, category_id: &str) -> Result<Vec<Product>> {
        let products = self.products().await?;
        if category_id.is_empty() || category_id == "all" {
            return Ok(products);
        }
        Ok(products
            .into_iter()
            .filter(|p| p.category_id == category_id)
            .collect())
    }

    /// `"all-custom"` or an empty id returns every product of the `custom` category.
    async fn products_by_sub_category(&self, sub_category_id: &str) -> Result<Vec<Product>> {
        let products = self.products().await?;
        if sub_category_id.is_empty() || sub_category_id == "all-custom" {
            return Ok(products
                .into_iter()
                .filter(|p| p.category_id == "custom")
                .collect());
        }
        Ok(products
            .into_iter()
            .filter(|p| p.sub_category_id.as_deref() == Some(sub_category_id))
            .collect())
    }

    async fn featured(&self, limit: usize) -> Result<Vec<Product>> {
        let products = self.products().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.is_featured)
            .take(limit)
            .collect())
    }

    /// Products to show next to `current_id`: same category first, then the rest.
    async fn recommended(&self, current_id: u64, limit: usize) -> Result<Vec<Product>> {
        let products = self.products().await?;
        let current_category = products
            .iter()
            .find(|p| p.id == current_id)
            .map(|p| p.category_id.clone());
        let others = products.into_iter().filter(|p| p.id != current_id);

        let Some(category_id) = current_category else {
            return Ok(others.take(limit).collect());
        };

        let (same, rest): (Vec<Product>, Vec<Product>) =
            others.partition(|p| p.category_id == category_id);
        Ok(same.into_iter().chain(rest).take(limit).collect())
    }
}
