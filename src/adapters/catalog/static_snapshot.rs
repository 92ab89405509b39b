use crate::core::{CatalogProvider, Storage};
use crate::domain::model::{CatalogSnapshot, Category, Product, SubCategory};
use crate::utils::error::{Result, StorefrontError};
use async_trait::async_trait;

const BUNDLED_SNAPSHOT: &str = include_str!("../../../data/catalog.json");

/// In-memory catalog backed by a JSON snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    snapshot: CatalogSnapshot,
}

impl StaticCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    /// Snapshot shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_SNAPSHOT)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path).await?;
        let snapshot: CatalogSnapshot = serde_json::from_slice(&data)?;
        tracing::debug!(
            "Loaded catalog snapshot '{}' ({} products)",
            path,
            snapshot.products.len()
        );
        Ok(Self::new(snapshot))
    }

    pub fn categories(&self) -> &[Category] {
        &self.snapshot.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.snapshot.categories.iter().find(|c| c.id == id)
    }

    /// Sub-categories of `parent`, or all of them when no parent is given.
    pub fn sub_categories(&self, parent: Option<&str>) -> Vec<&SubCategory> {
        self.snapshot
            .sub_categories
            .iter()
            .filter(|s| parent.is_none_or(|p| s.parent_category_id == p))
            .collect()
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.snapshot.products.clone())
    }

    async fn product(&self, id: u64) -> Result<Product> {
        self.snapshot
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StorefrontError::ProductNotFound { id })
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .snapshot
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
