use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Files under a base directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::StorefrontError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage
            .write_file("prices/latest.json", br#"{"groups":[]}"#)
            .await
            .unwrap();

        let data = storage.read_file("prices/latest.json").await.unwrap();
        assert_eq!(data, br#"{"groups":[]}"#.to_vec());
        assert!(temp_dir.path().join("prices").is_dir());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.read_file("nope.json").await.unwrap_err();
        assert!(matches!(err, StorefrontError::IoError(_)));
    }
}
