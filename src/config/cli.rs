use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Writes outputs under a base directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

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

    #[tokio::test]
    async fn test_write_then_read_creates_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = dir.path().join("nested").to_str().unwrap().to_string();
        let storage = LocalStorage::new(base);

        storage.write_file("tower_plan.json", b"[]").await.unwrap();

        assert_eq!(storage.read_file("tower_plan.json").await.unwrap(), b"[]");
        assert!(storage.read_file("missing.csv").await.is_err());
    }
}
