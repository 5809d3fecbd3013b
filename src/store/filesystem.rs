//! Filesystem object store
//!
//! Objects live under `<root>/<bucket>/<name>` and are served back by the
//! `/files` route, so the public location is `<base>/<bucket>/<name>`.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

use super::{ObjectStore, is_valid_object_name};

/// [`ObjectStore`] writing to a local directory
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    dir: PathBuf,
    bucket: String,
    public_base_url: String,
}

impl FsObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: config.root.join(&config.bucket),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Create the bucket directory if needed
    pub async fn ensure_bucket(&self) -> AppResult<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    fn path_for(&self, name: &str) -> AppResult<PathBuf> {
        if !is_valid_object_name(name) {
            return Err(AppError::StorageFailure(format!("Invalid object name: {}", name)));
        }
        Ok(self.dir.join(name))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> AppResult<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir).await?;
        fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "Stored object");
        Ok(())
    }

    async fn get(&self, name: &str) -> AppResult<Option<Vec<u8>>> {
        let path = self.path_for(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn store_in(dir: &tempfile::TempDir) -> FsObjectStore {
        let mut config = Config::for_memory("secret").storage;
        config.root = dir.path().to_path_buf();
        FsObjectStore::new(&config)
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.put("cv.pdf", b"%PDF".to_vec()).await.unwrap();
        assert!(dir.path().join("candidatures").join("cv.pdf").exists());
        assert_eq!(store.get("cv.pdf").await.unwrap(), Some(b"%PDF".to_vec()));

        store.delete("cv.pdf").await.unwrap();
        assert_eq!(store.get("cv.pdf").await.unwrap(), None);
        // deleting twice is fine
        store.delete("cv.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let err = store.put("../escape", vec![0]).await.unwrap_err();
        assert!(matches!(err, AppError::StorageFailure(_)));
    }

    #[test]
    fn test_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(
            store.public_url("a-video-1.mp4"),
            "http://localhost:8080/files/candidatures/a-video-1.mp4"
        );
    }
}
