//! Filesystem access used by configuration and credential loading.

use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Read-only filesystem view.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read a file as UTF-8 text.
    ///
    /// Returns `Ok(None)` when the file does not exist; any other failure
    /// (permissions, directory in place of a file, invalid UTF-8) is an error.
    async fn read_to_string(&self, path: &Path) -> io::Result<Option<String>>;
}

/// Local disk, read through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_read_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        tokio::fs::write(&path, "abc123\n").await.unwrap();

        let content = LocalFileSystem.read_to_string(&path).await.unwrap();
        assert_eq!(content.as_deref(), Some("abc123\n"));
    }

    #[tokio::test]
    async fn test_local_read_missing() {
        let dir = TempDir::new().unwrap();
        let content = LocalFileSystem
            .read_to_string(&dir.path().join("missing"))
            .await
            .unwrap();
        assert!(content.is_none());
    }

    #[tokio::test]
    async fn test_local_read_directory_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(LocalFileSystem.read_to_string(dir.path()).await.is_err());
    }
}
