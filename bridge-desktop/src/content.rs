//! Content Resolver Implementation using Tokio

use async_trait::async_trait;
use bridge_traits::{
    content::{ContentResolver, DynAsyncWrite},
    error::{BridgeError, Result},
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use url::Url;

/// Resolves `file://` locators to files on the local filesystem.
///
/// Streams are opened write + truncate without `create`, matching the
/// semantics of a picked document: the picker creates the file, the resolver
/// only rewrites it.
#[derive(Debug, Clone, Default)]
pub struct TokioContentResolver;

impl TokioContentResolver {
    pub fn new() -> Self {
        Self
    }

    /// Map a `file://` locator to a local path.
    pub fn locator_to_path(locator: &str) -> Result<PathBuf> {
        let url = Url::parse(locator)
            .map_err(|e| BridgeError::NotAvailable(format!("Unparseable locator: {}", e)))?;

        if url.scheme() != "file" {
            return Err(BridgeError::NotAvailable(format!(
                "Unsupported locator scheme '{}' on desktop",
                url.scheme()
            )));
        }

        url.to_file_path()
            .map_err(|_| BridgeError::NotAvailable("Locator is not a local file path".to_string()))
    }

    fn map_open_error(e: std::io::Error, path: &Path) -> BridgeError {
        match e.kind() {
            ErrorKind::NotFound => BridgeError::NotFound(path.display().to_string()),
            ErrorKind::PermissionDenied => {
                BridgeError::PermissionDenied(path.display().to_string())
            }
            _ => BridgeError::Io(e),
        }
    }
}

#[async_trait]
impl ContentResolver for TokioContentResolver {
    async fn open_output_stream(&self, locator: &str) -> Result<Box<DynAsyncWrite>> {
        let path = Self::locator_to_path(locator)?;

        let file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|e| Self::map_open_error(e, &path))?;

        debug!(path = ?path, "Opened document for writing");
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tokio::io::AsyncWriteExt;
    use uuid::Uuid;

    fn temp_file(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("bridge-desktop-content-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn locator(path: &Path) -> String {
        Url::from_file_path(path).unwrap().to_string()
    }

    #[test]
    fn test_rejects_foreign_scheme() {
        let err = TokioContentResolver::locator_to_path("content://downloads/document/7")
            .unwrap_err();
        assert!(matches!(err, BridgeError::NotAvailable(_)));
    }

    #[test]
    fn test_rejects_garbage_locator() {
        let err = TokioContentResolver::locator_to_path("not a locator").unwrap_err();
        assert!(matches!(err, BridgeError::NotAvailable(_)));
    }

    #[tokio::test]
    async fn test_open_truncates_existing_content() {
        let path = temp_file("export.json");
        std::fs::write(&path, b"previous content that is longer").unwrap();

        let resolver = TokioContentResolver::new();
        let mut out = resolver.open_output_stream(&locator(&path)).await.unwrap();
        out.write_all(b"new").await.unwrap();
        out.shutdown().await.unwrap();
        drop(out);

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_missing_document_is_not_created() {
        let path = temp_file("deleted.json");

        let resolver = TokioContentResolver::new();
        let err = resolver.open_output_stream(&locator(&path)).await.err().unwrap();

        assert!(matches!(err, BridgeError::NotFound(_)));
        assert!(!path.exists());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
