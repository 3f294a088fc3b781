//! Content Resolution Abstractions
//!
//! Locators handed out by the document picker are opaque strings
//! (`content://...` on Android, `file://...` on desktop). The core never
//! interprets them; it only asks the host to open a byte stream for one.

use async_trait::async_trait;

use crate::error::Result;

/// Writer returned by [`ContentResolver::open_output_stream`].
pub type DynAsyncWrite = dyn tokio::io::AsyncWrite + Send + Unpin;

/// Host content resolver trait
///
/// Abstracts the platform layer that maps a locator to a writable resource:
/// - **Android**: `ContentResolver.openOutputStream(uri, "wt")`
/// - **iOS**: security-scoped URL + `FileHandle`
/// - **Desktop**: `file://` URLs over `tokio::fs`
///
/// # Example
///
/// ```ignore
/// use bridge_traits::content::ContentResolver;
/// use tokio::io::AsyncWriteExt;
///
/// async fn save(resolver: &dyn ContentResolver, uri: &str, bytes: &[u8]) -> Result<()> {
///     let mut out = resolver.open_output_stream(uri).await?;
///     out.write_all(bytes).await?;
///     out.shutdown().await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ContentResolver: Send + Sync {
    /// Open a write-truncate stream for `locator`.
    ///
    /// Existing content is discarded. Fails if the locator is unknown,
    /// revoked, or the resource no longer exists; the resource is never
    /// created here.
    async fn open_output_stream(&self, locator: &str) -> Result<Box<DynAsyncWrite>>;
}
