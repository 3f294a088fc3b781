//! # Desktop Bridge Implementations
//!
//! Default implementations of the export bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `DocumentPicker` using a directory-backed picker (`tokio::fs`)
//! - `ContentResolver` for `file://` locators using `tokio::fs`
//! - `PermissionService` as an in-memory grant table (desktop has no runtime
//!   storage permissions)
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{DesktopDocumentPicker, InMemoryPermissionService, TokioContentResolver};
//! use std::sync::Arc;
//!
//! let picker = Arc::new(DesktopDocumentPicker::new());
//! let resolver = Arc::new(TokioContentResolver::new());
//! let permissions = Arc::new(InMemoryPermissionService::desktop());
//! ```

mod content;
mod permission;
mod picker;

pub use content::TokioContentResolver;
pub use permission::InMemoryPermissionService;
pub use picker::DesktopDocumentPicker;
