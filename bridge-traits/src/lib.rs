//! # Host Bridge Traits
//!
//! Capability traits the export core requires from its host.
//!
//! ## Overview
//!
//! The core never talks to the operating system directly. Showing a document
//! picker, opening a byte stream for a picked document, and negotiating
//! storage permissions are all host concerns, expressed here as traits and
//! implemented once per platform.
//!
//! ## Traits
//!
//! - [`DocumentPicker`](picker::DocumentPicker) - Dispatch a create-document intent, report back via [`PickCompleter`](picker::PickCompleter)
//! - [`ContentResolver`](content::ContentResolver) - Open a write-truncate stream for a locator
//! - [`PermissionService`](permission::PermissionService) - OS version, grant checks, batched requests
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | Android  | host app (JNI)      | 📋 Host-provided |
//! | iOS      | host app            | 📋 Host-provided |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should map platform exceptions onto its variants and keep the original
//! message; the core attaches these errors as the cause of the codes it
//! reports to callers.
//!
//! ## Thread Safety
//!
//! Every trait requires `Send + Sync`. A [`PickCompleter`](picker::PickCompleter)
//! may be fired from any thread, including host UI callbacks outside the
//! async runtime.

pub mod content;
pub mod error;
pub mod log;
pub mod permission;
pub mod picker;

pub use error::BridgeError;

pub use content::{ContentResolver, DynAsyncWrite};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use permission::{Capability, GrantState, OsVersion, PermissionService};
pub use picker::{
    CreateDocumentIntent, DocumentAction, DocumentCategory, DocumentPicker, PickCompleter, PickId,
    PickResultCode, PickSink, PickerResult,
};
