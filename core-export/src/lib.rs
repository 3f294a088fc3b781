//! # Export Core
//!
//! Permission-gated document creation and writing.
//!
//! ## Overview
//!
//! A host application that wants to save data to a user-chosen location goes
//! through two calls:
//!
//! - [`ExportSession::create_target`] asks the user, through the host picker,
//!   to name and place a new document, and yields its [`TargetHandle`].
//! - [`ExportSession::write_target`] replaces that document's content with a
//!   UTF-8 payload.
//!
//! Before either is useful, [`PermissionNegotiator::ensure_permissions`]
//! requests the storage capabilities matching the running OS version.
//!
//! Every rejection carries one of five stable [`ErrorCode`]s.
//!
//! ## Example
//!
//! ```ignore
//! use core_export::{ExportRequest, ExportSession, WriteRequest};
//!
//! let session = ExportSession::from_config(&config, events.clone());
//! let handle = session
//!     .create_target(ExportRequest::new("fleet.csv", "text/csv"))
//!     .await?;
//! session.write_target(WriteRequest::new(&handle, csv)).await?;
//! ```

pub mod error;
mod pending;
pub mod permissions;
pub mod session;
pub mod types;

pub use error::{ErrorCode, ExportError, Result};
pub use permissions::{required_band, PermissionBand, PermissionNegotiator, PermissionOutcome};
pub use session::ExportSession;
pub use types::{ExportRequest, TargetHandle, WriteRequest};
