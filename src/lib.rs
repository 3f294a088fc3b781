//! Workspace placeholder crate.
//!
//! Exposes the feature flags that select which bridge set the export core is
//! wired with. Host applications depend on `docsave-workspace` and pick either
//! `desktop-shims` (default bridges from `bridge-desktop`) or `headless`
//! (every bridge injected by the host).

#[cfg(any(feature = "desktop-shims", feature = "headless"))]
pub use core_service::*;
