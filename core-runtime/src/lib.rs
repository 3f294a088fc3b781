//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the export core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Export event bus
//!
//! ## Overview
//!
//! Everything here is independent of the export protocol itself. The
//! `core-export` crate consumes the configuration and emits events; hosts use
//! the logging module to route `tracing` output into their own log pipeline.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
