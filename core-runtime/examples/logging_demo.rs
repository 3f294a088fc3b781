//! Logging system demonstration
//!
//! Shows the output formats and the host sink mirroring an export's log lines.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format with a custom filter
//! cargo run --example logging_demo -- compact "core_export=trace"
//! ```

use bridge_traits::log::{ConsoleLogger, LogLevel};
use core_runtime::logging::{init_logging, redact_locator, LogFormat, LoggingConfig};
use std::env;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Debug)
        .with_spans(true)
        .with_logger_sink(Arc::new(ConsoleLogger::new("SaveFile")));

    if let Some(filter) = args.get(2) {
        config = config.with_filter(filter.clone());
    }

    if let Err(e) = init_logging(config) {
        eprintln!("{}", e);
        return;
    }

    info!(format = ?format, "Logging initialized");

    simulate_export("content://com.android.providers.downloads.documents/document/42", "hello");
    simulate_export("", "orphaned payload");

    // Let spawned sink writes drain before exiting.
    tokio::task::yield_now().await;
}

#[instrument(target = "core_export::session", skip_all)]
fn simulate_export(locator: &str, payload: &str) {
    if locator.is_empty() {
        warn!(target: "core_export::session", code = "MISSING_URI", "Export write rejected");
        return;
    }

    debug!(target: "core_export::session", locator = %redact_locator(locator), "Opening target");
    info!(
        target: "core_export::session",
        locator = %redact_locator(locator),
        bytes = payload.len(),
        "Export written"
    );
}
