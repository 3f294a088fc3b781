//! # Plugin Surface
//!
//! JSON call surface for hybrid hosts (WebView bridges, Capacitor-style
//! plugin registries). The host forwards `(method, args)` pairs and relays
//! the returned value or [`PluginRejection`] back to the calling script.
//!
//! | Method           | Arguments                    | Resolves with |
//! |------------------|------------------------------|---------------|
//! | `createDocument` | `{ fileName?, mimeType? }`   | `{ uri }`     |
//! | `writeToUri`     | `{ uri, data }`              | `{}`          |
//!
//! `name`, `handle` and `payload` are accepted as aliases of `fileName`,
//! `uri` and `data`.

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use tracing::debug;

use crate::{CoreService, ExportError, ExportRequest, WriteRequest};

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "SaveFile";

pub const CREATE_DOCUMENT: &str = "createDocument";
pub const WRITE_TO_URI: &str = "writeToUri";

/// Code for calls to a method the plugin does not export.
pub const UNIMPLEMENTED: &str = "UNIMPLEMENTED";

/// Rejection relayed to the calling script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRejection {
    pub code: String,
    pub message: String,
}

impl PluginRejection {
    fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<ExportError> for PluginRejection {
    fn from(err: ExportError) -> Self {
        Self::new(err.code().as_str(), err.to_string())
    }
}

impl fmt::Display for PluginRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PluginRejection {}

/// Look up the first of `keys` holding a string.
///
/// Values of any other JSON type count as absent, as do `args` that are not
/// an object.
fn string_arg(args: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| args.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

impl CoreService {
    /// Route a plugin call to the export session.
    ///
    /// Arguments are read leniently: a missing object or a non-string field
    /// is treated as absent, so the core applies its defaults or reports
    /// `MISSING_URI` / `MISSING_DATA`.
    pub async fn dispatch(&self, method: &str, args: Value) -> Result<Value, PluginRejection> {
        debug!(plugin = PLUGIN_NAME, method, "Dispatching plugin call");

        match method {
            CREATE_DOCUMENT => {
                let handle = self
                    .create_target(ExportRequest {
                        name: string_arg(&args, &["fileName", "name"]),
                        mime_type: string_arg(&args, &["mimeType"]),
                    })
                    .await?;
                Ok(json!({ "uri": handle.as_str() }))
            }
            WRITE_TO_URI => {
                self.write_target(WriteRequest::from_parts(
                    string_arg(&args, &["uri", "handle"]),
                    string_arg(&args, &["data", "payload"]),
                ))
                .await?;
                Ok(json!({}))
            }
            other => Err(PluginRejection::new(
                UNIMPLEMENTED,
                format!("{} does not implement {}", PLUGIN_NAME, other),
            )),
        }
    }
}
