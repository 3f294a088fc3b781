//! Directory-backed Document Picker
//!
//! Desktop hosts without a native save dialog (headless runs, CI, kiosk
//! builds) still need the create-document round trip. This picker confirms
//! every intent against a fixed export directory: it chooses a free file name,
//! creates the empty document the way an OS picker would, and reports the
//! `file://` locator back through the completer.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    picker::{CreateDocumentIntent, DocumentPicker, PickCompleter, PickerResult},
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use url::Url;

/// Upper bound on `name (n).ext` probing before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

pub struct DesktopDocumentPicker {
    export_dir: PathBuf,
}

impl DesktopDocumentPicker {
    /// Picker rooted at the user's documents directory.
    pub fn new() -> Self {
        let export_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);

        Self { export_dir }
    }

    /// Picker rooted at a custom directory.
    pub fn with_directory(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Strip anything that would escape the export directory.
    fn sanitize_title(title: &str) -> String {
        let cleaned: String = title
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
            .collect();

        match cleaned.trim() {
            "" | "." | ".." => "untitled".to_string(),
            name => name.to_string(),
        }
    }

    fn candidate_name(title: &str, attempt: u32) -> String {
        if attempt == 0 {
            return title.to_string();
        }

        let path = Path::new(title);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| title.to_string());

        match path.extension() {
            Some(ext) => format!("{} ({}).{}", stem, attempt, ext.to_string_lossy()),
            None => format!("{} ({})", stem, attempt),
        }
    }

    /// Create a new, empty document in `dir` without overwriting anything.
    async fn create_document(dir: &Path, title: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir).await?;

        let title = Self::sanitize_title(title);
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = dir.join(Self::candidate_name(&title, attempt));
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => return Ok(path),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(BridgeError::Io(e)),
            }
        }

        Err(BridgeError::OperationFailed(format!(
            "No free file name for '{}' after {} attempts",
            title, MAX_NAME_ATTEMPTS
        )))
    }

    fn path_to_locator(path: &Path) -> Result<String> {
        Url::from_file_path(path)
            .map(|url| url.to_string())
            .map_err(|_| {
                BridgeError::OperationFailed(format!(
                    "Cannot express {} as a file URL",
                    path.display()
                ))
            })
    }
}

impl Default for DesktopDocumentPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentPicker for DesktopDocumentPicker {
    async fn launch(&self, intent: CreateDocumentIntent, completer: PickCompleter) -> Result<()> {
        let dir = self.export_dir.clone();
        debug!(pick_id = %completer.id(), mime_type = %intent.mime_type, "Launching desktop picker");

        tokio::spawn(async move {
            let result = match Self::create_document(&dir, &intent.title).await {
                Ok(path) => match Self::path_to_locator(&path) {
                    Ok(locator) => PickerResult::selected(locator),
                    Err(e) => {
                        warn!(error = %e, "Created document has no file URL");
                        PickerResult::canceled()
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Desktop picker could not create document");
                    PickerResult::canceled()
                }
            };

            if !completer.complete(result) {
                debug!("Picker result discarded, no caller waiting");
            }
        });

        Ok(())
    }
}
