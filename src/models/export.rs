use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use crate::error::Result;

// ---------------------------------------------------------------------------
// ExportPayload — Downloadable CSV file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

impl ExportPayload {
    pub fn csv(content: String) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            content,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Write the payload to `dir/<file_name>` and return the full path.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, self.bytes())?;
        log::info!("Saved export: {} ({} bytes)", path.display(), self.content.len());
        Ok(path)
    }
}
