//! Localized message catalog.
//!
//! Every string the service prints to the log or returns in a JSON `message`
//! field comes from here. The catalog is loaded once at startup and shared
//! read-only through [`crate::AppState`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Catalog compiled into the binary, used when no file is found on disk.
const BUNDLED_MESSAGES: &str = include_str!("../messages.json");

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Messages {
    pub database_ready: String,
    pub schema_setup_failed: String,
    pub student_created: String,
    pub create_student_failed: String,
    pub students_fetched: String,
    pub fetch_students_failed: String,
    pub student_found: String,
    pub student_not_found: String,
    pub fetch_student_failed: String,
    pub student_updated: String,
    pub update_student_failed: String,
    pub student_deleted: String,
    pub delete_student_failed: String,
    pub internal_server_error: String,
    pub invalid_student_id: String,
    pub invalid_request_body: String,
}

impl Messages {
    /// Load the catalog from `path`, falling back to the bundled copy when the
    /// file does not exist. A file that exists but is malformed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(
                "Message catalog {} not found, using bundled messages",
                path.display()
            );
            return Self::bundled();
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message catalog {}", path.display()))?;
        let messages = Self::from_json(&raw)
            .with_context(|| format!("Invalid message catalog {}", path.display()))?;

        info!("Loaded message catalog from {}", path.display());
        Ok(messages)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_MESSAGES).context("Invalid bundled message catalog")
    }
}
