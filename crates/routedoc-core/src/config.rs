//! Host-supplied document metadata.
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! openapi_version = "3.0.1"
//!
//! [info]
//! title = "Your API Title"
//! version = "1.0.0"
//! description = "Your API Description"
//!
//! [info.contact]
//! name = "Your Name"
//! url = "https://github.com/yourusername"
//! email = "your.email@example.com"
//!
//! [info.license]
//! name = "MIT"
//! url = "https://opensource.org/licenses/MIT"
//! ```
//!
//! Contact and license are only emitted when their tables are present.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::{DEFAULT_OPENAPI_VERSION, Document, Info};
use crate::error::{Error, Result};

/// Document metadata configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// OpenAPI version string written to the document.
    pub openapi_version: String,
    /// Top-level metadata.
    pub info: Info,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
            info: Info::default(),
        }
    }
}

impl DocsConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("invalid docs config: {e}")))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded docs config from {}", path.display());
        Ok(config)
    }

    /// An empty document carrying this metadata.
    pub fn to_document(&self) -> Document {
        Document::new(self.openapi_version.clone(), self.info.clone())
    }
}
