//! Error types for the org chart engine.
//!
//! Only loading surfaces are fallible: reading and decoding config or
//! record files. Malformed employee data is never an error here; it is
//! reported as data by [`crate::validator::validate`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or record files.
#[derive(Debug, Error)]
pub enum OrgChartError {
    /// File could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding failed.
    #[error("Invalid JSON in {context}: {source}")]
    Json {
        /// Where the JSON came from.
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML decoding failed.
    #[error("Invalid YAML in {context}: {source}")]
    Yaml {
        /// Where the YAML came from.
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// File extension is not one we know how to decode.
    #[error("Unsupported file format: {} (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedFormat {
        /// Offending file.
        path: PathBuf,
    },

    /// Config decoded but holds an out-of-range value.
    #[error("Invalid config: {field} {reason}")]
    InvalidConfig {
        /// Config field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl OrgChartError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO",
            Self::Json { .. } => "INVALID_JSON",
            Self::Yaml { .. } => "INVALID_YAML",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }
}

/// Result alias for loading operations.
pub type Result<T> = std::result::Result<T, OrgChartError>;

/// Decoder picked from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub(crate) fn from_path(path: &std::path::Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(OrgChartError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| OrgChartError::Io {
        path: path.to_path_buf(),
        source,
    })
}
