//! Error types for resdeploy-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading the settings document.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings document did not exist at the expected path.
    #[error("settings file not found at {path}")]
    NotFound { path: PathBuf },

    /// Underlying I/O failure reading the document.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error on load — includes file path and position context
    /// from serde_json.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A mandatory field is absent or empty. No defaulting is performed.
    #[error("missing property \"{field}\" in settings file")]
    MissingField { field: &'static str },
}

/// All errors that can arise while building the deployment manifest.
///
/// A *missing* source file is not an error — the mapping entry is skipped.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// An existing source file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All errors that can arise from remote web-resource operations.
///
/// Transports map their own failures into these variants; nothing above the
/// [`crate::remote::WebResourceStore`] seam sees transport-specific types.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Authentication or session establishment failure.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Connection-level failure (DNS, TLS, socket).
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote API answered with an error status.
    #[error("remote API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The remote answered successfully but the payload was not in the
    /// expected shape.
    #[error("malformed remote response: {0}")]
    Response(String),
}
