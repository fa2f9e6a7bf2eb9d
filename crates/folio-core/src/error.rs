//! Error types for Folio Core
//!
//! Only configuration loading and explicit store access can fail. Theme,
//! reveal and scene components recover internally and log instead.

use folio_scene::SceneError;
use folio_theme::StoreError;
use std::path::PathBuf;

/// Main Folio error type
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    /// Configuration file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`FolioConfig`](crate::FolioConfig)
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// Preference store failure
    #[error("preference store error: {0}")]
    Store(#[from] StoreError),

    /// Scene input rejected
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result alias for Folio Core
pub type Result<T> = std::result::Result<T, FolioError>;
