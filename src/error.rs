//! Error types shared by the asset and settings layers.
//!
//! None of these are fatal: the driver reports them back to the caller, which
//! turns them into a HUD notice or a log line and keeps rendering.
use thiserror::Error;

/// Failure reported by an [`AssetProvider`](crate::assets::AssetProvider) for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The importer could not fetch or parse the file.
    #[error("failed to load `{path}`: {reason}")]
    LoadFailed { path: String, reason: String },
    /// The file parsed but contains nothing that can be placed in the scene.
    #[error("`{path}` contains no scene")]
    NoScene { path: String },
}

impl AssetError {
    /// Path of the asset the failed request was for.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            AssetError::LoadFailed { path, .. } | AssetError::NoScene { path } => path,
        }
    }
}

/// Errors raised while reading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}
