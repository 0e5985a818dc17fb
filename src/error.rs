//! Errors for the fallible edges of the crate
//!
//! The frame path never fails; only scene loading and color parsing do.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("invalid color string: {0:?}")]
    InvalidColor(String),

    #[error("unknown effect kind: {0:?}")]
    UnknownEffect(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FxResult<T> = Result<T, FxError>;
