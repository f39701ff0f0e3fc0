use std::path::PathBuf;

use cerberus_core::RewriteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CerberusError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("{0}")]
    Usage(String),
}
