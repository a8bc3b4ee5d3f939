//! Error types for the parameter group copy.

use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyError {
    /// Argument was not of the form `REGION:GROUP_NAME`
    #[error("invalid parameter group reference '{0}', expected REGION:GROUP_NAME")]
    InvalidGroupRef(String),

    #[error("unknown region '{0}'")]
    InvalidRegion(String),

    /// HTTP client or credentials provider could not be constructed
    #[error("failed to create RDS client for {region}: {message}")]
    Client { region: String, message: String },

    /// Any failure reported by the remote API
    #[error("{operation} failed: {message}")]
    Api { operation: String, message: String },

    #[error("parameter group {name} not found in region {region}")]
    GroupNotFound { region: String, name: String },

    /// Source and target snapshots differ after the copy
    #[error("found {} differing lines between source and target params", lines.len())]
    Verification { lines: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CopyError {
    pub fn api(operation: impl Into<String>, err: impl Display) -> Self {
        CopyError::Api {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    pub fn client(region: impl Into<String>, err: impl Display) -> Self {
        CopyError::Client {
            region: region.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CopyError>;
