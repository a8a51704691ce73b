//! Error types for the boundary-condition model

use std::path::PathBuf;

use thiserror::Error;

use super::iolet::IoletKind;

/// Errors raised while constructing or mutating an iolet
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// Keyword not in the recognized attribute set for this kind
    #[error("{kind} got an unexpected argument '{name}'")]
    UnexpectedArgument { kind: IoletKind, name: String },

    /// Value has the wrong shape for a typed attribute
    #[error("invalid value for '{name}': expected {expected}")]
    InvalidAttribute { name: String, expected: String },

    /// Attribute path does not exist on this kind
    #[error("{kind} has no attribute '{path}'")]
    UnknownAttribute { kind: IoletKind, path: String },
}

impl ModelError {
    pub fn unexpected(kind: IoletKind, name: impl Into<String>) -> Self {
        Self::UnexpectedArgument {
            kind,
            name: name.into(),
        }
    }

    pub fn invalid(name: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            expected: expected.into(),
        }
    }

    pub fn unknown(kind: IoletKind, path: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            kind,
            path: path.into(),
        }
    }
}

/// Errors raised while saving or loading a snapshot file
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to write snapshot TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("iolet #{index}: {source}")]
    Model { index: usize, source: ModelError },
}
