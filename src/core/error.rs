// Error handling for the validation gate

use crate::core::format::Encoding;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GateError>;

/// Coarse classification of a [`GateError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateErrorKind {
    Type,
    UnsupportedEncoding,
    ExtensionMismatch,
    NotFound,
    DirectoryMissing,
    CreateFailed,
    Range,
    Unset,
    Config,
}

#[derive(Error, Debug)]
pub enum GateError {
    #[error("Invalid type for {what}: expected {expected}, got {got}")]
    Type {
        what: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Unsupported encoding: {0:?} (expected one of DAT, EVT2, EVT3)")]
    UnsupportedEncoding(String),

    #[error("The {encoding} encoding needs a '{expected}' file, got {}", path.display())]
    ExtensionMismatch {
        path: PathBuf,
        encoding: Encoding,
        expected: &'static str,
    },

    #[error("Input file does not exist or is not a regular file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Output directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("Output file cannot be created: {}", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("{what} out of range: got {value}, minimum is {min}")]
    Range {
        what: &'static str,
        value: i128,
        min: i128,
    },

    #[error("No {0} has been set")]
    Unset(&'static str),

    #[error("Config read error: {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl GateError {
    pub fn kind(&self) -> GateErrorKind {
        match self {
            GateError::Type { .. } => GateErrorKind::Type,
            GateError::UnsupportedEncoding(_) => GateErrorKind::UnsupportedEncoding,
            GateError::ExtensionMismatch { .. } => GateErrorKind::ExtensionMismatch,
            GateError::NotFound(_) => GateErrorKind::NotFound,
            GateError::DirectoryMissing(_) => GateErrorKind::DirectoryMissing,
            GateError::CreateFailed { .. } => GateErrorKind::CreateFailed,
            GateError::Range { .. } => GateErrorKind::Range,
            GateError::Unset(_) => GateErrorKind::Unset,
            GateError::ConfigRead { .. } | GateError::ConfigParse(_) => GateErrorKind::Config,
        }
    }
}
