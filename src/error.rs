//! Error type shared by every stage of an init run

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Malformed artifact mapping '{input}': {reason}")]
    MalformedCliMapping { input: String, reason: String },

    #[error("Artifact '{path}' was not found in the project")]
    UnresolvedArtifact { path: String },

    #[error("Artifact '{path}' is mapped more than once")]
    DuplicateArtifactMapping { path: String },

    #[error("Unable to automatically resolve an image for '{path}'; run without --force to choose one")]
    AmbiguousMatch { path: String },

    #[error("No builders detected: nothing to generate a configuration for")]
    NoArtifactsDetected,

    #[error("Failed to write configuration to {path}: {source}")]
    OutputWriteFailure { path: PathBuf, source: io::Error },

    #[error("Pre-existing configuration {0} found (you may continue with --overwrite)")]
    OutputAlreadyExists(PathBuf),

    #[error("Failed to walk project directory {path}: {reason}")]
    FilesystemWalkFailure { path: PathBuf, reason: String },

    #[error("Invalid image reference '{0}'")]
    InvalidImage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Run cancelled")]
    Cancelled,

    #[error("Prompt failed: {0}")]
    PromptFailure(String),

    #[error("Failed to serialize {what}: {reason}")]
    Serialization { what: &'static str, reason: String },
}

impl InitError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        InitError::MalformedCliMapping {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        InitError::OutputWriteFailure {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_yaml::Error> for InitError {
    fn from(err: serde_yaml::Error) -> Self {
        InitError::Serialization {
            what: "configuration",
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InitError {
    fn from(err: serde_json::Error) -> Self {
        InitError::Serialization {
            what: "analysis report",
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_match_names_path() {
        let err = InitError::AmbiguousMatch {
            path: "leeroy-app/Dockerfile".to_string(),
        };
        assert!(err.to_string().contains("leeroy-app/Dockerfile"));
    }

    #[test]
    fn test_write_failure_keeps_source() {
        let err = InitError::write_failure(
            ".",
            io::Error::new(io::ErrorKind::Other, "is a directory"),
        );
        let msg = err.to_string();
        assert!(msg.contains("is a directory"));
        assert!(matches!(err, InitError::OutputWriteFailure { .. }));
    }
}
