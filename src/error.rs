//! Error types for incbuild.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for incbuild operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Which configured directory a path plays in the project layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Src,
    Include,
    Lib,
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRole::Src => write!(f, "src"),
            PathRole::Include => write!(f, "include"),
            PathRole::Lib => write!(f, "lib"),
        }
    }
}

/// Errors that can occur while loading a project or driving a build.
#[derive(Error, Debug)]
pub enum BuildError {
    /// No config file at the expected location.
    #[error(
        "{} not found\n\n💡 Tip: create a build.toml with [project], [compiler] and [paths] sections, or pass --config <FILE>.",
        .0.display()
    )]
    ConfigNotFound(PathBuf),

    /// Config file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or misses a required key.
    #[error("failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Profile argument other than `debug` or `release`.
    #[error("invalid profile argument '{0}' (expected 'debug' or 'release')")]
    InvalidProfileArgument(String),

    /// One of the directories the project cannot build without.
    #[error("[{role}] {} directory not found", .path.display())]
    RequiredDirectoryMissing { role: PathRole, path: PathBuf },

    /// Source root handed to the inventory builder does not exist.
    #[error("directory {} not found", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed part way.
    #[error("failed to scan directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Modification time could not be read. Non-fatal: callers degrade it to an unknown stamp.
    #[error("timestamp unavailable for {}: {source}", .path.display())]
    TimestampUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} unit(s) failed to compile: {}", .units.len(), .units.join(", "))]
    CompileStepFailed { units: Vec<String> },

    #[error("linking {} failed", .output.display())]
    LinkStepFailed { output: PathBuf },

    #[error("failed to start compile workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write compile_commands.json: {0}")]
    CompileCommands(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_directory_message_names_role() {
        let err = BuildError::RequiredDirectoryMissing {
            role: PathRole::Include,
            path: PathBuf::from("include"),
        };
        assert_eq!(err.to_string(), "[include] include directory not found");
    }

    #[test]
    fn test_compile_failure_lists_units() {
        let err = BuildError::CompileStepFailed {
            units: vec!["a".into(), "net/b".into()],
        };
        assert_eq!(err.to_string(), "2 unit(s) failed to compile: a, net/b");
    }
}
