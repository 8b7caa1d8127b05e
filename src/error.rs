//! Error types for argument parsing
//!
//! Grammar errors abort parsing before anything is forwarded; resource
//! errors are surfaced as-is and are fatal to the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for argument handling
#[derive(Error, Debug)]
pub enum ArgsError {
    /// A flag name that is not part of the grammar
    #[error("invalid option '{option}'")]
    InvalidOption { option: String },

    /// A second operation was requested after one was already set
    #[error("only one operation may be used at a time ('{requested}' after '{existing}')")]
    MultipleOperations { existing: String, requested: String },

    /// Reading targets from standard input failed
    #[error("failed to read targets from standard input")]
    Stdin {
        #[source]
        source: std::io::Error,
    },

    /// The controlling terminal could not be reopened after draining stdin
    #[error("failed to reopen terminal {path}")]
    Terminal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File system operation errors
    #[error("File system error: {operation} failed on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ArgsError {
    /// Create a new invalid option error
    pub fn invalid_option(option: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
        }
    }

    /// Create a new multiple operations error
    pub fn multiple_operations(existing: impl Into<String>, requested: impl Into<String>) -> Self {
        Self::MultipleOperations {
            existing: existing.into(),
            requested: requested.into(),
        }
    }

    /// Create a new stdin error
    pub const fn stdin(source: std::io::Error) -> Self {
        Self::Stdin { source }
    }

    /// Create a new terminal error
    pub fn terminal<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Terminal {
            path: path.into(),
            source,
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error wrapping its cause
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error comes from the command-line grammar itself
    pub const fn is_grammar(&self) -> bool {
        matches!(
            self,
            Self::InvalidOption { .. } | Self::MultipleOperations { .. }
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ArgsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_names_token() {
        let err = ArgsError::invalid_option("--frobnicate");
        assert_eq!(err.to_string(), "invalid option '--frobnicate'");
        assert!(err.is_grammar());
    }

    #[test]
    fn test_multiple_operations_message() {
        let err = ArgsError::multiple_operations("-S", "-R");
        assert!(err.to_string().contains("only one operation"));
        assert!(err.to_string().contains("'-R'"));
        assert!(err.is_grammar());
    }

    #[test]
    fn test_resource_errors_are_not_grammar() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!ArgsError::terminal("/dev/tty", io).is_grammar());
    }
}
