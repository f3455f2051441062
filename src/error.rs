//! Error types and exit codes.
//!
//! The scoring engine itself never fails: empty text, empty corpora and
//! zero-magnitude vectors all map to well-defined values. Errors come from
//! the collaborators around it (file reading, configuration, CLI usage).
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, bad configuration file)
//! - 2: Usage error (bad flags/args)

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid token pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("{0}")]
    Usage(String),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exit codes of the `plagiarism-checker` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    Usage = 2,
}

impl From<ExitCode> for u8 {
    fn from(code: ExitCode) -> u8 {
        code as u8
    }
}

impl CheckerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CheckerError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            CheckerError::Usage(_) => ExitCode::Usage,
            _ => ExitCode::Failure,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_with_two() {
        let err = CheckerError::Usage("at least 2 files are required".into());
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert_eq!(u8::from(err.exit_code()), 2);
    }

    #[test]
    fn io_error_names_the_path() {
        let err = CheckerError::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.exit_code(), ExitCode::Failure);
        assert!(err.to_string().contains("missing.txt"));
    }
}
