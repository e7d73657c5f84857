//! Error types for the slidefit library.

use std::io;
use thiserror::Error;

/// Result type alias for slidefit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fixing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid Marp document (first slide lacks
    /// `marp: true` or a `theme:` key in its frontmatter).
    #[error("Invalid Marp document: {0}")]
    Validation(String),

    /// A measurement tool (Marp CLI or Node) is not installed.
    #[error("Measurement tool not found: {0}")]
    ToolMissing(String),

    /// A measurement subprocess failed or exited non-zero.
    #[error("Measurement failed: {0}")]
    ToolFailed(String),

    /// The overflow probe emitted output that is not a valid report list.
    #[error("Invalid probe output: {0}")]
    ProbeOutput(String),
}

impl Error {
    /// Coarse error category for reporting: `"io"`, `"validation"`, or
    /// `"measurement"`.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Validation(_) => "validation",
            Error::ToolMissing(_) | Error::ToolFailed(_) | Error::ProbeOutput(_) => "measurement",
        }
    }

    /// True for any failure of the external measurement collaborator.
    pub fn is_measurement(&self) -> bool {
        self.category() == "measurement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Validation("missing marp: true or theme:".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid Marp document: missing marp: true or theme:"
        );

        let err = Error::ToolMissing("marp".to_string());
        assert_eq!(err.to_string(), "Measurement tool not found: marp");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.category(), "io");
    }

    #[test]
    fn test_measurement_category() {
        assert!(Error::ToolMissing("node".into()).is_measurement());
        assert!(Error::ToolFailed("exit 1".into()).is_measurement());
        assert!(Error::ProbeOutput("not json".into()).is_measurement());
        assert!(!Error::Validation("no frontmatter".into()).is_measurement());
    }
}
