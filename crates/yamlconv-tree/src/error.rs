//! Error types for YAML decoding.

use thiserror::Error;

/// Result type alias for yamlconv-tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding YAML into a value tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed YAML reported by the scanner. Positions are 1-based.
    #[error("{message}")]
    Scan {
        message: String,
        line: usize,
        col: usize,
    },

    /// A scalar carried an explicit core-schema tag that its text does not
    /// satisfy (for example `!!int foo`), or an unsupported tag.
    #[error("cannot decode {text:?} with tag !!{tag} at line {line}")]
    BadTag {
        tag: String,
        text: String,
        line: usize,
    },

    /// Two keys at the same mapping level normalize to the same object key.
    /// `line` is the line of the key's first occurrence.
    #[error("mapping key {key:?} already defined at line {line}")]
    DuplicateKey { key: String, line: usize },
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        // The scanner's marker lines are 1-based and columns 0-based.
        let marker = *err.marker();
        Error::Scan {
            message: err.to_string(),
            line: marker.line(),
            col: marker.col() + 1,
        }
    }
}
