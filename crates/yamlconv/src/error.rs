//! Error types for conversion and the typed bridge.

use thiserror::Error;

/// Result type alias for yamlconv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting between YAML and JSON or while
/// bridging typed records through the conversion.
///
/// The first failing stage aborts the whole call; lower-layer errors pass
/// through unchanged except at the typed-bridge boundary, where they are
/// wrapped in [`Error::Unmarshal`].
#[derive(Debug, Error)]
pub enum Error {
    /// YAML decoding failed (syntax error or duplicate mapping key).
    #[error(transparent)]
    Yaml(#[from] yamlconv_tree::Error),

    /// JSON encoding or decoding failed. For typed decodes this carries the
    /// field/type detail (and position) reported by the JSON decoder.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML rendering failed.
    #[error(transparent)]
    YamlEmit(#[from] serde_yaml::Error),

    /// A mapping key is a sequence or a mapping and has no string form.
    #[error("unsupported mapping key at line {line}")]
    KeyNotScalar { line: usize },

    /// A float value has no JSON representation.
    #[error("non-finite float value at line {line} cannot be represented in JSON")]
    NonFiniteFloat { line: usize },

    /// The document contains a field the target record does not declare.
    /// Only produced when strict unknown-field checking was requested.
    #[error("unknown field {path:?}")]
    UnknownField { path: String },

    /// A typed unmarshal failed; wraps the underlying error.
    #[error("yaml: unmarshal errors:\n  {source}")]
    Unmarshal { source: Box<Error> },
}

impl Error {
    /// Wrap an error produced while unmarshalling a typed record.
    pub(crate) fn unmarshal(source: Error) -> Self {
        Error::Unmarshal {
            source: Box::new(source),
        }
    }
}
