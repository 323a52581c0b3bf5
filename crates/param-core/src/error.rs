//! Error types shared by the parameter store, the backends, and the registry.

use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a [`ParamError`].
///
/// Callers that only care whether to retry, prompt, or abort can match on
/// this instead of on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A format could not be registered.
    Registration,
    /// An extension or a parameter key was not found.
    Lookup,
    /// The backing file could not be read or written.
    Io,
    /// The file content could not be (de)serialized.
    Format,
}

/// Errors returned by parameter handlers and the format registry.
#[derive(Debug, Error)]
pub enum ParamError {
    /// The extension or constructor passed to `register` was rejected.
    #[error("cannot register format: {reason}")]
    Registration { reason: String },

    /// No handler is registered for the path's extension.
    #[error("type \"{extension}\" not found")]
    TypeNotFound { extension: String },

    /// `remove_param` was called for a key that is not set.
    #[error("parameter \"{key}\" not found")]
    KeyNotFound { key: String },

    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid document for the handler's format.
    #[error("invalid content in {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl ParamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParamError::Registration { .. } => ErrorKind::Registration,
            ParamError::TypeNotFound { .. } | ParamError::KeyNotFound { .. } => ErrorKind::Lookup,
            ParamError::Io { .. } => ErrorKind::Io,
            ParamError::Format { .. } => ErrorKind::Format,
        }
    }
}

/// Codec-level failure, independent of any file path.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary: {0}")]
    Binary(#[from] bincode::Error),

    #[error("TOML parse: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A text document is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// NaN or infinity under `key`; the text format has no representation for it.
    #[error("non-finite float under \"{key}\" cannot be written")]
    NonFiniteFloat { key: String },

    /// The binary stream does not start with the expected magic/version.
    #[error("missing or unsupported binary header")]
    BadHeader,

    /// The document parsed, but its top level is not a key-value mapping.
    #[error("expected a top-level {expected} mapping")]
    NotAMapping { expected: &'static str },
}
