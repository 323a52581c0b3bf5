//! The parameter store contract and its file-backed implementation.
//!
//! A *handler* is bound to one file path and owns the in-memory parameter
//! mapping for that file.  The mapping is only synchronised with disk when
//! the caller invokes [`ParamHandler::read`] or [`ParamHandler::write`]:
//!
//! ```text
//! registry.create("app.json")  ──►  handler { source: app.json, params: {} }
//!        add_param / remove_param  (memory only)
//!        write()  ──►  app.json overwritten in full
//!        read()   ◄──  app.json replaces params in full
//! ```
//!
//! There is no merging: `read` discards unsaved in-memory changes, and
//! `write` replaces whatever was on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ParamError;
use crate::format::{BinaryFormat, JsonFormat, ParamFormat};
use crate::value::{ParamMap, ParamValue};

/// The common contract of every parameter handler.
///
/// Implementors provide access to their source path and mapping plus the
/// format-specific [`read`](ParamHandler::read) and
/// [`write`](ParamHandler::write); the key-value operations are provided.
pub trait ParamHandler {
    /// Path of the backing file.  Fixed at construction.
    fn source(&self) -> &Path;

    /// Name of the serialization format, e.g. `"json"`.
    fn format_name(&self) -> &'static str;

    fn params(&self) -> &ParamMap;

    fn params_mut(&mut self) -> &mut ParamMap;

    /// Loads the backing file, replacing the whole in-memory mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Io`] if the file is missing or unreadable and
    /// [`ParamError::Format`] if its content is not a valid mapping.  The
    /// in-memory mapping is left unchanged on error.
    fn read(&mut self) -> Result<(), ParamError>;

    /// Serializes the mapping and overwrites the backing file in full.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Io`] if the file cannot be written and
    /// [`ParamError::Format`] if the mapping cannot be represented in the
    /// handler's format.
    fn write(&self) -> Result<(), ParamError>;

    /// Inserts `value` under `key`, replacing any previous value.
    fn add_param(&mut self, key: &str, value: ParamValue) {
        self.params_mut().insert(key.to_string(), value);
    }

    /// Returns the value for `key`, or `None` if it is not set.
    fn get_param(&self, key: &str) -> Option<&ParamValue> {
        self.params().get(key)
    }

    fn get_all_params(&self) -> &ParamMap {
        self.params()
    }

    /// Removes `key` and returns its value.
    ///
    /// Unlike [`get_param`](ParamHandler::get_param), a missing key is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::KeyNotFound`] if `key` is not set.
    fn remove_param(&mut self, key: &str) -> Result<ParamValue, ParamError> {
        self.params_mut()
            .remove(key)
            .ok_or_else(|| ParamError::KeyNotFound {
                key: key.to_string(),
            })
    }

    fn remove_all_params(&mut self) {
        self.params_mut().clear();
    }

    fn contains_param(&self, key: &str) -> bool {
        self.params().contains_key(key)
    }

    fn len(&self) -> usize {
        self.params().len()
    }

    fn is_empty(&self) -> bool {
        self.params().is_empty()
    }
}

/// A [`ParamHandler`] that stores its mapping in a file using codec `F`.
#[derive(Debug, Clone)]
pub struct FileParamHandler<F> {
    source: PathBuf,
    params: ParamMap,
    format: F,
}

/// Handler for `.json` files.
pub type JsonParamHandler = FileParamHandler<JsonFormat>;

/// Handler for `.bin` files.
pub type BinaryParamHandler = FileParamHandler<BinaryFormat>;

impl<F: ParamFormat + Default> FileParamHandler<F> {
    /// Creates a handler bound to `source` with an empty mapping.
    ///
    /// The file is not touched until [`ParamHandler::read`] or
    /// [`ParamHandler::write`] is called.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self::with_format(source, F::default())
    }
}

impl<F: ParamFormat> FileParamHandler<F> {
    pub fn with_format(source: impl Into<PathBuf>, format: F) -> Self {
        Self {
            source: source.into(),
            params: ParamMap::new(),
            format,
        }
    }

    fn io_error(&self, source: std::io::Error) -> ParamError {
        ParamError::Io {
            path: self.source.clone(),
            source,
        }
    }
}

impl<F: ParamFormat> ParamHandler for FileParamHandler<F> {
    fn source(&self) -> &Path {
        &self.source
    }

    fn format_name(&self) -> &'static str {
        self.format.name()
    }

    fn params(&self) -> &ParamMap {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamMap {
        &mut self.params
    }

    fn read(&mut self) -> Result<(), ParamError> {
        let bytes = fs::read(&self.source).map_err(|e| self.io_error(e))?;
        // Decode fully before touching `self.params`.
        let params = self.format.decode(&bytes).map_err(|source| ParamError::Format {
            path: self.source.clone(),
            source,
        })?;
        debug!(
            path = %self.source.display(),
            format = self.format.name(),
            count = params.len(),
            "read parameters"
        );
        self.params = params;
        Ok(())
    }

    fn write(&self) -> Result<(), ParamError> {
        let bytes = self.format.encode(&self.params).map_err(|source| ParamError::Format {
            path: self.source.clone(),
            source,
        })?;
        fs::write(&self.source, bytes).map_err(|e| self.io_error(e))?;
        debug!(
            path = %self.source.display(),
            format = self.format.name(),
            count = self.params.len(),
            "wrote parameters"
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
