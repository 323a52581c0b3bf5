//! Extension-to-handler registry.
//!
//! The registry maps a lowercase file extension (without the leading dot) to
//! a constructor producing a boxed [`ParamHandler`].  [`FormatRegistry::create`]
//! resolves a path by its extension and returns a fresh handler bound to that
//! path with an empty mapping.
//!
//! A process-wide registry pre-loaded with the built-in `json` and `bin`
//! formats is available through [`global`]; callers extend it with
//! [`register`].  Independent registries can be built with
//! [`FormatRegistry::new`] or [`FormatRegistry::with_builtins`].
//!
//! # Example
//!
//! ```rust
//! use param_core::registry::FormatRegistry;
//!
//! let registry = FormatRegistry::with_builtins();
//! let handler = registry.create("settings.JSON").unwrap();
//! assert_eq!(handler.format_name(), "json");
//! assert!(registry.create("settings").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::error::ParamError;
use crate::format::{BinaryFormat, JsonFormat, ParamFormat};
use crate::store::{FileParamHandler, ParamHandler};

/// Builds a handler bound to the given path.
pub type HandlerConstructor = Arc<dyn Fn(PathBuf) -> Box<dyn ParamHandler> + Send + Sync>;

/// Maps file extensions to handler constructors.
#[derive(Default)]
pub struct FormatRegistry {
    types: RwLock<HashMap<String, HandlerConstructor>>,
}

impl FormatRegistry {
    /// Creates a registry with no formats registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in `json` and `bin` formats.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.insert("json".to_string(), constructor_for::<JsonFormat>());
        registry.insert("bin".to_string(), constructor_for::<BinaryFormat>());
        registry
    }

    /// Registers `constructor` for `extension`, replacing any previous entry.
    ///
    /// The extension is matched case-insensitively and may be given with or
    /// without a leading dot (`"json"`, `".JSON"`).
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Registration`] if the extension is empty.
    pub fn register<C>(&self, extension: &str, constructor: C) -> Result<(), ParamError>
    where
        C: Fn(PathBuf) -> Box<dyn ParamHandler> + Send + Sync + 'static,
    {
        let key = normalize_extension(extension);
        if key.is_empty() {
            return Err(ParamError::Registration {
                reason: "type must have a name".to_string(),
            });
        }
        self.insert(key, Arc::new(constructor));
        Ok(())
    }

    /// Registers a [`FileParamHandler`] using codec `F` for `extension`.
    ///
    /// # Errors
    ///
    /// Same as [`register`](FormatRegistry::register).
    pub fn register_format<F>(&self, extension: &str) -> Result<(), ParamError>
    where
        F: ParamFormat + Default + 'static,
    {
        self.register(extension, |path| {
            Box::new(FileParamHandler::<F>::new(path)) as Box<dyn ParamHandler>
        })
    }

    /// Creates a handler for `path`, chosen by its extension.
    ///
    /// The handler starts with an empty mapping; nothing is read from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::TypeNotFound`] if no format is registered for the
    /// extension, including paths without one.
    pub fn create(&self, path: impl AsRef<Path>) -> Result<Box<dyn ParamHandler>, ParamError> {
        let path = path.as_ref();
        let extension = extension_of(path);
        let constructor = self
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&extension)
            .cloned()
            .ok_or_else(|| ParamError::TypeNotFound {
                extension: extension.clone(),
            })?;
        debug!(path = %path.display(), %extension, "creating parameter handler");
        Ok(constructor(path.to_path_buf()))
    }

    /// Returns `true` if a format is registered for `extension`.
    pub fn is_registered(&self, extension: &str) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&normalize_extension(extension))
    }

    /// Returns all registered extensions, sorted.
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        extensions.sort_unstable();
        extensions
    }

    fn insert(&self, key: String, constructor: HandlerConstructor) {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if types.insert(key.clone(), constructor).is_some() {
            debug!(extension = %key, "replaced existing format registration");
        }
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

fn constructor_for<F: ParamFormat + Default + 'static>() -> HandlerConstructor {
    Arc::new(|path: PathBuf| Box::new(FileParamHandler::<F>::new(path)) as Box<dyn ParamHandler>)
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

/// Lowercased text after the final dot of the file name.
///
/// Dotfiles such as `.env` and names without a dot have no extension.
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

// ── Process-wide registry ─────────────────────────────────────────────────────

static GLOBAL_REGISTRY: OnceLock<FormatRegistry> = OnceLock::new();

/// Returns the process-wide registry, initialising it with the built-in
/// formats on first access.
pub fn global() -> &'static FormatRegistry {
    GLOBAL_REGISTRY.get_or_init(FormatRegistry::with_builtins)
}

/// Registers a constructor in the process-wide registry.
///
/// # Errors
///
/// See [`FormatRegistry::register`].
pub fn register<C>(extension: &str, constructor: C) -> Result<(), ParamError>
where
    C: Fn(PathBuf) -> Box<dyn ParamHandler> + Send + Sync + 'static,
{
    global().register(extension, constructor)
}

/// Creates a handler for `path` from the process-wide registry.
///
/// # Errors
///
/// See [`FormatRegistry::create`].
pub fn create(path: impl AsRef<Path>) -> Result<Box<dyn ParamHandler>, ParamError> {
    global().create(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
