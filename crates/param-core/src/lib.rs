//! # param-core
//!
//! Key-value parameter files whose on-disk format is chosen by file
//! extension.
//!
//! # Architecture overview
//!
//! - **`value`** – [`ParamValue`], the closed set of storable values
//!   (null, bool, int, float, string, list, map), and [`ParamMap`].
//!
//! - **`store`** – the [`ParamHandler`] contract (add/get/remove in memory,
//!   read/write against the backing file) and [`FileParamHandler`], which
//!   implements it for any codec.
//!
//! - **`format`** – the codecs: indented JSON, a tagged binary blob, and an
//!   opt-in TOML codec.
//!
//! - **`registry`** – [`FormatRegistry`], which maps an extension to a
//!   handler constructor and creates handlers for paths.
//!
//! # Example
//!
//! ```rust,no_run
//! use param_core::{registry, ParamValue};
//!
//! let mut config = registry::create("data_file.json")?;
//! config.add_param("key1", ParamValue::from("val1"));
//! config.add_param("key2", ParamValue::from(2));
//! config.write()?;
//!
//! config.read()?;
//! assert_eq!(config.get_param("key2"), Some(&ParamValue::from(2)));
//! # Ok::<(), param_core::ParamError>(())
//! ```
//!
//! # Built-in extensions
//!
//! The process-wide registry knows `json` and `bin` out of the box.  The
//! `bin` codec is a tagged bincode blob, not Python pickle, so `.pickle`
//! paths are *not* resolved by default; `create("data_file.pickle")` fails
//! with [`ParamError::TypeNotFound`].  Callers that want the old file names
//! can map them onto the binary codec explicitly:
//!
//! ```rust
//! use param_core::{registry, BinaryFormat};
//!
//! assert!(registry::create("data_file.pickle").is_err());
//! registry::global().register_format::<BinaryFormat>("pickle")?;
//! assert_eq!(registry::create("data_file.pickle")?.format_name(), "bin");
//! # Ok::<(), param_core::ParamError>(())
//! ```
//!
//! Nothing here is synchronised across threads or processes beyond the
//! registry itself; callers sharing a file must coordinate access.

pub mod error;
pub mod format;
pub mod registry;
pub mod store;
pub mod value;

pub use error::{ErrorKind, FormatError, ParamError};
pub use format::{BinaryFormat, JsonFormat, ParamFormat, TomlFormat};
pub use registry::{FormatRegistry, HandlerConstructor};
pub use store::{BinaryParamHandler, FileParamHandler, JsonParamHandler, ParamHandler};
pub use value::{ParamMap, ParamValue};
