//! Serialization backends for parameter files.
//!
//! Each backend is a [`ParamFormat`]: a stateless codec that turns a whole
//! [`ParamMap`] into bytes and back.  Codecs know nothing about paths or
//! files; [`crate::store::FileParamHandler`] owns the file I/O and pairs a
//! codec with a source path.
//!
//! | Codec          | Extension | Kind                                     |
//! |----------------|-----------|------------------------------------------|
//! | [`JsonFormat`]   | `json`    | structured text, 4-space indent (built-in) |
//! | [`BinaryFormat`] | `bin`     | tagged binary blob (built-in)              |
//! | [`TomlFormat`]   | `toml`    | structured text (opt-in)                   |

pub mod binary;
pub mod json;
pub mod toml_text;

pub use binary::BinaryFormat;
pub use json::JsonFormat;
pub use toml_text::TomlFormat;

use crate::error::FormatError;
use crate::value::ParamMap;

/// A codec for a complete parameter mapping.
///
/// `decode` must either return the whole mapping or fail; it never yields a
/// partially decoded map.
pub trait ParamFormat: Send + Sync {
    /// Short human-readable name, e.g. `"json"`.
    fn name(&self) -> &'static str;

    /// Decodes a full document into a parameter mapping.
    fn decode(&self, bytes: &[u8]) -> Result<ParamMap, FormatError>;

    /// Encodes the full mapping into a document.
    fn encode(&self, params: &ParamMap) -> Result<Vec<u8>, FormatError>;
}
