//! Binary backend: a versioned, tagged `bincode` blob.
//!
//! # File layout
//!
//! ```text
//! [magic:3 = "PRM"][version:1 = 0x01][bincode payload:N]
//! ```
//!
//! `bincode` is not self-describing, so values are written through
//! [`TaggedValue`], an externally tagged mirror of [`ParamValue`] in which
//! every value carries its variant index.  The untagged JSON representation
//! of `ParamValue` cannot be used here because it relies on
//! `deserialize_any`, which `bincode` does not support.

use std::collections::BTreeMap;

use bincode::Options;
use serde::{Deserialize, Serialize};

use super::ParamFormat;
use crate::error::FormatError;
use crate::value::{ParamMap, ParamValue};

/// Magic bytes and format version at the start of every binary file.
const HEADER: &[u8; 4] = b"PRM\x01";

/// Reads and writes the parameter mapping as an opaque binary blob.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryFormat;

#[derive(Serialize, Deserialize)]
enum TaggedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<TaggedValue>),
    Map(BTreeMap<String, TaggedValue>),
}

impl From<&ParamValue> for TaggedValue {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Null => TaggedValue::Null,
            ParamValue::Bool(b) => TaggedValue::Bool(*b),
            ParamValue::Int(i) => TaggedValue::Int(*i),
            ParamValue::Float(f) => TaggedValue::Float(*f),
            ParamValue::String(s) => TaggedValue::String(s.clone()),
            ParamValue::List(items) => TaggedValue::List(items.iter().map(Into::into).collect()),
            ParamValue::Map(map) => TaggedValue::Map(
                map.iter().map(|(k, v)| (k.clone(), v.into())).collect(),
            ),
        }
    }
}

impl From<TaggedValue> for ParamValue {
    fn from(value: TaggedValue) -> Self {
        match value {
            TaggedValue::Null => ParamValue::Null,
            TaggedValue::Bool(b) => ParamValue::Bool(b),
            TaggedValue::Int(i) => ParamValue::Int(i),
            TaggedValue::Float(f) => ParamValue::Float(f),
            TaggedValue::String(s) => ParamValue::String(s),
            TaggedValue::List(items) => ParamValue::List(items.into_iter().map(Into::into).collect()),
            TaggedValue::Map(map) => {
                ParamValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new().reject_trailing_bytes()
}

impl ParamFormat for BinaryFormat {
    fn name(&self) -> &'static str {
        "bin"
    }

    fn decode(&self, bytes: &[u8]) -> Result<ParamMap, FormatError> {
        let payload = bytes.strip_prefix(HEADER).ok_or(FormatError::BadHeader)?;
        let tagged: BTreeMap<String, TaggedValue> = options().deserialize(payload)?;
        Ok(tagged.into_iter().map(|(k, v)| (k, v.into())).collect())
    }

    fn encode(&self, params: &ParamMap) -> Result<Vec<u8>, FormatError> {
        let tagged: BTreeMap<&str, TaggedValue> =
            params.iter().map(|(k, v)| (k.as_str(), v.into())).collect();
        let mut buf = HEADER.to_vec();
        options().serialize_into(&mut buf, &tagged)?;
        Ok(buf)
    }
}
