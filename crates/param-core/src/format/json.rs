//! Structured-text backend: indented JSON.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::ParamFormat;
use crate::error::FormatError;
use crate::value::{ParamMap, ParamValue};

/// Indentation used for every JSON document written to disk.
const INDENT: &[u8] = b"    ";

/// Reads and writes the parameter mapping as a JSON object.
///
/// Output is indented with four spaces and terminated by a newline so files
/// stay readable and diff cleanly under version control.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl ParamFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<ParamMap, FormatError> {
        match serde_json::from_slice::<ParamValue>(bytes)? {
            ParamValue::Map(map) => Ok(map),
            _ => Err(FormatError::NotAMapping { expected: "JSON object" }),
        }
    }

    fn encode(&self, params: &ParamMap) -> Result<Vec<u8>, FormatError> {
        if let Some((key, _)) = params.iter().find(|(_, v)| !is_finite(v)) {
            return Err(FormatError::NonFiniteFloat { key: key.clone() });
        }
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        params.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

/// serde_json writes NaN and infinity as `null`, which would read back as a
/// different value.
fn is_finite(value: &ParamValue) -> bool {
    match value {
        ParamValue::Float(f) => f.is_finite(),
        ParamValue::List(items) => items.iter().all(is_finite),
        ParamValue::Map(map) => map.values().all(is_finite),
        _ => true,
    }
}
