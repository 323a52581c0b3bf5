//! The value model stored in every parameter file.
//!
//! A parameter file is a flat mapping from string keys to [`ParamValue`]s.
//! Values are restricted to a closed, self-describing set so that every
//! backend can round-trip them:
//!
//! | Variant  | JSON            | Notes                                 |
//! |----------|-----------------|---------------------------------------|
//! | `Null`   | `null`          | not representable in TOML             |
//! | `Bool`   | `true`/`false`  |                                       |
//! | `Int`    | `42`            | signed 64-bit                         |
//! | `Float`  | `4.5`           | NaN/infinity cannot be written        |
//! | `String` | `"text"`        |                                       |
//! | `List`   | `[ ... ]`       | heterogeneous                         |
//! | `Map`    | `{ ... }`       | string keys, sorted                   |
//!
//! The structured-text representation is *untagged*: a `ParamValue::Int(3)`
//! is written as the bare number `3`, not as `{"Int": 3}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// The full in-memory parameter mapping of one handler.
///
/// A `BTreeMap` keeps keys sorted so structured-text output is stable between
/// writes and diffs cleanly.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// A single configuration value.
///
/// Deserialization requires a self-describing format.  Integers outside the
/// `i64` range are rejected rather than widened to `Float`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// Returns `true` if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float.  Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ParamValue>> {
        match self {
            ParamValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, used in log and CLI output.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "string",
            ParamValue::List(_) => "list",
            ParamValue::Map(_) => "map",
        }
    }
}

/// Renders the value as compact JSON text.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// ── Deserialization ───────────────────────────────────────────────────────────

struct ParamValueVisitor;

impl<'de> Visitor<'de> for ParamValueVisitor {
    type Value = ParamValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a null, bool, 64-bit integer, float, string, list, or map")
    }

    fn visit_unit<E: de::Error>(self) -> Result<ParamValue, E> {
        Ok(ParamValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<ParamValue, E> {
        Ok(ParamValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ParamValue, D::Error> {
        ParamValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<ParamValue, E> {
        Ok(ParamValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ParamValue, E> {
        Ok(ParamValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ParamValue, E> {
        i64::try_from(value)
            .map(ParamValue::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &"an integer in the i64 range"))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<ParamValue, E> {
        Ok(ParamValue::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ParamValue, E> {
        Ok(ParamValue::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<ParamValue, E> {
        Ok(ParamValue::String(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ParamValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ParamValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ParamValue, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
            map.insert(key, value);
        }
        Ok(ParamValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParamValueVisitor)
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, ParamValue>> for ParamValue {
    fn from(map: BTreeMap<String, ParamValue>) -> Self {
        ParamValue::Map(map)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_serializes_as_bare_json_number() {
        // Arrange
        let value = ParamValue::Int(3);

        // Act
        let json = serde_json::to_string(&value).unwrap();

        // Assert
        assert_eq!(json, "3");
    }

    #[test]
    fn test_untagged_deserialize_picks_natural_variant() {
        let value: ParamValue =
            serde_json::from_str(r#"[null, true, 7, 2.5, "x", {"k": -1}]"#).unwrap();

        let mut inner = BTreeMap::new();
        inner.insert("k".to_string(), ParamValue::Int(-1));
        assert_eq!(
            value,
            ParamValue::List(vec![
                ParamValue::Null,
                ParamValue::Bool(true),
                ParamValue::Int(7),
                ParamValue::Float(2.5),
                ParamValue::String("x".to_string()),
                ParamValue::Map(inner),
            ])
        );
    }

    #[test]
    fn test_whole_float_stays_float_after_json_round_trip() {
        // Arrange: 1.0 must not collapse into Int(1)
        let value = ParamValue::Float(1.0);

        // Act
        let json = serde_json::to_string(&value).unwrap();
        let restored: ParamValue = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(restored, ParamValue::Float(1.0));
    }

    #[test]
    fn test_integer_above_i64_range_is_rejected() {
        // Arrange: u64::MAX does not fit an Int and must not become a Float
        let json = "18446744073709551615";

        // Act
        let result = serde_json::from_str::<ParamValue>(json);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_i64_bounds_are_accepted() {
        let max: ParamValue = serde_json::from_str("9223372036854775807").unwrap();
        let min: ParamValue = serde_json::from_str("-9223372036854775808").unwrap();
        assert_eq!(max, ParamValue::Int(i64::MAX));
        assert_eq!(min, ParamValue::Int(i64::MIN));
    }

    #[test]
    fn test_as_f64_widens_int() {
        assert_eq!(ParamValue::Int(4).as_f64(), Some(4.0));
        assert_eq!(ParamValue::String("4".into()).as_f64(), None);
    }

    #[test]
    fn test_accessors_reject_other_variants() {
        let value = ParamValue::Bool(false);
        assert_eq!(value.as_bool(), Some(false));
        assert!(value.as_i64().is_none());
        assert!(value.as_str().is_none());
        assert!(value.as_list().is_none());
        assert!(value.as_map().is_none());
        assert!(!value.is_null());
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(ParamValue::from(8080), ParamValue::Int(8080));
        assert_eq!(ParamValue::from("val"), ParamValue::String("val".into()));
        assert_eq!(
            ParamValue::from(vec![1, 2]),
            ParamValue::List(vec![ParamValue::Int(1), ParamValue::Int(2)])
        );
        assert_eq!(ParamValue::from(None::<i64>), ParamValue::Null);
    }

    #[test]
    fn test_display_renders_compact_json() {
        let value = ParamValue::from(vec!["a", "b"]);
        assert_eq!(value.to_string(), r#"["a","b"]"#);
        assert_eq!(ParamValue::String("hi".into()).to_string(), r#""hi""#);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(ParamValue::Null.type_name(), "null");
        assert_eq!(ParamValue::Float(0.5).type_name(), "float");
    }
}
