//! Optional TOML backend.
//!
//! Not registered by default.  Register it under the `toml` extension with
//! `registry.register_format::<TomlFormat>("toml")`.
//!
//! TOML has no null, so a mapping containing [`ParamValue::Null`] anywhere
//! fails to encode.

use super::ParamFormat;
use crate::error::FormatError;
use crate::value::{ParamMap, ParamValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl ParamFormat for TomlFormat {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<ParamMap, FormatError> {
        let text = std::str::from_utf8(bytes)?;
        match toml::from_str::<ParamValue>(text)? {
            ParamValue::Map(map) => Ok(map),
            _ => Err(FormatError::NotAMapping { expected: "TOML table" }),
        }
    }

    fn encode(&self, params: &ParamMap) -> Result<Vec<u8>, FormatError> {
        Ok(toml::to_string_pretty(params)?.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_table_into_mapping() {
        // Arrange
        let text = "name = \"office\"\nport = 24800\n\n[display]\nwidth = 1920\n";

        // Act
        let params = TomlFormat.decode(text.as_bytes()).unwrap();

        // Assert
        assert_eq!(params["name"], ParamValue::from("office"));
        assert_eq!(params["port"], ParamValue::from(24800));
        assert_eq!(
            params["display"].as_map().unwrap()["width"],
            ParamValue::from(1920)
        );
    }

    #[test]
    fn test_encode_then_decode_scalars() {
        let mut params = ParamMap::new();
        params.insert("ratio".to_string(), ParamValue::from(1.5));
        params.insert("debug".to_string(), ParamValue::from(false));

        let bytes = TomlFormat.encode(&params).unwrap();

        assert_eq!(TomlFormat.decode(&bytes).unwrap(), params);
    }

    #[test]
    fn test_encode_null_fails() {
        let mut params = ParamMap::new();
        params.insert("missing".to_string(), ParamValue::Null);

        assert!(matches!(
            TomlFormat.encode(&params),
            Err(FormatError::TomlSerialize(_))
        ));
    }

    #[test]
    fn test_decode_invalid_utf8_fails() {
        // Arrange: 0xFF can never appear in UTF-8
        let bytes = b"name = \"a\xffb\"\n";

        // Act / Assert
        assert!(matches!(TomlFormat.decode(bytes), Err(FormatError::Utf8(_))));
    }

    #[test]
    fn test_decode_malformed_fails() {
        assert!(matches!(
            TomlFormat.decode(b"[[[ not valid toml"),
            Err(FormatError::TomlParse(_))
        ));
    }
}
