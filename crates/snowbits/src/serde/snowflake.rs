use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::{DecodeError, Snowflake};

/// Serializes as quoted decimal text, e.g. `"1234"`, the same form as
/// [`Snowflake::encode_text`].
impl Serialize for Snowflake {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.to_string())
    }
}

/// Deserializes from a decimal string. Bare integers are accepted too, for
/// peers that emit IDs as JSON numbers.
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl Visitor<'_> for DecimalVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a snowflake as a decimal string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Snowflake::parse_str(v).map_err(E::custom)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Snowflake::from_raw(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(v)
                    .map(Snowflake::from_raw)
                    .map_err(|_| E::custom(DecodeError::Overflow))
            }
        }

        d.deserialize_any(DecimalVisitor)
    }
}

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Snowflake;

    /// Serialize a snowflake ID as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Snowflake, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a snowflake ID from its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value is
    /// not an `i64`.
    pub fn deserialize<'de, D>(d: D) -> Result<Snowflake, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(d).map(Snowflake::from_raw)
    }
}

pub mod as_base64 {
    use super::{Deserializer, Serializer, Visitor, de, fmt};
    use crate::Snowflake;

    /// Serialize a snowflake ID as a custom base-64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Snowflake, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(id.encode_base64().as_str())
    }

    /// Deserialize a snowflake ID from a custom base-64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is empty, contains characters outside `0-9a-zA-Z+/`, or
    ///   encodes more than 64 bits
    pub fn deserialize<'de, D>(d: D) -> Result<Snowflake, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base64Visitor;

        impl Visitor<'_> for Base64Visitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a base-64 encoded snowflake")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Snowflake::decode_base64(v).map_err(E::custom)
            }
        }

        d.deserialize_str(Base64Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        id: Snowflake,
        #[serde(with = "as_native")]
        parent: Snowflake,
        #[serde(with = "as_base64")]
        short: Snowflake,
    }

    #[test]
    fn default_form_is_quoted_decimal() {
        let id = Snowflake::from_raw(1_234_567_890_123);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, id.encode_text());
        assert_eq!(Snowflake::decode_text(&json), Ok(id));
        assert_eq!(serde_json::from_str::<Snowflake>(&json).unwrap(), id);
    }

    #[test]
    fn row_roundtrip() {
        let row = Row {
            id: Snowflake::from_raw(42),
            parent: Snowflake::from_raw(7),
            short: Snowflake::from_raw(4_095),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"id":"42","parent":7,"short":"//"}"#);
        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn accepts_bare_numbers() {
        let id: Snowflake = serde_json::from_value(json!(99)).unwrap();
        assert_eq!(id, Snowflake::from_raw(99));
        let id: Snowflake = serde_json::from_value(json!(-3)).unwrap();
        assert_eq!(id, Snowflake::from_raw(-3));
        assert!(serde_json::from_value::<Snowflake>(json!(u64::MAX)).is_err());
    }

    #[test]
    fn decode_errors_surface() {
        let err = serde_json::from_value::<Snowflake>(json!("12a")).unwrap_err();
        assert!(err.to_string().starts_with("invalid decimal snowflake"));

        let err = serde_json::from_value::<Row>(json!({"id": "1", "parent": 1, "short": "a#"}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            DecodeError::InvalidChar { byte: b'#', index: 1 }.to_string()
        );
    }
}
