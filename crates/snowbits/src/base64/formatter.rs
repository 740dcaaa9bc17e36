use super::{BASE64_MAX_LEN, decode_base64, encode_base64};
use crate::{DecodeError, Snowflake};
use core::fmt;

impl Snowflake {
    /// Returns a formatter containing the base-64 representation of the ID,
    /// using the alphabet `0-9a-zA-Z+/` (digit values 0 to 63 in that order).
    ///
    /// The output is the shortest representation with the most significant
    /// digit first; zero encodes as `"0"`. Negative IDs are encoded through
    /// their two's-complement bit pattern, so every `i64` round-trips through
    /// [`Snowflake::decode_base64`] in at most [`BASE64_MAX_LEN`] characters.
    ///
    /// # Example
    /// ```
    /// use snowbits::Snowflake;
    ///
    /// assert_eq!(Snowflake::from_raw(0).encode_base64(), "0");
    /// assert_eq!(Snowflake::from_raw(4_095).encode_base64(), "//");
    /// assert_eq!(Snowflake::from_raw(-1).encode_base64(), "f//////////");
    /// ```
    pub fn encode_base64(&self) -> Base64Formatter {
        Base64Formatter::new(self)
    }

    /// Decodes a base-64 string produced by [`Snowflake::encode_base64`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input string:
    /// - is empty
    /// - contains a character outside `0-9a-zA-Z+/`
    ///   ([`DecodeError::InvalidChar`])
    /// - encodes a value wider than 64 bits
    ///
    /// # Example
    /// ```
    /// use snowbits::{DecodeError, Snowflake};
    ///
    /// assert_eq!(Snowflake::decode_base64("z").unwrap().to_raw(), 35);
    /// assert!(matches!(
    ///     Snowflake::decode_base64("#"),
    ///     Err(DecodeError::InvalidChar { byte: b'#', index: 0 })
    /// ));
    /// ```
    pub fn decode_base64(s: impl AsRef<str>) -> Result<Self, DecodeError> {
        decode_base64(s.as_ref()).map(|bits| Self::from_raw(bits as i64))
    }
}

/// An owned, stack-allocated base-64 rendering of a [`Snowflake`].
///
/// Implements [`fmt::Display`] and [`AsRef<str>`], and compares equal to
/// string slices, so it can be used without allocating.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Base64Formatter {
    buf: [u8; BASE64_MAX_LEN],
    start: usize,
}

impl Base64Formatter {
    pub fn new(id: &Snowflake) -> Self {
        let mut buf = [0_u8; BASE64_MAX_LEN];
        let start = encode_base64(id.to_bits(), &mut buf);
        Self { buf, start }
    }

    /// Returns a `&str` view of the base-64 encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `self.buf[self.start..]` holds only bytes from the ASCII
        // alphabet written by `encode_base64`.
        unsafe { core::str::from_utf8_unchecked(&self.buf[self.start..]) }
    }

    /// Number of characters in the encoding.
    #[must_use]
    pub fn len(&self) -> usize {
        BASE64_MAX_LEN - self.start
    }

    /// Always `false`: even zero encodes to one character.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for Base64Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Base64Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl AsRef<str> for Base64Formatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Base64Formatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Base64Formatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for Base64Formatter {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_small_values() {
        assert_eq!(Snowflake::ZERO.encode_base64(), "0");
        assert_eq!(Snowflake::decode_base64("0"), Ok(Snowflake::ZERO));
        assert_eq!(Snowflake::decode_base64("z"), Ok(Snowflake::from_raw(35)));
        assert_eq!(Snowflake::decode_base64("+"), Ok(Snowflake::from_raw(62)));
        assert_eq!(Snowflake::decode_base64("/"), Ok(Snowflake::from_raw(63)));
    }

    #[test]
    fn invalid_char_is_reported() {
        assert!(matches!(
            Snowflake::decode_base64("12#4"),
            Err(DecodeError::InvalidChar { byte: b'#', index: 2 })
        ));
    }

    #[test]
    fn largest_positive_needs_eleven_chars() {
        let max = Snowflake::from_raw(i64::MAX);
        let encoded = max.encode_base64();
        assert_eq!(encoded, "7//////////");
        assert_eq!(encoded.len(), 11);
        assert_eq!(Snowflake::decode_base64(encoded), Ok(max));
    }

    #[test]
    fn negative_values_roundtrip_through_bit_pattern() {
        for raw in [-1, i64::MIN, -4_096, -1_234_567_890_123] {
            let id = Snowflake::from_raw(raw);
            let encoded = id.encode_base64();
            assert_eq!(Snowflake::decode_base64(encoded.as_str()), Ok(id));
        }
        assert_eq!(Snowflake::from_raw(i64::MIN).encode_base64(), "80000000000");
    }

    #[test]
    fn roundtrip_generated_looking_ids() {
        let mut raw = 1_i64;
        while raw < i64::MAX / 7 {
            let id = Snowflake::from_raw(raw);
            assert_eq!(Snowflake::decode_base64(id.encode_base64()), Ok(id));
            raw = raw * 7 + 3;
        }
    }

    #[test]
    fn formatter_views_agree() {
        let id = Snowflake::from_raw(1_000_000);
        let encoded = id.encode_base64();
        assert_eq!(encoded.to_string(), encoded.as_str());
        assert_eq!(AsRef::<str>::as_ref(&encoded), encoded.as_str());
        assert_eq!(encoded.len(), encoded.as_str().len());
        assert_eq!(format!("{encoded:?}"), format!("{:?}", encoded.as_str()));
        assert_eq!(encoded, String::from(encoded.as_str()));
    }
}
