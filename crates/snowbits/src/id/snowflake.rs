use crate::DecodeError;
use core::{fmt, str::FromStr};

/// A 64-bit Snowflake ID.
///
/// An opaque, immutable signed integer with a time, node and counter field
/// packed into it. The ID carries no reference to the generator or
/// [`BitLayout`] that produced it; reading its fields back requires that
/// layout.
///
/// The canonical textual forms are:
/// - decimal, through [`Display`](fmt::Display) and [`FromStr`]
/// - the custom base-64 alphabet `0-9a-zA-Z+/`, through
///   [`Snowflake::encode_base64`] and [`Snowflake::decode_base64`]
/// - quoted decimal text for JSON, through [`Snowflake::encode_text`] and
///   [`Snowflake::decode_text`]
///
/// # Example
///
/// ```
/// use snowbits::Snowflake;
///
/// let id: Snowflake = "1234567890".parse().unwrap();
/// assert_eq!(id.to_raw(), 1_234_567_890);
/// assert_eq!(id.to_string(), "1234567890");
/// ```
///
/// [`BitLayout`]: crate::BitLayout
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(i64);

impl Snowflake {
    pub const ZERO: Self = Self(0);

    /// Wraps a raw integer.
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer.
    pub const fn to_raw(self) -> i64 {
        self.0
    }

    /// Returns the two's-complement bit pattern as an unsigned integer.
    pub const fn to_bits(self) -> u64 {
        self.0 as u64
    }

    /// Parses a base-10 string, the inverse of [`Display`](fmt::Display).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidFormat`] if `s` is not a base-10 integer
    /// representable as an `i64`.
    pub fn parse_str(s: &str) -> Result<Self, DecodeError> {
        Ok(Self(s.parse::<i64>()?))
    }

    /// Returns the ID as a zero-padded 19-digit string, so that non-negative
    /// IDs sort the same way as text and as integers.
    pub fn to_padded_string(&self) -> String {
        format!("{:019}", self.0)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Snowflake").field(&self.0).finish()
    }
}

impl FromStr for Snowflake {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl From<i64> for Snowflake {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}
