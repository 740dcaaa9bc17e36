use core::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while decoding a [`Snowflake`] from one of its
/// textual forms.
///
/// [`Snowflake`]: crate::Snowflake
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input was empty.
    #[error("empty input")]
    Empty,

    /// A character outside the base-64 alphabet (`0-9a-zA-Z+/`) was found.
    #[error("invalid base-64 character 0x{byte:02x} at index {index}")]
    InvalidChar {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the offending character in the input.
        index: usize,
    },

    /// The decoded value does not fit in 64 bits.
    #[error("decoded value overflows 64 bits")]
    Overflow,

    /// The input is not a base-10 integer representable as an `i64`.
    #[error("invalid decimal snowflake: {0}")]
    InvalidFormat(#[from] ParseIntError),

    /// The input is not a quoted string of at least one character.
    #[error("expected a quoted decimal string")]
    InvalidText,
}
