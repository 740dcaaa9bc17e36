use crate::{DecodeError, Snowflake};

impl Snowflake {
    /// Encodes the ID as quoted decimal text, the form used inside JSON
    /// documents so that consumers with 53-bit numbers do not lose precision.
    ///
    /// ```
    /// use snowbits::Snowflake;
    ///
    /// assert_eq!(Snowflake::from_raw(42).encode_text(), r#""42""#);
    /// ```
    pub fn encode_text(&self) -> String {
        format!("\"{}\"", self.to_raw())
    }

    /// Decodes quoted decimal text produced by [`Snowflake::encode_text`].
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidText`] if the input is not a double-quoted
    ///   string with at least one character between the quotes
    /// - [`DecodeError::InvalidFormat`] if the quoted part is not a base-10
    ///   `i64`
    pub fn decode_text(text: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        match text.as_ref() {
            [b'"', inner @ .., b'"'] if !inner.is_empty() => {
                let digits = core::str::from_utf8(inner).map_err(|_| DecodeError::InvalidText)?;
                Self::parse_str(digits)
            }
            _ => Err(DecodeError::InvalidText),
        }
    }
}
