use crate::DecodeError;

/// Digit values 0..=63, in order.
pub(crate) const ALPHABET: &[u8; 64] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ+/";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 6;

/// Longest possible encoding: ceil(64 / 6) digits for a full 64-bit pattern.
pub const BASE64_MAX_LEN: usize = u64::BITS.div_ceil(BITS_PER_CHAR) as usize;

/// Lookup table from ASCII byte to digit value
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 64 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Writes the base-64 digits of `value` into the tail of `buf`, most
/// significant digit first, and returns the index of the first digit. Zero is
/// written as the single digit `0`.
pub(crate) fn encode_base64(mut value: u64, buf: &mut [u8; BASE64_MAX_LEN]) -> usize {
    let mut start = BASE64_MAX_LEN;
    loop {
        start -= 1;
        buf[start] = ALPHABET[(value % 64) as usize];
        value /= 64;
        if value == 0 {
            return start;
        }
    }
}

/// Decodes base-64 digits, walking from the least significant (rightmost)
/// character and accumulating `digit * 64^position`.
///
/// Leading zero digits are accepted, so the input may be longer than
/// [`BASE64_MAX_LEN`] as long as the value fits in 64 bits.
pub(crate) fn decode_base64(encoded: &str) -> Result<u64, DecodeError> {
    if encoded.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut acc = 0_u64;
    // `None` once 64^position no longer fits; only zero digits may follow.
    let mut place = Some(1_u64);
    for (index, byte) in encoded.bytes().enumerate().rev() {
        let digit = LOOKUP[byte as usize];
        if digit == NO_VALUE {
            return Err(DecodeError::InvalidChar { byte, index });
        }
        if digit != 0 {
            let weighted = place
                .and_then(|p| p.checked_mul(u64::from(digit)))
                .ok_or(DecodeError::Overflow)?;
            acc = acc.checked_add(weighted).ok_or(DecodeError::Overflow)?;
        }
        place = place.and_then(|p| p.checked_mul(64));
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> String {
        let mut buf = [0_u8; BASE64_MAX_LEN];
        let start = encode_base64(value, &mut buf);
        String::from_utf8(buf[start..].to_vec()).unwrap()
    }

    #[test]
    fn lookup_inverts_alphabet() {
        for (i, &c) in ALPHABET.iter().enumerate() {
            assert_eq!(LOOKUP[c as usize] as usize, i);
        }
        assert_eq!(LOOKUP.iter().filter(|&&v| v != NO_VALUE).count(), 64);
    }

    #[test]
    fn max_len_fits_u64() {
        assert_eq!(BASE64_MAX_LEN, 11);
        assert_eq!(encode(u64::MAX), "f//////////");
        assert_eq!(encode(u64::MAX).len(), BASE64_MAX_LEN);
    }

    #[test]
    fn single_digits() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(9), "9");
        assert_eq!(encode(10), "a");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "A");
        assert_eq!(encode(61), "Z");
        assert_eq!(encode(62), "+");
        assert_eq!(encode(63), "/");
        assert_eq!(encode(64), "10");
    }

    #[test]
    fn decodes_known_values() {
        assert_eq!(decode_base64("0"), Ok(0));
        assert_eq!(decode_base64("z"), Ok(35));
        assert_eq!(decode_base64("+"), Ok(62));
        assert_eq!(decode_base64("/"), Ok(63));
        assert_eq!(decode_base64("10"), Ok(64));
        assert_eq!(decode_base64("//"), Ok(64 * 63 + 63));
        assert_eq!(decode_base64("f//////////"), Ok(u64::MAX));
    }

    #[test]
    fn leading_zeros_are_ignored() {
        assert_eq!(decode_base64("000000000000000000001"), Ok(1));
        assert_eq!(decode_base64("00000"), Ok(0));
    }

    #[test]
    fn rejects_invalid_characters() {
        assert_eq!(
            decode_base64("ab#c"),
            Err(DecodeError::InvalidChar { byte: b'#', index: 2 })
        );
        assert_eq!(
            decode_base64("-1"),
            Err(DecodeError::InvalidChar { byte: b'-', index: 0 })
        );
        // Multi-byte UTF-8 is never part of the alphabet.
        assert!(matches!(
            decode_base64("é"),
            Err(DecodeError::InvalidChar { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_empty_and_overflow() {
        assert_eq!(decode_base64(""), Err(DecodeError::Empty));
        assert_eq!(decode_base64("g//////////"), Err(DecodeError::Overflow));
        assert_eq!(decode_base64("100000000000"), Err(DecodeError::Overflow));
    }

    #[test]
    fn roundtrip_powers_and_edges() {
        for shift in 0..64 {
            let v = 1_u64 << shift;
            for value in [v - 1, v, v + 1] {
                assert_eq!(decode_base64(&encode(value)), Ok(value));
            }
        }
    }
}
