//! Base-N decoding of share values
//!
//! Decodes a digit string in radix 2..=36 into a non-negative `BigInt`.
//! Digits are `0-9` then `a-z` (case-insensitive). No sign, no whitespace.

use crate::error::{Error, Result};
use num_bigint::BigInt;
use num_traits::Zero;

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

/// Decode `value` written in `radix`, most significant digit first
pub fn decode(value: &str, radix: u32) -> Result<BigInt> {
    if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        return Err(Error::InvalidRadix { radix });
    }
    if value.is_empty() {
        return Err(Error::EmptyValue);
    }

    let base = BigInt::from(radix);
    let mut acc = BigInt::zero();

    for (position, ch) in value.chars().enumerate() {
        let digit = digit_value(ch).ok_or(Error::InvalidDigit { ch, position })?;
        if digit >= radix {
            return Err(Error::DigitOutOfRange { ch, digit, radix });
        }
        acc = acc * &base + BigInt::from(digit);
    }

    Ok(acc)
}

fn digit_value(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => Some(ch as u32 - '0' as u32),
        'a'..='z' => Some(ch as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(ch as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_in_every_radix() {
        for radix in MIN_RADIX..=MAX_RADIX {
            assert_eq!(decode("0", radix).unwrap(), BigInt::zero());
        }
    }

    #[test]
    fn test_single_digits() {
        assert_eq!(decode("z", 36).unwrap(), BigInt::from(35));
        assert_eq!(decode("Z", 36).unwrap(), BigInt::from(35));
        assert_eq!(decode("1a", 16).unwrap(), BigInt::from(26));
        assert_eq!(decode("1A", 16).unwrap(), BigInt::from(26));
        assert_eq!(decode("111", 2).unwrap(), BigInt::from(7));
        assert_eq!(decode("213", 4).unwrap(), BigInt::from(39));
    }

    #[test]
    fn test_digit_out_of_range() {
        assert_eq!(
            decode("g", 16),
            Err(Error::DigitOutOfRange { ch: 'g', digit: 16, radix: 16 })
        );
        assert!(matches!(decode("102", 2), Err(Error::DigitOutOfRange { .. })));
    }

    #[test]
    fn test_invalid_radix() {
        assert_eq!(decode("0", 1), Err(Error::InvalidRadix { radix: 1 }));
        assert_eq!(decode("0", 37), Err(Error::InvalidRadix { radix: 37 }));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(decode("12-3", 10), Err(Error::InvalidDigit { ch: '-', position: 2 }));
        assert!(matches!(decode(" 1", 10), Err(Error::InvalidDigit { ch: ' ', .. })));
        assert!(matches!(decode("é", 36), Err(Error::InvalidDigit { .. })));
        assert_eq!(decode("", 10), Err(Error::EmptyValue));
    }

    #[test]
    fn test_large_value() {
        // 2^128 in hex
        let v = decode("100000000000000000000000000000000", 16).unwrap();
        assert_eq!(v.to_string(), "340282366920938463463374607431768211456");
    }
}
