//! Short code derivation.
//!
//! Codes are content-addressed: the same long URL always yields the same code.
//! The default strategy hashes the URL with SHA-256, renders the digest as a
//! base-62 number and keeps the leading [`CODE_LENGTH`] characters. Base 62
//! avoids characters that need percent-encoding in a URL path.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 6;

/// Base-62 digit alphabet, in digit-value order.
const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Strategy that maps a long URL to its short code.
///
/// Implementations must be pure: no I/O, no state, and identical input must
/// produce identical output. Any `Fn(&str) -> String` closure is a strategy,
/// which lets tests plug in trivial fakes.
pub trait Shortener: Send + Sync {
    fn shorten(&self, long: &str) -> String;
}

impl<F> Shortener for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn shorten(&self, long: &str) -> String {
        self(long)
    }
}

/// SHA-256 digest rendered in base 62, truncated to [`CODE_LENGTH`].
///
/// Distinct URLs whose digests share the same leading base-62 digits receive
/// the same code. Collisions are not detected here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Base62Shortener;

impl Shortener for Sha256Base62Shortener {
    fn shorten(&self, long: &str) -> String {
        let digest = Sha256::digest(long.as_bytes());
        let encoded = encode_base62(&digest);

        if encoded.len() < CODE_LENGTH {
            // Only reachable for digests with dozens of leading zero bits.
            format!("{:0>width$}", encoded, width = CODE_LENGTH)
        } else {
            encoded[..CODE_LENGTH].to_string()
        }
    }
}

/// Encodes a big-endian unsigned integer as base 62, most significant digit first.
///
/// Leading zero digits are not emitted; zero encodes as `"0"`.
pub fn encode_base62(bytes: &[u8]) -> String {
    BigUint::from_bytes_be(bytes)
        .to_radix_be(62)
        .into_iter()
        .map(|digit| char::from(BASE62_ALPHABET[usize::from(digit)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn shorten(long: &str) -> String {
        Sha256Base62Shortener.shorten(long)
    }

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode_base62(&[]), "0");
        assert_eq!(encode_base62(&[0, 0, 0]), "0");
    }

    #[test]
    fn test_encode_single_digits() {
        assert_eq!(encode_base62(&[9]), "9");
        assert_eq!(encode_base62(&[10]), "a");
        assert_eq!(encode_base62(&[35]), "z");
        assert_eq!(encode_base62(&[36]), "A");
        assert_eq!(encode_base62(&[61]), "Z");
    }

    #[test]
    fn test_encode_multi_digit() {
        assert_eq!(encode_base62(&[62]), "10");
        assert_eq!(encode_base62(&[0xff]), "47");
        assert_eq!(encode_base62(&[0x01, 0x00]), "48");
        // 62^2 - 1
        assert_eq!(encode_base62(&[0x0f, 0x03]), "ZZ");
        // 62^2
        assert_eq!(encode_base62(&[0x0f, 0x04]), "100");
    }

    #[test]
    fn test_encode_ignores_leading_zero_bytes() {
        assert_eq!(encode_base62(&[0, 0, 0x01, 0x00]), "48");
    }

    #[test]
    fn test_encode_matches_u128_reference() {
        let value: u128 = 0x2c26_b46b_68ff_c68f_f99b_453c_1d30_4134;

        let mut expected = Vec::new();
        let mut n = value;
        while n > 0 {
            expected.push(BASE62_ALPHABET[(n % 62) as usize] as char);
            n /= 62;
        }
        let expected: String = expected.into_iter().rev().collect();

        assert_eq!(encode_base62(&value.to_be_bytes()), expected);
    }

    #[test]
    fn test_shorten_known_codes() {
        assert_eq!(shorten("foo"), "at7awl");
        assert_eq!(shorten("https://www.google.com"), "ESWP9x");
    }

    #[test]
    fn test_shorten_is_deterministic() {
        for long in ["foo", "https://www.google.com", "", "ünïcödé"] {
            assert_eq!(shorten(long), shorten(long));
        }
    }

    #[test]
    fn test_shorten_has_fixed_length() {
        for long in ["foo", "https://www.google.com", "", "a".repeat(10_000).as_str()] {
            assert_eq!(shorten(long).len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_shorten_uses_base62_alphabet() {
        let code = shorten("https://www.rust-lang.org/learn");
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_shorten_is_prefix_of_full_digest_encoding() {
        let long = "https://example.com/some/path?q=1";
        let full = encode_base62(&Sha256::digest(long.as_bytes()));
        assert!(full.starts_with(&shorten(long)));
    }

    #[test]
    fn test_shorten_distinguishes_inputs() {
        let codes: HashSet<String> = (0..1000)
            .map(|i| shorten(&format!("https://example.com/{i}")))
            .collect();

        // 1000 inputs over a 62^6 space: a handful of collisions at most.
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_closure_is_a_shortener() {
        let upper = |long: &str| long.to_uppercase();
        assert_eq!(upper.shorten("foo"), "FOO");
    }
}
