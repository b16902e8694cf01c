pub mod error;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use error::{Error, Result};

/*
ref: https://www.rfc-editor.org/rfc/rfc7518.html#section-2

Base64urlUInt: the base64url encoding of the value's unsigned big-endian
representation as an octet sequence. The octet sequence MUST utilize the
minimum number of octets needed to represent the value; zero is
base64url(single zero-valued octet) = "AA".
*/

/// Arbitrary-precision non-negative integer in the variable-length
/// base64url form.
///
/// Encoding always produces the minimal octet representation; any leading
/// zero octets in the input are absorbed by the integer value on decode.
/// Use [`SizedBase64Integer`] when the octet width must survive a round
/// trip.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base64Integer {
    inner: BigUint,
}

impl Base64Integer {
    /// Decodes a base64url string into an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid unpadded base64url.
    pub fn from_b64(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(s).map_err(Error::Base64Decode)?;
        Ok(Base64Integer {
            inner: BigUint::from_bytes_be(&bytes),
        })
    }

    /// Encodes the integer as a base64url string of its minimal
    /// big-endian octets.
    pub fn to_b64(&self) -> String {
        // BigUint::to_bytes_be yields a single zero octet for zero,
        // which is exactly the RFC 7518 "AA" form.
        URL_SAFE_NO_PAD.encode(self.inner.to_bytes_be())
    }

    /// Returns a reference to the inner BigUint
    pub fn as_biguint(&self) -> &BigUint {
        &self.inner
    }

    /// Converts the integer to u64 if it fits in the range
    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }
}

impl From<BigUint> for Base64Integer {
    fn from(value: BigUint) -> Self {
        Base64Integer { inner: value }
    }
}

impl From<u64> for Base64Integer {
    fn from(value: u64) -> Self {
        Base64Integer {
            inner: BigUint::from(value),
        }
    }
}

impl From<&[u8]> for Base64Integer {
    fn from(value: &[u8]) -> Self {
        Base64Integer {
            inner: BigUint::from_bytes_be(value),
        }
    }
}

impl Display for Base64Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_b64())
    }
}

impl FromStr for Base64Integer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Base64Integer::from_b64(s)
    }
}

impl Serialize for Base64Integer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_b64())
    }
}

impl<'de> Deserialize<'de> for Base64Integer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Base64Integer::from_b64(&s).map_err(serde::de::Error::custom)
    }
}

impl DecodableFrom<Value> for Base64Integer {}

impl Decoder<Value, Base64Integer> for Value {
    type Error = Error;

    fn decode(&self) -> Result<Base64Integer> {
        match self {
            Value::String(s) => Base64Integer::from_b64(s),
            _ => Err(Error::ExpectedString),
        }
    }
}

impl EncodableTo<Base64Integer> for Value {}

impl Encoder<Base64Integer, Value> for Base64Integer {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        Ok(Value::String(self.to_b64()))
    }
}

/// Length-preserving base64url integer.
///
/// Remembers the octet width of the encoded form so that leading zero
/// octets survive a decode/encode round trip. The width is fixed by
/// external context (for an EC key, the curve field size) rather than by
/// the value itself, so equality compares the width as well as the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SizedBase64Integer {
    size: usize,
    inner: BigUint,
}

impl SizedBase64Integer {
    /// Creates an integer with an explicit octet width.
    ///
    /// Encoding fails if `value` does not fit in `size` octets.
    pub fn new(size: usize, value: BigUint) -> Self {
        SizedBase64Integer { size, inner: value }
    }

    /// Creates an integer with the minimal octet width for its value.
    pub fn from_integer(value: BigUint) -> Self {
        let size = value.to_bytes_be().len();
        SizedBase64Integer { size, inner: value }
    }

    /// Decodes a base64url string, capturing the decoded octet count as
    /// the preserved width.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid unpadded base64url.
    pub fn from_b64(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(s).map_err(Error::Base64Decode)?;
        Ok(SizedBase64Integer {
            size: bytes.len(),
            inner: BigUint::from_bytes_be(&bytes),
        })
    }

    /// Encodes the integer as a base64url string of exactly `size` octets,
    /// left-padded with zero octets.
    ///
    /// # Errors
    ///
    /// Returns an error if the value needs more octets than the preserved
    /// width.
    pub fn to_b64(&self) -> Result<String> {
        Ok(URL_SAFE_NO_PAD.encode(self.to_octets()?))
    }

    fn to_octets(&self) -> Result<Vec<u8>> {
        // The canonical form of zero is the empty octet string here; the
        // padding below restores the preserved width.
        let bytes = if self.inner.is_zero() {
            Vec::new()
        } else {
            self.inner.to_bytes_be()
        };
        if bytes.len() > self.size {
            return Err(Error::IntegerTooWide {
                need: bytes.len(),
                size: self.size,
            });
        }
        let mut buf = vec![0u8; self.size - bytes.len()];
        buf.extend_from_slice(&bytes);
        Ok(buf)
    }

    /// Returns the preserved octet width.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns a reference to the inner BigUint
    pub fn as_biguint(&self) -> &BigUint {
        &self.inner
    }

    /// Converts the integer to u64 if it fits in the range
    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }
}

impl From<&[u8]> for SizedBase64Integer {
    fn from(value: &[u8]) -> Self {
        SizedBase64Integer {
            size: value.len(),
            inner: BigUint::from_bytes_be(value),
        }
    }
}

impl Display for SizedBase64Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.to_b64().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", s)
    }
}

impl FromStr for SizedBase64Integer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SizedBase64Integer::from_b64(s)
    }
}

impl Serialize for SizedBase64Integer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = self.to_b64().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for SizedBase64Integer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SizedBase64Integer::from_b64(&s).map_err(serde::de::Error::custom)
    }
}

impl DecodableFrom<Value> for SizedBase64Integer {}

impl Decoder<Value, SizedBase64Integer> for Value {
    type Error = Error;

    fn decode(&self) -> Result<SizedBase64Integer> {
        match self {
            Value::String(s) => SizedBase64Integer::from_b64(s),
            _ => Err(Error::ExpectedString),
        }
    }
}

impl EncodableTo<SizedBase64Integer> for Value {}

impl Encoder<SizedBase64Integer, Value> for SizedBase64Integer {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        Ok(Value::String(self.to_b64()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // P-256 x coordinate from the RFC 7515 A.3 example key
    const P256_X: &str = "f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU";

    #[rstest]
    #[case("AQAB", 65537)]
    #[case("AA", 0)]
    #[case("AQ", 1)]
    #[case("_wE", 65281)]
    fn test_base64_integer_decode(#[case] input: &str, #[case] expected: u64) {
        let int = Base64Integer::from_b64(input).unwrap();
        assert_eq!(int.to_u64(), Some(expected));
    }

    #[rstest]
    #[case(65537, "AQAB")]
    #[case(0, "AA")]
    #[case(1, "AQ")]
    #[case(255, "_w")]
    fn test_base64_integer_encode(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(Base64Integer::from(value).to_b64(), expected);
    }

    #[rstest]
    #[case("AQAB")]
    #[case("AA")]
    #[case("gAATXoOPkJPT")]
    fn test_base64_integer_roundtrip(#[case] input: &str) {
        let int = Base64Integer::from_b64(input).unwrap();
        assert_eq!(int.to_b64(), input);
    }

    #[test]
    fn test_base64_integer_rejects_invalid_input() {
        // '+' and '/' belong to the standard alphabet, not base64url
        assert!(matches!(
            Base64Integer::from_b64("A+B/"),
            Err(Error::Base64Decode(_))
        ));
        // padding is not allowed
        assert!(matches!(
            Base64Integer::from_b64("AQ=="),
            Err(Error::Base64Decode(_))
        ));
    }

    #[test]
    fn test_base64_integer_decode_from_value() {
        let value = Value::String("AQAB".to_string());
        let int: Base64Integer = value.decode().unwrap();
        assert_eq!(int.to_u64(), Some(65537));

        let not_a_string = Value::from(65537);
        let result: Result<Base64Integer> = not_a_string.decode();
        assert_eq!(result, Err(Error::ExpectedString));
    }

    #[test]
    fn test_base64_integer_serde() {
        let int = Base64Integer::from(65537u64);
        let value = serde_json::to_value(&int).unwrap();
        assert_eq!(value, Value::String("AQAB".to_string()));

        let back: Base64Integer = serde_json::from_value(value).unwrap();
        assert_eq!(back, int);
    }

    #[test]
    fn test_sized_integer_preserves_leading_zeros() {
        // "AAAB" decodes to the octets [0x00, 0x00, 0x01]
        let int = SizedBase64Integer::from_b64("AAAB").unwrap();
        assert_eq!(int.size(), 3);
        assert_eq!(int.to_u64(), Some(1));
        assert_eq!(int.to_b64().unwrap(), "AAAB");

        // The plain variant absorbs the leading zeros
        let plain = Base64Integer::from_b64("AAAB").unwrap();
        assert_eq!(plain.to_b64(), "AQ");
    }

    #[rstest]
    #[case(P256_X, 32)]
    #[case("AA", 1)]
    #[case("AQAB", 3)]
    fn test_sized_integer_width(#[case] input: &str, #[case] expected_size: usize) {
        let int = SizedBase64Integer::from_b64(input).unwrap();
        assert_eq!(int.size(), expected_size);
        assert_eq!(int.to_b64().unwrap(), input);
    }

    #[test]
    fn test_sized_integer_width_distinguishes_values() {
        let wide = SizedBase64Integer::new(3, BigUint::from(1u8));
        let narrow = SizedBase64Integer::new(1, BigUint::from(1u8));
        assert_ne!(wide, narrow);
        assert_eq!(wide.as_biguint(), narrow.as_biguint());
    }

    #[test]
    fn test_sized_integer_too_wide() {
        let int = SizedBase64Integer::new(1, BigUint::from(65537u32));
        assert_eq!(
            int.to_b64(),
            Err(Error::IntegerTooWide { need: 3, size: 1 })
        );
    }

    #[test]
    fn test_sized_integer_from_integer_is_minimal() {
        let int = SizedBase64Integer::from_integer(BigUint::from(65537u32));
        assert_eq!(int.size(), 3);
        assert_eq!(int.to_b64().unwrap(), "AQAB");

        // zero still occupies one octet
        let zero = SizedBase64Integer::from_integer(BigUint::zero());
        assert_eq!(zero.size(), 1);
        assert_eq!(zero.to_b64().unwrap(), "AA");
    }

    #[test]
    fn test_from_bytes_and_biguint() {
        let from_bytes = Base64Integer::from([0x01, 0x00, 0x01].as_slice());
        assert_eq!(from_bytes, Base64Integer::from(65537u64));
        assert_eq!(from_bytes, Base64Integer::from(BigUint::from(65537u32)));

        let sized = SizedBase64Integer::from([0x00, 0x00, 0x01].as_slice());
        assert_eq!(sized.size(), 3);
        assert_eq!(sized.to_b64().unwrap(), "AAAB");
    }

    #[test]
    fn test_sized_integer_empty_input() {
        let int = SizedBase64Integer::from_b64("").unwrap();
        assert_eq!(int.size(), 0);
        assert_eq!(int.to_u64(), Some(0));
        assert_eq!(int.to_b64().unwrap(), "");
    }

    #[test]
    fn test_sized_integer_serde() {
        let int = SizedBase64Integer::from_b64(P256_X).unwrap();
        let value = serde_json::to_value(&int).unwrap();
        assert_eq!(value, Value::String(P256_X.to_string()));

        let back: SizedBase64Integer = serde_json::from_value(value).unwrap();
        assert_eq!(back, int);
    }
}
