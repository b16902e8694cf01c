//! Named-curve registry for EC keys.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use serde_json::Value;

use crate::error::{Error, Result};

/*
ref: https://www.rfc-editor.org/rfc/rfc7518.html#section-6.2.1.1

"crv" values registered for EC keys: P-256, P-384, P-521.
The registry is closed; any other value is rejected on decode, and the
reverse mapping is exhaustive by construction.
*/

/// Curves usable in the "crv" member of an EC key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// P-256 (secp256r1)
    P256,
    /// P-384 (secp384r1)
    P384,
    /// P-521 (secp521r1)
    P521,
}

impl Curve {
    pub const CRV_P256: &'static str = "P-256";
    pub const CRV_P384: &'static str = "P-384";
    pub const CRV_P521: &'static str = "P-521";

    /// Returns the registered "crv" literal for this curve.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Curve::P256 => Self::CRV_P256,
            Curve::P384 => Self::CRV_P384,
            Curve::P521 => Self::CRV_P521,
        }
    }

    /// Octet width of a field element on this curve.
    ///
    /// This is the external context that fixes the preserved width of the
    /// sized coordinate integers of an EC key.
    #[must_use]
    pub const fn coordinate_octets(&self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }

    /// Returns the key size in bits.
    #[must_use]
    pub const fn key_size(&self) -> u32 {
        match self {
            Curve::P256 => 256,
            Curve::P384 => 384,
            Curve::P521 => 521,
        }
    }
}

impl Display for Curve {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Curve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            Self::CRV_P256 => Ok(Curve::P256),
            Self::CRV_P384 => Ok(Curve::P384),
            Self::CRV_P521 => Ok(Curve::P521),
            _ => Err(Error::UndefinedCurve(s.to_string())),
        }
    }
}

impl DecodableFrom<Value> for Curve {}

impl Decoder<Value, Curve> for Value {
    type Error = Error;

    fn decode(&self) -> Result<Curve> {
        match self {
            Value::String(s) => s.parse(),
            _ => Err(Error::ExpectedString("crv")),
        }
    }
}

impl EncodableTo<Curve> for Value {}

impl Encoder<Curve, Value> for Curve {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        Ok(Value::String(self.name().to_string()))
    }
}
