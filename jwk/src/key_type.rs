//! Key-type tags carried in the "kty" member.
//!
//! Each key family has a singleton tag type that decodes only from its
//! exact literal. The tag types are what the per-family branches of
//! [`crate::key_material::KeyMaterial`] match against, so a wrong or
//! misspelled "kty" fails that branch and lets the next one try.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use serde_json::Value;

use crate::error::{Error, Result};

const EC_LITERAL: &str = "EC";
const RSA_LITERAL: &str = "RSA";
const OCT_LITERAL: &str = "Oct";

fn decode_literal(value: &Value, literal: &'static str) -> Result<()> {
    match value {
        Value::String(s) if s == literal => Ok(()),
        Value::String(s) => Err(Error::UnrecognizedKeyType(s.clone())),
        _ => Err(Error::ExpectedString("kty")),
    }
}

/// Tag of the elliptic-curve key family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcKeyType;

impl EcKeyType {
    pub const LITERAL: &'static str = EC_LITERAL;
}

impl DecodableFrom<Value> for EcKeyType {}

impl Decoder<Value, EcKeyType> for Value {
    type Error = Error;

    fn decode(&self) -> Result<EcKeyType> {
        decode_literal(self, EcKeyType::LITERAL).map(|_| EcKeyType)
    }
}

impl EncodableTo<EcKeyType> for Value {}

impl Encoder<EcKeyType, Value> for EcKeyType {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        Ok(Value::String(Self::LITERAL.to_string()))
    }
}

/// Tag of the RSA key family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaKeyType;

impl RsaKeyType {
    pub const LITERAL: &'static str = RSA_LITERAL;
}

impl DecodableFrom<Value> for RsaKeyType {}

impl Decoder<Value, RsaKeyType> for Value {
    type Error = Error;

    fn decode(&self) -> Result<RsaKeyType> {
        decode_literal(self, RsaKeyType::LITERAL).map(|_| RsaKeyType)
    }
}

impl EncodableTo<RsaKeyType> for Value {}

impl Encoder<RsaKeyType, Value> for RsaKeyType {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        Ok(Value::String(Self::LITERAL.to_string()))
    }
}

/// Tag of the symmetric (octet) key family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctKeyType;

impl OctKeyType {
    pub const LITERAL: &'static str = OCT_LITERAL;
}

impl DecodableFrom<Value> for OctKeyType {}

impl Decoder<Value, OctKeyType> for Value {
    type Error = Error;

    fn decode(&self) -> Result<OctKeyType> {
        decode_literal(self, OctKeyType::LITERAL).map(|_| OctKeyType)
    }
}

impl EncodableTo<OctKeyType> for Value {}

impl Encoder<OctKeyType, Value> for OctKeyType {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        Ok(Value::String(Self::LITERAL.to_string()))
    }
}

/// Key family discriminant.
///
/// The user-facing view of the "kty" member, independent of the family's
/// parameter shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Elliptic curve keys
    Ec,
    /// RSA keys
    Rsa,
    /// Symmetric octet keys
    Oct,
}

impl KeyType {
    /// Returns the "kty" literal for this family.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            KeyType::Ec => EC_LITERAL,
            KeyType::Rsa => RSA_LITERAL,
            KeyType::Oct => OCT_LITERAL,
        }
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KeyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            EC_LITERAL => Ok(KeyType::Ec),
            RSA_LITERAL => Ok(KeyType::Rsa),
            OCT_LITERAL => Ok(KeyType::Oct),
            _ => Err(Error::UnrecognizedKeyType(s.to_string())),
        }
    }
}
