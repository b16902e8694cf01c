//! Elliptic-curve key parameters.

use b64int::SizedBase64Integer;
use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use serde_json::{Map, Value};

use crate::curve::Curve;
use crate::error::{Error, Result};

/*
ref: https://www.rfc-editor.org/rfc/rfc7518.html#section-6.2

An EC key object is either a private key, recognized by the "d" member,
or a public key carrying "crv", "x" and "y". The private shape is tried
first, so an object carrying both decodes as a private key.

The coordinate members use the length-preserving integer form: their
octet width is the curve field size, including leading zero octets.
*/

/// EC private key parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ECPrivateKeyParameters {
    /// ECC private key value
    pub d: SizedBase64Integer,
}

impl ECPrivateKeyParameters {
    pub fn new(d: SizedBase64Integer) -> Self {
        Self { d }
    }
}

impl DecodableFrom<Value> for ECPrivateKeyParameters {}

impl Decoder<Value, ECPrivateKeyParameters> for Value {
    type Error = Error;

    fn decode(&self) -> Result<ECPrivateKeyParameters> {
        let map = self.as_object().ok_or(Error::ExpectedObject)?;
        let d = map.get("d").ok_or(Error::MissingField("d"))?.decode()?;
        Ok(ECPrivateKeyParameters { d })
    }
}

impl EncodableTo<ECPrivateKeyParameters> for Value {}

impl Encoder<ECPrivateKeyParameters, Value> for ECPrivateKeyParameters {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        let mut map = Map::new();
        map.insert("d".to_string(), self.d.encode()?);
        Ok(Value::Object(map))
    }
}

/// EC public key parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ECPublicKeyParameters {
    /// Curve the point lies on
    pub crv: Curve,
    /// x coordinate
    pub x: SizedBase64Integer,
    /// y coordinate
    pub y: SizedBase64Integer,
}

impl ECPublicKeyParameters {
    pub fn new(crv: Curve, x: SizedBase64Integer, y: SizedBase64Integer) -> Self {
        Self { crv, x, y }
    }

    /// Returns the key size in bits based on the curve.
    #[must_use]
    pub fn key_size(&self) -> u32 {
        self.crv.key_size()
    }
}

impl DecodableFrom<Value> for ECPublicKeyParameters {}

impl Decoder<Value, ECPublicKeyParameters> for Value {
    type Error = Error;

    fn decode(&self) -> Result<ECPublicKeyParameters> {
        let map = self.as_object().ok_or(Error::ExpectedObject)?;
        let crv = map.get("crv").ok_or(Error::MissingField("crv"))?.decode()?;
        let x = map.get("x").ok_or(Error::MissingField("x"))?.decode()?;
        let y = map.get("y").ok_or(Error::MissingField("y"))?.decode()?;
        Ok(ECPublicKeyParameters { crv, x, y })
    }
}

impl EncodableTo<ECPublicKeyParameters> for Value {}

impl Encoder<ECPublicKeyParameters, Value> for ECPublicKeyParameters {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        let mut map = Map::new();
        map.insert("crv".to_string(), self.crv.encode()?);
        map.insert("x".to_string(), self.x.encode()?);
        map.insert("y".to_string(), self.y.encode()?);
        Ok(Value::Object(map))
    }
}

/// EC key parameters: exactly one of the private or public shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ECKeyParameters {
    Private(ECPrivateKeyParameters),
    Public(ECPublicKeyParameters),
}

impl ECKeyParameters {
    /// Returns true if this is the private shape.
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self, ECKeyParameters::Private(_))
    }
}

impl DecodableFrom<Value> for ECKeyParameters {}

impl Decoder<Value, ECKeyParameters> for Value {
    type Error = Error;

    /// Attempt to parse EC key parameters from a JSON object.
    ///
    /// This method tries each shape in order:
    /// 1. private (the "d" member)
    /// 2. public ("crv", "x", "y")
    fn decode(&self) -> Result<ECKeyParameters> {
        let private_err = match self.decode() {
            Ok(params) => return Ok(ECKeyParameters::Private(params)),
            Err(e) => e,
        };

        let public_err = match self.decode() {
            Ok(params) => return Ok(ECKeyParameters::Public(params)),
            Err(e) => e,
        };

        Err(Error::NoMatchingKeyParameters {
            private: Box::new(private_err),
            public: Box::new(public_err),
        })
    }
}

impl EncodableTo<ECKeyParameters> for Value {}

impl Encoder<ECKeyParameters, Value> for ECKeyParameters {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        match self {
            ECKeyParameters::Private(params) => params.encode(),
            ECKeyParameters::Public(params) => params.encode(),
        }
    }
}

impl From<ECPrivateKeyParameters> for ECKeyParameters {
    fn from(params: ECPrivateKeyParameters) -> Self {
        ECKeyParameters::Private(params)
    }
}

impl From<ECPublicKeyParameters> for ECKeyParameters {
    fn from(params: ECPublicKeyParameters) -> Self {
        ECKeyParameters::Public(params)
    }
}
