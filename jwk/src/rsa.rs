//! RSA key parameters.

use b64int::{Base64Integer, SizedBase64Integer};
use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/*
ref: https://www.rfc-editor.org/rfc/rfc7518.html#section-6.3

An RSA key object is either a private key, recognized by the "d" member
and optionally carrying the CRT members (p, q, dp, dq, qi) plus the
additional-primes list (oth), or a public key carrying "n" and "e".

Presence contracts differ inside the optional-parameters object:
p, q, dp, dq and qi must be present but may be null, while oth may be
absent entirely. Absent and empty are distinct for oth.
*/

const OPTIONAL_MEMBERS: [&str; 6] = ["p", "q", "dp", "dq", "qi", "oth"];

fn required_nullable(map: &Map<String, Value>, member: &'static str) -> Result<Option<Base64Integer>> {
    match map.get(member) {
        Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(value.decode()?)),
        None => Err(Error::MissingField(member)),
    }
}

fn encode_nullable(value: &Option<Base64Integer>) -> Result<Value> {
    match value {
        Some(int) => int.encode().map_err(Error::from),
        None => Ok(Value::Null),
    }
}

/// One element of the additional-primes list of a multi-prime RSA
/// private key.
///
/// No numeric relation between the members is checked at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherPrimeInfo {
    /// Prime factor
    pub r: SizedBase64Integer,
    /// Factor CRT exponent
    pub d: SizedBase64Integer,
    /// Factor CRT coefficient
    pub t: SizedBase64Integer,
}

impl OtherPrimeInfo {
    pub fn new(r: SizedBase64Integer, d: SizedBase64Integer, t: SizedBase64Integer) -> Self {
        Self { r, d, t }
    }
}

impl DecodableFrom<Value> for OtherPrimeInfo {}

impl Decoder<Value, OtherPrimeInfo> for Value {
    type Error = Error;

    fn decode(&self) -> Result<OtherPrimeInfo> {
        let map = self.as_object().ok_or(Error::ExpectedObject)?;
        let r = map.get("r").ok_or(Error::MissingField("r"))?.decode()?;
        let d = map.get("d").ok_or(Error::MissingField("d"))?.decode()?;
        let t = map.get("t").ok_or(Error::MissingField("t"))?.decode()?;
        Ok(OtherPrimeInfo { r, d, t })
    }
}

impl EncodableTo<OtherPrimeInfo> for Value {}

impl Encoder<OtherPrimeInfo, Value> for OtherPrimeInfo {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        let mut map = Map::new();
        map.insert("r".to_string(), self.r.encode()?);
        map.insert("d".to_string(), self.d.encode()?);
        map.insert("t".to_string(), self.t.encode()?);
        Ok(Value::Object(map))
    }
}

/// CRT parameters of the extended RSA private key form.
///
/// An `oth` list, when present, should not be empty; that rule is
/// traditionally unenforced and an empty list is accepted here as well.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RSAPrivateKeyOptionalParameters {
    /// First prime factor
    pub p: Option<Base64Integer>,
    /// Second prime factor
    pub q: Option<Base64Integer>,
    /// First factor CRT exponent
    pub dp: Option<Base64Integer>,
    /// Second factor CRT exponent
    pub dq: Option<Base64Integer>,
    /// First CRT coefficient
    pub qi: Option<Base64Integer>,
    /// Additional primes beyond the first two
    pub oth: Option<Vec<OtherPrimeInfo>>,
}

impl DecodableFrom<Value> for RSAPrivateKeyOptionalParameters {}

impl Decoder<Value, RSAPrivateKeyOptionalParameters> for Value {
    type Error = Error;

    fn decode(&self) -> Result<RSAPrivateKeyOptionalParameters> {
        let map = self.as_object().ok_or(Error::ExpectedObject)?;

        let p = required_nullable(map, "p")?;
        let q = required_nullable(map, "q")?;
        let dp = required_nullable(map, "dp")?;
        let dq = required_nullable(map, "dq")?;
        let qi = required_nullable(map, "qi")?;

        let oth = match map.get("oth") {
            None | Some(Value::Null) => None,
            Some(Value::Array(elements)) => Some(
                elements
                    .iter()
                    .map(|element| element.decode())
                    .collect::<Result<Vec<OtherPrimeInfo>>>()?,
            ),
            Some(_) => return Err(Error::ExpectedArray("oth")),
        };

        Ok(RSAPrivateKeyOptionalParameters {
            p,
            q,
            dp,
            dq,
            qi,
            oth,
        })
    }
}

impl EncodableTo<RSAPrivateKeyOptionalParameters> for Value {}

impl Encoder<RSAPrivateKeyOptionalParameters, Value> for RSAPrivateKeyOptionalParameters {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        let mut map = Map::new();
        map.insert("p".to_string(), encode_nullable(&self.p)?);
        map.insert("q".to_string(), encode_nullable(&self.q)?);
        map.insert("dp".to_string(), encode_nullable(&self.dp)?);
        map.insert("dq".to_string(), encode_nullable(&self.dq)?);
        // Wire compatibility: "qi" has always gone out under the "dq"
        // member name, clobbering the dq value above. The output is
        // therefore not decodable (no "qi" member); see the tests before
        // touching this line.
        map.insert("dq".to_string(), encode_nullable(&self.qi)?);
        if let Some(oth) = &self.oth {
            let elements = oth
                .iter()
                .map(|info| info.encode())
                .collect::<Result<Vec<Value>>>()?;
            map.insert("oth".to_string(), Value::Array(elements));
        }
        Ok(Value::Object(map))
    }
}

/// RSA private key parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPrivateKeyParameters {
    /// Private exponent
    pub d: Base64Integer,
    /// CRT parameters, present when any of their members appears
    pub optional_parameters: Option<RSAPrivateKeyOptionalParameters>,
}

impl RSAPrivateKeyParameters {
    pub fn new(
        d: Base64Integer,
        optional_parameters: Option<RSAPrivateKeyOptionalParameters>,
    ) -> Self {
        Self {
            d,
            optional_parameters,
        }
    }
}

impl DecodableFrom<Value> for RSAPrivateKeyParameters {}

impl Decoder<Value, RSAPrivateKeyParameters> for Value {
    type Error = Error;

    fn decode(&self) -> Result<RSAPrivateKeyParameters> {
        let map = self.as_object().ok_or(Error::ExpectedObject)?;
        let d = map.get("d").ok_or(Error::MissingField("d"))?.decode()?;

        // The CRT members kick in as a whole: once any of them appears,
        // the full optional-parameters object must decode, and a failure
        // there fails the private shape outright.
        let optional_parameters = if OPTIONAL_MEMBERS.iter().any(|m| map.contains_key(*m)) {
            Some(self.decode()?)
        } else {
            None
        };

        Ok(RSAPrivateKeyParameters {
            d,
            optional_parameters,
        })
    }
}

impl EncodableTo<RSAPrivateKeyParameters> for Value {}

impl Encoder<RSAPrivateKeyParameters, Value> for RSAPrivateKeyParameters {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        let mut map = Map::new();
        map.insert("d".to_string(), self.d.encode()?);
        if let Some(params) = &self.optional_parameters {
            // Flatten: the CRT members sit next to "d" in one object.
            if let Value::Object(members) = params.encode()? {
                map.extend(members);
            }
        }
        Ok(Value::Object(map))
    }
}

/// RSA public key parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPublicKeyParameters {
    /// Modulus
    pub n: Base64Integer,
    /// Public exponent
    pub e: Base64Integer,
}

impl RSAPublicKeyParameters {
    pub fn new(n: Base64Integer, e: Base64Integer) -> Self {
        Self { n, e }
    }

    /// Returns the key size in bits (modulus bit length).
    #[must_use]
    pub fn key_size(&self) -> u32 {
        self.n.as_biguint().bits() as u32
    }
}

impl DecodableFrom<Value> for RSAPublicKeyParameters {}

impl Decoder<Value, RSAPublicKeyParameters> for Value {
    type Error = Error;

    fn decode(&self) -> Result<RSAPublicKeyParameters> {
        let map = self.as_object().ok_or(Error::ExpectedObject)?;
        let n = map.get("n").ok_or(Error::MissingField("n"))?.decode()?;
        let e = map.get("e").ok_or(Error::MissingField("e"))?.decode()?;
        Ok(RSAPublicKeyParameters { n, e })
    }
}

impl EncodableTo<RSAPublicKeyParameters> for Value {}

impl Encoder<RSAPublicKeyParameters, Value> for RSAPublicKeyParameters {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        let mut map = Map::new();
        map.insert("n".to_string(), self.n.encode()?);
        map.insert("e".to_string(), self.e.encode()?);
        Ok(Value::Object(map))
    }
}

/// RSA key parameters: exactly one of the private or public shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RSAKeyParameters {
    Private(RSAPrivateKeyParameters),
    Public(RSAPublicKeyParameters),
}

impl RSAKeyParameters {
    /// Returns true if this is the private shape.
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self, RSAKeyParameters::Private(_))
    }
}

impl DecodableFrom<Value> for RSAKeyParameters {}

impl Decoder<Value, RSAKeyParameters> for Value {
    type Error = Error;

    /// Attempt to parse RSA key parameters from a JSON object.
    ///
    /// This method tries each shape in order:
    /// 1. private (the "d" member, with the CRT members as a whole)
    /// 2. public ("n", "e")
    fn decode(&self) -> Result<RSAKeyParameters> {
        let private_err = match self.decode() {
            Ok(params) => return Ok(RSAKeyParameters::Private(params)),
            Err(e) => e,
        };

        let public_err = match self.decode() {
            Ok(params) => return Ok(RSAKeyParameters::Public(params)),
            Err(e) => e,
        };

        Err(Error::NoMatchingKeyParameters {
            private: Box::new(private_err),
            public: Box::new(public_err),
        })
    }
}

impl EncodableTo<RSAKeyParameters> for Value {}

impl Encoder<RSAKeyParameters, Value> for RSAKeyParameters {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        match self {
            RSAKeyParameters::Private(params) => params.encode(),
            RSAKeyParameters::Public(params) => params.encode(),
        }
    }
}

impl From<RSAPrivateKeyParameters> for RSAKeyParameters {
    fn from(params: RSAPrivateKeyParameters) -> Self {
        RSAKeyParameters::Private(params)
    }
}

impl From<RSAPublicKeyParameters> for RSAKeyParameters {
    fn from(params: RSAPublicKeyParameters) -> Self {
        RSAKeyParameters::Public(params)
    }
}
