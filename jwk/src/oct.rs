//! Symmetric (octet) key parameters.

use b64int::Base64Integer;
use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Symmetric key parameters: the key value in the single "k" member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctKeyParameters {
    /// Key value
    pub k: Base64Integer,
}

impl OctKeyParameters {
    pub fn new(k: Base64Integer) -> Self {
        Self { k }
    }
}

impl DecodableFrom<Value> for OctKeyParameters {}

impl Decoder<Value, OctKeyParameters> for Value {
    type Error = Error;

    fn decode(&self) -> Result<OctKeyParameters> {
        let map = self.as_object().ok_or(Error::ExpectedObject)?;
        let k = map.get("k").ok_or(Error::MissingField("k"))?.decode()?;
        Ok(OctKeyParameters { k })
    }
}

impl EncodableTo<OctKeyParameters> for Value {}

impl Encoder<OctKeyParameters, Value> for OctKeyParameters {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        let mut map = Map::new();
        map.insert("k".to_string(), self.k.encode()?);
        Ok(Value::Object(map))
    }
}
