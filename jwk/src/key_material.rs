//! Top-level key material union.
//!
//! A key-material object is a single flat JSON object: the "kty" tag
//! next to the members of one family's parameter shape. Decoding tries
//! the families in a fixed order, checking "kty" inside each branch, and
//! encoding merges the tag back over the encoded parameters.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::ec::ECKeyParameters;
use crate::error::{Error, Result};
use crate::key_type::{EcKeyType, KeyType, OctKeyType, RsaKeyType};
use crate::oct::OctKeyParameters;
use crate::rsa::RSAKeyParameters;

/// Key material for one of the three key families.
///
/// The enum variant is the "kty" tag: a value cannot carry one family's
/// parameters under another family's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// Elliptic-curve key
    Ec(ECKeyParameters),
    /// RSA key
    Rsa(RSAKeyParameters),
    /// Symmetric octet key
    Oct(OctKeyParameters),
}

impl KeyMaterial {
    /// Returns the key family discriminant.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        match self {
            KeyMaterial::Ec(_) => KeyType::Ec,
            KeyMaterial::Rsa(_) => KeyType::Rsa,
            KeyMaterial::Oct(_) => KeyType::Oct,
        }
    }
}

fn kty_member(value: &Value) -> Result<&Value> {
    let map = value.as_object().ok_or(Error::ExpectedObject)?;
    map.get("kty").ok_or(Error::MissingField("kty"))
}

fn decode_ec(value: &Value) -> Result<ECKeyParameters> {
    let _: EcKeyType = kty_member(value)?.decode()?;
    value.decode()
}

fn decode_rsa(value: &Value) -> Result<RSAKeyParameters> {
    let _: RsaKeyType = kty_member(value)?.decode()?;
    value.decode()
}

fn decode_oct(value: &Value) -> Result<OctKeyParameters> {
    let _: OctKeyType = kty_member(value)?.decode()?;
    value.decode()
}

impl DecodableFrom<Value> for KeyMaterial {}

impl Decoder<Value, KeyMaterial> for Value {
    type Error = Error;

    /// Attempt to parse key material from a JSON object.
    ///
    /// This method tries each family in order:
    /// 1. EC ("kty" is "EC" and the object matches an EC shape)
    /// 2. RSA
    /// 3. Oct
    ///
    /// The tag is checked inside each branch, so a foreign or malformed
    /// "kty" walks through every alternative before the aggregate error
    /// is returned.
    fn decode(&self) -> Result<KeyMaterial> {
        let ec_err = match decode_ec(self) {
            Ok(params) => return Ok(KeyMaterial::Ec(params)),
            Err(e) => e,
        };

        let rsa_err = match decode_rsa(self) {
            Ok(params) => return Ok(KeyMaterial::Rsa(params)),
            Err(e) => e,
        };

        let oct_err = match decode_oct(self) {
            Ok(params) => return Ok(KeyMaterial::Oct(params)),
            Err(e) => e,
        };

        Err(Error::UnrecognizedKeyMaterial {
            ec: Box::new(ec_err),
            rsa: Box::new(rsa_err),
            oct: Box::new(oct_err),
        })
    }
}

impl EncodableTo<KeyMaterial> for Value {}

impl Encoder<KeyMaterial, Value> for KeyMaterial {
    type Error = Error;

    fn encode(&self) -> Result<Value> {
        let (kty, params) = match self {
            KeyMaterial::Ec(params) => (EcKeyType.encode()?, params.encode()?),
            KeyMaterial::Rsa(params) => (RsaKeyType.encode()?, params.encode()?),
            KeyMaterial::Oct(params) => (OctKeyType.encode()?, params.encode()?),
        };

        // "kty" is reserved: no parameter shape defines a member with
        // that name, so the merge cannot collide (pinned by test).
        let mut map = Map::new();
        map.insert("kty".to_string(), kty);
        if let Value::Object(members) = params {
            map.extend(members);
        }
        Ok(Value::Object(map))
    }
}

impl From<ECKeyParameters> for KeyMaterial {
    fn from(params: ECKeyParameters) -> Self {
        KeyMaterial::Ec(params)
    }
}

impl From<RSAKeyParameters> for KeyMaterial {
    fn from(params: RSAKeyParameters) -> Self {
        KeyMaterial::Rsa(params)
    }
}

impl From<OctKeyParameters> for KeyMaterial {
    fn from(params: OctKeyParameters) -> Self {
        KeyMaterial::Oct(params)
    }
}

impl FromStr for KeyMaterial {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        value.decode()
    }
}

impl Display for KeyMaterial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = self.encode().map_err(|_| std::fmt::Error)?;
        write!(f, "{}", value)
    }
}

impl Serialize for KeyMaterial {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.encode().map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeyMaterial {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value.decode().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // P-256 key pair from RFC 7515 Appendix A.3
    const P256_X: &str = "f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU";
    const P256_Y: &str = "x_FEzRu9m36HLN_tue659LNpXW6pCyStikYjKIWI5a0";
    const P256_D: &str = "jpsQnnGQmL-YBIffH1136cspYG6-0iY7X1fCE9-E9LI";

    // 2048-bit RSA modulus from RFC 7515 Appendix A.2
    const RSA_N: &str = "ofgWCuLjybRlzo0tZWJjNiuSfb4p4fAkd_wWJcyQoTbji9k0l8W26mPddxHmfHQp-Vaw-4qPCJrcS2mJPMEzP1Pt0Bm4d4QlL-yRT-SFd2lZS-pCgNMsD1W_YpRPEwOWvG6b32690r2jZ47soMZo9wGzjb_7OMg0LOL-bSf63kpaSHSXndS5z5rexMdbBYUsLA9e-KXBdQOS-UTo7WTBEMa2R2CapHg665xsmtdVMTBQY4uDZlxvb3qCo5ZwKh9kG4LT6_I5IhlJH7aGhyxXFvUK-DWNmoudF8NAco9_h9iaGNj8q2ethFkMLs91kzk2PAcDTW9gb54h4FRWyuXpoQ";
    const RSA_E: &str = "AQAB";

    // HMAC key from RFC 7515 Appendix A.1
    const OCT_K: &str = "AyM1SysPpbyDfgZld3umj1qzKObwVMkoqQ-EstJQLr_T-1qS0gZH75aKtMN3Yj0iPS4hcgUuTwjAzZr1Z9CAow";

    #[test]
    fn test_decode_rsa_public() {
        let value = serde_json::json!({ "kty": "RSA", "n": RSA_N, "e": RSA_E });
        let key: KeyMaterial = value.decode().unwrap();

        assert_eq!(key.key_type(), KeyType::Rsa);
        match &key {
            KeyMaterial::Rsa(RSAKeyParameters::Public(public)) => {
                assert_eq!(public.e.to_u64(), Some(65537));
            }
            _ => panic!("expected an RSA public key"),
        }

        // The parameter level carries no "kty"; it reappears only here.
        let params = match &key {
            KeyMaterial::Rsa(params) => params.encode().unwrap(),
            _ => unreachable!(),
        };
        assert!(!params.as_object().unwrap().contains_key("kty"));
    }

    #[test]
    fn test_decode_ec_public() {
        let value = serde_json::json!({
            "kty": "EC",
            "crv": "P-256",
            "x": P256_X,
            "y": P256_Y,
        });
        let key: KeyMaterial = value.decode().unwrap();
        assert_eq!(key.key_type(), KeyType::Ec);
    }

    #[test]
    fn test_decode_oct() {
        let value = serde_json::json!({ "kty": "Oct", "k": OCT_K });
        let key: KeyMaterial = value.decode().unwrap();
        assert_eq!(key.key_type(), KeyType::Oct);
    }

    #[test]
    fn test_undefined_curve_surfaces_in_aggregate() {
        let value = serde_json::json!({
            "kty": "EC",
            "crv": "P-999",
            "x": P256_X,
            "y": P256_Y,
        });
        let result: Result<KeyMaterial> = value.decode();

        match result {
            Err(Error::UnrecognizedKeyMaterial { ec, .. }) => match *ec {
                Error::NoMatchingKeyParameters { public, .. } => {
                    assert!(matches!(*public, Error::UndefinedCurve(_)));
                }
                _ => panic!("expected NoMatchingKeyParameters in the EC branch"),
            },
            _ => panic!("expected UnrecognizedKeyMaterial"),
        }
    }

    #[test]
    fn test_unknown_kty_walks_all_branches() {
        let value = serde_json::json!({ "kty": "OKP", "k": OCT_K });
        let result: Result<KeyMaterial> = value.decode();

        match result {
            Err(Error::UnrecognizedKeyMaterial { ec, rsa, oct }) => {
                assert!(matches!(*ec, Error::UnrecognizedKeyType(_)));
                assert!(matches!(*rsa, Error::UnrecognizedKeyType(_)));
                assert!(matches!(*oct, Error::UnrecognizedKeyType(_)));
            }
            _ => panic!("expected UnrecognizedKeyMaterial"),
        }
    }

    #[test]
    fn test_kty_is_case_sensitive() {
        let value = serde_json::json!({ "kty": "oct", "k": OCT_K });
        let result: Result<KeyMaterial> = value.decode();
        assert!(matches!(result, Err(Error::UnrecognizedKeyMaterial { .. })));
    }

    #[test]
    fn test_missing_kty() {
        let value = serde_json::json!({ "k": OCT_K });
        let result: Result<KeyMaterial> = value.decode();

        match result {
            Err(Error::UnrecognizedKeyMaterial { ec, .. }) => {
                assert!(matches!(*ec, Error::MissingField("kty")));
            }
            _ => panic!("expected UnrecognizedKeyMaterial"),
        }
    }

    #[test]
    fn test_matching_tag_with_foreign_members_fails() {
        // The tag matches the RSA branch but the members match no RSA
        // shape, so the whole decode fails.
        let value = serde_json::json!({ "kty": "RSA", "k": OCT_K });
        let result: Result<KeyMaterial> = value.decode();
        assert!(matches!(result, Err(Error::UnrecognizedKeyMaterial { .. })));
    }

    #[rstest]
    #[case(serde_json::json!({ "kty": "EC", "crv": "P-256", "x": P256_X, "y": P256_Y }))]
    #[case(serde_json::json!({ "kty": "EC", "d": P256_D }))]
    #[case(serde_json::json!({ "kty": "RSA", "n": RSA_N, "e": RSA_E }))]
    #[case(serde_json::json!({ "kty": "Oct", "k": OCT_K }))]
    fn test_roundtrip(#[case] value: Value) {
        let key: KeyMaterial = value.decode().unwrap();
        let encoded = key.encode().unwrap();
        assert_eq!(encoded, value);

        let decoded: KeyMaterial = encoded.decode().unwrap();
        assert_eq!(decoded, key);
    }

    #[rstest]
    #[case(serde_json::json!({ "kty": "EC", "crv": "P-256", "x": P256_X, "y": P256_Y }), "EC")]
    #[case(serde_json::json!({ "kty": "RSA", "n": RSA_N, "e": RSA_E }), "RSA")]
    #[case(serde_json::json!({ "kty": "Oct", "k": OCT_K }), "Oct")]
    fn test_encode_merges_tag_without_collision(#[case] value: Value, #[case] literal: &str) {
        let key: KeyMaterial = value.decode().unwrap();
        let encoded = key.encode().unwrap();
        let map = encoded.as_object().unwrap();

        // one "kty" member plus the family's own members, nothing shadowed
        assert_eq!(map.get("kty"), Some(&Value::String(literal.to_string())));
        assert_eq!(map.len(), value.as_object().unwrap().len());
    }

    #[test]
    fn test_from_str_and_display() {
        let text = r#"{"kty":"Oct","k":"AQAB"}"#;
        let key: KeyMaterial = text.parse().unwrap();
        assert_eq!(key.key_type(), KeyType::Oct);

        let rendered = key.to_string();
        let reparsed: KeyMaterial = rendered.parse().unwrap();
        assert_eq!(reparsed, key);
    }

    #[test]
    fn test_from_str_rejects_invalid_json() {
        let result = "{not json".parse::<KeyMaterial>();
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_serde_delegates_to_codec() {
        let value = serde_json::json!({ "kty": "EC", "crv": "P-256", "x": P256_X, "y": P256_Y });
        let key: KeyMaterial = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(key.key_type(), KeyType::Ec);

        let serialized = serde_json::to_value(&key).unwrap();
        assert_eq!(serialized, value);
    }
}
