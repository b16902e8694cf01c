//! JWK-equivalent key material
//!
//! This crate models cryptographic key material as flat JSON objects in
//! the manner of RFC 7517/7518: a "kty" tag next to the members of one
//! key family's parameter shape (EC, RSA, or symmetric octet).
//!
//! Decoding is shape matching: structurally distinct interpretations of
//! the same object are tried in a fixed order and the first one that
//! validates wins (a private shape always before its public shape). All
//! integer-valued members go through the `b64int` codec; this crate only
//! arranges them.
//!
//! ```ignore
//! use kagi::decoder::Decoder;
//! use jwk::KeyMaterial;
//!
//! let value = serde_json::json!({ "kty": "RSA", "n": "...", "e": "AQAB" });
//! let key: KeyMaterial = value.decode()?;
//! ```

pub mod curve;
pub mod ec;
pub mod error;
pub mod key_material;
pub mod key_type;
pub mod oct;
pub mod rsa;

pub use curve::Curve;
pub use ec::{ECKeyParameters, ECPrivateKeyParameters, ECPublicKeyParameters};
pub use error::{Error, Result};
pub use key_material::KeyMaterial;
pub use key_type::{EcKeyType, KeyType, OctKeyType, RsaKeyType};
pub use oct::OctKeyParameters;
pub use rsa::{
    OtherPrimeInfo, RSAKeyParameters, RSAPrivateKeyOptionalParameters, RSAPrivateKeyParameters,
    RSAPublicKeyParameters,
};
