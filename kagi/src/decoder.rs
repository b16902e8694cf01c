//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`, and `DecodableFrom<T>` marks which destinations are valid for
//! which sources. Together they form the conversion pipeline used
//! throughout kagi: JSON text parses into a `serde_json::Value`, and the
//! value decodes from there into typed key material.
//!
//! # Design Pattern
//!
//! 1. `Decoder<T, D>` - performs the actual conversion
//! 2. `DecodableFrom<T>` - marker trait constraining valid conversions
//!
//! A source type implements `Decoder` once per destination it can decode
//! into, so the destination type picked at the call site selects the
//! conversion. The same JSON object can therefore decode into each of
//! the structurally distinct shapes it might hold.
//!
//! # Shape Matching
//!
//! One decoder per destination is what makes ordered shape matching
//! work: a union type decodes by attempting its variants' decoders in a
//! fixed order and keeping the first success. Each attempt is an
//! ordinary `decode()` call whose destination is one variant's payload:
//!
//! ```no_run
//! use kagi::decoder::{DecodableFrom, Decoder};
//!
//! struct Wire(String);
//!
//! struct Private(String);
//! struct Public(String);
//!
//! enum KeyShape {
//!     Private(Private),
//!     Public(Public),
//! }
//!
//! #[derive(Debug)]
//! struct ShapeError;
//!
//! impl DecodableFrom<Wire> for Private {}
//!
//! impl Decoder<Wire, Private> for Wire {
//!     type Error = ShapeError;
//!
//!     fn decode(&self) -> Result<Private, Self::Error> {
//!         self.0
//!             .strip_prefix("private:")
//!             .map(|s| Private(s.to_string()))
//!             .ok_or(ShapeError)
//!     }
//! }
//!
//! impl DecodableFrom<Wire> for Public {}
//!
//! impl Decoder<Wire, Public> for Wire {
//!     type Error = ShapeError;
//!
//!     fn decode(&self) -> Result<Public, Self::Error> {
//!         self.0
//!             .strip_prefix("public:")
//!             .map(|s| Public(s.to_string()))
//!             .ok_or(ShapeError)
//!     }
//! }
//!
//! impl DecodableFrom<Wire> for KeyShape {}
//!
//! // The union tries the private shape first; the first success wins.
//! impl Decoder<Wire, KeyShape> for Wire {
//!     type Error = ShapeError;
//!
//!     fn decode(&self) -> Result<KeyShape, Self::Error> {
//!         if let Ok(private) = self.decode() {
//!             return Ok(KeyShape::Private(private));
//!         }
//!         self.decode().map(KeyShape::Public)
//!     }
//! }
//! ```
//!
//! The `jwk` crate uses exactly this arrangement for its parameter
//! unions and for the top-level key material type, with
//! `serde_json::Value` as the source:
//!
//! ```ignore
//! use kagi::decoder::Decoder;
//! use jwk::KeyMaterial;
//!
//! let value = serde_json::json!({ "kty": "Oct", "k": "AQAB" });
//! let key: KeyMaterial = value.decode().unwrap();
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type `T` (usually `Self`), once per
/// destination it can decode into. The destination must be marked
/// [`DecodableFrom<T>`], which keeps the set of valid conversions
/// explicit and checkable at compile time.
///
/// When a source type carries several `Decoder` impls, the destination
/// type at the call site picks the conversion:
///
/// ```ignore
/// use kagi::decoder::Decoder;
/// use b64int::Base64Integer;
///
/// let value = serde_json::json!("AQAB"); // 65537
/// let int: Base64Integer = value.decode().unwrap();
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// Constrains [`Decoder`] so that a conversion exists only where a pair
/// was explicitly declared. With several decoders hanging off one source
/// type, the marker impls also enumerate, in one place per destination,
/// which conversions a crate supports.
pub trait DecodableFrom<T> {}
