//! # kagi
//!
//! Core traits for encoding and decoding in the kagi JOSE toolkit.
//!
//! This crate defines the fundamental `Decoder` and `Encoder` traits that
//! establish a type-safe conversion pattern used throughout kagi.
//!
//! ## Overview
//!
//! The conversion pattern flows like this:
//! ```text
//! JSON text → serde_json::Value → KeyMaterial
//! ```
//!
//! Each step uses the `Decoder` trait to convert from one type to the next,
//! and the `Encoder` trait to convert in the reverse direction.
//!
//! ## Type Safety
//!
//! The traits use marker traits (`DecodableFrom` and `EncodableTo`) to ensure
//! type safety at compile time. This prevents invalid conversions and catches
//! errors early in the development process.
//!
//! ## Example
//!
//! The following example demonstrates the decoding pattern. Note that specific
//! implementations are provided by the `b64int` and `jwk` crates:
//!
//! ```ignore
//! use kagi::decoder::Decoder;
//! use b64int::Base64Integer;
//!
//! // Decode a JSON value to a base64url integer
//! let value = serde_json::json!("AQAB");
//! let int: Base64Integer = value.decode().unwrap();
//! ```
//!
//! Encoding works in the reverse direction:
//!
//! ```ignore
//! use kagi::encoder::Encoder;
//! use b64int::Base64Integer;
//!
//! // Encode a base64url integer back to a JSON value
//! let int = Base64Integer::from(65537u64);
//! let value: serde_json::Value = int.encode().unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
