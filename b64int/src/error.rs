use base64::DecodeError;
use thiserror::Error;

/// Errors that can occur when decoding or encoding base64url integers.
///
/// The textual form follows RFC 7518: base64url without padding over the
/// big-endian octet representation of a non-negative integer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The JSON value carrying an integer was not a string
    #[error("expected a JSON string")]
    ExpectedString,

    /// Failed to decode base64url data
    #[error("base64url decode: {0}")]
    Base64Decode(DecodeError),

    /// The integer does not fit in the preserved octet width
    #[error("integer needs {need} octets but the preserved width is {size}")]
    IntegerTooWide { need: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
