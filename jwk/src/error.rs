use thiserror::Error;

/// Errors that can occur when decoding or encoding key material.
///
/// Every failure is a decode-time data-validation value. The union
/// decoders try their shapes in a fixed order and, when every alternative
/// is exhausted, surface an aggregate variant carrying each attempted
/// branch's failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Integer codec error
    #[error("integer: {0}")]
    Integer(#[from] b64int::error::Error),

    /// JSON text could not be parsed
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected a JSON object
    #[error("expected a JSON object")]
    ExpectedObject,

    /// Expected a JSON string for the named member
    #[error("expected a JSON string for {0}")]
    ExpectedString(&'static str),

    /// Expected a JSON array for the named member
    #[error("expected a JSON array for {0}")]
    ExpectedArray(&'static str),

    /// A required member is missing from the object
    #[error("missing required member: {0}")]
    MissingField(&'static str),

    /// The kty member is not a recognized key-type literal
    #[error("unrecognized key type: {0}")]
    UnrecognizedKeyType(String),

    /// The crv member names a curve outside the registry
    #[error("undefined curve: {0}")]
    UndefinedCurve(String),

    /// Neither the private nor the public shape matched
    #[error("no matching key-parameter shape (private: {private}; public: {public})")]
    NoMatchingKeyParameters { private: Box<Error>, public: Box<Error> },

    /// No key family matched
    #[error("unrecognized or malformed key material (EC: {ec}; RSA: {rsa}; Oct: {oct})")]
    UnrecognizedKeyMaterial {
        ec: Box<Error>,
        rsa: Box<Error>,
        oct: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
