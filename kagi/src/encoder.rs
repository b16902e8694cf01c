//! Encoder trait for type-safe conversions.
//!
//! The mirror image of [`crate::decoder`]: `Encoder<T, E>` converts a value
//! back toward the wire representation, and `EncodableTo<T>` marks the
//! valid target types.

/// Encoder trait for converting type `T` into type `E`.
///
/// Implemented by the source type `T` (usually `Self`). The target type
/// must implement `EncodableTo<T>`.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that type `E` is a valid encoding target for `T`.
pub trait EncodableTo<T> {}
