//! Errors that can arise during polynomial and FFT operations.

use core::fmt;

/// This is an error that could occur during a polynomial or FFT operation.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Error {
    /// The requested domain scale is outside `[1, F::TWO_ADICITY]`.
    InvalidDomain,
    /// A buffer length does not match what the operation requires: an FFT
    /// input that is not the domain size, a divisor longer than the
    /// dividend, or a subproduct tree too shallow for the polynomial.
    LengthMismatch,
    /// A subproduct-tree input whose length is not a power of two.
    NotPowerOfTwo,
    /// A division (polynomial or field) with a zero divisor.
    DivisionByZero,
    /// A zero-length coefficient buffer was supplied.
    EmptyInput,
    /// Erasure recovery ran out of shift values before the reconstructed
    /// evaluations matched the known ones.
    RecoveryExhausted,
}

impl ark_std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDomain => write!(f, "domain scale out of range for the field"),
            Error::LengthMismatch => write!(f, "input length does not match the expected size"),
            Error::NotPowerOfTwo => write!(f, "input length is not a power of two"),
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::EmptyInput => write!(f, "input is empty"),
            Error::RecoveryExhausted => write!(f, "max recovery attempts reached"),
        }
    }
}

/// A result type specialized to this crate's [`enum@Error`].
pub type Result<T> = core::result::Result<T, Error>;
