//! Shared error taxonomy.
//!
//! A small, typed set of error kinds surfaced by every fallible entry point
//! across [`crate::ubig10`], [`crate::sbig2`], and [`crate::bigdec`]. Errors
//! carry the name of the failing operation plus a short description of the
//! offending input so a caller can diagnose without re-deriving context.

use thiserror::Error;

/// The error type returned by fallible operations in this crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BigError {
    /// Any operation whose divisor is zero at the entry point.
    #[error("division by zero in {op}")]
    DivisionByZero { op: &'static str },

    /// A fixed-width conversion (e.g. to a native integer) cannot fit the value.
    #[error("{op}: value does not fit ({detail})")]
    Overflow { op: &'static str, detail: String },

    /// A string parse failed, or an integer was requested from a non-integer decimal.
    #[error("{op}: could not convert {input:?}: {reason}")]
    ConversionError {
        op: &'static str,
        input: String,
        reason: String,
    },

    /// `ln(x<=0)`, `sqrt(x<0)`, even root of a negative value, `log` with an
    /// invalid base, and similar mathematically-undefined requests.
    #[error("{op}: domain error for input {detail}")]
    DomainError { op: &'static str, detail: String },

    /// Requested precision `<= 0`, or a scale outside the representable range.
    #[error("{op}: precision error ({detail})")]
    PrecisionError { op: &'static str, detail: String },
}

/// Convenience alias used throughout the crate.
pub type BigResult<T> = Result<T, BigError>;

impl BigError {
    pub(crate) fn division_by_zero(op: &'static str) -> Self {
        BigError::DivisionByZero { op }
    }

    pub(crate) fn overflow(op: &'static str, detail: impl Into<String>) -> Self {
        BigError::Overflow {
            op,
            detail: detail.into(),
        }
    }

    pub(crate) fn conversion(op: &'static str, input: impl Into<String>, reason: impl Into<String>) -> Self {
        BigError::ConversionError {
            op,
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn domain(op: &'static str, detail: impl Into<String>) -> Self {
        BigError::DomainError {
            op,
            detail: detail.into(),
        }
    }

    pub(crate) fn precision(op: &'static str, detail: impl Into<String>) -> Self {
        BigError::PrecisionError {
            op,
            detail: detail.into(),
        }
    }
}
