//! Arbitrary-precision arithmetic: an unsigned decimal-radix big integer
//! ([`UBig10`]), a signed binary-radix big integer ([`SBig2`]), and an
//! arbitrary-precision decimal floating point built on top of the former
//! ([`BigDec`]).

mod bigdec;
mod error;
mod limits;
mod parse;
mod sbig2;
mod ubig10;

#[cfg(test)]
mod tests;

pub use bigdec::{BigDec, DivMod, MathCache, RoundingMode};
pub use error::{BigError, BigResult};
pub use sbig2::{SBig2, SDivRem};
pub use ubig10::{DivRem, UBig10};
