use thiserror::Error;

// We need to refer to this type in the documentation
#[allow(unused_imports)]
use crate::Fraction;

/// Problems when constructing, parsing, converting or doing arithmetic
/// with a [`Fraction`]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Problem {
    /// Tried to make a fraction with a zero denominator, also arises when
    /// dividing by a fraction whose value is zero
    #[error("the denominator of a fraction cannot be zero")]
    ZeroDenominator,
    /// The fractional part of a mixed number was not proper
    #[error("a fraction cannot be both mixed and improper")]
    MixedAndImproper,
    /// The text did not match the fraction grammar
    #[error("cannot parse {0:?} as a fraction")]
    BadFraction(String),
    /// Tried to convert a floating point NaN, which has no equivalent
    #[error("cannot make a fraction from NaN")]
    NotANumber,
    /// Tried to convert a floating point Infinity which has no equivalent
    #[error("cannot make a fraction from an infinite value")]
    Infinity,
    /// The integer was outside the range of [`i64`]
    #[error("integer is outside the range of i64")]
    OutOfRange,
    /// The fraction was not an integer
    #[error("the fraction is not an integer")]
    NotAnInteger,
    /// The exact result has a component which does not fit in an [`i64`]
    #[error("the result does not fit in 64-bit components")]
    Overflow,
}
