mod fraction;
pub use crate::fraction::{gcd, Fraction};

mod problem;
pub use crate::problem::Problem;
