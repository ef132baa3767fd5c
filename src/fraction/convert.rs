use super::{improper_numerator, Form::*};
use crate::{Fraction, Problem};
use num::rational::Ratio;
use num::Float;

// Every integral f64 in this range converts to i64 exactly
const LOWEST: f64 = i64::MIN as f64;
const BEYOND: f64 = -(i64::MIN as f64);

fn finite(n: f64) -> Result<f64, Problem> {
    if n.is_nan() {
        tracing::debug!("cannot convert NaN to a fraction");
        Err(Problem::NotANumber)
    } else if n.is_infinite() {
        tracing::debug!(value = n, "cannot convert an infinite value to a fraction");
        Err(Problem::Infinity)
    } else {
        Ok(n)
    }
}

// Decimal places needed to write a finite float exactly, since every binary
// place past the point costs one decimal place
fn decimal_places(n: f64) -> i32 {
    let (mantissa, exponent, _) = Float::integer_decode(n);
    if mantissa == 0 {
        return 0;
    }
    -i32::from(exponent) - mantissa.trailing_zeros() as i32
}

/// Converts through a fixed decimal expansion
///
/// An integral value becomes that whole number. Anything else is rounded
/// to [`Fraction::FLOAT_DIGITS`] decimal places, so this is lossy:
/// `1e-9` becomes zero and `1/3` comes back as `33333333/100000000`.
/// The result is simplified.
///
/// # Examples
///
/// ```
/// use fraction::Fraction;
/// let f = Fraction::try_from(-6.375).unwrap();
/// assert_eq!(f.to_string(), "-6 3/8");
/// let f = Fraction::try_from(12345.1234).unwrap();
/// assert_eq!(f.to_string(), "12345 617/5000");
/// ```
impl TryFrom<f64> for Fraction {
    type Error = Problem;

    fn try_from(n: f64) -> Result<Fraction, Self::Error> {
        let n = finite(n)?;
        if n.fract() == 0.0 {
            if !(LOWEST..BEYOND).contains(&n) {
                return Err(Problem::OutOfRange);
            }
            return Ok(Fraction::new(n as i64));
        }

        let fixed = format!("{:.*}", Fraction::FLOAT_DIGITS, n);
        let fixed = fixed.trim_end_matches('0');
        let (int, decimals) = fixed.split_once('.').unwrap_or((fixed, ""));
        if decimal_places(n) > Fraction::FLOAT_DIGITS as i32 {
            tracing::trace!(value = n, fixed, "float rounded to fixed decimal places");
        }

        let numerator: i128 = format!("{int}{decimals}")
            .parse()
            .map_err(|_| Problem::OutOfRange)?;
        let denominator = 10_i128.pow(decimals.len() as u32);
        Fraction::from_ratio(Ratio::new(numerator, denominator))
    }
}

/// Widens to [`f64`] first, so the decimal expansion is that of the
/// [`f32`] value, e.g. `1.33_f32` is `1 33000004/100000000` before
/// simplification
impl TryFrom<f32> for Fraction {
    type Error = Problem;

    fn try_from(n: f32) -> Result<Fraction, Self::Error> {
        Fraction::try_from(f64::from(n))
    }
}

impl Fraction {
    /// The nearest [`f64`] to numerator divided by denominator
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::Fraction;
    /// assert_eq!(Fraction::fraction(1, 8).unwrap().to_f64(), 0.125);
    /// assert_eq!(Fraction::mixed(-1, 1, 4).unwrap().to_f64(), -1.25);
    /// ```
    pub fn to_f64(&self) -> f64 {
        match self.0 {
            Whole(whole) => whole as f64,
            Simple {
                numerator,
                denominator,
            } => numerator as f64 / denominator as f64,
            Mixed {
                whole,
                numerator,
                denominator,
            } => improper_numerator(whole, numerator, denominator) as f64 / denominator as f64,
        }
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> f64 {
        f.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_float(n: f64) -> String {
        Fraction::try_from(n).unwrap().to_string()
    }

    #[test]
    fn integral() {
        for (n, s) in [
            (0.0, "0"),
            (-0.0, "0"),
            (1.0, "1"),
            (10.0, "10"),
            (-10.000, "-10"),
            (-1.0, "-1"),
            (9007199254740993.0, "9007199254740992"),
        ] {
            assert_eq!(from_float(n), s);
        }
        assert!(Fraction::try_from(0.0).unwrap().is_whole_number());
    }

    #[test]
    fn decimals() {
        for (n, s) in [
            (0.5, "1/2"),
            (-0.5, "-1/2"),
            (0.000001, "1/1000000"),
            (-0.000001, "-1/1000000"),
            (12345.1234, "12345 617/5000"),
            (-12345.1234, "-12345 617/5000"),
            (9999.9999, "9999 9999/10000"),
            (-9999.9999, "-9999 9999/10000"),
            (1.25, "1 1/4"),
            (-1.25, "-1 1/4"),
            (1.33, "1 33/100"),
            (-1.33, "-1 33/100"),
            (6.375, "6 3/8"),
            (-6.375, "-6 3/8"),
            (1.3245, "1 649/2000"),
            (-1.3245, "-1 649/2000"),
        ] {
            assert_eq!(from_float(n), s, "{n}");
        }
    }

    #[test]
    fn precision_bound() {
        assert_eq!(from_float(1e-9), "0");
        assert_eq!(from_float(-1e-9), "0");
        assert_eq!(from_float(2.999999999), "3");
        assert_eq!(from_float(1.0 / 3.0), "33333333/100000000");
        assert_eq!(from_float(0.123456789), "12345679/100000000");
    }

    #[test]
    fn exact_decimal_places() {
        assert_eq!(decimal_places(0.5), 1);
        assert_eq!(decimal_places(-6.375), 3);
        assert_eq!(decimal_places(0.00390625), 8);
        assert_eq!(decimal_places(0.0), 0);
        assert!(decimal_places(0.001953125) > Fraction::FLOAT_DIGITS as i32);
        assert!(decimal_places(0.1) > Fraction::FLOAT_DIGITS as i32);
        assert!(decimal_places(1.0 / 3.0) > Fraction::FLOAT_DIGITS as i32);
    }

    #[test]
    fn large_non_integer() {
        let f = Fraction::try_from(4503599627370495.5).unwrap();
        assert_eq!(f.to_string(), "4503599627370495 1/2");
    }

    #[test]
    fn not_numeric() {
        assert_eq!(Fraction::try_from(f64::NAN), Err(Problem::NotANumber));
        assert_eq!(Fraction::try_from(f64::INFINITY), Err(Problem::Infinity));
        assert_eq!(Fraction::try_from(f32::NEG_INFINITY), Err(Problem::Infinity));
        assert_eq!(Fraction::try_from(1e300), Err(Problem::OutOfRange));
        assert_eq!(Fraction::try_from(-9223372036854775808.0), Ok(Fraction::new(i64::MIN)));
        assert_eq!(Fraction::try_from(9223372036854775808.0), Err(Problem::OutOfRange));
    }

    #[test]
    fn single_precision() {
        let half = Fraction::try_from(0.5_f32).unwrap();
        assert_eq!(half, Fraction::fraction(1, 2).unwrap());
        let tenth = Fraction::try_from(0.1_f32).unwrap();
        assert_eq!(tenth, Fraction::fraction(1, 10).unwrap());
    }

    #[test]
    fn to_float() {
        for (f, n) in [
            (Fraction::fraction(1, 1).unwrap(), 1.0),
            (Fraction::fraction(1, 4).unwrap(), 0.25),
            (Fraction::fraction(1, 8).unwrap(), 0.125),
            (Fraction::fraction(-1, -2).unwrap(), 0.5),
            (Fraction::fraction(1, -2).unwrap(), -0.5),
            (Fraction::mixed(1, 2, -4).unwrap(), -1.5),
            (Fraction::new(-3), -3.0),
            (Fraction::new(0), 0.0),
        ] {
            assert!((f.to_f64() - n).abs() < f64::EPSILON, "{f}");
        }
        let huge = Fraction::mixed(i64::MAX, 1, 2).unwrap();
        assert_eq!(huge.to_f64(), i64::MAX as f64);
        assert_eq!(f64::from(Fraction::fraction(3, 4).unwrap()), 0.75);
    }
}
