use crate::Problem;
use num::rational::Ratio;
use num::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Integer, Zero};

pub(crate) mod convert;

#[cfg(feature = "serde")]
mod serde;

/// A fraction: a whole number, a simple fraction `n/d` or a mixed number `w n/d`
///
/// Construction never reduces and never moves signs around, so a value
/// prints exactly the way it was written. [`Fraction::simplify`] produces
/// the canonical form and every arithmetic operation returns a simplified
/// result.
///
/// Components are [`i64`]. Intermediate results are computed exactly in
/// 128 bits and an operation whose answer cannot be stored in 64-bit
/// components fails with [`Problem::Overflow`] rather than wrapping.
///
/// # Examples
///
/// Parsing and printing preserve the written form
/// ```
/// use fraction::Fraction;
/// let f: Fraction = "-1/-2".parse().unwrap();
/// assert_eq!(f.to_string(), "-1/-2");
/// ```
///
/// Simplifying picks the simplest representation
/// ```
/// use fraction::Fraction;
/// let f = Fraction::fraction(42, 8).unwrap();
/// assert_eq!(f.simplify().unwrap().to_string(), "5 1/4");
/// ```
///
/// Simple arithmetic
/// ```
/// use fraction::Fraction;
/// let half: Fraction = "1/2".parse().unwrap();
/// let third: Fraction = "1/3".parse().unwrap();
/// let sum = (half + third).unwrap();
/// assert_eq!(sum.to_string(), "5/6");
/// let product = half.multiply(Fraction::new(3)).unwrap();
/// assert_eq!(product.to_string(), "1 1/2");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fraction(Form);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Form {
    Whole(i64),
    Simple {
        numerator: i64,
        denominator: i64,
    },
    Mixed {
        whole: i64,
        numerator: i64,
        denominator: i64,
    },
}

use Form::*;

/// Greatest common divisor of the magnitudes of `a` and `b`
///
/// `gcd(a, 0)` is `|a|`, and the magnitude of [`i64::MIN`] is representable
/// because the answer is unsigned.
///
/// # Example
///
/// ```
/// assert_eq!(fraction::gcd(-12, 18), 6);
/// assert_eq!(fraction::gcd(7, 0), 7);
/// assert_eq!(fraction::gcd(i64::MIN, i64::MIN), 1 << 63);
/// ```
pub fn gcd(a: i64, b: i64) -> u64 {
    a.unsigned_abs().gcd(&b.unsigned_abs())
}

fn narrow(n: i128) -> Result<i64, Problem> {
    i64::try_from(n).map_err(|_| {
        tracing::debug!(value = %n, "fraction component does not fit in i64");
        Problem::Overflow
    })
}

// Numerator over the stored denominator with the same value as the mixed
// number. A mixed number is negative when an odd number of its non-zero
// components are, so the denominator's own sign is left where it is.
fn improper_numerator(whole: i64, numerator: i64, denominator: i64) -> i128 {
    let magnitude = i128::from(numerator.unsigned_abs())
        + i128::from(whole.unsigned_abs()) * i128::from(denominator.unsigned_abs());
    if whole.is_negative() != numerator.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

impl Fraction {
    /// Decimal places kept when converting from floating point
    pub const FLOAT_DIGITS: usize = 8;

    /// Zero, as a whole number
    pub fn zero() -> Self {
        Self(Whole(0))
    }

    /// One, as a whole number
    pub fn one() -> Self {
        Self(Whole(1))
    }

    /// The whole number `n`
    pub fn new(n: i64) -> Self {
        Self(Whole(n))
    }

    /// The fraction `numerator/denominator`, exactly as given
    ///
    /// Neither sign is moved and nothing is reduced, so `0/-2` stays `0/-2`.
    /// Only a zero denominator is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::{Fraction, Problem};
    /// let f = Fraction::fraction(1, -2).unwrap();
    /// assert_eq!(f.to_string(), "1/-2");
    /// assert_eq!(Fraction::fraction(1, 0), Err(Problem::ZeroDenominator));
    /// ```
    pub fn fraction(numerator: i64, denominator: i64) -> Result<Self, Problem> {
        if denominator == 0 {
            return Err(Problem::ZeroDenominator);
        }
        Ok(Self(Simple {
            numerator,
            denominator,
        }))
    }

    /// The mixed number `whole numerator/denominator`
    ///
    /// The fractional part must be proper, `|numerator| < |denominator|`.
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::{Fraction, Problem};
    /// let f = Fraction::mixed(3, 4, 5).unwrap();
    /// assert_eq!(f.to_string(), "3 4/5");
    /// assert_eq!(Fraction::mixed(1, 1, 1), Err(Problem::MixedAndImproper));
    /// ```
    pub fn mixed(whole: i64, numerator: i64, denominator: i64) -> Result<Self, Problem> {
        if denominator == 0 {
            return Err(Problem::ZeroDenominator);
        }
        if numerator.unsigned_abs() >= denominator.unsigned_abs() {
            return Err(Problem::MixedAndImproper);
        }
        Ok(Self(Mixed {
            whole,
            numerator,
            denominator,
        }))
    }

    /// The whole part, present for whole and mixed numbers
    pub fn whole(&self) -> Option<i64> {
        match self.0 {
            Whole(whole) | Mixed { whole, .. } => Some(whole),
            Simple { .. } => None,
        }
    }

    /// The stored numerator, absent for whole numbers
    pub fn numerator(&self) -> Option<i64> {
        match self.0 {
            Whole(_) => None,
            Simple { numerator, .. } | Mixed { numerator, .. } => Some(numerator),
        }
    }

    /// The stored denominator, absent for whole numbers
    pub fn denominator(&self) -> Option<i64> {
        match self.0 {
            Whole(_) => None,
            Simple { denominator, .. } | Mixed { denominator, .. } => Some(denominator),
        }
    }

    /// Is this stored as a whole number, with no fractional part?
    ///
    /// Exactly one of [`is_whole_number`](Self::is_whole_number),
    /// [`is_proper`](Self::is_proper), [`is_improper`](Self::is_improper)
    /// and [`is_mixed`](Self::is_mixed) holds for any fraction.
    pub fn is_whole_number(&self) -> bool {
        matches!(self.0, Whole(_))
    }

    /// Is this a simple fraction with `|numerator| < |denominator|`?
    pub fn is_proper(&self) -> bool {
        match self.0 {
            Simple {
                numerator,
                denominator,
            } => numerator.unsigned_abs() < denominator.unsigned_abs(),
            _ => false,
        }
    }

    /// Is this a simple fraction with `|numerator| >= |denominator|`?
    pub fn is_improper(&self) -> bool {
        match self.0 {
            Simple {
                numerator,
                denominator,
            } => numerator.unsigned_abs() >= denominator.unsigned_abs(),
            _ => false,
        }
    }

    /// Is this a whole part together with a fractional part?
    pub fn is_mixed(&self) -> bool {
        matches!(self.0, Mixed { .. })
    }

    /// Does the value of this fraction have no fractional part?
    ///
    /// Unlike [`is_whole_number`](Self::is_whole_number) this looks at the
    /// value, not the representation.
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::Fraction;
    /// let f = Fraction::fraction(16, 4).unwrap();
    /// assert!(f.is_integer());
    /// assert!(!f.is_whole_number());
    /// ```
    pub fn is_integer(&self) -> bool {
        self.value().is_integer()
    }

    /// Is the value zero, however it is written?
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Do these two fractions have the same value?
    ///
    /// This is the same as comparing the simplified forms, so `1/2` and
    /// `2/4` are the same value although they are not equal (`==`) as
    /// written.
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::Fraction;
    /// let half = Fraction::fraction(1, 2).unwrap();
    /// let two_quarters = Fraction::fraction(2, 4).unwrap();
    /// assert!(half.is_same_value_as(&two_quarters));
    /// assert_ne!(half, two_quarters);
    /// ```
    pub fn is_same_value_as(&self, other: &Self) -> bool {
        self.value() == other.value()
    }

    /// The exact value, reduced with a positive denominator
    pub(crate) fn value(&self) -> Ratio<i128> {
        match self.0 {
            Whole(whole) => Ratio::from_integer(whole.into()),
            Simple {
                numerator,
                denominator,
            } => Ratio::new(numerator.into(), denominator.into()),
            Mixed {
                whole,
                numerator,
                denominator,
            } => Ratio::new(
                improper_numerator(whole, numerator, denominator),
                denominator.into(),
            ),
        }
    }

    /// The canonical fraction with this exact value
    ///
    /// Zero and integers become whole numbers, values smaller than one in
    /// magnitude become proper fractions and everything else a mixed number
    /// whose whole part carries the sign.
    pub(crate) fn from_ratio(value: Ratio<i128>) -> Result<Self, Problem> {
        let (numerator, denominator) = (*value.numer(), *value.denom());
        if denominator == 1 {
            return Ok(Self::new(narrow(numerator)?));
        }
        let denominator = narrow(denominator)?;
        let (whole, rest) = numerator.div_rem(&i128::from(denominator));
        if whole == 0 {
            Ok(Self(Simple {
                numerator: narrow(numerator)?,
                denominator,
            }))
        } else {
            Ok(Self(Mixed {
                whole: narrow(whole)?,
                numerator: narrow(rest.abs())?,
                denominator,
            }))
        }
    }

    /// Divide the numerator and denominator by their greatest common divisor
    ///
    /// Signs stay where they are. The fractional part of a mixed number is
    /// reduced and its whole part kept; a whole number is returned as is.
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::Fraction;
    /// let f = Fraction::fraction(-2, -4).unwrap();
    /// assert_eq!(f.reduce(), Fraction::fraction(-1, -2).unwrap());
    /// ```
    pub fn reduce(&self) -> Self {
        fn lowest(numerator: i64, denominator: i64) -> (i64, i64) {
            let divisor = i128::from(gcd(numerator, denominator));
            // quotients never grow in magnitude, so they fit again
            (
                (i128::from(numerator) / divisor) as i64,
                (i128::from(denominator) / divisor) as i64,
            )
        }

        match self.0 {
            Whole(_) => *self,
            Simple {
                numerator,
                denominator,
            } => {
                let (numerator, denominator) = lowest(numerator, denominator);
                Self(Simple {
                    numerator,
                    denominator,
                })
            }
            Mixed {
                whole,
                numerator,
                denominator,
            } => {
                let (numerator, denominator) = lowest(numerator, denominator);
                Self(Mixed {
                    whole,
                    numerator,
                    denominator,
                })
            }
        }
    }

    /// The simplest representation of this value
    ///
    /// Whole numbers are already simplest. Otherwise the value is reduced,
    /// any negative sign ends up on the numerator (or the whole part), a
    /// zero becomes the whole number `0`, an integer becomes a whole number
    /// and an improper value becomes a mixed number.
    ///
    /// Fails with [`Problem::Overflow`] when a canonical component would not
    /// fit, e.g. `i64::MIN/-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fraction::Fraction;
    /// let f = Fraction::fraction(1, -2).unwrap();
    /// assert_eq!(f.simplify().unwrap().to_string(), "-1/2");
    /// let f = Fraction::fraction(-21, 3).unwrap();
    /// assert_eq!(f.simplify().unwrap(), Fraction::new(-7));
    /// ```
    pub fn simplify(&self) -> Result<Self, Problem> {
        match self.0 {
            Whole(_) => Ok(*self),
            _ => Self::from_ratio(self.value()),
        }
    }

    /// Rewrite as a single `numerator/denominator`
    ///
    /// A whole number `w` becomes `w/1`, a mixed number keeps its
    /// denominator and simple fractions are returned as they are.
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::Fraction;
    /// let f = Fraction::mixed(-1, 2, 3).unwrap();
    /// assert_eq!(f.to_improper().unwrap().to_string(), "-5/3");
    /// ```
    pub fn to_improper(&self) -> Result<Self, Problem> {
        match self.0 {
            Whole(whole) => Ok(Self(Simple {
                numerator: whole,
                denominator: 1,
            })),
            Simple { .. } => Ok(*self),
            Mixed {
                whole,
                numerator,
                denominator,
            } => Ok(Self(Simple {
                numerator: narrow(improper_numerator(whole, numerator, denominator))?,
                denominator,
            })),
        }
    }

    /// Rewrite an improper fraction as a mixed number
    ///
    /// The denominator is kept and the whole part takes the sign of the
    /// value. An exact multiple becomes a whole number. Anything which is
    /// not an improper fraction is returned as it is.
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::Fraction;
    /// let f = Fraction::fraction(-5, 3).unwrap();
    /// assert_eq!(f.to_mixed().unwrap().to_string(), "-1 2/3");
    /// ```
    pub fn to_mixed(&self) -> Result<Self, Problem> {
        let Simple {
            numerator,
            denominator,
        } = self.0
        else {
            return Ok(*self);
        };
        let (whole, rest) = numerator
            .unsigned_abs()
            .div_rem(&denominator.unsigned_abs());
        if whole == 0 {
            return Ok(*self);
        }
        let whole = if numerator.is_negative() != denominator.is_negative() {
            -i128::from(whole)
        } else {
            i128::from(whole)
        };
        let whole = narrow(whole)?;
        if rest == 0 {
            return Ok(Self::new(whole));
        }
        // rest < |denominator| so this fits
        let rest = rest as i64;
        Ok(Self(Mixed {
            whole,
            numerator: if denominator < 0 { -rest } else { rest },
            denominator,
        }))
    }

    fn arithmetic(
        self,
        other: Self,
        op: fn(&Ratio<i128>, &Ratio<i128>) -> Option<Ratio<i128>>,
        name: &'static str,
    ) -> Result<Self, Problem> {
        match op(&self.value(), &other.value()) {
            Some(answer) => Self::from_ratio(answer),
            None => {
                tracing::debug!(left = %self, right = %other, op = name, "fraction arithmetic overflowed");
                Err(Problem::Overflow)
            }
        }
    }

    /// The simplified sum of two fractions
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Self) -> Result<Self, Problem> {
        self.arithmetic(other, CheckedAdd::checked_add, "add")
    }

    /// The simplified difference of two fractions
    pub fn subtract(self, other: Self) -> Result<Self, Problem> {
        self.arithmetic(other, CheckedSub::checked_sub, "subtract")
    }

    /// The simplified product of two fractions
    pub fn multiply(self, other: Self) -> Result<Self, Problem> {
        self.arithmetic(other, CheckedMul::checked_mul, "multiply")
    }

    /// The simplified quotient of two fractions
    ///
    /// Dividing by any zero value fails with [`Problem::ZeroDenominator`].
    ///
    /// # Example
    ///
    /// ```
    /// use fraction::{Fraction, Problem};
    /// let half = Fraction::fraction(1, 2).unwrap();
    /// let quarter = Fraction::fraction(-1, -4).unwrap();
    /// assert_eq!(half.divide(quarter).unwrap(), Fraction::new(2));
    /// let nothing = Fraction::fraction(0, -2).unwrap();
    /// assert_eq!(half.divide(nothing), Err(Problem::ZeroDenominator));
    /// ```
    pub fn divide(self, other: Self) -> Result<Self, Problem> {
        if other.is_zero() {
            return Err(Problem::ZeroDenominator);
        }
        self.arithmetic(other, CheckedDiv::checked_div, "divide")
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Fraction {
        Fraction::new(n)
    }
}

impl From<i32> for Fraction {
    fn from(n: i32) -> Fraction {
        Fraction::new(n.into())
    }
}

impl TryFrom<Fraction> for i64 {
    type Error = Problem;

    fn try_from(f: Fraction) -> Result<i64, Problem> {
        let value = f.value();
        if !value.is_integer() {
            return Err(Problem::NotAnInteger);
        }
        i64::try_from(value.to_integer()).map_err(|_| Problem::OutOfRange)
    }
}

use core::fmt;

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Whole(whole) => write!(f, "{whole}"),
            Simple {
                numerator,
                denominator,
            } => write!(f, "{numerator}/{denominator}"),
            Mixed {
                whole,
                numerator,
                denominator,
            } => write!(f, "{whole} {numerator}/{denominator}"),
        }
    }
}

fn parse_integer(text: &str, input: &str) -> Result<i64, Problem> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        tracing::trace!(input, "not a fraction");
        return Err(Problem::BadFraction(input.to_owned()));
    }
    text.parse().map_err(|_| Problem::OutOfRange)
}

/// Parses `40`, `1/3`, `-1/-2` or the mixed number `3 4/5`
///
/// Each integer may have a leading `-`. Surrounding whitespace is ignored
/// but inside, the whole part and numerator of a mixed number are
/// separated by exactly one space.
impl std::str::FromStr for Fraction {
    type Err = Problem;

    fn from_str(input: &str) -> Result<Self, Problem> {
        let s = input.trim();
        let Some((head, denominator)) = s.split_once('/') else {
            return Ok(Self::new(parse_integer(s, input)?));
        };
        let denominator = parse_integer(denominator, input)?;
        match head.split_once(' ') {
            Some((whole, numerator)) => Self::mixed(
                parse_integer(whole, input)?,
                parse_integer(numerator, input)?,
                denominator,
            ),
            None => Self::fraction(parse_integer(head, input)?, denominator),
        }
    }
}

use core::ops::*;

impl Add for Fraction {
    type Output = Result<Self, Problem>;

    fn add(self, other: Self) -> Result<Self, Problem> {
        Fraction::add(self, other)
    }
}

impl Sub for Fraction {
    type Output = Result<Self, Problem>;

    fn sub(self, other: Self) -> Result<Self, Problem> {
        self.subtract(other)
    }
}

impl Mul for Fraction {
    type Output = Result<Self, Problem>;

    fn mul(self, other: Self) -> Result<Self, Problem> {
        self.multiply(other)
    }
}

impl Div for Fraction {
    type Output = Result<Self, Problem>;

    fn div(self, other: Self) -> Result<Self, Problem> {
        self.divide(other)
    }
}
