//! Exact scalars, the numerical tolerance, and fixed-place rounding.
//!
//! Every coordinate and constant term is a [`Scalar`], an arbitrary precision rational.
//! Decimal literals are read without loss, so `"5.262"` is exactly `5262/1000`.

use std::cmp::Ordering;
use std::fmt;

use num::{BigInt, BigRational, Integer, One, Signed, ToPrimitive, Zero};

use crate::{LinsysError, Result};

pub type Scalar = BigRational;

/// Magnitudes below `10^-NEAR_ZERO_EXPONENT` are treated as zero.
pub const NEAR_ZERO_EXPONENT: usize = 10;

/// Decimal places used when rendering equations.
pub const RENDER_DECIMAL_PLACES: usize = 3;

/// Largest power of ten a decimal literal may scale by, in either direction.
pub const MAX_LITERAL_EXPONENT: u64 = 4096;

fn power_of_ten(exponent: usize) -> BigInt {
    num::pow(BigInt::from(10u32), exponent)
}

/// The near-zero threshold, `1e-10`.
pub fn near_zero_tolerance() -> Scalar {
    Scalar::new(BigInt::one(), power_of_ten(NEAR_ZERO_EXPONENT))
}

pub fn is_near_zero(value: &Scalar) -> bool {
    value.abs() < near_zero_tolerance()
}

pub fn integer(value: i64) -> Scalar {
    Scalar::from_integer(BigInt::from(value))
}

/// Exact conversion of a finite float, e.g. a norm that has been through `sqrt`.
pub fn scalar_from_f64(value: f64) -> Result<Scalar> {
    Scalar::from_float(value).ok_or_else(|| LinsysError::InvalidScalar(value.to_string()))
}

pub fn scalar_to_f64(value: &Scalar) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Parses an integer, a decimal (optionally with an exponent) or a `p/q` fraction.
///
/// ```
/// use linsys::scalar::{parse_scalar, integer};
/// assert_eq!(parse_scalar("-2.5e1").unwrap(), integer(-25));
/// ```
pub fn parse_scalar(literal: &str) -> Result<Scalar> {
    let invalid = || LinsysError::InvalidScalar(literal.to_string());
    let trimmed = literal.trim();

    if trimmed.contains('/') {
        let value: Scalar = trimmed.parse().map_err(|_| invalid())?;
        return Ok(value);
    }

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(split) => {
            let exponent: i64 = unsigned[split + 1..].parse().map_err(|_| invalid())?;
            (&unsigned[..split], exponent)
        }
        None => (unsigned, 0),
    };

    let (int_digits, frac_digits) = match mantissa.split_once('.') {
        Some((int_digits, frac_digits)) => (int_digits, frac_digits),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_digits.len() + frac_digits.len() == 0 || !all_digits(int_digits) || !all_digits(frac_digits)
    {
        return Err(invalid());
    }

    let digits = format!("{int_digits}{frac_digits}");
    let mut numerator: BigInt = digits.parse().map_err(|_| invalid())?;
    if negative {
        numerator = -numerator;
    }

    // value = digits * 10^(exponent - #frac_digits)
    let shift = i64::try_from(frac_digits.len())
        .ok()
        .and_then(|frac_len| exponent.checked_sub(frac_len))
        .filter(|shift| shift.unsigned_abs() <= MAX_LITERAL_EXPONENT)
        .ok_or_else(invalid)?;
    let magnitude = power_of_ten(shift.unsigned_abs() as usize);
    let value = if shift >= 0 {
        Scalar::from_integer(numerator * magnitude)
    } else {
        Scalar::new(numerator, magnitude)
    };
    Ok(value)
}

/// A scalar rounded half-to-even to a fixed number of decimal places.
///
/// Displays as an integer when the rounded value is integral and with exactly
/// `places` fractional digits otherwise, so `0.5` at three places is `0.500`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rounded {
    scaled: BigInt,
    places: usize,
}

impl Rounded {
    pub fn new(value: &Scalar, places: usize) -> Self {
        let scaled = value * Scalar::from_integer(power_of_ten(places));
        let floor = scaled.floor();
        let remainder = &scaled - &floor;
        let floor = floor.to_integer();
        let half = Scalar::new(BigInt::one(), BigInt::from(2u32));
        let scaled = match remainder.cmp(&half) {
            Ordering::Less => floor,
            Ordering::Greater => floor + BigInt::one(),
            Ordering::Equal if floor.is_even() => floor,
            Ordering::Equal => floor + BigInt::one(),
        };
        Self { scaled, places }
    }

    pub fn is_zero(&self) -> bool {
        self.scaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.scaled.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.scaled.is_positive()
    }

    pub fn is_one(&self) -> bool {
        self.scaled == power_of_ten(self.places)
    }

    pub fn abs(&self) -> Self {
        Self {
            scaled: self.scaled.abs(),
            places: self.places,
        }
    }
}

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, fraction) = self.scaled.abs().div_rem(&power_of_ten(self.places));
        let sign = if self.is_negative() { "-" } else { "" };
        if fraction.is_zero() {
            write!(f, "{sign}{whole}")
        } else {
            write!(
                f,
                "{sign}{whole}.{:0>width$}",
                fraction.to_string(),
                width = self.places
            )
        }
    }
}
