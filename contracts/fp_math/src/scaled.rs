use crate::MathError;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// `10^exp` as an unbounded integer.
pub fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Integer magnitude at a fixed number of implied decimal places.
///
/// Two amounts only combine when their scales match; there is no implicit
/// rescaling because the scale belongs to the token, not to the value.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct ScaledAmount {
    #[serde(with = "crate::plain::uint")]
    raw: BigUint,
    scale: u32,
}

impl ScaledAmount {
    pub fn new(raw: BigUint, scale: u32) -> Self {
        Self { raw, scale }
    }

    pub fn zero(scale: u32) -> Self {
        Self::new(BigUint::zero(), scale)
    }

    /// Truncating conversion of a human value into `scale` decimal places.
    pub fn from_human(human: &BigDecimal, scale: u32) -> Result<Self, MathError> {
        to_scaled(human, scale)
    }

    pub fn raw(&self) -> &BigUint {
        &self.raw
    }

    pub fn into_raw(self) -> BigUint {
        self.raw
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    pub fn to_human(&self) -> BigDecimal {
        from_scaled(&self.raw, self.scale)
    }

    pub fn checked_cmp(&self, other: &Self) -> Result<Ordering, MathError> {
        self.ensure_same_scale(other)?;
        Ok(self.raw.cmp(&other.raw))
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self, MathError> {
        self.ensure_same_scale(other)?;
        Ok(Self::new(&self.raw + &other.raw, self.scale))
    }

    /// Fails with [`MathError::Underflow`] instead of wrapping or clamping.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, MathError> {
        self.ensure_same_scale(other)?;
        if other.raw > self.raw {
            return Err(MathError::Underflow);
        }
        Ok(Self::new(&self.raw - &other.raw, self.scale))
    }

    fn ensure_same_scale(&self, other: &Self) -> Result<(), MathError> {
        if self.scale != other.scale {
            return Err(MathError::ScaleMismatch {
                left: self.scale,
                right: other.scale,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ScaledAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Most decimal digits a raw ledger integer can carry (`2^256 - 1` has 78).
pub const MAX_RAW_DIGITS: u64 = 78;

/// Multiply by `10^scale` and drop whatever falls below the last place.
///
/// Values too large for a ledger integer fail with `InvalidAmount`; values
/// entirely below the last place truncate to zero without being expanded.
pub fn to_scaled(human: &BigDecimal, scale: u32) -> Result<ScaledAmount, MathError> {
    if human.sign() == Sign::Minus {
        return Err(MathError::InvalidAmount(describe(human)));
    }

    let (digits, exponent) = human.as_bigint_and_exponent();
    let magnitude = digits.magnitude();
    if magnitude.is_zero() {
        return Ok(ScaledAmount::zero(scale));
    }

    let out_of_range =
        || MathError::InvalidAmount(format!("{} does not fit scale {scale}", describe(human)));
    let shift = i64::from(scale).checked_sub(exponent).ok_or_else(out_of_range)?;
    let digit_count = decimal_digits(magnitude);

    let raw = if shift >= 0 {
        if digit_count.saturating_add(shift.unsigned_abs()) > MAX_RAW_DIGITS {
            return Err(out_of_range());
        }
        magnitude * pow10(shift.unsigned_abs() as u32)
    } else {
        let width = shift.unsigned_abs();
        if width >= digit_count {
            return Ok(ScaledAmount::zero(scale));
        }
        magnitude / pow10(width as u32)
    };

    Ok(ScaledAmount::new(raw, scale))
}

fn decimal_digits(value: &BigUint) -> u64 {
    value.to_str_radix(10).len() as u64
}

// Plain digits when that stays short, `<digits>e<exponent>` otherwise.
fn describe(value: &BigDecimal) -> String {
    let normalized = value.normalized();
    let (digits, exponent) = normalized.as_bigint_and_exponent();
    if exponent.unsigned_abs() <= MAX_RAW_DIGITS {
        to_plain_string(&normalized)
    } else {
        format!("{digits}e{}", -i128::from(exponent))
    }
}

/// Exact division by `10^scale`, normalized so no trailing zeros survive.
pub fn from_scaled(raw: &BigUint, scale: u32) -> BigDecimal {
    BigDecimal::new(BigInt::from(raw.clone()), i64::from(scale)).normalized()
}

/// Parse caller input. Negative or non-numeric text is an invalid amount.
pub fn parse_amount(text: &str) -> Result<BigDecimal, MathError> {
    let value = BigDecimal::from_str(text.trim())
        .map_err(|_| MathError::InvalidAmount(text.to_string()))?;
    if value.sign() == Sign::Minus {
        return Err(MathError::InvalidAmount(text.to_string()));
    }
    Ok(value)
}

/// Render plain decimal digits: never exponent notation, never trailing zeros.
pub fn to_plain_string(value: &BigDecimal) -> String {
    value.normalized().to_plain_string()
}
