use crate::errors::{Error, Result};
use bigdecimal::BigDecimal;
use fp_math::{from_scaled, to_plain_string, to_scaled};
use num_bigint::{BigInt, BigUint, Sign};
use serde::Serialize;

// Tranche bounds: below 1000% and no finer than 36 decimal places.
const MAX_TRANCHE_DECIMALS: i64 = 36;
const MAX_TRANCHE_INTEGER_DIGITS: i128 = 3;

fn one_hundred() -> BigDecimal {
    BigDecimal::from(100u32)
}

// `pct` percent of `total`, scaled by 0.01 rather than divided by 100.
fn percent_of(total: &BigDecimal, pct: &BigDecimal) -> BigDecimal {
    total * pct * BigDecimal::new(BigInt::from(1u32), 2)
}

/// Exact sum of tranche percentages.
pub fn vesting_schedule_sum(percentages: &[BigDecimal]) -> BigDecimal {
    percentages
        .iter()
        .fold(BigDecimal::from(0u32), |acc, pct| acc + pct)
}

/// Rejects negative tranches and any schedule not summing to exactly 100%.
pub fn validate_schedule(percentages: &[BigDecimal]) -> Result<()> {
    // Bounded before anything is summed or rendered.
    for (index, pct) in percentages.iter().enumerate() {
        let (digits, exponent) = pct.normalized().as_bigint_and_exponent();
        let integer_digits =
            digits.magnitude().to_str_radix(10).len() as i128 - i128::from(exponent);
        if exponent > MAX_TRANCHE_DECIMALS || integer_digits > MAX_TRANCHE_INTEGER_DIGITS {
            return Err(Error::InvalidAmount(format!(
                "tranche {index} is 1000% or more, or finer than {MAX_TRANCHE_DECIMALS} decimal places"
            )));
        }
    }

    if let Some(negative) = percentages.iter().find(|pct| pct.sign() == Sign::Minus) {
        return Err(Error::InvalidAmount(format!(
            "negative tranche percentage {}",
            to_plain_string(negative)
        )));
    }

    let sum = vesting_schedule_sum(percentages);
    if sum != one_hundred() {
        return Err(Error::ScheduleMismatch {
            sum: to_plain_string(&sum),
        });
    }
    Ok(())
}

/// Encode percentages for submission, `percent_decimals` implied places each.
///
/// An empty schedule means "no vesting" and passes through. A tranche that
/// does not fit the encoding exactly is refused rather than rounded, since a
/// rounded schedule would no longer sum to 100%.
pub fn encode_schedule(percentages: &[BigDecimal], percent_decimals: u32) -> Result<Vec<BigUint>> {
    if percentages.is_empty() {
        return Ok(Vec::new());
    }
    validate_schedule(percentages)?;

    percentages
        .iter()
        .map(|pct| {
            let scaled = to_scaled(pct, percent_decimals)?;
            if &scaled.to_human() != pct {
                return Err(Error::InvalidAmount(format!(
                    "tranche {} exceeds {} decimal places",
                    to_plain_string(pct),
                    percent_decimals
                )));
            }
            Ok(scaled.into_raw())
        })
        .collect()
}

/// Ordered tranche percentages, validated to sum to 100%.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct VestingSchedule {
    #[serde(with = "fp_math::plain::decimal_vec")]
    tranches: Vec<BigDecimal>,
}

impl VestingSchedule {
    pub fn new(tranches: Vec<BigDecimal>) -> Result<Self> {
        validate_schedule(&tranches)?;
        Ok(Self { tranches })
    }

    /// Decode raw ledger values. A stored schedule is re-validated, never trusted.
    pub fn from_raw(raw: &[BigUint], percent_decimals: u32) -> Result<Self> {
        let tranches = raw
            .iter()
            .map(|value| from_scaled(value, percent_decimals))
            .collect();
        Self::new(tranches)
    }

    pub fn tranches(&self) -> &[BigDecimal] {
        &self.tranches
    }

    pub fn len(&self) -> usize {
        self.tranches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tranches.is_empty()
    }

    /// Sum of the percentages for tranches `from..=through`.
    pub fn percent_between(&self, from: usize, through: usize) -> Result<BigDecimal> {
        Ok(vesting_schedule_sum(self.slice(from, through)?))
    }

    /// Each tranche in `from..=through` applied to the original `total`, summed.
    pub fn amount_between(&self, total: &BigDecimal, from: usize, through: usize) -> Result<BigDecimal> {
        Ok(self
            .slice(from, through)?
            .iter()
            .fold(BigDecimal::from(0u32), |acc, pct| acc + percent_of(total, pct)))
    }

    pub fn encode(&self, percent_decimals: u32) -> Result<Vec<BigUint>> {
        encode_schedule(&self.tranches, percent_decimals)
    }

    fn slice(&self, from: usize, through: usize) -> Result<&[BigDecimal]> {
        if through >= self.tranches.len() {
            return Err(Error::integrity(format!(
                "tranche {} is beyond a schedule of {} tranches",
                through,
                self.tranches.len()
            )));
        }
        if from > through {
            return Ok(&self.tranches[..0]);
        }
        Ok(&self.tranches[from..=through])
    }
}
