//! Exact conversions between human decimal amounts and the fixed-point
//! integers stored by the sale ledger.
//!
//! Every value crossing this crate is either a [`BigUint`] magnitude at a known
//! scale or an arbitrary-precision [`BigDecimal`]. Binary floating point never
//! appears on either side of the boundary.

mod error;
mod hex;
pub mod plain;
mod scaled;
mod time;

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigUint;

pub use error::MathError;
pub use hex::{hex_to_integer, hex_to_u64};
pub use scaled::{
    from_scaled, parse_amount, pow10, to_plain_string, to_scaled, ScaledAmount, MAX_RAW_DIGITS,
};
pub use time::{from_ledger_time_to_minutes, to_ledger_time};

/// Human-facing amount: an exact decimal with no scale limit.
pub type HumanAmount = BigDecimal;
