use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use fp_math::ScaledAmount;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// One field of a positional ledger record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawValue {
    Uint(BigUint),
    Address(String),
    Bool(bool),
}

impl RawValue {
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Uint(_) => "uint",
            RawValue::Address(_) => "address",
            RawValue::Bool(_) => "bool",
        }
    }
}

/// Named-field purchase record as current deployments return it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawPurchase {
    pub amount: BigUint,
    pub purchaser: String,
    pub cost_amount: BigUint,
    pub timestamp: u64,
    pub amount_redeemed: BigUint,
    pub was_finalized: bool,
    pub reverted: bool,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerVersion {
    /// Named-field records, 0-indexed schedule.
    Current,
    /// Positional records, 1-indexed schedule.
    Legacy,
}

/// How far a purchase has been paid out, in 0-based tranche terms.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimProgress {
    NothingSent,
    /// Tranches up to and including this index were sent.
    ThroughTranche(usize),
    /// The record carries no tranche cursor; the redeemed amount is authoritative.
    ByAmount,
}

impl ClaimProgress {
    pub fn last_tranche_sent(&self) -> Option<usize> {
        match self {
            ClaimProgress::ThroughTranche(index) => Some(*index),
            ClaimProgress::NothingSent | ClaimProgress::ByAmount => None,
        }
    }
}

/// Purchase normalized out of either ledger layout.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: u64,
    pub amount: ScaledAmount,
    pub purchaser: String,
    /// At the trading currency's scale, which may differ from the token's.
    pub cost_amount: ScaledAmount,
    pub timestamp: u64,
    pub amount_redeemed: ScaledAmount,
    pub progress: ClaimProgress,
    pub was_finalized: bool,
    pub reverted: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum RedemptionState {
    Unfinalized,
    FinalizedPending,
    PartiallyRedeemed { last_tranche_sent: Option<usize> },
    FullyRedeemed,
    Reverted,
}

/// Sale-level figures fetched fresh for every withdrawal computation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SaleAccountingSnapshot {
    pub current_tranche: Option<usize>,
    pub tokens_for_sale: ScaledAmount,
    pub tokens_allocated: ScaledAmount,
    pub minimum_raise: ScaledAmount,
    pub has_minimum_raise: bool,
    pub finalized: bool,
    pub unsold_tokens_redeemed: bool,
    /// At the trading currency's scale.
    pub balance: ScaledAmount,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDetail {
    pub id: u64,
    #[serde(with = "fp_math::plain::decimal")]
    pub amount: BigDecimal,
    pub purchaser: String,
    #[serde(with = "fp_math::plain::decimal")]
    pub cost_amount: BigDecimal,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "fp_math::plain::decimal")]
    pub amount_redeemed: BigDecimal,
    #[serde(with = "fp_math::plain::decimal")]
    pub amount_left_to_redeem: BigDecimal,
    #[serde(with = "fp_math::plain::decimal")]
    pub amount_to_redeem_now: BigDecimal,
    pub last_tranche_sent: Option<usize>,
    pub was_finalized: bool,
    pub reverted: bool,
    pub state: RedemptionState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionInfo {
    /// Latest unlocked tranche, 0-based; `None` before the first unlock.
    pub current_tranche: Option<usize>,
    pub vesting_time: u64,
    /// Tranche percentages, e.g. `30` for 30%.
    #[serde(with = "fp_math::plain::decimal_vec")]
    pub vesting_schedule: Vec<BigDecimal>,
    pub vesting_start: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SaleDates {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub vesting_start: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenAmounts {
    #[serde(with = "fp_math::plain::decimal")]
    pub tokens_for_sale: BigDecimal,
    #[serde(with = "fp_math::plain::decimal")]
    pub tokens_allocated: BigDecimal,
    #[serde(with = "fp_math::plain::decimal")]
    pub minimum_raise: BigDecimal,
    #[serde(with = "fp_math::plain::decimal")]
    pub individual_minimum_amount: BigDecimal,
    #[serde(with = "fp_math::plain::decimal")]
    pub individual_maximum_amount: BigDecimal,
}

/// Raw arguments for a swap request, ready for the submission layer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount: ScaledAmount,
    pub cost: ScaledAmount,
}
