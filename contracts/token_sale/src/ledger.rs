use crate::errors::LedgerError;
use crate::types::{RawPurchase, RawValue};
use num_bigint::BigUint;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Read-only view of a deployed fixed-swap sale.
///
/// Every method returns the ledger's raw encoding: integer amounts at the
/// token's (or trading currency's) scale, timestamps in seconds, indices in
/// whatever convention the deployed generation uses. Interpreting them is the
/// job of [`crate::compat`]. Implementations own transport, retries and
/// authentication; this crate never caches what they return.
pub trait SaleLedger {
    /// Explicit version query. `Ok(None)` is the sentinel for "no version
    /// field", which older deployments answer with.
    fn api_version(&self) -> LedgerResult<Option<u32>>;

    fn token_decimals(&self) -> LedgerResult<u32>;
    /// `0` when the sale trades against the native currency.
    fn trading_decimals(&self) -> LedgerResult<u32>;

    fn has_started(&self) -> LedgerResult<bool>;
    fn has_finalized(&self) -> LedgerResult<bool>;

    fn current_schedule(&self) -> LedgerResult<u64>;
    fn vesting_time(&self) -> LedgerResult<u64>;
    fn vesting_schedule(&self, position: u64) -> LedgerResult<BigUint>;
    fn vesting_start(&self) -> LedgerResult<u64>;
    fn start_date(&self) -> LedgerResult<u64>;
    fn end_date(&self) -> LedgerResult<u64>;

    /// Named-field purchase record.
    fn purchase(&self, purchase_id: u64) -> LedgerResult<RawPurchase>;
    /// Positional purchase record of older deployments.
    fn legacy_purchase(&self, purchase_id: u64) -> LedgerResult<Vec<RawValue>>;
    fn purchases_count(&self) -> LedgerResult<u64>;
    /// Hex-encoded ids, as older deployments return them.
    fn legacy_purchase_ids(&self) -> LedgerResult<Vec<String>>;
    fn address_purchase_ids(&self, address: &str) -> LedgerResult<Vec<String>>;

    fn tokens_for_sale(&self) -> LedgerResult<BigUint>;
    fn tokens_allocated(&self) -> LedgerResult<BigUint>;
    fn minimum_raise(&self) -> LedgerResult<BigUint>;
    fn has_minimum_raise(&self) -> LedgerResult<bool>;
    fn unsold_tokens_redeemed(&self) -> LedgerResult<bool>;
    fn individual_minimum_amount(&self) -> LedgerResult<BigUint>;
    fn individual_maximum_amount(&self) -> LedgerResult<BigUint>;

    /// Collected funds, at the trading currency's scale.
    fn balance(&self) -> LedgerResult<BigUint>;
    fn trade_value(&self) -> LedgerResult<BigUint>;
    /// Cost in trading-currency units of `amount` raw tokens.
    fn cost(&self, amount: &BigUint) -> LedgerResult<BigUint>;
}
