//! Sale fixtures for both ledger generations
use super::mock_ledger::{Generation, MockLedger};
use bigdecimal::BigDecimal;
use fp_math::{parse_amount, pow10, to_scaled};
use num_bigint::BigUint;
use token_sale::{RawPurchase, RawValue};

pub const BUYER: &str = "0x00000000000000000000000000000000000b0b01";
pub const OTHER_BUYER: &str = "0x00000000000000000000000000000000000a1ce2";

/// 2021-05-01 12:30:45 UTC
pub const PURCHASE_TIME: u64 = 1_619_872_245;
pub const SALE_START: u64 = 1_619_870_400;
pub const SALE_END: u64 = 1_622_548_800;
pub const VESTING_START: u64 = 1_625_140_800;

pub fn dec(text: &str) -> BigDecimal {
    parse_amount(text).unwrap()
}

/// Raw amount of `text` tokens at 18 decimals.
pub fn tokens(text: &str) -> BigUint {
    to_scaled(&dec(text), 18).unwrap().into_raw()
}

/// Raw tranche values at `percent_decimals` implied places.
pub fn raw_schedule(percentages: &[u32], percent_decimals: u32) -> Vec<BigUint> {
    percentages
        .iter()
        .map(|pct| BigUint::from(*pct) * pow10(percent_decimals))
        .collect()
}

pub fn current_purchase(amount: &str, redeemed: &str) -> RawPurchase {
    RawPurchase {
        amount: tokens(amount),
        purchaser: BUYER.to_string(),
        cost_amount: tokens(amount) / BigUint::from(10u32),
        timestamp: PURCHASE_TIME,
        amount_redeemed: tokens(redeemed),
        was_finalized: false,
        reverted: false,
    }
}

/// Eight-field positional record; `last_tranche_sent` is 1-based, 0 for none.
pub fn legacy_purchase(amount: &str, redeemed: &str, last_tranche_sent: u32) -> Vec<RawValue> {
    vec![
        RawValue::Uint(tokens(amount)),
        RawValue::Address(BUYER.to_string()),
        RawValue::Uint(tokens(amount) / BigUint::from(10u32)),
        RawValue::Uint(BigUint::from(PURCHASE_TIME)),
        RawValue::Uint(tokens(redeemed)),
        RawValue::Uint(BigUint::from(last_tranche_sent)),
        RawValue::Bool(false),
        RawValue::Bool(false),
    ]
}

fn with_sale_figures(mut ledger: MockLedger) -> MockLedger {
    ledger.started = true;
    ledger.start_date = SALE_START;
    ledger.end_date = SALE_END;
    ledger.tokens_for_sale = tokens("1000");
    ledger.tokens_allocated = tokens("600");
    ledger.minimum_raise = tokens("500");
    ledger.has_minimum_raise = true;
    ledger.individual_minimum_amount = tokens("1");
    ledger.individual_maximum_amount = tokens("250");
    ledger.balance = tokens("60");
    ledger.trade_value = tokens("0.1");
    ledger
}

/// Current-generation sale, schedule 30/30/40, second tranche unlocked.
pub fn current_sale() -> MockLedger {
    let mut ledger = with_sale_figures(MockLedger::new(Generation::Current(2)));
    ledger.vesting_schedule = raw_schedule(&[30, 30, 40], 12);
    ledger.current_schedule = 1;
    ledger.vesting_start = VESTING_START;
    ledger.purchases = vec![current_purchase("100", "30"), current_purchase("250", "0")];
    ledger.address_purchases.insert(BUYER.to_string(), vec![0, 1]);
    ledger
}

/// Legacy-generation sale, schedule 30/30/40 in basis points, second tranche unlocked.
pub fn legacy_sale() -> MockLedger {
    let mut ledger = with_sale_figures(MockLedger::new(Generation::Legacy));
    ledger.vesting_schedule = raw_schedule(&[30, 30, 40], 2);
    ledger.current_schedule = 2;
    ledger.legacy_purchases = vec![legacy_purchase("100", "30", 1), legacy_purchase("250", "0", 0)];
    ledger.address_purchases.insert(BUYER.to_string(), vec![0, 1]);
    ledger
}
