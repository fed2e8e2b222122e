use crate::compat::{PurchaseLayout, Scales};
use crate::errors::Result;
use crate::ledger::SaleLedger;
use crate::types::{SaleAccountingSnapshot, SaleDates, TokenAmounts};
use fp_math::{from_ledger_time_to_minutes, from_scaled, ScaledAmount};

pub fn get_scales(ledger: &dyn SaleLedger, layout: &dyn PurchaseLayout) -> Result<Scales> {
    Ok(Scales {
        token: ledger.token_decimals()?,
        trading: layout.trading_decimals(ledger)?,
    })
}

pub fn get_sale_snapshot(
    ledger: &dyn SaleLedger,
    layout: &dyn PurchaseLayout,
    scales: Scales,
) -> Result<SaleAccountingSnapshot> {
    Ok(SaleAccountingSnapshot {
        current_tranche: layout.current_tranche(ledger)?,
        tokens_for_sale: ScaledAmount::new(ledger.tokens_for_sale()?, scales.token),
        tokens_allocated: ScaledAmount::new(ledger.tokens_allocated()?, scales.token),
        minimum_raise: ScaledAmount::new(ledger.minimum_raise()?, scales.token),
        has_minimum_raise: ledger.has_minimum_raise()?,
        finalized: ledger.has_finalized()?,
        unsold_tokens_redeemed: ledger.unsold_tokens_redeemed()?,
        balance: ScaledAmount::new(ledger.balance()?, scales.trading),
    })
}

pub fn get_token_amounts(ledger: &dyn SaleLedger, scales: Scales) -> Result<TokenAmounts> {
    Ok(TokenAmounts {
        tokens_for_sale: from_scaled(&ledger.tokens_for_sale()?, scales.token),
        tokens_allocated: from_scaled(&ledger.tokens_allocated()?, scales.token),
        minimum_raise: from_scaled(&ledger.minimum_raise()?, scales.token),
        individual_minimum_amount: from_scaled(&ledger.individual_minimum_amount()?, scales.token),
        individual_maximum_amount: from_scaled(&ledger.individual_maximum_amount()?, scales.token),
    })
}

pub fn get_sale_dates(ledger: &dyn SaleLedger, layout: &dyn PurchaseLayout) -> Result<SaleDates> {
    Ok(SaleDates {
        start: from_ledger_time_to_minutes(ledger.start_date()?)?,
        end: from_ledger_time_to_minutes(ledger.end_date()?)?,
        vesting_start: from_ledger_time_to_minutes(layout.vesting_start(ledger)?)?,
    })
}
