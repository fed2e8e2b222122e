use crate::errors::{Error, Result};
use crate::types::{ClaimProgress, Purchase, RedemptionState, SaleAccountingSnapshot};
use crate::vesting::VestingSchedule;
use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::cmp::Ordering;
use tracing::warn;

/// `amount - amount_redeemed`; a negative balance is reported, never clamped.
pub fn amount_left_to_redeem(purchase: &Purchase) -> Result<BigDecimal> {
    let left = purchase
        .amount
        .checked_sub(&purchase.amount_redeemed)
        .map_err(|err| {
            warn!(purchase_id = purchase.id, %err, "redeemed amount exceeds purchase");
            Error::integrity(format!(
                "purchase {} redeemed {} of {}",
                purchase.id, purchase.amount_redeemed, purchase.amount
            ))
        })?;
    Ok(left.to_human())
}

/// Amount the purchaser could redeem right now.
///
/// Tranches apply to the original purchased amount (linear unlock). With a
/// tranche cursor only tranches after the cursor and up to `current_tranche`
/// are replayed; without one, everything vested so far minus what was
/// already redeemed is claimable.
pub fn currently_claimable(
    purchase: &Purchase,
    schedule: &VestingSchedule,
    current_tranche: Option<usize>,
    sale_finalized: bool,
) -> Result<BigDecimal> {
    if !sale_finalized || purchase.reverted {
        return Ok(BigDecimal::zero());
    }

    let total = purchase.amount.to_human();
    match purchase.progress {
        ClaimProgress::NothingSent => match current_tranche {
            Some(current) => schedule.amount_between(&total, 0, current),
            None => Ok(BigDecimal::zero()),
        },
        ClaimProgress::ThroughTranche(last) => {
            let current = match current_tranche {
                Some(current) if last <= current => current,
                _ => {
                    warn!(purchase_id = purchase.id, last, ?current_tranche, "tranche cursor ahead of schedule");
                    return Err(Error::integrity(format!(
                        "purchase {} sent tranche {} but the schedule is at {:?}",
                        purchase.id, last, current_tranche
                    )));
                }
            };
            schedule.amount_between(&total, last + 1, current)
        }
        ClaimProgress::ByAmount => {
            let vested = match current_tranche {
                Some(current) => schedule.amount_between(&total, 0, current)?,
                None => BigDecimal::zero(),
            };
            let redeemed = purchase.amount_redeemed.to_human();
            if redeemed > vested {
                warn!(purchase_id = purchase.id, "redeemed amount exceeds vested amount");
                return Err(Error::integrity(format!(
                    "purchase {} redeemed more than has vested",
                    purchase.id
                )));
            }
            Ok(vested - redeemed)
        }
    }
}

pub fn redemption_state(purchase: &Purchase, sale_finalized: bool) -> Result<RedemptionState> {
    if purchase.reverted {
        return Ok(RedemptionState::Reverted);
    }
    if !sale_finalized {
        return Ok(RedemptionState::Unfinalized);
    }

    if amount_left_to_redeem(purchase)?.is_zero() {
        return Ok(RedemptionState::FullyRedeemed);
    }
    match purchase.progress {
        ClaimProgress::ThroughTranche(last) => Ok(RedemptionState::PartiallyRedeemed {
            last_tranche_sent: Some(last),
        }),
        _ if purchase.amount_redeemed.is_zero() => Ok(RedemptionState::FinalizedPending),
        _ => Ok(RedemptionState::PartiallyRedeemed {
            last_tranche_sent: None,
        }),
    }
}

/// No minimum configured counts as reached. Otherwise the allocation must
/// strictly exceed the minimum.
pub fn was_minimum_raise_reached(sale: &SaleAccountingSnapshot) -> Result<bool> {
    if !sale.has_minimum_raise {
        return Ok(true);
    }
    Ok(sale.tokens_allocated.checked_cmp(&sale.minimum_raise)? == Ordering::Greater)
}

/// Tokens the issuer may take back after finalization.
///
/// A sale that missed its minimum raise is void, so every token for sale
/// returns to the issuer regardless of what was allocated.
pub fn withdrawable_unsold_tokens(sale: &SaleAccountingSnapshot) -> Result<BigDecimal> {
    if !sale.finalized || sale.unsold_tokens_redeemed {
        return Ok(BigDecimal::zero());
    }

    if !was_minimum_raise_reached(sale)? {
        return Ok(sale.tokens_for_sale.to_human());
    }

    let unsold = sale
        .tokens_for_sale
        .checked_sub(&sale.tokens_allocated)
        .map_err(|err| {
            warn!(%err, "allocation exceeds tokens for sale");
            Error::integrity(format!(
                "allocated {} of {} tokens for sale",
                sale.tokens_allocated, sale.tokens_for_sale
            ))
        })?;
    Ok(unsold.to_human())
}

/// Collected funds, withdrawable only from a finalized sale that reached its
/// minimum; otherwise purchasers reclaim their payment instead.
pub fn withdrawable_funds(sale: &SaleAccountingSnapshot) -> Result<BigDecimal> {
    if sale.finalized && was_minimum_raise_reached(sale)? {
        return Ok(sale.balance.to_human());
    }
    Ok(BigDecimal::zero())
}
