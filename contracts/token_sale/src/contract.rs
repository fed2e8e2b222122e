use crate::accounting::{
    amount_left_to_redeem, currently_claimable, redemption_state, was_minimum_raise_reached,
    withdrawable_funds, withdrawable_unsold_tokens,
};
use crate::compat::{PurchaseLayout, Scales};
use crate::config::EngineConfig;
use crate::errors::{Error, Result};
use crate::ledger::SaleLedger;
use crate::storage::*;
use crate::types::*;
use crate::vesting::VestingSchedule;
use bigdecimal::BigDecimal;
use fp_math::{from_ledger_time_to_minutes, from_scaled, hex_to_u64, to_scaled, ScaledAmount};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use tracing::instrument;

/// Query handle over one deployed fixed-swap sale.
///
/// Nothing read from the ledger is kept between calls; only the layout is
/// resolved up front, since a deployment never changes generation.
pub struct SaleView<'a> {
    ledger: &'a dyn SaleLedger,
    layout: Box<dyn PurchaseLayout>,
}

impl fmt::Debug for SaleView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaleView")
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

impl<'a> SaleView<'a> {
    pub fn connect(ledger: &'a dyn SaleLedger, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let version = LedgerVersion::detect(ledger, config)?;
        Ok(Self {
            ledger,
            layout: version.layout(config),
        })
    }

    pub fn version(&self) -> LedgerVersion {
        self.layout.version()
    }

    pub fn scales(&self) -> Result<Scales> {
        get_scales(self.ledger, self.layout.as_ref())
    }

    /// The purchase in normalized form, without derived figures.
    pub fn normalized_purchase(&self, purchase_id: u64) -> Result<Purchase> {
        let scales = self.scales()?;
        self.layout.purchase(self.ledger, purchase_id, scales)
    }

    #[instrument(skip(self), fields(version = ?self.version()))]
    pub fn purchase(&self, purchase_id: u64) -> Result<PurchaseDetail> {
        let purchase = self.normalized_purchase(purchase_id)?;
        let finalized = self.ledger.has_finalized()?;

        let amount_to_redeem_now = if finalized {
            let schedule = self.layout.vesting_schedule(self.ledger)?;
            let current = self.layout.current_tranche(self.ledger)?;
            currently_claimable(&purchase, &schedule, current, finalized)?
        } else {
            BigDecimal::zero()
        };

        Ok(PurchaseDetail {
            id: purchase.id,
            amount: purchase.amount.to_human(),
            purchaser: purchase.purchaser.clone(),
            cost_amount: purchase.cost_amount.to_human(),
            timestamp: from_ledger_time_to_minutes(purchase.timestamp)?,
            amount_redeemed: purchase.amount_redeemed.to_human(),
            amount_left_to_redeem: amount_left_to_redeem(&purchase)?,
            amount_to_redeem_now,
            last_tranche_sent: purchase.progress.last_tranche_sent(),
            was_finalized: purchase.was_finalized,
            reverted: purchase.reverted,
            state: redemption_state(&purchase, finalized)?,
        })
    }

    pub fn purchase_ids(&self) -> Result<Vec<u64>> {
        self.layout.purchase_ids(self.ledger)
    }

    pub fn address_purchase_ids(&self, address: &str) -> Result<Vec<u64>> {
        self.ledger
            .address_purchase_ids(address)?
            .iter()
            .map(|id| hex_to_u64(id).map_err(Error::from))
            .collect()
    }

    pub fn snapshot(&self) -> Result<SaleAccountingSnapshot> {
        get_sale_snapshot(self.ledger, self.layout.as_ref(), self.scales()?)
    }

    pub fn was_minimum_raise_reached(&self) -> Result<bool> {
        was_minimum_raise_reached(&self.snapshot()?)
    }

    #[instrument(skip(self))]
    pub fn withdrawable_unsold_tokens(&self) -> Result<BigDecimal> {
        withdrawable_unsold_tokens(&self.snapshot()?)
    }

    #[instrument(skip(self))]
    pub fn withdrawable_funds(&self) -> Result<BigDecimal> {
        withdrawable_funds(&self.snapshot()?)
    }

    pub fn vesting_schedule(&self) -> Result<VestingSchedule> {
        self.layout.vesting_schedule(self.ledger)
    }

    /// Schedule overview; no tranche counts as unlocked before the sale starts.
    pub fn distribution(&self) -> Result<DistributionInfo> {
        let current_tranche = if self.ledger.has_started()? {
            self.layout.current_tranche(self.ledger)?
        } else {
            None
        };

        Ok(DistributionInfo {
            current_tranche,
            vesting_time: self.ledger.vesting_time()?,
            vesting_schedule: self.vesting_schedule()?.tranches().to_vec(),
            vesting_start: from_ledger_time_to_minutes(self.layout.vesting_start(self.ledger)?)?,
        })
    }

    pub fn dates(&self) -> Result<SaleDates> {
        get_sale_dates(self.ledger, self.layout.as_ref())
    }

    pub fn token_amounts(&self) -> Result<TokenAmounts> {
        get_token_amounts(self.ledger, self.scales()?)
    }

    /// Price of one token, in the trading currency.
    pub fn trade_value(&self) -> Result<BigDecimal> {
        let scales = self.scales()?;
        Ok(from_scaled(&self.ledger.trade_value()?, scales.trading))
    }

    pub fn cost_from_tokens(&self, token_amount: &BigDecimal) -> Result<BigDecimal> {
        let quote = self.swap_quote(token_amount)?;
        Ok(quote.cost.to_human())
    }

    /// Raw swap arguments for `token_amount` tokens.
    pub fn swap_quote(&self, token_amount: &BigDecimal) -> Result<SwapQuote> {
        let scales = self.scales()?;
        let amount = to_scaled(token_amount, scales.token)?;
        let cost = self.ledger.cost(amount.raw())?;
        Ok(SwapQuote {
            amount,
            cost: ScaledAmount::new(cost, scales.trading),
        })
    }

    /// Encode a vesting schedule for this ledger's generation.
    pub fn encode_vesting(&self, percentages: &[BigDecimal]) -> Result<Vec<BigUint>> {
        self.layout.encode_schedule(percentages)
    }
}
