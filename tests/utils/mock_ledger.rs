//! In-memory ledger that can pose as either deployed generation
use num_bigint::BigUint;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use token_sale::{LedgerError, LedgerResult, RawPurchase, RawValue, SaleLedger};

/// Which generation the mock imitates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Generation {
    /// Answers the version query with this number.
    Current(u32),
    /// Has no version field; queries fail with `MethodNotFound`.
    Legacy,
    /// Has no version field but answers the query with the "none" sentinel.
    LegacySentinel,
}

#[derive(Clone, Debug)]
pub struct MockLedger {
    pub generation: Generation,
    pub token_decimals: u32,
    pub trading_decimals: u32,
    pub started: bool,
    pub finalized: bool,
    /// Raw cursor in the generation's own convention.
    pub current_schedule: u64,
    /// Raw tranche values in storage order; legacy positions read 1-based.
    pub vesting_schedule: Vec<BigUint>,
    pub vesting_start: u64,
    pub start_date: u64,
    pub end_date: u64,
    pub purchases: Vec<RawPurchase>,
    pub legacy_purchases: Vec<Vec<RawValue>>,
    pub address_purchases: HashMap<String, Vec<u64>>,
    pub tokens_for_sale: BigUint,
    pub tokens_allocated: BigUint,
    pub minimum_raise: BigUint,
    pub has_minimum_raise: bool,
    pub unsold_tokens_redeemed: bool,
    pub individual_minimum_amount: BigUint,
    pub individual_maximum_amount: BigUint,
    pub balance: BigUint,
    /// Price of one whole token, raw at the trading scale.
    pub trade_value: BigUint,
    /// Methods this deployment does not expose, whatever its generation.
    pub missing: HashSet<&'static str>,
    outage: RefCell<Option<LedgerError>>,
    version_queries: Cell<u32>,
}

impl MockLedger {
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            token_decimals: 18,
            trading_decimals: 0,
            started: false,
            finalized: false,
            current_schedule: 0,
            vesting_schedule: Vec::new(),
            vesting_start: 0,
            start_date: 0,
            end_date: 0,
            purchases: Vec::new(),
            legacy_purchases: Vec::new(),
            address_purchases: HashMap::new(),
            tokens_for_sale: BigUint::from(0u32),
            tokens_allocated: BigUint::from(0u32),
            minimum_raise: BigUint::from(0u32),
            has_minimum_raise: false,
            unsold_tokens_redeemed: false,
            individual_minimum_amount: BigUint::from(0u32),
            individual_maximum_amount: BigUint::from(0u32),
            balance: BigUint::from(0u32),
            trade_value: BigUint::from(0u32),
            missing: HashSet::new(),
            outage: RefCell::new(None),
            version_queries: Cell::new(0),
        }
    }

    pub fn is_legacy(&self) -> bool {
        !matches!(self.generation, Generation::Current(_))
    }

    /// How many times the version query was issued.
    pub fn version_queries(&self) -> u32 {
        self.version_queries.get()
    }

    /// Every call fails with `err` until [`MockLedger::recover`].
    pub fn fail_with(&self, err: LedgerError) {
        *self.outage.borrow_mut() = Some(err);
    }

    pub fn recover(&self) {
        *self.outage.borrow_mut() = None;
    }

    fn check(&self, method: &str) -> LedgerResult<()> {
        if let Some(err) = self.outage.borrow().as_ref() {
            return Err(err.clone());
        }
        if self.missing.contains(method) {
            return Err(LedgerError::method_not_found(method));
        }
        Ok(())
    }

    fn current_only(&self, method: &str) -> LedgerResult<()> {
        self.check(method)?;
        if self.is_legacy() {
            return Err(LedgerError::method_not_found(method));
        }
        Ok(())
    }

    fn legacy_only(&self, method: &str) -> LedgerResult<()> {
        self.check(method)?;
        if !self.is_legacy() {
            return Err(LedgerError::method_not_found(method));
        }
        Ok(())
    }

    fn stored_position(&self, position: u64) -> Option<usize> {
        let position = usize::try_from(position).ok()?;
        if self.is_legacy() {
            position.checked_sub(1)
        } else {
            Some(position)
        }
    }
}

impl SaleLedger for MockLedger {
    fn api_version(&self) -> LedgerResult<Option<u32>> {
        self.version_queries.set(self.version_queries.get() + 1);
        self.check("apiVersion")?;
        match self.generation {
            Generation::Current(version) => Ok(Some(version)),
            Generation::Legacy => Err(LedgerError::method_not_found("apiVersion")),
            Generation::LegacySentinel => Ok(None),
        }
    }

    fn token_decimals(&self) -> LedgerResult<u32> {
        self.check("decimals")?;
        Ok(self.token_decimals)
    }

    fn trading_decimals(&self) -> LedgerResult<u32> {
        self.current_only("getTradingDecimals")?;
        Ok(self.trading_decimals)
    }

    fn has_started(&self) -> LedgerResult<bool> {
        self.check("hasStarted")?;
        Ok(self.started)
    }

    fn has_finalized(&self) -> LedgerResult<bool> {
        self.check("hasFinalized")?;
        Ok(self.finalized)
    }

    fn current_schedule(&self) -> LedgerResult<u64> {
        self.check("currentSchedule")?;
        Ok(self.current_schedule)
    }

    fn vesting_time(&self) -> LedgerResult<u64> {
        self.check("vestingTime")?;
        Ok(self.vesting_schedule.len() as u64)
    }

    fn vesting_schedule(&self, position: u64) -> LedgerResult<BigUint> {
        self.check("vestingSchedule")?;
        self.stored_position(position)
            .and_then(|index| self.vesting_schedule.get(index).cloned())
            .ok_or_else(|| LedgerError::unavailable(format!("vesting position {position} reverted")))
    }

    fn vesting_start(&self) -> LedgerResult<u64> {
        self.current_only("vestingStart")?;
        Ok(self.vesting_start)
    }

    fn start_date(&self) -> LedgerResult<u64> {
        self.check("startDate")?;
        Ok(self.start_date)
    }

    fn end_date(&self) -> LedgerResult<u64> {
        self.check("endDate")?;
        Ok(self.end_date)
    }

    fn purchase(&self, purchase_id: u64) -> LedgerResult<RawPurchase> {
        self.current_only("getPurchase")?;
        self.purchases
            .get(purchase_id as usize)
            .cloned()
            .ok_or_else(|| LedgerError::unavailable(format!("purchase {purchase_id} reverted")))
    }

    fn legacy_purchase(&self, purchase_id: u64) -> LedgerResult<Vec<RawValue>> {
        self.legacy_only("getPurchase")?;
        self.legacy_purchases
            .get(purchase_id as usize)
            .cloned()
            .ok_or_else(|| LedgerError::unavailable(format!("purchase {purchase_id} reverted")))
    }

    fn purchases_count(&self) -> LedgerResult<u64> {
        self.current_only("getPurchasesCount")?;
        Ok(self.purchases.len() as u64)
    }

    fn legacy_purchase_ids(&self) -> LedgerResult<Vec<String>> {
        self.legacy_only("getPurchaseIds")?;
        Ok((0..self.legacy_purchases.len())
            .map(|id| format!("0x{id:x}"))
            .collect())
    }

    fn address_purchase_ids(&self, address: &str) -> LedgerResult<Vec<String>> {
        self.check("getMyPurchases")?;
        Ok(self
            .address_purchases
            .get(address)
            .map(|ids| ids.iter().map(|id| format!("0x{id:x}")).collect())
            .unwrap_or_default())
    }

    fn tokens_for_sale(&self) -> LedgerResult<BigUint> {
        self.check("tokensForSale")?;
        Ok(self.tokens_for_sale.clone())
    }

    fn tokens_allocated(&self) -> LedgerResult<BigUint> {
        self.check("tokensAllocated")?;
        Ok(self.tokens_allocated.clone())
    }

    fn minimum_raise(&self) -> LedgerResult<BigUint> {
        self.check("minimumRaise")?;
        Ok(self.minimum_raise.clone())
    }

    fn has_minimum_raise(&self) -> LedgerResult<bool> {
        self.check("hasMinimumRaise")?;
        Ok(self.has_minimum_raise)
    }

    fn unsold_tokens_redeemed(&self) -> LedgerResult<bool> {
        self.check("unsoldTokensRedeemed")?;
        Ok(self.unsold_tokens_redeemed)
    }

    fn individual_minimum_amount(&self) -> LedgerResult<BigUint> {
        self.check("individualMinimumAmount")?;
        Ok(self.individual_minimum_amount.clone())
    }

    fn individual_maximum_amount(&self) -> LedgerResult<BigUint> {
        self.check("individualMaximumAmount")?;
        Ok(self.individual_maximum_amount.clone())
    }

    fn balance(&self) -> LedgerResult<BigUint> {
        self.check("balance")?;
        Ok(self.balance.clone())
    }

    fn trade_value(&self) -> LedgerResult<BigUint> {
        self.check("tradeValue")?;
        Ok(self.trade_value.clone())
    }

    fn cost(&self, amount: &BigUint) -> LedgerResult<BigUint> {
        self.check("cost")?;
        let one_token = BigUint::from(10u32).pow(self.token_decimals);
        Ok(amount * &self.trade_value / one_token)
    }
}
