// Two ledger generations are deployed and neither can be migrated: the
// current one answers an explicit version query with named-field records and
// a 0-indexed schedule, the legacy one has no version field, positional
// records and a 1-indexed schedule. Everything leaving this module is in the
// normalized 0-based form.

use crate::config::EngineConfig;
use crate::errors::{Error, LedgerError, Result};
use crate::ledger::SaleLedger;
use crate::types::{ClaimProgress, LedgerVersion, Purchase, RawValue};
use crate::vesting::{encode_schedule, VestingSchedule};
use bigdecimal::BigDecimal;
use fp_math::{hex_to_u64, ScaledAmount};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tracing::{debug, info};

const LEGACY_PURCHASE_FIELDS: usize = 8;

impl LedgerVersion {
    /// Resolve the layout once per ledger instance.
    ///
    /// Only "no version field" selects the legacy layout. Any other failure of
    /// the version query propagates: an unreachable ledger is not an old one.
    pub fn detect(ledger: &dyn SaleLedger, config: &EngineConfig) -> Result<Self> {
        match ledger.api_version() {
            Ok(Some(version)) if config.supports(version) => {
                debug!(version, "ledger reports a supported api version");
                Ok(LedgerVersion::Current)
            }
            Ok(Some(version)) => Err(Error::UnsupportedLedgerVersion(format!(
                "api version {version} is not one of {:?}",
                config.supported_api_versions
            ))),
            Ok(None) | Err(LedgerError::MethodNotFound { .. }) => {
                info!("ledger has no api version field, using the legacy layout");
                Ok(LedgerVersion::Legacy)
            }
            Err(err) => Err(Error::UpstreamUnavailable(err)),
        }
    }

    pub fn layout(self, config: &EngineConfig) -> Box<dyn PurchaseLayout> {
        match self {
            LedgerVersion::Current => Box::new(CurrentLayout {
                percent_decimals: config.current_percent_decimals,
                default_trading_decimals: config.default_trading_decimals,
            }),
            LedgerVersion::Legacy => Box::new(LegacyLayout {
                percent_decimals: config.legacy_percent_decimals,
                default_trading_decimals: config.default_trading_decimals,
            }),
        }
    }
}

/// Decimal places of the sale token and of the trading currency.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Scales {
    pub token: u32,
    pub trading: u32,
}

/// Reads one ledger generation and normalizes what it returns.
pub trait PurchaseLayout: Send + Sync {
    fn version(&self) -> LedgerVersion;

    /// Implied decimal places of a raw tranche percentage.
    fn percent_decimals(&self) -> u32;

    fn trading_decimals(&self, ledger: &dyn SaleLedger) -> Result<u32>;

    /// Latest unlocked tranche, 0-based.
    fn current_tranche(&self, ledger: &dyn SaleLedger) -> Result<Option<usize>>;

    fn raw_vesting_schedule(&self, ledger: &dyn SaleLedger) -> Result<Vec<BigUint>>;

    fn vesting_start(&self, ledger: &dyn SaleLedger) -> Result<u64>;

    fn purchase(&self, ledger: &dyn SaleLedger, purchase_id: u64, scales: Scales) -> Result<Purchase>;

    fn purchase_ids(&self, ledger: &dyn SaleLedger) -> Result<Vec<u64>>;

    /// An empty stored schedule is the "no vesting" encoding: one 100% tranche.
    fn vesting_schedule(&self, ledger: &dyn SaleLedger) -> Result<VestingSchedule> {
        let raw = self.raw_vesting_schedule(ledger)?;
        if raw.is_empty() {
            return VestingSchedule::new(vec![BigDecimal::from(100u32)]);
        }
        VestingSchedule::from_raw(&raw, self.percent_decimals())
    }

    fn encode_schedule(&self, percentages: &[BigDecimal]) -> Result<Vec<BigUint>> {
        encode_schedule(percentages, self.percent_decimals())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CurrentLayout {
    percent_decimals: u32,
    default_trading_decimals: u32,
}

impl PurchaseLayout for CurrentLayout {
    fn version(&self) -> LedgerVersion {
        LedgerVersion::Current
    }

    fn percent_decimals(&self) -> u32 {
        self.percent_decimals
    }

    fn trading_decimals(&self, ledger: &dyn SaleLedger) -> Result<u32> {
        let reported = ledger.trading_decimals()?;
        Ok(if reported == 0 {
            self.default_trading_decimals
        } else {
            reported
        })
    }

    fn current_tranche(&self, ledger: &dyn SaleLedger) -> Result<Option<usize>> {
        Ok(Some(to_index(ledger.current_schedule()?, "current schedule")?))
    }

    fn raw_vesting_schedule(&self, ledger: &dyn SaleLedger) -> Result<Vec<BigUint>> {
        let vesting_time = ledger.vesting_time()?;
        (0..vesting_time)
            .map(|position| ledger.vesting_schedule(position).map_err(Error::from))
            .collect()
    }

    fn vesting_start(&self, ledger: &dyn SaleLedger) -> Result<u64> {
        Ok(ledger.vesting_start()?)
    }

    fn purchase(&self, ledger: &dyn SaleLedger, purchase_id: u64, scales: Scales) -> Result<Purchase> {
        let raw = ledger.purchase(purchase_id)?;
        Ok(Purchase {
            id: purchase_id,
            amount: ScaledAmount::new(raw.amount, scales.token),
            purchaser: raw.purchaser,
            cost_amount: ScaledAmount::new(raw.cost_amount, scales.trading),
            timestamp: raw.timestamp,
            amount_redeemed: ScaledAmount::new(raw.amount_redeemed, scales.token),
            progress: ClaimProgress::ByAmount,
            was_finalized: raw.was_finalized,
            reverted: raw.reverted,
        })
    }

    fn purchase_ids(&self, ledger: &dyn SaleLedger) -> Result<Vec<u64>> {
        Ok((0..ledger.purchases_count()?).collect())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LegacyLayout {
    percent_decimals: u32,
    default_trading_decimals: u32,
}

impl PurchaseLayout for LegacyLayout {
    fn version(&self) -> LedgerVersion {
        LedgerVersion::Legacy
    }

    fn percent_decimals(&self) -> u32 {
        self.percent_decimals
    }

    // Legacy sales only trade against the native currency.
    fn trading_decimals(&self, _ledger: &dyn SaleLedger) -> Result<u32> {
        Ok(self.default_trading_decimals)
    }

    fn current_tranche(&self, ledger: &dyn SaleLedger) -> Result<Option<usize>> {
        let position = to_index(ledger.current_schedule()?, "current schedule")?;
        Ok(position.checked_sub(1))
    }

    fn raw_vesting_schedule(&self, ledger: &dyn SaleLedger) -> Result<Vec<BigUint>> {
        let vesting_time = ledger.vesting_time()?;
        (1..=vesting_time)
            .map(|position| ledger.vesting_schedule(position).map_err(Error::from))
            .collect()
    }

    // No vesting start on legacy sales; vesting begins when the sale ends.
    fn vesting_start(&self, ledger: &dyn SaleLedger) -> Result<u64> {
        Ok(ledger.end_date()?)
    }

    fn purchase(&self, ledger: &dyn SaleLedger, purchase_id: u64, scales: Scales) -> Result<Purchase> {
        let fields = ledger.legacy_purchase(purchase_id)?;
        let record = PositionalRecord::new(&fields)?;

        let timestamp = record
            .uint(3, "timestamp")?
            .to_u64()
            .ok_or_else(|| Error::integrity(format!("purchase {purchase_id} timestamp overflows")))?;
        let last_tranche_sent = record
            .uint(5, "lastTrancheSent")?
            .to_u64()
            .ok_or_else(|| Error::integrity(format!("purchase {purchase_id} tranche cursor overflows")))?;
        let progress = match to_index(last_tranche_sent, "last tranche sent")?.checked_sub(1) {
            Some(index) => ClaimProgress::ThroughTranche(index),
            None => ClaimProgress::NothingSent,
        };

        Ok(Purchase {
            id: purchase_id,
            amount: ScaledAmount::new(record.uint(0, "amount")?.clone(), scales.token),
            purchaser: record.address(1, "purchaser")?.to_string(),
            cost_amount: ScaledAmount::new(record.uint(2, "costAmount")?.clone(), scales.trading),
            timestamp,
            amount_redeemed: ScaledAmount::new(record.uint(4, "amountRedeemed")?.clone(), scales.token),
            progress,
            was_finalized: record.boolean(6, "wasFinalized")?,
            reverted: record.boolean(7, "reverted")?,
        })
    }

    fn purchase_ids(&self, ledger: &dyn SaleLedger) -> Result<Vec<u64>> {
        ledger
            .legacy_purchase_ids()?
            .iter()
            .map(|id| hex_to_u64(id).map_err(Error::from))
            .collect()
    }
}

fn to_index(value: u64, what: &str) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::integrity(format!("{what} {value} overflows an index")))
}

/// Typed access into a positional record. A shape mismatch means the ledger
/// is neither layout.
struct PositionalRecord<'a> {
    fields: &'a [RawValue],
}

impl<'a> PositionalRecord<'a> {
    fn new(fields: &'a [RawValue]) -> Result<Self> {
        if fields.len() != LEGACY_PURCHASE_FIELDS {
            return Err(Error::UnsupportedLedgerVersion(format!(
                "legacy purchase record has {} fields, expected {}",
                fields.len(),
                LEGACY_PURCHASE_FIELDS
            )));
        }
        Ok(Self { fields })
    }

    fn uint(&self, index: usize, name: &str) -> Result<&'a BigUint> {
        match &self.fields[index] {
            RawValue::Uint(value) => Ok(value),
            other => Err(mismatch(index, name, "uint", other)),
        }
    }

    fn address(&self, index: usize, name: &str) -> Result<&'a str> {
        match &self.fields[index] {
            RawValue::Address(value) => Ok(value.as_str()),
            other => Err(mismatch(index, name, "address", other)),
        }
    }

    fn boolean(&self, index: usize, name: &str) -> Result<bool> {
        match &self.fields[index] {
            RawValue::Bool(value) => Ok(*value),
            other => Err(mismatch(index, name, "bool", other)),
        }
    }
}

fn mismatch(index: usize, name: &str, expected: &str, found: &RawValue) -> Error {
    Error::UnsupportedLedgerVersion(format!(
        "legacy purchase field {index} ({name}) is {}, expected {expected}",
        found.kind()
    ))
}
