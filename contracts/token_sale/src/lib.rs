//! Read-side accounting for fixed-swap token sales.
//!
//! A [`SaleView`] wraps a [`SaleLedger`] adapter, resolves which of the two
//! deployed ledger generations it talks to, and answers vesting, redemption
//! and withdrawal questions in exact decimal arithmetic.

pub mod accounting;
pub mod compat;
pub mod config;
mod contract;
pub mod errors;
pub mod ledger;
mod storage;
pub mod types;
pub mod vesting;


pub use compat::{CurrentLayout, LegacyLayout, PurchaseLayout, Scales};
pub use config::EngineConfig;
pub use contract::SaleView;
pub use errors::{Error, LedgerError, Result};
pub use ledger::{LedgerResult, SaleLedger};
pub use types::*;
pub use vesting::{encode_schedule, validate_schedule, vesting_schedule_sum, VestingSchedule};
