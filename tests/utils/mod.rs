//! Testing utilities for the sale accounting workspace
//! Provides a mock ledger for both deployed generations plus fixtures and assertions

pub mod mock_ledger;
pub mod test_fixtures;

pub use mock_ledger::*;
pub use test_fixtures::*;
