use fp_math::MathError;
use thiserror::Error;

/// Failure reported by the external ledger adapter.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LedgerError {
    /// The queried method or field does not exist on this ledger.
    #[error("ledger method `{method}` not found")]
    MethodNotFound { method: String },
    /// Network, authorization or any other failure unrelated to the interface shape.
    #[error("ledger unavailable: {reason}")]
    Unavailable { reason: String },
}

impl LedgerError {
    pub fn method_not_found(method: impl Into<String>) -> Self {
        LedgerError::MethodNotFound {
            method: method.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        LedgerError::Unavailable {
            reason: reason.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("vesting schedule sums to {sum}%, expected exactly 100%")]
    ScheduleMismatch { sum: String },
    #[error("data integrity violation: {0}")]
    DataIntegrityViolation(String),
    #[error("unsupported ledger version: {0}")]
    UnsupportedLedgerVersion(String),
    #[error(transparent)]
    UpstreamUnavailable(LedgerError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Stable numeric code, one per error kind.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidAmount(_) => 1,
            Error::ScheduleMismatch { .. } => 2,
            Error::DataIntegrityViolation(_) => 3,
            Error::UnsupportedLedgerVersion(_) => 4,
            Error::UpstreamUnavailable(_) => 5,
            Error::InvalidConfig(_) => 6,
        }
    }

    pub fn integrity(detail: impl Into<String>) -> Self {
        Error::DataIntegrityViolation(detail.into())
    }
}

impl From<MathError> for Error {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidAmount(_) => Error::InvalidAmount(err.to_string()),
            MathError::InvalidHex(_)
            | MathError::InvalidTimestamp(_)
            | MathError::ScaleMismatch { .. }
            | MathError::Underflow => Error::DataIntegrityViolation(err.to_string()),
        }
    }
}

/// Once a layout is resolved, a missing method means the ledger matches
/// neither known layout. Everything else passes through untouched.
impl From<LedgerError> for Error {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::MethodNotFound { method } => Error::UnsupportedLedgerVersion(format!(
                "ledger has no `{method}` in the resolved layout"
            )),
            other => Error::UpstreamUnavailable(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
