use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MathError {
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("invalid hex literal `{0}`")]
    InvalidHex(String),
    #[error("timestamp {0} is outside the ledger time range")]
    InvalidTimestamp(i128),
    #[error("scale mismatch: {left} != {right}")]
    ScaleMismatch { left: u32, right: u32 },
    #[error("subtraction underflow")]
    Underflow,
}

impl MathError {
    pub fn code(&self) -> u32 {
        match self {
            MathError::InvalidAmount(_) => 1,
            MathError::InvalidHex(_) => 2,
            MathError::InvalidTimestamp(_) => 3,
            MathError::ScaleMismatch { .. } => 4,
            MathError::Underflow => 5,
        }
    }
}
