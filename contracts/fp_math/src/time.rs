use crate::MathError;
use chrono::{DateTime, TimeZone, Utc};

const SECONDS_PER_MINUTE: u64 = 60;

/// Seconds since the Unix epoch, sub-second precision dropped.
pub fn to_ledger_time<Tz: TimeZone>(at: &DateTime<Tz>) -> Result<u64, MathError> {
    let seconds = at.timestamp();
    u64::try_from(seconds).map_err(|_| MathError::InvalidTimestamp(seconds.into()))
}

/// Ledger schedules are only minute-precise, so the seconds are cut off.
pub fn from_ledger_time_to_minutes(seconds: u64) -> Result<DateTime<Utc>, MathError> {
    let truncated = seconds - seconds % SECONDS_PER_MINUTE;
    let signed =
        i64::try_from(truncated).map_err(|_| MathError::InvalidTimestamp(truncated.into()))?;
    DateTime::<Utc>::from_timestamp(signed, 0).ok_or(MathError::InvalidTimestamp(signed.into()))
}
