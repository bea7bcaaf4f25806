//! Overflow-checked timestamp arithmetic

use crate::error::{Error, Result};
use std::time::Duration;

/// Offset a timestamp by a signed number of seconds with overflow protection
pub(crate) fn offset_timestamp(timestamp: i64, seconds: i64) -> Result<i64> {
    timestamp
        .checked_add(seconds)
        .ok_or(Error::TimestampOverflow)
}

/// Convert a duration to whole seconds, truncating sub-second precision
pub(crate) fn duration_seconds(duration: Duration) -> Result<i64> {
    i64::try_from(duration.as_secs()).map_err(|_| Error::TimestampOverflow)
}
