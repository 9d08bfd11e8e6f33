//! Shared API helper functions.

use crate::error::ApiError;

/// Format a unix timestamp (seconds) as RFC3339.
pub fn format_timestamp_rfc3339(timestamp: u64) -> Result<String, ApiError> {
    let timestamp = i64::try_from(timestamp)
        .map_err(|_| ApiError::Internal(anyhow::anyhow!("Timestamp out of range")))?;
    Ok(chrono::DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("Invalid timestamp")))?
        .to_rfc3339())
}
