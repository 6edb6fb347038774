//! Timestamp helpers for `HH:MM:SS` tool arguments.

use mediaclip_mcp_common::error::Error;

/// Parse a colon-delimited `HOURS:MINUTES:SECONDS` timestamp into seconds.
///
/// Exactly three numeric components are required; anything else is
/// rejected before it can reach the engine as a garbage seek offset.
///
/// # Example
///
/// ```
/// use mediaclip_mcp::time::timestamp_to_seconds;
///
/// assert_eq!(timestamp_to_seconds("01:02:03").unwrap(), 3723.0);
/// ```
pub fn timestamp_to_seconds(ts: &str) -> Result<f64, Error> {
    let parts: Vec<&str> = ts.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(Error::validation(format!(
            "Invalid timestamp '{}'. Expected format: HH:MM:SS",
            ts
        )));
    }

    let mut components = [0f64; 3];
    for (i, part) in parts.iter().enumerate() {
        let value: f64 = part.parse().map_err(|_| {
            Error::validation(format!(
                "Invalid timestamp '{}': '{}' is not a number",
                ts, part
            ))
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(Error::validation(format!(
                "Invalid timestamp '{}': components must be non-negative",
                ts
            )));
        }
        components[i] = value;
    }

    Ok(components[0] * 3600.0 + components[1] * 60.0 + components[2])
}

/// Seconds elapsed between two timestamps.
///
/// `end` must be chronologically after `start`; a non-positive
/// difference is an invalid duration and is rejected here rather than
/// handed to the engine.
pub fn time_difference(start: &str, end: &str) -> Result<f64, Error> {
    let start_secs = timestamp_to_seconds(start)?;
    let end_secs = timestamp_to_seconds(end)?;

    let diff = end_secs - start_secs;
    if diff <= 0.0 {
        return Err(Error::validation(format!(
            "end time '{}' must be after start time '{}'",
            end, start
        )));
    }
    Ok(diff)
}
