use chrono::{DateTime, TimeDelta, Utc};

use crate::error::ValidationError;

/// Closed time range `[end - seconds, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Builds the trailing window of `seconds` ending at `end`.
    ///
    /// # Errors
    ///
    /// Returns an error when the window start falls outside the supported
    /// timestamp range.
    pub fn trailing(end: DateTime<Utc>, seconds: u64) -> Result<Self, ValidationError> {
        let start = i64::try_from(seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| end.checked_sub_signed(delta))
            .ok_or_else(|| ValidationError::WindowOutOfRange {
                seconds,
                end: end.to_rfc3339(),
            })?;
        Ok(Self { start, end })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};

    use super::TimeWindow;

    #[test]
    fn trailing_window_ends_at_anchor() -> Result<(), String> {
        let end = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).ok_or("bad timestamp")?;
        let window = TimeWindow::trailing(end, 300).map_err(|err| err.to_string())?;
        if window.end != end {
            return Err("Unexpected window end".to_owned());
        }
        let expected = TimeDelta::try_seconds(300).ok_or("bad delta")?;
        if window.end.signed_duration_since(window.start) != expected {
            return Err(format!("Unexpected window start: {}", window.start));
        }
        Ok(())
    }

    #[test]
    fn oversized_window_is_rejected() -> Result<(), String> {
        let end = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).ok_or("bad timestamp")?;
        if TimeWindow::trailing(end, u64::MAX).is_ok() {
            return Err("Expected oversized window to fail".to_owned());
        }
        Ok(())
    }
}
