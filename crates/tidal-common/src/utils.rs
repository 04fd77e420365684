//! Tidal Utils - Utility Functions
//!
//! Integer alignment helpers for timestamps and calendar helpers for
//! day-start alignment.
//!
//! Key Features:
//! - Floor/ceil alignment of signed timestamps to a positive step
//! - UTC midnight of the calendar day containing a timestamp
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use crate::types::TimeUnit;
use chrono::DateTime;

// =============================================================================
// Alignment Utilities
// =============================================================================

/// Align a timestamp down to the nearest multiple of `step`.
///
/// Negative timestamps round toward negative infinity, so the result is
/// never after `value`. `step` must be positive.
#[inline]
pub const fn align_down(value: i64, step: i64) -> i64 {
    value.div_euclid(step) * step
}

/// Align a timestamp down to `origin + k * step` for the largest `k` that
/// does not pass `value`.
#[inline]
pub const fn align_down_from(value: i64, origin: i64, step: i64) -> i64 {
    origin + align_down(value - origin, step)
}

/// Integer division rounding up. `step` must be positive.
#[inline]
pub const fn ceil_div(value: u64, step: u64) -> u64 {
    value / step + (value % step != 0) as u64
}

// =============================================================================
// Calendar Utilities
// =============================================================================

/// Timestamp of UTC midnight of the day containing `value`.
pub fn utc_day_start(value: i64, unit: TimeUnit) -> i64 {
    let ticks = unit.ticks_per_second();
    let secs = value.div_euclid(ticks);
    let nanos = (value.rem_euclid(ticks) * (1_000_000_000 / ticks)) as u32;

    DateTime::from_timestamp(secs, nanos)
        .and_then(|dt| dt.date_naive().and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp() * ticks)
        .unwrap_or_else(|| align_down(value, unit.ticks_per_day()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_alignment() {
        assert_eq!(align_down(0, 8), 0);
        assert_eq!(align_down(7, 8), 0);
        assert_eq!(align_down(8, 8), 8);
        assert_eq!(align_down(15, 8), 8);
        assert_eq!(align_down(-1, 8), -8);

        assert_eq!(align_down_from(10, 3, 4), 7);
        assert_eq!(align_down_from(3, 3, 4), 3);

        assert_eq!(ceil_div(0, 4), 0);
        assert_eq!(ceil_div(1, 4), 1);
        assert_eq!(ceil_div(8, 4), 2);
        assert_eq!(ceil_div(9, 4), 3);
        assert_eq!(ceil_div(u64::MAX, 2), 1 << 63);
        assert_eq!(ceil_div(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn test_utc_day_start() {
        let day = Utc.with_ymd_and_hms(2022, 5, 7, 0, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2022, 5, 7, 12, 34, 56).unwrap();

        assert_eq!(
            utc_day_start(noon.timestamp_millis(), TimeUnit::Millis),
            day.timestamp_millis()
        );
        assert_eq!(utc_day_start(noon.timestamp(), TimeUnit::Seconds), day.timestamp());
        assert_eq!(
            utc_day_start(day.timestamp_millis(), TimeUnit::Millis),
            day.timestamp_millis()
        );
    }

    #[test]
    fn test_utc_day_start_before_epoch() {
        assert_eq!(utc_day_start(-1, TimeUnit::Seconds), -86_400);
    }
}
