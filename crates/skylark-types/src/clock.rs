//! Local wall-clock time derived from weather-service timestamps.

use core::fmt;

/// Hour and minute of a local wall clock.
///
/// The weather service reports sunrise and sunset as Unix timestamps plus a
/// timezone offset in seconds; this converts them to the station's
/// zero-padded "HH:MM" rendering.
///
/// # Example
///
/// ```
/// use skylark_types::ClockTime;
///
/// // 2024-09-10 06:24 EAT (UTC+3) for Nairobi
/// let sunrise = ClockTime::from_unix(1_725_938_640, 3 * 3600);
/// assert_eq!(sunrise.to_string(), "06:24");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    /// Hour of the day (0-23).
    pub hour: u8,
    /// Minute of the hour (0-59).
    pub minute: u8,
}

impl ClockTime {
    /// Convert a Unix timestamp plus timezone offset to local hour/minute.
    ///
    /// Uses euclidean remainders so pre-epoch timestamps and negative
    /// offsets still land in `0..86400`.
    #[must_use]
    pub fn from_unix(timestamp: i64, tz_offset_secs: i64) -> Self {
        let seconds_in_day = (timestamp + tz_offset_secs).rem_euclid(86_400);
        Self {
            hour: (seconds_in_day / 3600) as u8,
            minute: (seconds_in_day % 3600 / 60) as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
