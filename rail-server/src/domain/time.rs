//! Time-of-day handling for timetables.
//!
//! Timetables give times as "HH:MM:SS" strings with no date attached. A run
//! that passes midnight simply wraps back to "00:..", and the route search
//! compares times of day directly, so this type is deliberately date-free.

use chrono::{Duration, NaiveTime};
use std::fmt;
use std::ops::Add;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with second precision.
///
/// Ordering is chronological within a day, which is the same order the
/// zero-padded "HH:MM:SS" strings sort in.
///
/// # Examples
///
/// ```
/// use rail_server::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse("08:10:10").unwrap();
/// assert_eq!(t.to_string(), "08:10:10");
/// assert!(TimeOfDay::midnight() < t);
///
/// assert!(TimeOfDay::parse("8:10:10").is_err());
/// assert!(TimeOfDay::parse("24:00:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// 00:00:00, the earliest possible time.
    pub fn midnight() -> Self {
        Self(NaiveTime::default())
    }

    /// Create a time from hour, minute and second components.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or_else(|| TimeError::new("component out of range"))
    }

    /// Parse a time from "HH:MM:SS" format.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 8 characters: HH:MM:SS
        if s.len() != 8 {
            return Err(TimeError::new("expected HH:MM:SS format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(TimeError::new("expected colons at positions 2 and 5"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = parse_two_digits(&bytes[6..8])
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Self::from_hms(hour, minute, second)
    }
}

/// Adding a duration wraps around midnight.
impl Add<Duration> for TimeOfDay {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        let (time, _) = self.0.overflowing_add_signed(rhs);
        Self(time)
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({self})")
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
