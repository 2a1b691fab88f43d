//! Elapsed-time parsing for the printer's `print_dur` field.
//!
//! The printer reports durations as a sequence of `<integer><unit>` tokens,
//! optionally separated by spaces, e.g. `"1d 2h"` or `"1h30m5s"`. Only whole
//! seconds are representable, so the parsed value is carried as [`Seconds`].

use core::fmt;
use core::time::Duration;

use thiserror::Error;

/// Upper bound (inclusive) for every accumulated value: 2^63.
const LIMIT: u64 = 1 << 63;

/// Unit suffix to seconds multiplier. Matching is exact and case sensitive.
const UNITS: &[(&str, u64)] = &[("s", 1), ("m", 60), ("h", 3_600), ("d", 86_400)];

/// Whole seconds of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Seconds(pub u64);

impl Seconds {
    /// Create from a second count.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the value in seconds.
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Get the value as a float, for gauge emission.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Convert to a standard Duration.
    pub const fn to_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl From<Duration> for Seconds {
    /// Sub-second precision is truncated.
    fn from(d: Duration) -> Self {
        Self(d.as_secs())
    }
}

impl From<Seconds> for Duration {
    fn from(s: Seconds) -> Self {
        Duration::from_secs(s.0)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Reasons a duration string is rejected.
///
/// Every variant carries the complete original input for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// A token did not start with a digit.
    #[error("missing value in duration \"{input}\"")]
    MissingValue { input: String },

    /// A number was not followed by a unit.
    #[error("missing unit in duration \"{input}\"")]
    MissingUnit { input: String },

    /// The unit is not one of `s`, `m`, `h`, `d`.
    #[error("unknown unit \"{unit}\" in duration \"{input}\"")]
    UnknownUnit { unit: String, input: String },

    /// A value, scaled value or running total exceeded 2^63 seconds.
    #[error("invalid duration \"{input}\": value out of range")]
    Overflow { input: String },
}

/// Parse a duration string like `"1h 30m 5s"` into whole seconds.
///
/// Tokens are read left to right in a single pass. Leading spaces before each
/// token are skipped (other whitespace is not), repeated units accumulate
/// (`"30s 40s"` is 70 seconds) and the empty string is a zero duration.
///
/// ```rust
/// use prusa_connect_types::parse_duration;
///
/// assert_eq!(parse_duration("1h 30m 5s").unwrap().as_secs(), 5405);
/// assert!(parse_duration("5x").is_err());
/// ```
pub fn parse_duration(s: &str) -> Result<Seconds, DurationError> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    let mut total: u64 = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos] == b' ' {
            pos += 1;
        }

        let value_start = pos;
        let mut value: u64 = 0;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            if value > LIMIT / 10 {
                return Err(overflow(s));
            }
            value = value * 10 + u64::from(bytes[pos] - b'0');
            if value > LIMIT {
                return Err(overflow(s));
            }
            pos += 1;
        }
        if pos == value_start {
            return Err(DurationError::MissingValue {
                input: s.to_string(),
            });
        }

        // Stops on ASCII bytes only, so the slice below is on a char boundary.
        let unit_start = pos;
        while pos < bytes.len() && bytes[pos] != b' ' && !bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == unit_start {
            return Err(DurationError::MissingUnit {
                input: s.to_string(),
            });
        }

        let unit = &s[unit_start..pos];
        let scale = unit_seconds(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: s.to_string(),
        })?;

        if value > LIMIT / scale {
            return Err(overflow(s));
        }
        total = total
            .checked_add(value * scale)
            .filter(|t| *t <= LIMIT)
            .ok_or_else(|| overflow(s))?;
    }

    Ok(Seconds(total))
}

fn unit_seconds(unit: &str) -> Option<u64> {
    UNITS
        .iter()
        .find(|(suffix, _)| *suffix == unit)
        .map(|(_, secs)| *secs)
}

fn overflow(input: &str) -> DurationError {
    DurationError::Overflow {
        input: input.to_string(),
    }
}
