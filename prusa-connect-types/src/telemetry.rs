//! Telemetry record reported by a Prusa Connect printer.

use core::num::ParseFloatError;

use thiserror::Error;

use crate::{parse_duration, DurationError, Seconds};

/// Reasons the time estimate is not a usable number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// The text is not a floating-point number.
    #[error("invalid time estimate: {0}")]
    Invalid(#[from] ParseFloatError),

    /// The number is too large to be represented as a finite float.
    #[error("time estimate \"{input}\" out of range")]
    OutOfRange { input: String },
}

/// A snapshot of printer state as returned by `GET /api/telemetry`.
///
/// Every field is optional on the wire: a missing key or a `null` decodes to
/// its zero value, and keys not listed here are ignored. The two free-form string
/// fields are kept verbatim and only interpreted on demand, so a malformed
/// value affects nothing but its own accessor.
///
/// # Example
///
/// ```rust
/// use prusa_connect_types::TelemetryRecord;
///
/// let record = TelemetryRecord {
///     nozzle_temperature: 215,
///     print_duration: "1h 2m".to_string(),
///     ..Default::default()
/// };
///
/// assert_eq!(record.print_duration_secs().unwrap().as_secs(), 3720);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TelemetryRecord {
    /// Nozzle temperature in degrees Celsius.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "temp_nozzle", deserialize_with = "null_as_default")
    )]
    pub nozzle_temperature: i64,

    /// Bed temperature in degrees Celsius.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "temp_bed", deserialize_with = "null_as_default")
    )]
    pub bed_temperature: i64,

    /// Loaded filament type, e.g. `PLA`.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "null_as_default"))]
    pub material: String,

    /// Print head height in millimeters.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "pos_z_mm", deserialize_with = "null_as_default")
    )]
    pub z_position: f64,

    /// Speed multiplier in percent.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "null_as_default"))]
    pub printing_speed: i64,

    /// Extrusion flow multiplier in percent.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "null_as_default"))]
    pub flow_factor: i64,

    /// Job completion in percent.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "null_as_default"))]
    pub progress: i64,

    /// Elapsed job time, e.g. `"1h 30m 5s"`.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "print_dur", deserialize_with = "null_as_default")
    )]
    pub print_duration: String,

    /// Estimated remaining job time in seconds, as a numeric string.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "time_est", deserialize_with = "null_as_default")
    )]
    pub time_estimated: String,

    /// Time zone configured on the printer.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "null_as_default"))]
    pub time_zone: String,

    /// Name of the file being printed.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "null_as_default"))]
    pub project_name: String,
}

impl TelemetryRecord {
    /// Parse [`print_duration`](Self::print_duration) into whole seconds.
    pub fn print_duration_secs(&self) -> Result<Seconds, DurationError> {
        parse_duration(&self.print_duration)
    }

    /// Parse [`time_estimated`](Self::time_estimated) as a float.
    ///
    /// A number too large for `f64` is rejected rather than rounded to
    /// infinity; only a spelled-out `inf`/`infinity` yields an infinite value.
    pub fn time_estimated_secs(&self) -> Result<f64, EstimateError> {
        let value: f64 = self.time_estimated.parse()?;

        if value.is_infinite() && !is_spelled_infinity(&self.time_estimated) {
            return Err(EstimateError::OutOfRange {
                input: self.time_estimated.clone(),
            });
        }
        Ok(value)
    }
}

fn is_spelled_infinity(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Decode a field whose `null` means the same as an absent key.
#[cfg(feature = "serde")]
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;

    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
