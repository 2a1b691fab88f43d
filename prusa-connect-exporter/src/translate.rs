//! Translation of a telemetry record into gauge samples.
//!
//! All exported metrics are described by one ordered table, [`METRICS`].
//! Each entry pairs a descriptor with the function that reads its value out
//! of a [`TelemetryRecord`]. The table drives descriptor listing, sample
//! extraction and rendering, so its order is the exposition order.

use std::fmt;

use prusa_connect_types::{MetricDescriptor, MetricSample, TelemetryRecord};
use tracing::debug;

/// Reads one value out of a record. `None` means the field could not be
/// interpreted and the sample is left out of this scrape.
type Extractor = fn(&TelemetryRecord) -> Option<f64>;

/// One exported metric: its descriptor and how to compute its value.
pub struct Metric {
    pub descriptor: MetricDescriptor,
    extract: Extractor,
}

impl Metric {
    const fn new(descriptor: MetricDescriptor, extract: Extractor) -> Self {
        Self {
            descriptor,
            extract,
        }
    }

    /// Compute this metric's value for a record, if it has one.
    pub fn value(&self, record: &TelemetryRecord) -> Option<f64> {
        (self.extract)(record)
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Every metric the exporter knows about, in exposition order.
pub static METRICS: [Metric; 8] = [
    Metric::new(
        MetricDescriptor::gauge(
            "prusa_connect_temp_nozzle",
            "Temperature of the print nozzle in celsius",
        ),
        |r| Some(r.nozzle_temperature as f64),
    ),
    Metric::new(
        MetricDescriptor::gauge(
            "prusa_connect_temp_bed",
            "Temperature of the print bed in celsius",
        ),
        |r| Some(r.bed_temperature as f64),
    ),
    Metric::new(
        MetricDescriptor::gauge(
            "prusa_connect_z_pozition",
            "Vertical pozition of the print head in millimeters",
        ),
        |r| Some(r.z_position),
    ),
    Metric::new(
        MetricDescriptor::gauge(
            "prusa_connect_printing_speed",
            "Printing speed as a percentage",
        ),
        |r| Some(r.printing_speed as f64),
    ),
    Metric::new(
        MetricDescriptor::gauge("prusa_connect_flow_factor", "Flow factor"),
        |r| Some(r.flow_factor as f64),
    ),
    Metric::new(
        MetricDescriptor::gauge(
            "prusa_connect_progress",
            "Print completeness as a percentage",
        ),
        |r| Some(r.progress as f64),
    ),
    Metric::new(
        MetricDescriptor::gauge(
            "prusa_connect_print_duration",
            "Time passed since the current print job started in seconds",
        ),
        print_duration,
    ),
    Metric::new(
        MetricDescriptor::gauge(
            "prusa_connect_time_estimated",
            "Estimated time remaining of the current print job in seconds",
        ),
        time_estimated,
    ),
];

fn print_duration(record: &TelemetryRecord) -> Option<f64> {
    match record.print_duration_secs() {
        Ok(secs) => Some(secs.as_f64()),
        Err(e) => {
            debug!(error = %e, "omitting print duration sample");
            None
        }
    }
}

fn time_estimated(record: &TelemetryRecord) -> Option<f64> {
    match record.time_estimated_secs() {
        Ok(secs) => Some(secs),
        Err(e) => {
            debug!(
                value = %record.time_estimated,
                error = %e,
                "omitting time estimated sample"
            );
            None
        }
    }
}

/// Iterate the samples a record yields, each tagged with its descriptor.
pub fn samples(
    record: &TelemetryRecord,
) -> impl Iterator<Item = (&'static MetricDescriptor, f64)> + '_ {
    METRICS
        .iter()
        .filter_map(move |metric| metric.value(record).map(|v| (&metric.descriptor, v)))
}

/// Translate a record into named samples.
///
/// The six numeric fields always produce a sample. The print duration and the
/// time estimate only do when they parse; a malformed value drops that one
/// sample and nothing else.
pub fn translate(record: &TelemetryRecord) -> Vec<MetricSample> {
    samples(record)
        .map(|(descriptor, value)| MetricSample::new(descriptor.name, value))
        .collect()
}
