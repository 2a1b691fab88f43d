//! Metric metadata and samples handed to the exposition layer.

use core::fmt;

/// The type of a metric family as declared in `# TYPE` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// A single instantaneous value that may go up or down.
    Gauge,
}

impl MetricKind {
    /// The keyword used by the text exposition format.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata describing one metric family.
///
/// Descriptors are defined once, at compile time, and shared by every scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricDescriptor {
    /// Fully qualified metric name, e.g. `prusa_connect_temp_nozzle`.
    pub name: &'static str,
    /// One line of help text.
    pub help: &'static str,
    /// Metric type.
    pub kind: MetricKind,
}

impl MetricDescriptor {
    /// Create a gauge descriptor.
    pub const fn gauge(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            kind: MetricKind::Gauge,
        }
    }
}

/// One value produced for a metric during a scrape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    /// Name of the metric family this value belongs to.
    pub name: &'static str,
    /// The observed value.
    pub value: f64,
}

impl MetricSample {
    pub const fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }
}
