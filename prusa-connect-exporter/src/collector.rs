//! Scrape-time collection of printer metrics.

use prusa_connect_client::{TelemetryClient, TelemetrySource};
use prusa_connect_types::MetricDescriptor;
use tracing::{debug, warn};

use crate::render::render_exposition;
use crate::translate::{samples, METRICS};

/// Samples collected in emission order, tagged with their descriptors.
pub type Samples = Vec<(&'static MetricDescriptor, f64)>;

/// Receives the samples produced by one collection.
pub trait MetricSink {
    fn emit(&mut self, descriptor: &'static MetricDescriptor, value: f64);
}

impl MetricSink for Samples {
    fn emit(&mut self, descriptor: &'static MetricDescriptor, value: f64) {
        self.push((descriptor, value));
    }
}

/// Collects printer metrics on demand.
///
/// Each call to [`collect`](Self::collect) fetches one fresh telemetry record
/// and translates it; nothing is kept between calls. The collector is
/// read-only after construction and can be shared across concurrent scrapes
/// behind an `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use prusa_connect_client::TelemetryClient;
/// use prusa_connect_exporter::{Samples, TelemetryCollector};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TelemetryClient::builder()
///         .endpoint("http://printer.local")
///         .build()?;
///     let collector = TelemetryCollector::new(client);
///
///     let mut samples = Samples::new();
///     let emitted = collector.collect(&mut samples).await;
///     println!("{} samples", emitted);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TelemetryCollector<S = TelemetryClient> {
    source: S,
}

impl<S: TelemetrySource> TelemetryCollector<S> {
    /// Create a collector reading from the given telemetry source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The telemetry source this collector reads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Descriptors of every metric this collector can emit.
    pub fn describe(&self) -> impl Iterator<Item = &'static MetricDescriptor> {
        METRICS.iter().map(|metric| &metric.descriptor)
    }

    /// Fetch one telemetry record and emit its samples into `sink`.
    ///
    /// A failed fetch or an undecodable response is logged and emits nothing;
    /// the scrape itself still succeeds. Returns the number of samples emitted.
    pub async fn collect<K: MetricSink>(&self, sink: &mut K) -> usize {
        let record = match self.source.fetch().await {
            Ok(record) => record,
            Err(e) if e.is_decode() => {
                warn!(error = %e, "failed to decode telemetry");
                return 0;
            }
            Err(e) => {
                warn!(error = %e, "failed to get telemetry");
                return 0;
            }
        };

        let mut emitted = 0;
        for (descriptor, value) in samples(&record) {
            sink.emit(descriptor, value);
            emitted += 1;
        }

        debug!(emitted, "collected telemetry samples");
        emitted
    }

    /// Collect and render the result in the text exposition format.
    pub async fn scrape(&self) -> String {
        let mut collected = Samples::new();
        self.collect(&mut collected).await;
        render_exposition(&collected)
    }
}
