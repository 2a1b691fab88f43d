//! Prometheus text exposition format (version 0.0.4).

use std::fmt::Write;

use prusa_connect_types::MetricDescriptor;

/// `Content-Type` header value for rendered output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Format collected samples as Prometheus exposition text.
///
/// Every sample is written as its own family with `# HELP` and `# TYPE`
/// comments, in the order given. Metrics without a sample are not mentioned
/// at all, so an empty slice renders an empty body.
pub fn render_exposition(samples: &[(&MetricDescriptor, f64)]) -> String {
    let mut output = String::new();

    for (descriptor, value) in samples {
        // Writing to a String cannot fail.
        let _ = writeln!(
            output,
            "# HELP {} {}",
            descriptor.name,
            escape_help(descriptor.help)
        );
        let _ = writeln!(output, "# TYPE {} {}", descriptor.name, descriptor.kind);
        let _ = writeln!(output, "{} {}", descriptor.name, format_value(*value));
    }

    output
}

/// Format a sample value the way Prometheus parses it.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        value.to_string()
    }
}

/// Escape help text for Prometheus format.
/// Backslash and newline must be escaped.
fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}
