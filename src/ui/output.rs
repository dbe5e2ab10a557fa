//! Report rendering for tlsup

use crate::core::constants::output_formats;
use crate::core::error::{Result, TlsUpError};
use crate::core::types::{ProbeReport, ProbeStatus};
use crate::ui::color::{Colors, colorize, status_color};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const JSON_INDENT: &[u8] = b"    ";

/// Width of the widest status label, used to align text output
fn label_width() -> usize {
    ProbeStatus::ALL
        .iter()
        .map(|status| status.label().len())
        .max()
        .unwrap_or(0)
}

/// Render the report in the requested format
pub fn render_report(report: &ProbeReport, format: &str) -> Result<String> {
    match format {
        output_formats::JSON => render_json(report),
        output_formats::TEXT => Ok(render_text(report)),
        output_formats::MINIMAL => Ok(render_minimal(report)),
        other => Err(TlsUpError::InvalidArgument(format!(
            "Unknown output format '{other}'. Expected one of: {}.",
            output_formats::ALL.join(", ")
        ))),
    }
}

/// Print the report to stdout
pub fn display_report(report: &ProbeReport, format: &str) -> Result<()> {
    let rendered = render_report(report, format)?;
    println!("{rendered}");
    Ok(())
}

/// JSON array of `{url, status}` objects, four-space indented
pub fn render_json(report: &ProbeReport) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    report.serialize(&mut serializer)?;

    String::from_utf8(buffer)
        .map_err(|e| TlsUpError::InvalidArgument(format!("report is not valid UTF-8: {e}")))
}

/// Aligned lines followed by a summary
pub fn render_text(report: &ProbeReport) -> String {
    let width = label_width();
    let mut lines: Vec<String> = report
        .iter()
        .map(|outcome| {
            let label = format!("{:<width$}", outcome.status().label());
            let label = colorize(&label, status_color(outcome.status()));
            match outcome.detail() {
                Some(detail) => format!("{label}  {}  {}", outcome.url(), detail),
                None => format!("{label}  {}", outcome.url()),
            }
        })
        .collect();

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(summary_line(report));
    lines.join("\n")
}

/// `<category> <url>` per line
pub fn render_minimal(report: &ProbeReport) -> String {
    report
        .iter()
        .map(|outcome| format!("{} {}", outcome.status().label(), outcome.url()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_line(report: &ProbeReport) -> String {
    let total = report.len();
    let valid = report.valid_count();
    let failed = report.failure_count();

    let summary = format!("{total} target(s): {valid} valid, {failed} failed");
    let color = if failed == 0 { Colors::GREEN } else { Colors::RED };
    colorize(&summary, color)
}
