//! Formatted terminal output for a loaded chart.
//!
//! We keep formatting code in one place so output changes stay localized and
//! the strings can be checked directly in tests.

use crate::chart::{ChartController, LabelState};
use crate::chart::tooltip::format_value;
use crate::domain::Axis;
use crate::io::ingest::IngestedData;

/// Format the full summary: dataset stats, axis selection, scales, markers.
pub fn format_summary(ingest: &IngestedData, chart: &ChartController) -> String {
    let mut out = String::new();
    let selection = chart.selection();

    out.push_str("=== scatter - census scatter plot ===\n");
    out.push_str(&format!("Source: {}\n", ingest.source));
    out.push_str(&format!(
        "Rows: read={} used={} rejected={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));

    out.push_str("\nField ranges:\n");
    for s in &ingest.stats {
        out.push_str(&format!(
            "  {:<12} [{}, {}]\n",
            s.field.column(),
            format_value(s.min),
            format_value(s.max)
        ));
    }

    out.push_str("\nAxes:\n");
    for axis in Axis::ALL {
        let scale = chart.scale(axis);
        let labels = chart
            .selector_labels(axis)
            .iter()
            .map(|l| match l.state {
                LabelState::Active => format!("[{}]", l.text),
                LabelState::Inactive => l.text.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&format!(
            "  {axis}: {} domain=[{:.3}, {:.3}] range=[{:.0}, {:.0}]\n",
            selection.get(axis),
            scale.domain[0],
            scale.domain[1],
            scale.range[0],
            scale.range[1],
        ));
        out.push_str(&format!("     {labels}\n"));
    }

    if !ingest.row_errors.is_empty() {
        out.push_str("\nRejected rows:\n");
        for e in &ingest.row_errors {
            out.push_str(&format!(
                "  line {:>4} {:<16} {}\n",
                e.line,
                truncate(e.state.as_deref().unwrap_or("-"), 16),
                e.message
            ));
        }
    }

    out.push_str("\nMarkers:\n");
    out.push_str(&format_marker_table(chart));
    out
}

/// One row per marker: label, raw values and resting pixel position.
pub fn format_marker_table(chart: &ChartController) -> String {
    let selection = chart.selection();
    let frame = chart.resting_frame();
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<20} {:<4} {:>12} {:>12} {:>8} {:>8}",
            "state",
            "abbr",
            selection.x.column(),
            selection.y.column(),
            "px",
            "py"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<20} {:-<4} {:-<12} {:-<12} {:-<8} {:-<8}", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for (r, m) in chart.records().iter().zip(&frame.markers) {
        out.push_str(
            format!(
                "{:<20} {:<4} {:>12} {:>12} {:>8.1} {:>8.1}",
                truncate(&r.state, 20),
                truncate(&r.abbr, 4),
                format_value(r.value(selection.x)),
                format_value(r.value(selection.y)),
                m.x,
                m.y
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
