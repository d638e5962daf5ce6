//! Shared "load a chart" logic used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset fetch -> CSV ingest -> controller -> requested axis selection
//!
//! The CLI commands and the TUI can then focus on presentation.

use std::time::Instant;

use crate::chart::ChartController;
use crate::cli::ViewArgs;
use crate::domain::{Axis, Record};
use crate::error::AppError;
use crate::io::ingest::{DataSource, IngestedData, load_records};

/// Outputs of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedChart {
    pub ingest: IngestedData,
    pub chart: ChartController,
}

/// Load the dataset and build a controller showing the requested fields.
pub fn load_chart(source: &DataSource, view: &ViewArgs) -> Result<LoadedChart, AppError> {
    let ingest = load_records(source)?;
    let chart = build_chart(ingest.records.clone(), view)?;
    Ok(LoadedChart { ingest, chart })
}

/// Build a controller and apply `--x` / `--y` without animating them.
pub fn build_chart(records: Vec<Record>, view: &ViewArgs) -> Result<ChartController, AppError> {
    let mut chart = ChartController::new(records, view.chart_config()?)?;
    let now = Instant::now();
    if let Some(field) = view.x {
        chart.select_axis(Axis::X, field, now)?;
    }
    if let Some(field) = view.y {
        chart.select_axis(Axis::Y, field, now)?;
    }
    chart.settle();
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Field;
    use crate::error::{EXIT_INPUT, EXIT_NO_DATA};
    use std::io::Write;

    const CSV: &str = "\
id,state,abbr,poverty,age,income,healthcare,obesity,smokes
1,Alabama,AL,18.2,38.3,43634,11.4,31.0,22.4
2,Alaska,AK,10.0,33.3,70758,14.9,29.7,19.3
";

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn requested_fields_are_applied_at_rest() {
        let file = csv_file(CSV);
        let view = ViewArgs {
            x: Some(Field::Age),
            y: Some(Field::Smokes),
            ..ViewArgs::default()
        };
        let loaded = load_chart(&DataSource::File(file.path().to_path_buf()), &view).unwrap();
        assert_eq!(loaded.ingest.rows_used, 2);

        let chart = loaded.chart;
        assert_eq!(chart.selection().x, Field::Age);
        assert_eq!(chart.selection().y, Field::Smokes);
        let now = Instant::now();
        assert!(!chart.is_animating(now));
        assert_eq!(chart.frame(now), chart.resting_frame());
    }

    #[test]
    fn field_on_wrong_axis_is_an_input_error() {
        let file = csv_file(CSV);
        let view = ViewArgs {
            x: Some(Field::Obesity),
            ..ViewArgs::default()
        };
        let err = load_chart(&DataSource::File(file.path().to_path_buf()), &view).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.message().contains("obesity"));
    }

    #[test]
    fn header_only_file_has_no_data() {
        let file = csv_file("state,abbr,poverty,age,income,healthcare,obesity,smokes\n");
        let err = load_chart(&DataSource::File(file.path().to_path_buf()), &ViewArgs::default()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NO_DATA);
    }
}
