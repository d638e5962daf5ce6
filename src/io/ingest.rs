//! CSV ingest and numeric coercion.
//!
//! This module is responsible for turning the census CSV into a clean set of
//! `Record`s that are safe to plot.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation**: a row with a missing or non-numeric value is
//!   skipped and reported instead of producing a NaN marker
//! - **Separation of concerns**: no scaling or drawing logic here

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::StringRecord;
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::domain::{Field, Record};
use crate::error::{AppError, EXIT_NO_DATA};
use crate::math::extent;

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Observed range of one field across the loaded records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub field: Field,
    pub min: f64,
    pub max: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub state: Option<String>,
    pub message: String,
}

/// Ingest output: records + per-field stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub source: String,
    pub records: Vec<Record>,
    pub stats: Vec<FieldStats>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

const REQUIRED_TEXT_COLUMNS: [&str; 2] = ["state", "abbr"];

/// Fetch and parse the dataset.
pub fn load_records(source: &DataSource) -> Result<IngestedData, AppError> {
    info!(%source, "loading dataset");
    let data = match source {
        DataSource::File(path) => File::open(path)
            .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))
            .and_then(|file| parse_records(file, source.to_string())),
        DataSource::Url(url) => {
            fetch_url(url).and_then(|body| parse_records(body.as_bytes(), source.to_string()))
        }
    };

    match &data {
        Ok(d) => info!(
            rows_read = d.rows_read,
            rows_used = d.rows_used,
            rejected = d.row_errors.len(),
            "dataset loaded"
        ),
        Err(e) => warn!(error = %e, "dataset load failed"),
    }
    data
}

fn fetch_url(url: &str) -> Result<String, AppError> {
    let client = Client::new();
    let response = client
        .get(url)
        .send()
        .map_err(|e| AppError::input(format!("Failed to fetch '{url}': {e}")))?;
    let response = response
        .error_for_status()
        .map_err(|e| AppError::input(format!("Dataset request failed for '{url}': {e}")))?;
    response
        .text()
        .map_err(|e| AppError::input(format!("Failed to read response body from '{url}': {e}")))
}

/// Parse CSV text into records.
pub fn parse_records<R: Read>(reader: R, source: String) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header line and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    state: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(r) => records.push(r),
            Err(message) => {
                debug!(line, %message, "row rejected");
                row_errors.push(RowError {
                    line,
                    state: get_optional(&record, &header_map, "state").map(str::to_string),
                    message,
                });
            }
        }
    }

    let rows_used = records.len();
    if rows_used == 0 {
        return Err(AppError::new(
            EXIT_NO_DATA,
            "No valid rows remain after numeric coercion.",
        ));
    }

    let stats = compute_stats(&records);

    Ok(IngestedData {
        source,
        records,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_TEXT_COLUMNS
        .into_iter()
        .chain(Field::ALL.iter().map(|f| f.column()))
        .filter(|name| !header_map.contains_key(*name))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    let list = missing
        .iter()
        .map(|m| format!("`{m}`"))
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::input(format!("Missing required column(s): {list}")))
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Record, String> {
    let state = get_required(record, header_map, "state")?.to_string();
    let abbr = get_required(record, header_map, "abbr")?.to_string();

    let num = |field: Field| -> Result<f64, String> {
        parse_f64(get_required(record, header_map, field.column())?, field)
    };

    Ok(Record {
        poverty: num(Field::Poverty)?,
        age: num(Field::Age)?,
        income: num(Field::Income)?,
        healthcare: num(Field::Healthcare)?,
        smokes: num(Field::Smokes)?,
        obesity: num(Field::Obesity)?,
        state,
        abbr,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    get_optional(record, header_map, name).ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_f64(s: &str, field: Field) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid `{field}` value '{s}' (expected a finite number).")),
    }
}

fn compute_stats(records: &[Record]) -> Vec<FieldStats> {
    Field::ALL
        .iter()
        .filter_map(|&field| {
            let (min, max) = extent(records.iter().map(|r| r.value(field)))?;
            Some(FieldStats { field, min, max })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "id,state,abbr,poverty,povertyMoe,age,income,healthcare,obesity,smokes";

    fn parse(body: &str) -> Result<IngestedData, AppError> {
        parse_records(body.as_bytes(), "inline".to_string())
    }

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let csv = format!(
            "{HEADER}\n1,Alabama,AL,18.2,0.5,38.3,43634,11.4,31,22.4\n2,Alaska,AK,10,0.8,33.3,70758,14.9,29.7,19.3\n"
        );
        let data = parse(&csv).unwrap();
        assert_eq!(data.rows_read, 2);
        assert_eq!(data.rows_used, 2);
        assert!(data.row_errors.is_empty());

        let al = &data.records[0];
        assert_eq!(al.state, "Alabama");
        assert_eq!(al.abbr, "AL");
        assert_eq!(al.income, 43634.0);
        assert_eq!(al.obesity, 31.0);
        assert_eq!(al.smokes, 22.4);

        let poverty = data.stats.iter().find(|s| s.field == Field::Poverty).unwrap();
        assert_eq!((poverty.min, poverty.max), (10.0, 18.2));
    }

    #[test]
    fn rejects_non_numeric_and_missing_values_with_line_numbers() {
        let csv = format!(
            "{HEADER}\n1,Alabama,AL,18.2,0.5,38.3,43634,11.4,31,22.4\n2,Alaska,AK,n/a,0.8,33.3,70758,14.9,29.7,19.3\n3,Arizona,AZ,18.2,0.4,36.9,,10.9,29,17.8\n4,Arkansas,,18.2,0.4,36.9,41371,10.9,29,17.8\n"
        );
        let data = parse(&csv).unwrap();
        assert_eq!(data.rows_read, 4);
        assert_eq!(data.rows_used, 1);
        assert_eq!(data.row_errors.len(), 3);

        assert_eq!(data.row_errors[0].line, 3);
        assert_eq!(data.row_errors[0].state.as_deref(), Some("Alaska"));
        assert!(data.row_errors[0].message.contains("poverty"));

        assert_eq!(data.row_errors[1].line, 4);
        assert!(data.row_errors[1].message.contains("income"));

        assert_eq!(data.row_errors[2].line, 5);
        assert_eq!(data.row_errors[2].state.as_deref(), Some("Arkansas"));
        assert!(data.row_errors[2].message.contains("`abbr`"));
    }

    #[test]
    fn missing_column_fails_the_load() {
        let err = parse("state,abbr,poverty,age,income,healthcare,obesity\nAlabama,AL,1,2,3,4,5\n").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("`smokes`"));
    }

    #[test]
    fn no_usable_rows_is_an_error() {
        let csv = format!("{HEADER}\n1,Alabama,AL,x,0.5,38.3,43634,11.4,31,22.4\n");
        let err = parse(&csv).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NO_DATA);
    }

    #[test]
    fn header_bom_and_case_are_normalized() {
        let csv = "\u{feff}State,ABBR,Poverty,Age,Income,Healthcare,Obesity,Smokes\nUtah,UT,12.7,30.2,57179,13.1,24.5,9.1\n";
        let data = parse(csv).unwrap();
        assert_eq!(data.records[0].abbr, "UT");
        assert_eq!(data.records[0].smokes, 9.1);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1,Alabama,AL,18.2,0.5,38.3,43634,11.4,31,22.4").unwrap();
        file.flush().unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let data = load_records(&source).unwrap();
        assert_eq!(data.records.len(), 1);
        assert_eq!(data.source, file.path().display().to_string());
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here.csv"));
        let err = load_records(&source).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    /// Shared in-memory sink for a scoped fmt subscriber.
    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn open_failure_is_logged() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        let source = DataSource::File(PathBuf::from("/definitely/not/here.csv"));
        let result = tracing::subscriber::with_default(subscriber, || load_records(&source));
        assert!(result.is_err());

        let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("dataset load failed"), "{text}");
        assert!(text.contains("here.csv"), "{text}");
    }

    #[test]
    fn data_source_detects_urls() {
        assert_eq!(
            DataSource::parse("https://example.org/data.csv"),
            DataSource::Url("https://example.org/data.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("assets/data/data.csv"),
            DataSource::File(PathBuf::from("assets/data/data.csv"))
        );
    }
}
