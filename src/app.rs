//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the file logger when `--log` is given
//! - loads the dataset and builds the chart
//! - runs the TUI, prints the summary or writes exports

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::{Cli, Command, ExportArgs, ViewArgs};
use crate::error::AppError;
use crate::io::ingest::DataSource;

pub mod pipeline;

/// Entry point for the `scatter` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is normal; only the environment matters.
    let _ = dotenvy::dotenv();

    // We want `scatter` and `scatter --x age` to behave like `scatter tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    if let Some(path) = &cli.log {
        init_logging(path)?;
    }
    info!(data = %cli.data, "starting scatter");

    let source = DataSource::parse(&cli.data);
    match cli.command {
        Command::Tui(view) => handle_tui(source, view),
        Command::Summary(view) => handle_summary(source, view),
        Command::Export(args) => handle_export(source, args),
    }
}

/// Send tracing output to `path`. The filter comes from `RUST_LOG` (default `debug`).
fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| AppError::input(format!("Failed to open log file '{}': {e}", path.display())))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::runtime(format!("Failed to install logger: {e}")))
}

fn handle_tui(source: DataSource, view: ViewArgs) -> Result<(), AppError> {
    crate::tui::run(source, view)
}

fn handle_summary(source: DataSource, view: ViewArgs) -> Result<(), AppError> {
    let loaded = pipeline::load_chart(&source, &view)?;
    println!("{}", crate::report::format_summary(&loaded.ingest, &loaded.chart));
    Ok(())
}

fn handle_export(source: DataSource, args: ExportArgs) -> Result<(), AppError> {
    let loaded = pipeline::load_chart(&source, &args.view)?;

    let svg = match (&args.svg, &args.json) {
        (None, None) => Some(default_export_path("svg")),
        _ => args.svg.clone(),
    };

    if let Some(path) = &svg {
        crate::io::export::write_svg(path, &loaded.chart)?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = &args.json {
        crate::io::export::write_view_json(path, &loaded.chart, &loaded.ingest.source)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// `scatter_<timestamp>.<ext>` in the working directory.
fn default_export_path(ext: &str) -> PathBuf {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("scatter_{ts}.{ext}"))
}

/// Rewrite argv so `scatter` defaults to `scatter tui`.
///
/// Rules:
/// - `scatter`                         -> `scatter tui`
/// - `scatter --x age ...`             -> `scatter tui --x age ...`
/// - `scatter --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let has_subcommand = argv
        .iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "tui" | "summary" | "export"));
    if has_subcommand {
        return argv;
    }

    // Only flags given: treat them as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_tui() {
        assert_eq!(rewrite_args(args(&["scatter"])), args(&["scatter", "tui"]));
    }

    #[test]
    fn leading_flags_become_tui_flags() {
        assert_eq!(
            rewrite_args(args(&["scatter", "--x", "age"])),
            args(&["scatter", "tui", "--x", "age"])
        );
    }

    #[test]
    fn explicit_subcommand_is_kept() {
        let argv = args(&["scatter", "--data", "d.csv", "summary"]);
        assert_eq!(rewrite_args(argv.clone()), argv);
        let argv = args(&["scatter", "--help"]);
        assert_eq!(rewrite_args(argv.clone()), argv);
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = Cli::try_parse_from(rewrite_args(args(&["scatter", "--y", "obesity"]))).unwrap();
        let Command::Tui(view) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(view.y, Some(crate::domain::Field::Obesity));
    }

    #[test]
    fn default_export_path_has_extension() {
        let path = default_export_path("svg");
        let name = path.to_string_lossy();
        assert!(name.starts_with("scatter_") && name.ends_with(".svg"), "{name}");
    }
}
