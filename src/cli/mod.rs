//! Command-line parsing for the census scatter plot.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! chart state and rendering code. Everything here is plain data; `app` turns
//! it into a `ChartConfig` and a loaded `ChartController`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ChartConfig, Field, Margins};
use crate::error::AppError;

/// Dataset location used when neither `--data` nor `SCATTER_DATA` is set.
pub const DEFAULT_DATA: &str = "assets/data/data.csv";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "scatter", version, about = "Interactive census scatter plot")]
pub struct Cli {
    /// Dataset CSV: a local path or an http(s) URL.
    #[arg(long, global = true, env = "SCATTER_DATA", default_value = DEFAULT_DATA)]
    pub data: String,

    /// Write tracing logs to this file (the TUI owns the terminal).
    #[arg(long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive chart (default).
    Tui(ViewArgs),
    /// Print dataset stats, the axis selection and the marker table.
    Summary(ViewArgs),
    /// Write the resting view to SVG and/or JSON.
    Export(ExportArgs),
}

/// Options shared by every view.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    /// Field on the x axis (poverty, age, income).
    #[arg(long, value_enum)]
    pub x: Option<Field>,

    /// Field on the y axis (healthcare, smokes, obesity).
    #[arg(long, value_enum)]
    pub y: Option<Field>,

    /// Axis/marker transition length in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub duration_ms: u64,

    /// Drawing surface width.
    #[arg(long, default_value_t = 750.0)]
    pub width: f64,

    /// Drawing surface height.
    #[arg(long, default_value_t = 500.0)]
    pub height: f64,

    /// Margins as `top,right,bottom,left`.
    #[arg(long, value_delimiter = ',', default_values_t = [20.0, 40.0, 100.0, 100.0])]
    pub margins: Vec<f64>,

    /// Marker radius (also the hover hit radius).
    #[arg(long, default_value_t = 10.0)]
    pub radius: f64,
}

impl ViewArgs {
    pub fn chart_config(&self) -> Result<ChartConfig, AppError> {
        let &[top, right, bottom, left] = self.margins.as_slice() else {
            return Err(AppError::input(format!(
                "--margins expects 4 values (top,right,bottom,left), got {}",
                self.margins.len()
            )));
        };
        let config = ChartConfig {
            surface_width: self.width,
            surface_height: self.height,
            margins: Margins {
                top,
                right,
                bottom,
                left,
            },
            transition: Duration::from_millis(self.duration_ms),
            marker_radius: self.radius,
        };
        if config.plot_width() <= 0.0 || config.plot_height() <= 0.0 {
            return Err(AppError::input(
                "Surface is smaller than its margins; nothing left to plot.",
            ));
        }
        Ok(config)
    }
}

impl Default for ViewArgs {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            duration_ms: 1000,
            width: 750.0,
            height: 500.0,
            margins: vec![20.0, 40.0, 100.0, 100.0],
            radius: 10.0,
        }
    }
}

/// Options for `scatter export`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// SVG output path.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// JSON output path.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_flags() {
        let cli = Cli::try_parse_from([
            "scatter",
            "--data",
            "x.csv",
            "export",
            "--x",
            "income",
            "--svg",
            "out.svg",
            "--margins",
            "1,2,3,4",
        ])
        .unwrap();
        assert_eq!(cli.data, "x.csv");
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.view.x, Some(Field::Income));
        assert_eq!(args.svg, Some(PathBuf::from("out.svg")));
        let config = args.view.chart_config().unwrap();
        assert_eq!(config.margins.left, 4.0);
        assert_eq!(config.plot_width(), 750.0 - 2.0 - 4.0);
    }

    #[test]
    fn view_defaults_match_chart_defaults() {
        let cli = Cli::try_parse_from(["scatter", "summary"]).unwrap();
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(args.chart_config(), Ok(ChartConfig::default()));
        assert_eq!(ViewArgs::default().chart_config(), Ok(ChartConfig::default()));
    }

    #[test]
    fn bad_margins_are_input_errors() {
        let cli = Cli::try_parse_from(["scatter", "summary", "--margins", "1,2"]).unwrap();
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(args.chart_config().unwrap_err().exit_code(), crate::error::EXIT_INPUT);

        let tiny = ViewArgs {
            width: 100.0,
            ..ViewArgs::default()
        };
        assert!(tiny.chart_config().is_err());
    }
}
