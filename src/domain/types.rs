//! Shared domain types.
//!
//! These types are intentionally kept small and `Copy` where possible so they can be:
//!
//! - passed freely between the controller, the TUI and the exporters
//! - parsed directly from CLI flags (`ValueEnum`)
//! - serialized into view dumps (`serde`)

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which axis a field drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// The three fields selectable on this axis, in selector-label order.
    pub fn fields(self) -> [Field; 3] {
        match self {
            Axis::X => [Field::Poverty, Field::Age, Field::Income],
            Axis::Y => [Field::Healthcare, Field::Smokes, Field::Obesity],
        }
    }

    /// Field shown on this axis before the viewer picks anything.
    pub fn default_field(self) -> Field {
        self.fields()[0]
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// One of the six numeric dataset columns a viewer can plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Poverty,
    Age,
    Income,
    Healthcare,
    Smokes,
    Obesity,
}

/// Static presentation data for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Header name in the dataset CSV.
    pub column: &'static str,
    /// Axis legend text (selector label).
    pub legend: &'static str,
    /// Short name used in tooltips.
    pub short: &'static str,
    /// Suffix appended to values in tooltips.
    pub unit: &'static str,
}

const FIELD_TABLE: [FieldInfo; 6] = [
    FieldInfo { column: "poverty", legend: "In Poverty (%)", short: "Poverty", unit: "%" },
    FieldInfo { column: "age", legend: "Age (Median)", short: "Age", unit: "" },
    FieldInfo { column: "income", legend: "Household Income (Median)", short: "Income", unit: "" },
    FieldInfo { column: "healthcare", legend: "Lacks Healthcare (%)", short: "Healthcare", unit: "%" },
    FieldInfo { column: "smokes", legend: "Smokes (%)", short: "Smokes", unit: "%" },
    FieldInfo { column: "obesity", legend: "Obesity (%)", short: "Obesity", unit: "%" },
];

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Poverty,
        Field::Age,
        Field::Income,
        Field::Healthcare,
        Field::Smokes,
        Field::Obesity,
    ];

    pub fn info(self) -> &'static FieldInfo {
        &FIELD_TABLE[self as usize]
    }

    pub fn column(self) -> &'static str {
        self.info().column
    }

    pub fn legend(self) -> &'static str {
        self.info().legend
    }

    pub fn short(self) -> &'static str {
        self.info().short
    }

    pub fn unit(self) -> &'static str {
        self.info().unit
    }

    /// The axis whose selector group contains this field.
    pub fn axis(self) -> Axis {
        match self {
            Field::Poverty | Field::Age | Field::Income => Axis::X,
            Field::Healthcare | Field::Smokes | Field::Obesity => Axis::Y,
        }
    }

    /// Next field on the same axis, wrapping around.
    pub fn next_on_axis(self) -> Field {
        let fields = self.axis().fields();
        let idx = fields.iter().position(|&f| f == self).unwrap_or(0);
        fields[(idx + 1) % fields.len()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One dataset row: a US state with its census and health statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Display name (e.g. "Alabama").
    pub state: String,
    /// Short marker label (e.g. "AL").
    pub abbr: String,
    pub poverty: f64,
    pub age: f64,
    pub income: f64,
    pub healthcare: f64,
    pub smokes: f64,
    pub obesity: f64,
}

impl Record {
    /// Typed accessor for a field value.
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Poverty => self.poverty,
            Field::Age => self.age,
            Field::Income => self.income,
            Field::Healthcare => self.healthcare,
            Field::Smokes => self.smokes,
            Field::Obesity => self.obesity,
        }
    }
}

/// Space reserved around the plotting area, in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 40.0,
            bottom: 100.0,
            left: 100.0,
        }
    }
}

/// Drawing surface and animation settings for a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub surface_width: f64,
    pub surface_height: f64,
    pub margins: Margins,
    /// Length of every axis/marker transition.
    pub transition: Duration,
    /// Marker radius, used for drawing and hover hit-testing.
    pub marker_radius: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            surface_width: 750.0,
            surface_height: 500.0,
            margins: Margins::default(),
            transition: Duration::from_millis(1000),
            marker_radius: 10.0,
        }
    }
}

impl ChartConfig {
    /// Usable plotting width (surface minus left/right margins).
    pub fn plot_width(&self) -> f64 {
        (self.surface_width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Usable plotting height (surface minus top/bottom margins).
    pub fn plot_height(&self) -> f64 {
        (self.surface_height - self.margins.top - self.margins.bottom).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_belongs_to_exactly_one_axis() {
        for field in Field::ALL {
            let owners: Vec<Axis> = Axis::ALL
                .into_iter()
                .filter(|axis| axis.fields().contains(&field))
                .collect();
            assert_eq!(owners, vec![field.axis()]);
        }
    }

    #[test]
    fn field_table_matches_enum_order() {
        assert_eq!(Field::Poverty.legend(), "In Poverty (%)");
        assert_eq!(Field::Age.unit(), "");
        assert_eq!(Field::Income.short(), "Income");
        assert_eq!(Field::Healthcare.legend(), "Lacks Healthcare (%)");
        assert_eq!(Field::Smokes.unit(), "%");
        assert_eq!(Field::Obesity.column(), "obesity");
    }

    #[test]
    fn next_on_axis_wraps() {
        assert_eq!(Field::Poverty.next_on_axis(), Field::Age);
        assert_eq!(Field::Income.next_on_axis(), Field::Poverty);
        assert_eq!(Field::Obesity.next_on_axis(), Field::Healthcare);
    }

    #[test]
    fn default_plot_area() {
        let config = ChartConfig::default();
        assert_eq!(config.plot_width(), 610.0);
        assert_eq!(config.plot_height(), 380.0);
    }
}
