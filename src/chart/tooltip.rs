//! Tooltip content for hovered markers.

use crate::domain::{Field, Record};

use super::AxisSelection;

/// Builds tooltip text for the current (x, y) field pair.
///
/// The controller replaces its formatter whenever either axis selection
/// changes; a formatter never observes a selection other than the one it was
/// built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipFormatter {
    x: Field,
    y: Field,
}

impl TooltipFormatter {
    pub fn new(selection: AxisSelection) -> Self {
        Self {
            x: selection.x,
            y: selection.y,
        }
    }

    pub fn fields(&self) -> (Field, Field) {
        (self.x, self.y)
    }

    /// Display name, then one `label: value` line per axis.
    pub fn lines(&self, record: &Record) -> Vec<String> {
        vec![
            record.state.clone(),
            field_line(self.x, record),
            field_line(self.y, record),
        ]
    }

    /// Single-line form, e.g. `Alabama / Income: 43634 / Healthcare: 11.4%`.
    pub fn text(&self, record: &Record) -> String {
        self.lines(record).join(" / ")
    }
}

fn field_line(field: Field, record: &Record) -> String {
    format!("{}: {}{}", field.short(), format_value(record.value(field)), field.unit())
}

/// Shortest round-trip form: `31`, `11.4`, `43634`.
pub fn format_value(v: f64) -> String {
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alabama() -> Record {
        Record {
            state: "Alabama".to_string(),
            abbr: "AL".to_string(),
            poverty: 18.2,
            age: 38.3,
            income: 43634.0,
            healthcare: 11.4,
            smokes: 22.4,
            obesity: 31.0,
        }
    }

    #[test]
    fn default_pair_formats_percentages() {
        let fmt = TooltipFormatter::new(AxisSelection::default());
        assert_eq!(fmt.text(&alabama()), "Alabama / Poverty: 18.2% / Healthcare: 11.4%");
    }

    #[test]
    fn unitless_fields_have_no_suffix() {
        let fmt = TooltipFormatter::new(AxisSelection {
            x: Field::Income,
            y: Field::Obesity,
        });
        assert_eq!(
            fmt.lines(&alabama()),
            vec!["Alabama", "Income: 43634", "Obesity: 31%"]
        );
    }

    #[test]
    fn age_line() {
        let fmt = TooltipFormatter::new(AxisSelection {
            x: Field::Age,
            y: Field::Smokes,
        });
        assert_eq!(fmt.text(&alabama()), "Alabama / Age: 38.3 / Smokes: 22.4%");
    }
}
