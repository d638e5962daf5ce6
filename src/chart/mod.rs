//! Scatter chart view state.
//!
//! `ChartController` owns everything that changes while a viewer interacts
//! with the chart: which field drives each axis, the scales derived from that
//! choice, the animated marker and ruler positions, the selector label states
//! and the hovered marker.
//!
//! Front-ends never mutate this state directly. They call:
//! - `select_axis` when a selector label is activated
//! - `hover_enter` / `hover_leave` / `hover_at` for pointer movement
//!
//! and read the result back through `frame`, which snapshots the view at a
//! given instant (so transitions are evaluated lazily at draw time).

use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Axis, ChartConfig, Field, Record};
use crate::error::{AppError, EXIT_INPUT, EXIT_NO_DATA};
use crate::math::{LinearScale, extent};

pub mod tooltip;
pub mod transition;

pub use tooltip::TooltipFormatter;
pub use transition::Animated;

/// Number of ticks requested per axis ruler.
pub const AXIS_TICKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Cannot build a chart from an empty dataset.")]
    EmptyDataset,
    #[error("Field `{field}` cannot be plotted on the {axis} axis.")]
    FieldNotOnAxis { field: Field, axis: Axis },
    #[error("Field `{field}` has no finite values to scale.")]
    NoFiniteValues { field: Field },
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        let code = match err {
            ChartError::FieldNotOnAxis { .. } => EXIT_INPUT,
            ChartError::EmptyDataset | ChartError::NoFiniteValues { .. } => EXIT_NO_DATA,
        };
        AppError::new(code, err.to_string())
    }
}

/// Currently active field per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisSelection {
    pub x: Field,
    pub y: Field,
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self {
            x: Axis::X.default_field(),
            y: Axis::Y.default_field(),
        }
    }
}

impl AxisSelection {
    pub fn get(&self, axis: Axis) -> Field {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn set(&mut self, axis: Axis, field: Field) {
        match axis {
            Axis::X => self.x = field,
            Axis::Y => self.y = field,
        }
    }
}

/// Result of `select_axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The field was already active; nothing changed.
    Unchanged,
    /// The axis now shows the new field and transitions were started.
    Changed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelState {
    Active,
    Inactive,
}

/// A clickable axis selector label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorLabel {
    pub axis: Axis,
    pub field: Field,
    pub text: &'static str,
    pub state: LabelState,
}

/// Snapshot of one axis ruler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisView {
    pub field: Field,
    /// Domain at the snapshot instant (interpolated while animating).
    pub domain: [f64; 2],
    pub range: [f64; 2],
    /// `(value, pixel)` pairs.
    pub ticks: Vec<(f64, f64)>,
}

/// Snapshot of one marker and its text label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub index: usize,
    pub abbr: String,
    /// Plot-area coordinates (origin at the top-left of the plotting area).
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipView {
    pub marker: usize,
    /// Marker position the tooltip is anchored to.
    pub anchor: (f64, f64),
    pub lines: Vec<String>,
}

/// Everything a front-end needs to draw the chart at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub plot_width: f64,
    pub plot_height: f64,
    pub x_axis: AxisView,
    pub y_axis: AxisView,
    pub markers: Vec<MarkerView>,
    pub selectors: Vec<SelectorLabel>,
    pub tooltip: Option<TooltipView>,
}

#[derive(Debug, Clone, Copy)]
struct Marker {
    x: Animated,
    y: Animated,
}

#[derive(Debug, Clone, Copy)]
struct Ruler {
    lo: Animated,
    hi: Animated,
}

impl Ruler {
    fn resting(scale: &LinearScale) -> Self {
        Self {
            lo: Animated::resting(scale.domain[0]),
            hi: Animated::resting(scale.domain[1]),
        }
    }
}

/// Owns the chart's data and interactive state.
#[derive(Debug, Clone)]
pub struct ChartController {
    records: Vec<Record>,
    config: ChartConfig,
    selection: AxisSelection,
    x_scale: LinearScale,
    y_scale: LinearScale,
    x_ruler: Ruler,
    y_ruler: Ruler,
    markers: Vec<Marker>,
    x_labels: [LabelState; 3],
    y_labels: [LabelState; 3],
    tooltip: TooltipFormatter,
    hovered: Option<usize>,
}

impl ChartController {
    /// Build the initial view with the default field on each axis.
    pub fn new(records: Vec<Record>, config: ChartConfig) -> Result<Self, ChartError> {
        if records.is_empty() {
            return Err(ChartError::EmptyDataset);
        }

        let selection = AxisSelection::default();
        let x_scale = build_scale(&records, selection.x, &config)?;
        let y_scale = build_scale(&records, selection.y, &config)?;

        let markers = records
            .iter()
            .map(|r| Marker {
                x: Animated::resting(x_scale.apply(r.value(selection.x))),
                y: Animated::resting(y_scale.apply(r.value(selection.y))),
            })
            .collect();

        info!(
            records = records.len(),
            x = %selection.x,
            y = %selection.y,
            "chart initialized"
        );

        Ok(Self {
            x_ruler: Ruler::resting(&x_scale),
            y_ruler: Ruler::resting(&y_scale),
            x_labels: label_states(Axis::X, selection.x),
            y_labels: label_states(Axis::Y, selection.y),
            tooltip: TooltipFormatter::new(selection),
            hovered: None,
            records,
            config,
            selection,
            x_scale,
            y_scale,
            markers,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn selection(&self) -> AxisSelection {
        self.selection
    }

    /// Scale currently in effect for an axis (the transition target).
    pub fn scale(&self, axis: Axis) -> &LinearScale {
        match axis {
            Axis::X => &self.x_scale,
            Axis::Y => &self.y_scale,
        }
    }

    pub fn tooltip_formatter(&self) -> &TooltipFormatter {
        &self.tooltip
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Switch the field driving `axis`.
    ///
    /// Selecting the already-active field is a no-op. Otherwise the scale is
    /// rebuilt from the full dataset, the ruler and every marker start a
    /// transition towards it, the tooltip formatter is rebuilt and the
    /// axis's selector labels are replaced so exactly one is active.
    pub fn select_axis(&mut self, axis: Axis, field: Field, now: Instant) -> Result<Selection, ChartError> {
        if field.axis() != axis {
            return Err(ChartError::FieldNotOnAxis { field, axis });
        }
        if self.selection.get(axis) == field {
            return Ok(Selection::Unchanged);
        }

        let scale = build_scale(&self.records, field, &self.config)?;
        let duration = self.config.transition;

        self.selection.set(axis, field);
        match axis {
            Axis::X => {
                self.x_scale = scale;
                self.x_ruler.lo.retarget(scale.domain[0], now, duration);
                self.x_ruler.hi.retarget(scale.domain[1], now, duration);
                for (marker, record) in self.markers.iter_mut().zip(&self.records) {
                    marker.x.retarget(scale.apply(record.value(field)), now, duration);
                }
                self.x_labels = label_states(Axis::X, field);
            }
            Axis::Y => {
                self.y_scale = scale;
                self.y_ruler.lo.retarget(scale.domain[0], now, duration);
                self.y_ruler.hi.retarget(scale.domain[1], now, duration);
                for (marker, record) in self.markers.iter_mut().zip(&self.records) {
                    marker.y.retarget(scale.apply(record.value(field)), now, duration);
                }
                self.y_labels = label_states(Axis::Y, field);
            }
        }
        self.tooltip = TooltipFormatter::new(self.selection);

        debug!(%axis, %field, domain = ?scale.domain, "axis selection changed");
        Ok(Selection::Changed)
    }

    /// Selector labels for one axis, in display order.
    pub fn selector_labels(&self, axis: Axis) -> [SelectorLabel; 3] {
        let states = match axis {
            Axis::X => self.x_labels,
            Axis::Y => self.y_labels,
        };
        let fields = axis.fields();
        std::array::from_fn(|i| SelectorLabel {
            axis,
            field: fields[i],
            text: fields[i].legend(),
            state: states[i],
        })
    }

    /// Show the tooltip for a marker. Out-of-range indices are ignored.
    pub fn hover_enter(&mut self, marker: usize) -> bool {
        if marker >= self.markers.len() || self.hovered == Some(marker) {
            return false;
        }
        self.hovered = Some(marker);
        true
    }

    /// Hide the tooltip.
    pub fn hover_leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    /// Pointer moved to a surface point: enter the marker under it, or leave.
    ///
    /// `(x, y)` is in surface units (margins included). Returns `true` when
    /// the hovered marker changed.
    pub fn hover_at(&mut self, x: f64, y: f64, now: Instant) -> bool {
        let margins = self.config.margins;
        match self.marker_at(x - margins.left, y - margins.top, now) {
            Some(idx) => self.hover_enter(idx),
            None => self.hover_leave(),
        }
    }

    /// Topmost marker whose circle contains the plot-area point.
    pub fn marker_at(&self, x: f64, y: f64, now: Instant) -> Option<usize> {
        let r2 = self.config.marker_radius * self.config.marker_radius;
        // Later markers are drawn on top, so search from the end.
        self.markers.iter().enumerate().rev().find_map(|(idx, m)| {
            let dx = m.x.value_at(now) - x;
            let dy = m.y.value_at(now) - y;
            (dx * dx + dy * dy <= r2).then_some(idx)
        })
    }

    /// Jump every running transition to its target.
    pub fn settle(&mut self) {
        for ruler in [&mut self.x_ruler, &mut self.y_ruler] {
            *ruler = Ruler {
                lo: Animated::resting(ruler.lo.target()),
                hi: Animated::resting(ruler.hi.target()),
            };
        }
        for marker in &mut self.markers {
            *marker = Marker {
                x: Animated::resting(marker.x.target()),
                y: Animated::resting(marker.y.target()),
            };
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        let rulers = [self.x_ruler, self.y_ruler]
            .iter()
            .any(|r| r.lo.is_running(now) || r.hi.is_running(now));
        rulers
            || self
                .markers
                .iter()
                .any(|m| m.x.is_running(now) || m.y.is_running(now))
    }

    /// Marker position at `now` in plot-area coordinates.
    pub fn marker_position(&self, marker: usize, now: Instant) -> Option<(f64, f64)> {
        self.markers
            .get(marker)
            .map(|m| (m.x.value_at(now), m.y.value_at(now)))
    }

    /// Snapshot the view at `now`.
    pub fn frame(&self, now: Instant) -> ChartFrame {
        self.snapshot(|a| a.value_at(now))
    }

    /// Snapshot the view as it will look once every transition has finished.
    pub fn resting_frame(&self) -> ChartFrame {
        self.snapshot(Animated::target)
    }

    fn snapshot(&self, eval: impl Fn(&Animated) -> f64) -> ChartFrame {
        let markers = self
            .markers
            .iter()
            .zip(&self.records)
            .enumerate()
            .map(|(index, (m, r))| MarkerView {
                index,
                abbr: r.abbr.clone(),
                x: eval(&m.x),
                y: eval(&m.y),
            })
            .collect();

        let tooltip = self.hovered.and_then(|idx| {
            let record = self.records.get(idx)?;
            let marker = self.markers.get(idx)?;
            Some(TooltipView {
                marker: idx,
                anchor: (eval(&marker.x), eval(&marker.y)),
                lines: self.tooltip.lines(record),
            })
        });

        let mut selectors = Vec::with_capacity(6);
        for axis in Axis::ALL {
            selectors.extend(self.selector_labels(axis));
        }

        let x_domain = [eval(&self.x_ruler.lo), eval(&self.x_ruler.hi)];
        let y_domain = [eval(&self.y_ruler.lo), eval(&self.y_ruler.hi)];

        ChartFrame {
            plot_width: self.config.plot_width(),
            plot_height: self.config.plot_height(),
            x_axis: axis_view(self.selection.x, x_domain, self.x_scale.range),
            y_axis: axis_view(self.selection.y, y_domain, self.y_scale.range),
            markers,
            selectors,
            tooltip,
        }
    }
}

/// Scale for `field` over the full dataset.
///
/// X fields pad the domain multiplicatively (`min * 0.8`, `max * 1.2`), Y fields
/// additively (`min - 1`, `max + 1`). Y ranges are flipped for a top-left origin.
pub fn build_scale(records: &[Record], field: Field, config: &ChartConfig) -> Result<LinearScale, ChartError> {
    let (min, max) =
        extent(records.iter().map(|r| r.value(field))).ok_or(ChartError::NoFiniteValues { field })?;
    let scale = match field.axis() {
        Axis::X => LinearScale::new([min * 0.8, max * 1.2], [0.0, config.plot_width()]),
        Axis::Y => LinearScale::new([min - 1.0, max + 1.0], [config.plot_height(), 0.0]),
    };
    Ok(scale)
}

fn label_states(axis: Axis, active: Field) -> [LabelState; 3] {
    axis.fields().map(|f| {
        if f == active {
            LabelState::Active
        } else {
            LabelState::Inactive
        }
    })
}

fn axis_view(field: Field, domain: [f64; 2], range: [f64; 2]) -> AxisView {
    let scale = LinearScale::new(domain, range);
    let ticks = scale.ticks(AXIS_TICKS).into_iter().map(|v| (v, scale.apply(v))).collect();
    AxisView {
        field,
        domain,
        range,
        ticks,
    }
}
