//! Export the current chart view.
//!
//! - SVG: a static drawing of the resting view at the configured surface size
//!   (axes, markers, marker labels, selector labels with active styling)
//! - JSON: the same view as data, including each marker's tooltip lines
//!
//! Both exports describe the view *at rest*: pending transitions are skipped.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;
use tracing::info;

use crate::chart::{AxisSelection, AxisView, ChartController, ChartFrame, LabelState, SelectorLabel};
use crate::domain::{Axis, Margins};
use crate::error::AppError;

/// Marker fill (light steel blue) and label colors.
const MARKER_COLOR: RGBColor = RGBColor(137, 189, 211);
const MARKER_TEXT: RGBColor = WHITE;
const INACTIVE_LABEL: RGBColor = RGBColor(170, 170, 170);
const TICK_LEN: i32 = 6;

/// Distance of each selector label from the plotting area, in display order.
const SELECTOR_OFFSETS: [f64; 3] = [40.0, 60.0, 80.0];

/// Surface position of a selector label's center.
///
/// X labels are stacked below the plotting area; Y labels are stacked to the
/// left of it and drawn rotated.
pub fn selector_anchor(axis: Axis, slot: usize, margins: &Margins, plot_width: f64, plot_height: f64) -> (f64, f64) {
    let offset = SELECTOR_OFFSETS[slot.min(SELECTOR_OFFSETS.len() - 1)];
    match axis {
        Axis::X => (margins.left + plot_width / 2.0, margins.top + plot_height + offset),
        Axis::Y => (margins.left - offset, margins.top + plot_height / 2.0),
    }
}

/// Draw the resting view to an SVG file.
pub fn write_svg(path: &Path, chart: &ChartController) -> Result<(), AppError> {
    let config = chart.config();
    let frame = chart.resting_frame();
    let size = (config.surface_width.round() as u32, config.surface_height.round() as u32);

    let root = SVGBackend::new(path, size).into_drawing_area();
    draw_view(&root, &frame, &config.margins, config.marker_radius)
        .map_err(|e| AppError::runtime(format!("Failed to render SVG '{}': {e}", path.display())))?;
    root.present()
        .map_err(|e| AppError::runtime(format!("Failed to write SVG '{}': {e}", path.display())))?;

    info!(path = %path.display(), markers = frame.markers.len(), "wrote svg");
    Ok(())
}

fn draw_view<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    frame: &ChartFrame,
    margins: &Margins,
    radius: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let px = |x: f64| (margins.left + x).round() as i32;
    let py = |y: f64| (margins.top + y).round() as i32;

    draw_x_axis(root, &frame.x_axis, frame.plot_height, &px, &py)?;
    draw_y_axis(root, &frame.y_axis, &px, &py)?;

    let marker_style = ShapeStyle::from(&MARKER_COLOR.mix(0.5)).filled();
    let marker_font = ("sans-serif", 10)
        .into_font()
        .color(&MARKER_TEXT)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for m in &frame.markers {
        let center = (px(m.x), py(m.y));
        root.draw(&Circle::new(center, radius.round() as i32, marker_style))?;
        root.draw(&Text::new(m.abbr.as_str(), center, marker_font.clone()))?;
    }

    for label in &frame.selectors {
        draw_selector(root, label, frame, margins)?;
    }

    Ok(())
}

fn draw_x_axis<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    axis: &AxisView,
    plot_height: f64,
    px: &impl Fn(f64) -> i32,
    py: &impl Fn(f64) -> i32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let base = py(plot_height);
    root.draw(&PathElement::new(vec![(px(axis.range[0]), base), (px(axis.range[1]), base)], &BLACK))?;

    let font = ("sans-serif", 10)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for &(value, pixel) in &axis.ticks {
        let x = px(pixel);
        root.draw(&PathElement::new(vec![(x, base), (x, base + TICK_LEN)], &BLACK))?;
        root.draw(&Text::new(format_tick(value), (x, base + TICK_LEN + 3), font.clone()))?;
    }
    Ok(())
}

fn draw_y_axis<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    axis: &AxisView,
    px: &impl Fn(f64) -> i32,
    py: &impl Fn(f64) -> i32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let base = px(0.0);
    root.draw(&PathElement::new(vec![(base, py(axis.range[0])), (base, py(axis.range[1]))], &BLACK))?;

    let font = ("sans-serif", 10)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for &(value, pixel) in &axis.ticks {
        let y = py(pixel);
        root.draw(&PathElement::new(vec![(base - TICK_LEN, y), (base, y)], &BLACK))?;
        root.draw(&Text::new(format_tick(value), (base - TICK_LEN - 3, y), font.clone()))?;
    }
    Ok(())
}

fn draw_selector<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    label: &SelectorLabel,
    frame: &ChartFrame,
    margins: &Margins,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let slot = label
        .axis
        .fields()
        .iter()
        .position(|&f| f == label.field)
        .unwrap_or(0);
    let (x, y) = selector_anchor(label.axis, slot, margins, frame.plot_width, frame.plot_height);

    let (style, color) = match label.state {
        LabelState::Active => (FontStyle::Bold, BLACK),
        LabelState::Inactive => (FontStyle::Normal, INACTIVE_LABEL),
    };
    let mut font = ("sans-serif", 14)
        .into_font()
        .style(style)
        .color(&color)
        .pos(Pos::new(HPos::Center, VPos::Center));
    if label.axis == Axis::Y {
        font = font.transform(FontTransform::Rotate270);
    }
    root.draw(&Text::new(label.text, (x.round() as i32, y.round() as i32), font))?;
    Ok(())
}

/// Tick text: integers without a fraction, everything else trimmed.
pub fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// JSON shape of an exported view.
#[derive(Debug, Serialize)]
pub struct ViewExport<'a> {
    pub source: &'a str,
    pub selection: AxisSelection,
    pub x_axis: &'a AxisView,
    pub y_axis: &'a AxisView,
    pub selectors: &'a [SelectorLabel],
    pub markers: Vec<MarkerExport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct MarkerExport<'a> {
    pub state: &'a str,
    pub abbr: &'a str,
    pub x_value: f64,
    pub y_value: f64,
    pub x: f64,
    pub y: f64,
    pub tooltip: Vec<String>,
}

/// Write the resting view as pretty-printed JSON.
pub fn write_view_json(path: &Path, chart: &ChartController, source: &str) -> Result<(), AppError> {
    let frame = chart.resting_frame();
    let export = build_view_export(chart, &frame, source);

    let file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create view JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &export)
        .map_err(|e| AppError::runtime(format!("Failed to write view JSON '{}': {e}", path.display())))?;

    info!(path = %path.display(), "wrote view json");
    Ok(())
}

pub fn build_view_export<'a>(chart: &'a ChartController, frame: &'a ChartFrame, source: &'a str) -> ViewExport<'a> {
    let selection = chart.selection();
    let formatter = chart.tooltip_formatter();
    let markers = chart
        .records()
        .iter()
        .zip(&frame.markers)
        .map(|(r, m)| MarkerExport {
            state: &r.state,
            abbr: &r.abbr,
            x_value: r.value(selection.x),
            y_value: r.value(selection.y),
            x: m.x,
            y: m.y,
            tooltip: formatter.lines(r),
        })
        .collect();

    ViewExport {
        source,
        selection,
        x_axis: &frame.x_axis,
        y_axis: &frame.y_axis,
        selectors: &frame.selectors,
        markers,
    }
}
