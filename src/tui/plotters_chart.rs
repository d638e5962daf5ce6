//! Plotters-powered scatter widget for Ratatui.
//!
//! The widget draws the plot area only: both axis lines, tick marks and one dot
//! per marker. Text (tick labels, marker abbreviations, selector labels and the
//! tooltip) is laid over it with plain Ratatui widgets, because terminal glyphs
//! read better than Plotters' rasterized fonts at this resolution.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::ChartFrame;

/// Minimum terminal area the chart needs.
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 6;

/// Render-only view of one `ChartFrame`.
///
/// All positions are plot-area coordinates (origin top-left, y down), exactly
/// as the controller produces them.
pub struct ScatterPlottersChart<'a> {
    pub frame: &'a ChartFrame,
}

impl<'a> Widget for ScatterPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let w = self.frame.plot_width;
        let h = self.frame.plot_height;
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return;
        }

        let frame = self.frame;
        // Plotters puts the origin bottom-left, the controller top-left.
        let flip = move |x: f64, y: f64| (x, h - y);

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root).margin(0).build_cartesian_2d(0.0..w, 0.0..h)?;

            let axis_color = RGBColor(160, 160, 160);
            let tick_len_x = h * 0.02;
            let tick_len_y = w * 0.01;

            // Left and bottom rulers.
            chart.draw_series(LineSeries::new([flip(0.0, h), flip(w, h)], &axis_color))?;
            chart.draw_series(LineSeries::new([flip(0.0, 0.0), flip(0.0, h)], &axis_color))?;

            for &(_, px) in &frame.x_axis.ticks {
                chart.draw_series(LineSeries::new(
                    [flip(px, h), flip(px, h - tick_len_x)],
                    &axis_color,
                ))?;
            }
            for &(_, py) in &frame.y_axis.ticks {
                chart.draw_series(LineSeries::new(
                    [flip(0.0, py), flip(tick_len_y, py)],
                    &axis_color,
                ))?;
            }

            // `Circle` radii are mis-scaled by the ratatui backend, so markers are
            // single dots; the abbreviation label sits next to each one.
            let marker_color = RGBColor(137, 189, 211);
            let hover_color = RGBColor(255, 215, 0);
            let hovered = frame.tooltip.as_ref().map(|t| t.marker);

            chart.draw_series(
                frame
                    .markers
                    .iter()
                    .filter(|m| Some(m.index) != hovered)
                    .map(|m| Pixel::new(flip(m.x, m.y), marker_color)),
            )?;
            if let Some(tooltip) = &frame.tooltip {
                let (x, y) = tooltip.anchor;
                chart.draw_series(std::iter::once(Pixel::new(flip(x, y), hover_color)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
