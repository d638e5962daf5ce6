//! Ratatui-based terminal UI.
//!
//! The TUI renders the scatter chart, lets the viewer switch the field on
//! either axis by clicking a selector label (or with the keyboard) and shows a
//! tooltip while the pointer rests on a marker label. Transitions are drawn at
//! roughly 60 frames per second while anything is moving.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::{debug, error, info};

use crate::app::pipeline::{self, LoadedChart};
use crate::chart::{ChartController, ChartFrame, LabelState, Selection};
use crate::cli::ViewArgs;
use crate::domain::{Axis, Field};
use crate::error::AppError;
use crate::io::export::format_tick;
use crate::io::ingest::DataSource;

mod plotters_chart;

use plotters_chart::ScatterPlottersChart;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Start the TUI.
pub fn run(source: DataSource, view: ViewArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(source, view);
    terminal
        .draw(|f| app.draw(f, Instant::now()))
        .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
    app.load();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Counts shown in the header after a successful load.
#[derive(Debug, Clone, Copy)]
struct LoadCounts {
    rows_read: usize,
    rows_used: usize,
    rejected: usize,
}

struct App {
    source: DataSource,
    view: ViewArgs,
    chart: Option<ChartController>,
    counts: Option<LoadCounts>,
    status: String,
    /// Layout from the most recent draw, used for mouse hit-testing.
    layout: Option<ChartLayout>,
}

impl App {
    fn new(source: DataSource, view: ViewArgs) -> Self {
        Self {
            status: format!("Loading {source}..."),
            source,
            view,
            chart: None,
            counts: None,
            layout: None,
        }
    }

    fn load(&mut self) {
        match pipeline::load_chart(&self.source, &self.view) {
            Ok(LoadedChart { ingest, chart }) => {
                let counts = LoadCounts {
                    rows_read: ingest.rows_read,
                    rows_used: ingest.rows_used,
                    rejected: ingest.row_errors.len(),
                };
                self.status = format!("Loaded {} states from {}", counts.rows_used, ingest.source);
                self.counts = Some(counts);
                self.chart = Some(chart);
            }
            Err(err) => {
                error!(source = %self.source, error = %err, "dataset load failed");
                self.status = err.to_string();
                self.counts = None;
                self.chart = None;
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        let mut was_animating = false;
        loop {
            let now = Instant::now();
            let animating = self.chart.as_ref().is_some_and(|c| c.is_animating(now));

            // One more draw after a transition ends so the resting frame is shown.
            if needs_redraw || animating || was_animating {
                terminal
                    .draw(|f| self.draw(f, now))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }
            was_animating = animating;

            let timeout = if animating { FRAME_INTERVAL } else { IDLE_POLL };
            if !event::poll(timeout).map_err(|e| AppError::runtime(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code, Instant::now()) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    needs_redraw |= self.handle_mouse(mouse, Instant::now());
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        info!("tui exited");
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode, now: Instant) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('x') => self.cycle(Axis::X, now),
            KeyCode::Char('y') => self.cycle(Axis::Y, now),
            KeyCode::Char(c @ '1'..='6') => {
                let slot = c as usize - '1' as usize;
                let axis = if slot < 3 { Axis::X } else { Axis::Y };
                self.select(axis, axis.fields()[slot % 3], now);
            }
            _ => {}
        }
        false
    }

    /// Returns `true` when something visible changed.
    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        let Some(layout) = &self.layout else {
            return false;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match layout.selector_at(mouse.column, mouse.row) {
                    Some((axis, field)) => {
                        self.select(axis, field, now);
                        true
                    }
                    None => false,
                }
            }
            MouseEventKind::Moved => {
                let plot = layout.plot;
                let Some(chart) = self.chart.as_mut() else {
                    return false;
                };
                let frame = chart.frame(now);
                match marker_at_cell(plot, &frame, mouse.column, mouse.row) {
                    Some(idx) => chart.hover_enter(idx),
                    None => chart.hover_leave(),
                }
            }
            _ => false,
        }
    }

    fn cycle(&mut self, axis: Axis, now: Instant) {
        if let Some(chart) = &self.chart {
            let next = chart.selection().get(axis).next_on_axis();
            self.select(axis, next, now);
        }
    }

    fn select(&mut self, axis: Axis, field: Field, now: Instant) {
        let Some(chart) = self.chart.as_mut() else {
            self.status = "No data loaded.".to_string();
            return;
        };
        match chart.select_axis(axis, field, now) {
            Ok(Selection::Changed) => {
                debug!(%axis, %field, "selector activated");
                self.status = format!("{axis} axis: {}", field.legend());
            }
            Ok(Selection::Unchanged) => {
                self.status = format!("{axis} axis already shows {}", field.legend());
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>, now: Instant) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1], now);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("scatter", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {}", self.source)),
        ]));

        let detail = match (&self.chart, self.counts) {
            (Some(chart), Some(counts)) => {
                let sel = chart.selection();
                format!(
                    "states: {} of {} rows | rejected: {} | x: {} | y: {}",
                    counts.rows_used,
                    counts.rows_read,
                    counts.rejected,
                    sel.x.legend(),
                    sel.y.legend(),
                )
            }
            _ => "no data".to_string(),
        };
        lines.push(Line::from(Span::styled(detail, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect, now: Instant) {
        let block = Block::default().title("Census scatter").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(chart) = &self.chart else {
            self.layout = None;
            let msg = Paragraph::new("No data to plot.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let Some(layout) = ChartLayout::compute(inner) else {
            self.layout = None;
            let msg = Paragraph::new("Chart area too small (resize terminal).")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let view = chart.frame(now);
        frame.render_widget(ScatterPlottersChart { frame: &view }, layout.plot);
        draw_tick_labels(frame, &layout, &view);
        draw_marker_labels(frame, layout.plot, &view);
        draw_selectors(frame, &layout, &view);
        draw_tooltip(frame, layout.plot, &view);

        self.layout = Some(layout);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "click label / x y 1-6 switch axis  hover marker for details  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Where each part of the chart lives inside the chart block.
#[derive(Debug, Clone, PartialEq)]
struct ChartLayout {
    /// Cells covered by the plotting area.
    plot: Rect,
    /// Column holding the y tick labels (right-aligned against `plot`).
    y_ticks: Rect,
    /// Row holding the x tick labels.
    x_ticks: Rect,
    /// Clickable selector labels, in display order.
    selectors: Vec<(Rect, Axis, Field)>,
}

const Y_PANEL_WIDTH: u16 = 24;
const TICK_COLUMN_WIDTH: u16 = 7;
/// Tick row, gap, three selector rows.
const BOTTOM_ROWS: u16 = 5;

impl ChartLayout {
    fn compute(inner: Rect) -> Option<Self> {
        let left = Y_PANEL_WIDTH + TICK_COLUMN_WIDTH;
        if inner.width < left + plotters_chart::MIN_WIDTH + 1
            || inner.height < BOTTOM_ROWS + plotters_chart::MIN_HEIGHT
        {
            return None;
        }

        let plot = Rect {
            x: inner.x + left,
            y: inner.y,
            width: inner.width - left - 1,
            height: inner.height - BOTTOM_ROWS,
        };
        let y_ticks = Rect {
            x: inner.x + Y_PANEL_WIDTH,
            y: plot.y,
            width: TICK_COLUMN_WIDTH,
            height: plot.height,
        };
        let x_ticks = Rect {
            x: plot.x.saturating_sub(TICK_COLUMN_WIDTH / 2),
            y: plot.y + plot.height,
            width: plot.width + TICK_COLUMN_WIDTH / 2,
            height: 1,
        };

        let mut selectors = Vec::with_capacity(6);
        for (i, field) in Axis::X.fields().into_iter().enumerate() {
            let width = label_width(field).min(plot.width);
            selectors.push((
                Rect {
                    x: plot.x + (plot.width - width) / 2,
                    y: x_ticks.y + 2 + i as u16,
                    width,
                    height: 1,
                },
                Axis::X,
                field,
            ));
        }
        let y_top = plot.y + (plot.height / 2).saturating_sub(1);
        for (i, field) in Axis::Y.fields().into_iter().enumerate() {
            selectors.push((
                Rect {
                    x: inner.x,
                    y: y_top + i as u16,
                    width: label_width(field).min(Y_PANEL_WIDTH),
                    height: 1,
                },
                Axis::Y,
                field,
            ));
        }

        Some(Self {
            plot,
            y_ticks,
            x_ticks,
            selectors,
        })
    }

    fn selector_at(&self, column: u16, row: u16) -> Option<(Axis, Field)> {
        self.selectors
            .iter()
            .find(|(rect, _, _)| contains(*rect, column, row))
            .map(|&(_, axis, field)| (axis, field))
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Selector text is `"> legend"` or `"  legend"`.
fn label_width(field: Field) -> u16 {
    field.legend().len() as u16 + 2
}

/// Map a plot-area point to the terminal cell it falls in.
fn to_cell(plot: Rect, view: &ChartFrame, x: f64, y: f64) -> (u16, u16) {
    let u = if view.plot_width > 0.0 { (x / view.plot_width).clamp(0.0, 1.0) } else { 0.0 };
    let v = if view.plot_height > 0.0 { (y / view.plot_height).clamp(0.0, 1.0) } else { 0.0 };
    let col = plot.x + (u * f64::from(plot.width.saturating_sub(1))).round() as u16;
    let row = plot.y + (v * f64::from(plot.height.saturating_sub(1))).round() as u16;
    (col, row)
}

/// First column of a marker label: right of the dot, or left of it at the plot's right edge.
fn label_start(plot: Rect, col: u16, len: u16) -> u16 {
    if col + 1 + len <= plot.x + plot.width {
        col + 1
    } else {
        col.saturating_sub(len)
    }
}

/// Topmost marker whose dot or abbreviation covers the cell.
fn marker_at_cell(plot: Rect, view: &ChartFrame, column: u16, row: u16) -> Option<usize> {
    view.markers.iter().rev().find_map(|m| {
        let (c, r) = to_cell(plot, view, m.x, m.y);
        let len = m.abbr.chars().count() as u16;
        let start = label_start(plot, c, len);
        let on_dot = column == c;
        let on_label = column >= start && column < start + len;
        (row == r && (on_dot || on_label)).then_some(m.index)
    })
}

fn draw_tick_labels(frame: &mut ratatui::Frame<'_>, layout: &ChartLayout, view: &ChartFrame) {
    let style = Style::default().fg(Color::Gray);

    for &(value, px) in &view.x_axis.ticks {
        let label = format_tick(value);
        let (col, _) = to_cell(layout.plot, view, px, 0.0);
        let len = label.chars().count() as u16;
        let start = col.saturating_sub(len / 2).max(layout.x_ticks.x);
        let width = len.min((layout.x_ticks.x + layout.x_ticks.width).saturating_sub(start));
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y: layout.x_ticks.y,
                width,
                height: 1,
            },
        );
    }

    for &(value, py) in &view.y_axis.ticks {
        let label = format_tick(value);
        let (_, row) = to_cell(layout.plot, view, 0.0, py);
        let len = (label.chars().count() as u16).min(layout.y_ticks.width - 1);
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: layout.y_ticks.x + layout.y_ticks.width - 1 - len,
                y: row,
                width: len,
                height: 1,
            },
        );
    }
}

fn draw_marker_labels(frame: &mut ratatui::Frame<'_>, plot: Rect, view: &ChartFrame) {
    let hovered = view.tooltip.as_ref().map(|t| t.marker);
    let buf = frame.buffer_mut();
    for m in &view.markers {
        let (col, row) = to_cell(plot, view, m.x, m.y);
        let start = label_start(plot, col, m.abbr.chars().count() as u16);
        let style = if Some(m.index) == hovered {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        buf.set_string(start, row, &m.abbr, style);
    }
}

fn draw_selectors(frame: &mut ratatui::Frame<'_>, layout: &ChartLayout, view: &ChartFrame) {
    for (rect, axis, field) in &layout.selectors {
        let Some(label) = view.selectors.iter().find(|l| l.axis == *axis && l.field == *field) else {
            continue;
        };
        let (text, style) = match label.state {
            LabelState::Active => (
                format!("> {}", label.text),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            LabelState::Inactive => (format!("  {}", label.text), Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(text).style(style), *rect);
    }
}

fn draw_tooltip(frame: &mut ratatui::Frame<'_>, plot: Rect, view: &ChartFrame) {
    let Some(tooltip) = &view.tooltip else {
        return;
    };
    let area = frame.area();
    let (col, row) = to_cell(plot, view, tooltip.anchor.0, tooltip.anchor.1);
    let rect = tooltip_rect(area, col, row, &tooltip.lines);

    let text: Vec<Line> = tooltip.lines.iter().map(|l| Line::from(l.as_str())).collect();
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        rect,
    );
}

/// Box below-right of the anchor, flipped to stay inside `area`.
fn tooltip_rect(area: Rect, col: u16, row: u16, lines: &[String]) -> Rect {
    let content = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let width = (content + 2).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);

    let right = area.x + area.width;
    let bottom = area.y + area.height;
    let x = if col + 2 + width <= right {
        col + 2
    } else {
        col.saturating_sub(width + 1).max(area.x)
    };
    let y = if row + 1 + height <= bottom {
        row + 1
    } else {
        row.saturating_sub(height).max(area.y)
    };
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartConfig, Record};
    use crossterm::event::KeyModifiers;

    fn record(state: &str, abbr: &str, poverty: f64, healthcare: f64) -> Record {
        Record {
            state: state.to_string(),
            abbr: abbr.to_string(),
            poverty,
            age: 38.0,
            income: 50000.0,
            healthcare,
            smokes: 18.0,
            obesity: 30.0,
        }
    }

    fn app() -> App {
        let records = vec![
            record("Alabama", "AL", 18.2, 11.4),
            record("Alaska", "AK", 10.0, 14.9),
        ];
        let mut app = App::new(DataSource::parse("mem.csv"), ViewArgs::default());
        app.chart = Some(ChartController::new(records, ChartConfig::default()).unwrap());
        app
    }

    fn inner() -> Rect {
        Rect::new(1, 5, 118, 30)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn layout_rejects_tiny_areas() {
        assert!(ChartLayout::compute(Rect::new(0, 0, 30, 8)).is_none());
        assert!(ChartLayout::compute(inner()).is_some());
    }

    #[test]
    fn layout_places_one_selector_per_field() {
        let layout = ChartLayout::compute(inner()).unwrap();
        assert_eq!(layout.selectors.len(), 6);
        for (rect, axis, field) in &layout.selectors {
            assert_eq!(field.axis(), *axis);
            assert_eq!(layout.selector_at(rect.x, rect.y), Some((*axis, *field)));
            assert!(!contains(layout.plot, rect.x, rect.y));
        }
    }

    #[test]
    fn to_cell_maps_plot_corners() {
        let c = app().chart.unwrap();
        let view = c.frame(Instant::now());
        let plot = Rect::new(10, 2, 51, 21);
        assert_eq!(to_cell(plot, &view, 0.0, 0.0), (10, 2));
        assert_eq!(to_cell(plot, &view, view.plot_width, view.plot_height), (60, 22));
        assert_eq!(to_cell(plot, &view, -50.0, 1e9), (10, 22));
    }

    #[test]
    fn keys_switch_axes_and_quit() {
        let mut app = app();
        let now = Instant::now();
        assert!(!app.handle_key(KeyCode::Char('3'), now));
        assert_eq!(app.chart.as_ref().unwrap().selection().x, Field::Income);
        assert!(!app.handle_key(KeyCode::Char('y'), now));
        assert_eq!(app.chart.as_ref().unwrap().selection().y, Field::Smokes);
        assert!(!app.handle_key(KeyCode::Char('6'), now));
        assert_eq!(app.chart.as_ref().unwrap().selection().y, Field::Obesity);
        assert!(app.handle_key(KeyCode::Char('q'), now));
        assert!(app.handle_key(KeyCode::Esc, now));
    }

    #[test]
    fn clicking_a_selector_switches_field() {
        let mut app = app();
        let layout = ChartLayout::compute(inner()).unwrap();
        let (rect, _, _) = *layout
            .selectors
            .iter()
            .find(|(_, _, f)| *f == Field::Age)
            .unwrap();
        app.layout = Some(layout);

        let now = Instant::now();
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), rect.x + 1, rect.y), now));
        let chart = app.chart.as_ref().unwrap();
        assert_eq!(chart.selection().x, Field::Age);
        assert!(chart.is_animating(now));
        assert_eq!(app.status, "x axis: Age (Median)");
    }

    #[test]
    fn hovering_a_marker_label_shows_tooltip() {
        let mut app = app();
        let layout = ChartLayout::compute(inner()).unwrap();
        let plot = layout.plot;
        app.layout = Some(layout);

        let now = Instant::now();
        let view = app.chart.as_ref().unwrap().frame(now);
        let (col, row) = to_cell(plot, &view, view.markers[0].x, view.markers[0].y);

        assert!(app.handle_mouse(mouse(MouseEventKind::Moved, col + 1, row), now));
        let tooltip = app.chart.as_ref().unwrap().frame(now).tooltip.unwrap();
        assert_eq!(tooltip.lines[0], "Alabama");

        assert!(app.handle_mouse(mouse(MouseEventKind::Moved, plot.x, plot.y + plot.height + 3), now));
        assert!(app.chart.as_ref().unwrap().frame(now).tooltip.is_none());
    }

    #[test]
    fn label_flipped_at_right_edge_is_still_hoverable() {
        let c = app().chart.unwrap();
        let mut view = c.frame(Instant::now());
        view.markers[0].x = view.plot_width;
        let plot = Rect::new(10, 2, 51, 21);
        let (col, row) = to_cell(plot, &view, view.markers[0].x, view.markers[0].y);
        assert_eq!(col, 60);

        let start = label_start(plot, col, 2);
        assert_eq!(start, 58);
        assert_eq!(marker_at_cell(plot, &view, start, row), Some(0));
        assert_eq!(marker_at_cell(plot, &view, start + 1, row), Some(0));
        assert_eq!(marker_at_cell(plot, &view, col, row), Some(0));
        assert_eq!(marker_at_cell(plot, &view, col + 1, row), None);
    }

    #[test]
    fn selecting_without_data_reports_status() {
        let mut app = App::new(DataSource::parse("missing.csv"), ViewArgs::default());
        app.handle_key(KeyCode::Char('x'), Instant::now());
        app.handle_key(KeyCode::Char('2'), Instant::now());
        assert_eq!(app.status, "No data loaded.");
    }

    #[test]
    fn failed_load_leaves_empty_chart_and_status() {
        let mut app = App::new(DataSource::parse("/definitely/not/here.csv"), ViewArgs::default());
        app.load();
        assert!(app.chart.is_none());
        assert!(app.status.contains("here.csv"), "{}", app.status);
    }

    #[test]
    fn tooltip_stays_inside_area() {
        let area = Rect::new(0, 0, 40, 12);
        let lines = vec!["Alabama".to_string(), "Poverty: 18.2%".to_string()];
        let near_corner = tooltip_rect(area, 38, 10, &lines);
        assert!(near_corner.x + near_corner.width <= 40);
        assert!(near_corner.y + near_corner.height <= 12);
        let open = tooltip_rect(area, 2, 2, &lines);
        assert_eq!((open.x, open.y, open.width, open.height), (4, 3, 16, 4));
    }
}
