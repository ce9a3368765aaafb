//! Ratatui-based terminal UI.
//!
//! Shows the measurement series with both EMA lines and a table of the most
//! recent records. The store is read once on start and again on `r`.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Terminal,
};

use crate::app::pipeline;
use crate::domain::{Channel, EnrichedRecord, TrackerConfig};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::TrendChart;

/// Start the TUI.
pub fn run(config: TrackerConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Which chart channels are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Visibility {
    value: bool,
    ema_short: bool,
    ema_long: bool,
}

impl Visibility {
    fn toggle(&mut self, channel: Channel) -> bool {
        let flag = match channel {
            Channel::Value => &mut self.value,
            Channel::EmaShort => &mut self.ema_short,
            Channel::EmaLong => &mut self.ema_long,
        };
        *flag = !*flag;
        *flag
    }

    fn from_channels(channels: &[Channel]) -> Self {
        Self {
            value: channels.contains(&Channel::Value),
            ema_short: channels.contains(&Channel::EmaShort),
            ema_long: channels.contains(&Channel::EmaLong),
        }
    }
}

struct App {
    config: TrackerConfig,
    records: Vec<EnrichedRecord>,
    visible: Visibility,
    status: String,
}

impl App {
    fn new(config: TrackerConfig) -> Self {
        let visible = Visibility::from_channels(&config.channels);
        let mut app = Self {
            config,
            records: Vec::new(),
            visible,
            status: String::new(),
        };
        app.reload();
        app
    }

    fn reload(&mut self) {
        match pipeline::load_records(&self.config) {
            Ok(records) => {
                self.status = format!(
                    "Loaded {} record(s) from {}",
                    records.len(),
                    self.config.data_path.display()
                );
                self.records = records;
            }
            Err(err) => {
                self.records.clear();
                self.status = format!("Load failed: {err}");
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let channel = match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('r') => {
                self.reload();
                return false;
            }
            KeyCode::Char('1') => Channel::Value,
            KeyCode::Char('2') => Channel::EmaShort,
            KeyCode::Char('3') => Channel::EmaLong,
            _ => return false,
        };

        let on = self.visible.toggle(channel);
        self.status = format!(
            "{}: {}",
            channel.label(self.config.windows),
            if on { "on" } else { "off" }
        );
        false
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("wt", Style::default().fg(Color::Cyan)),
            Span::raw(" - weight trend"),
        ]));

        let summary = match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => format!(
                "n={} | {} -> {} | latest={:.2} | ema_{}={:.2} | ema_{}={:.2} | rate_7d={:+.2}",
                self.records.len(),
                first.date,
                last.date,
                last.value,
                self.config.windows.short,
                last.ema_short,
                self.config.windows.long,
                last.ema_long,
                last.weekly_rate,
            ),
            _ => "No records found!".to_string(),
        };
        lines.push(Line::from(Span::styled(summary, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Trend").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.records.is_empty() {
            let msg = Paragraph::new("No data. Record a value with `wt add <kg>`.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let data = chart_series(&self.records, self.visible);
        let widget = TrendChart {
            points: &data.points,
            ema_short: &data.ema_short,
            ema_long: &data.ema_long,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            x_label: "day",
            y_label: "kg".to_string(),
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(vec![
            Cell::from("date"),
            Cell::from("value"),
            Cell::from("rate_7d"),
            Cell::from(format!("ema_{}", self.config.windows.short)),
            Cell::from(format!("ema_{}", self.config.windows.long)),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        // Latest first.
        let rows = self.records.iter().rev().map(|r| {
            Row::new(vec![
                r.date.to_string(),
                format!("{:.2}", r.value),
                format!("{:+.2}", r.weekly_rate),
                format!("{:.2}", r.ema_short),
                format!("{:.2}", r.ema_long),
            ])
        });

        let widths = [
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title("Records").borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "1 value  2 short ema  3 long ema  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart-ready data: `(day offset, value)` pairs plus bounds.
#[derive(Debug, Clone, PartialEq)]
struct ChartData {
    points: Vec<(f64, f64)>,
    ema_short: Vec<(f64, f64)>,
    ema_long: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series; hidden channels come back empty and do not affect the y-range.
fn chart_series(records: &[EnrichedRecord], visible: Visibility) -> ChartData {
    let pick = |on: bool, f: fn(&EnrichedRecord) -> f64| -> Vec<(f64, f64)> {
        if on {
            records.iter().map(|r| (r.offset as f64, f(r))).collect()
        } else {
            Vec::new()
        }
    };

    let points = pick(visible.value, |r| r.value);
    let ema_short = pick(visible.ema_short, |r| r.ema_short);
    let ema_long = pick(visible.ema_long, |r| r.ema_long);

    let (mut x0, mut x1) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first.offset as f64, last.offset as f64),
        _ => (0.0, 1.0),
    };
    if x1 <= x0 {
        x0 -= 1.0;
        x1 += 1.0;
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in points.iter().chain(&ema_short).chain(&ema_long) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    } else if y_max <= y_min {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    ChartData {
        points,
        ema_short,
        ema_long,
        x_bounds: [x0, x1],
        y_bounds: [y_min - pad, y_max + pad],
    }
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmaWindows, RawRow};
    use crate::series::{build, enrich};

    fn records(pairs: &[(&str, &str)]) -> Vec<EnrichedRecord> {
        let rows: Vec<RawRow> = pairs.iter().map(|(d, v)| RawRow::new(*d, *v)).collect();
        enrich(&build(&rows).unwrap(), EmaWindows::default()).unwrap()
    }

    fn all_on() -> Visibility {
        Visibility::from_channels(&Channel::ALL)
    }

    #[test]
    fn chart_bounds_cover_visible_series() {
        let recs = records(&[("2024-01-01", "70"), ("2024-01-11", "80")]);
        let data = chart_series(&recs, all_on());
        assert_eq!(data.x_bounds, [0.0, 10.0]);
        assert_eq!(data.points, vec![(0.0, 70.0), (10.0, 80.0)]);
        assert!((data.y_bounds[0] - 69.5).abs() < 1e-9);
        assert!((data.y_bounds[1] - 80.5).abs() < 1e-9);
    }

    #[test]
    fn hidden_channels_are_empty() {
        let recs = records(&[("2024-01-01", "70"), ("2024-01-03", "71")]);
        let mut visible = all_on();
        assert!(!visible.toggle(Channel::Value));
        let data = chart_series(&recs, visible);
        assert!(data.points.is_empty());
        assert_eq!(data.ema_short.len(), 2);
    }

    #[test]
    fn single_record_gets_non_degenerate_bounds() {
        let recs = records(&[("2024-01-01", "70")]);
        let data = chart_series(&recs, all_on());
        assert!(data.x_bounds[1] > data.x_bounds[0]);
        assert!(data.y_bounds[1] > data.y_bounds[0]);
    }
}
