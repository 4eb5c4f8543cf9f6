//! Ratatui-based terminal dashboard.
//!
//! KPI cards across the top, the mileage-vs-price scatter next to the
//! fair-price tool, and the listings table underneath.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::catalog::{Catalog, ListingQuery, distinct_makes, kpi_summary, mileage_price_points};
use crate::cli::SourceArgs;
use crate::domain::{DEFAULT_TARGET_YEAR, DealRating, KpiSummary};
use crate::error::AppError;
use crate::report::{format_currency, format_number, format_pct};

mod form;
mod plotters_chart;

pub use form::{EstimateResult, FairPriceForm, FormField};
use plotters_chart::{MAKE_PALETTE, MakeSeries, ScatterChart, scatter_bounds, series_by_make};

/// Start the TUI.
pub fn run(source: &SourceArgs) -> Result<(), AppError> {
    // Load before taking over the terminal so source errors print normally.
    let catalog = crate::app::pipeline::load_catalog(source)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(catalog);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

struct App {
    catalog: Catalog,
    kpi: KpiSummary,
    scatter: Vec<MakeSeries>,
    form: FairPriceForm,
    query: ListingQuery,
    table: TableState,
    status: String,
}

impl App {
    fn new(catalog: Catalog) -> Self {
        let kpi = kpi_summary(&catalog.listings);
        let scatter = series_by_make(&mileage_price_points(&catalog.listings));
        let status = format!(
            "{} | {} comparables",
            catalog.source.label(),
            catalog.records.len()
        );
        let mut table = TableState::default();
        table.select(Some(0));
        Self {
            catalog,
            kpi,
            scatter,
            form: FairPriceForm::default(),
            query: ListingQuery::default(),
            table,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
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

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        // The mileage box owns printable keys while focused; Esc hands them back.
        if self.form.focus == FormField::Mileage {
            match code {
                KeyCode::Char(c) => {
                    if !self.form.push_mileage(c) {
                        self.status = "Mileage takes digits and an optional mi/miles suffix.".to_string();
                    }
                    return false;
                }
                KeyCode::Esc => {
                    self.form.focus = FormField::Year;
                    return false;
                }
                _ => {}
            }
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.form.focus = self.form.focus.prev(),
            KeyCode::Down => self.form.focus = self.form.focus.next(),
            KeyCode::Left => self.cycle_selector(-1),
            KeyCode::Right => self.cycle_selector(1),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                if self.form.focus == FormField::Mileage {
                    self.form.pop_mileage();
                }
            }
            KeyCode::Char('x') => {
                self.form.reset();
                self.status = "Form reset.".to_string();
            }
            KeyCode::Char('s') => {
                self.query.toggle_sort(self.query.sort_field.next());
                self.table.select(Some(0));
                self.status = format!(
                    "sort: {} {}",
                    self.query.sort_field.display_name(),
                    self.query.sort_order.display_name()
                );
            }
            KeyCode::Char('o') => {
                self.query.sort_order = self.query.sort_order.flip();
                self.table.select(Some(0));
                self.status = format!("order: {}", self.query.sort_order.display_name());
            }
            KeyCode::Char('f') => {
                self.query.make = next_make_filter(&distinct_makes(&self.catalog.listings), self.query.make.as_deref());
                self.table.select(Some(0));
                self.status = format!("filter: {}", self.query.make.as_deref().unwrap_or("all makes"));
            }
            KeyCode::Char('j') | KeyCode::PageDown => self.scroll_table(1),
            KeyCode::Char('k') | KeyCode::PageUp => self.scroll_table(-1),
            _ => {}
        }
        false
    }

    fn cycle_selector(&mut self, delta: i32) {
        if !self.form.cycle(&self.catalog, delta) {
            self.status = match self.form.focus {
                FormField::Model => "Select a make first.".to_string(),
                FormField::Year => "Select a model first.".to_string(),
                FormField::Make => "No makes in catalog.".to_string(),
                FormField::Mileage => "Type a mileage, e.g. 15,000.".to_string(),
            };
        }
    }

    fn submit(&mut self) {
        self.status = match self.form.submit(&self.catalog) {
            Ok(result) => match &result.estimation {
                Some(est) => format!(
                    "Estimated {} ({})",
                    format_currency(est.estimated_price as f64),
                    est.confidence.display_name()
                ),
                None => format!("Insufficient data for make '{}'.", result.make),
            },
            Err(msg) => msg,
        };
    }

    fn scroll_table(&mut self, delta: i32) {
        let rows = self.query.apply(&self.catalog.listings).len();
        if rows == 0 {
            self.table.select(None);
            return;
        }
        let cur = self.table.selected().unwrap_or(0) as i64;
        let next = (cur + i64::from(delta)).clamp(0, rows as i64 - 1);
        self.table.select(Some(next as usize));
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(14),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_kpis(frame, chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        self.draw_chart(frame, middle[0]);
        self.draw_form(frame, middle[1]);

        self.draw_table(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_kpis(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cards = [
            ("Total listings", format_number(self.kpi.total_listings as f64)),
            ("Avg price", format_currency(self.kpi.avg_price)),
            ("Median price", format_currency(self.kpi.median_price)),
            ("Avg mileage", format!("{} mi", format_number(self.kpi.avg_mileage))),
            ("New this week", self.kpi.new_this_week.to_string()),
            ("Great deals", self.kpi.great_deals.to_string()),
        ];

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, cards.len() as u32); 6])
            .split(area);

        for ((title, value), rect) in cards.iter().zip(cols.iter()) {
            let p = Paragraph::new(Line::from(Span::styled(
                value.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().title(*title).borders(Borders::ALL));
            frame.render_widget(p, *rect);
        }
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Mileage vs Price").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.scatter.is_empty() {
            let msg = Paragraph::new("No listings to plot.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let (x_bounds, y_bounds) = scatter_bounds(&self.scatter);
        let (chart_rect, insets) = chart_layout(parts[0]);
        let widget = ScatterChart {
            series: &self.scatter,
            x_bounds,
            y_bounds,
            x_label: "mileage",
            y_label: "price",
            fmt_x: fmt_axis_miles,
            fmt_y: fmt_axis_price,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, parts[0], chart_rect, insets, x_bounds, y_bounds);
        }

        let legend: Vec<Span> = self
            .scatter
            .iter()
            .enumerate()
            .flat_map(|(i, s)| {
                let c = MAKE_PALETTE[i % MAKE_PALETTE.len()];
                [
                    Span::styled("● ", Style::default().fg(Color::Rgb(c.0, c.1, c.2))),
                    Span::raw(format!("{}  ", s.make)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(legend)), parts[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(area);

        let form = &self.form;
        let mileage_cursor = if form.focus == FormField::Mileage { "_" } else { "" };
        let items = vec![
            ListItem::new(format!("Make:    {}", form.make.as_deref().unwrap_or("(select)"))),
            ListItem::new(format!("Model:   {}", form.model.as_deref().unwrap_or("(any model)"))),
            ListItem::new(format!(
                "Year:    {}",
                form.year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| format!("{DEFAULT_TARGET_YEAR} (default)"))
            )),
            ListItem::new(format!("Mileage: {}{mileage_cursor}", form.mileage)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Fair Price Tool").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(form.focus.index()));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let lines = match &form.result {
            None => vec![Line::from(Span::styled(
                "Pick a vehicle and press Enter.",
                Style::default().fg(Color::Gray),
            ))],
            Some(result) => result_lines(result),
        };
        let p = Paragraph::new(Text::from(lines)).block(Block::default().title("Estimate").borders(Borders::ALL));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_table(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = self.query.apply(&self.catalog.listings);
        let title = format!(
            "Listings: {} vehicles | sort {} {} | make {}",
            rows.len(),
            self.query.sort_field.display_name(),
            self.query.sort_order.display_name(),
            self.query.make.as_deref().unwrap_or("all"),
        );

        let header = Row::new(["Vehicle", "Year", "Price", "Fair", "Δ", "Mileage", "Condition", "Deal", "Listed"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

        let body: Vec<Row> = rows
            .iter()
            .map(|l| {
                Row::new(vec![
                    Cell::from(format!("{} {}", l.make, l.model)),
                    Cell::from(l.year.to_string()),
                    Cell::from(format_currency(l.price)),
                    Cell::from(format_currency(l.fair_price)),
                    Cell::from(format_pct(l.price_delta_pct())),
                    Cell::from(format_number(l.mileage)),
                    Cell::from(l.condition.display_name()),
                    Cell::from(l.deal_rating.display_name()).style(Style::default().fg(deal_color(l.deal_rating))),
                    Cell::from(l.listed_date.format("%b %-d").to_string()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(18),
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(7),
        ];

        let table = Table::new(body, widths)
            .header(header)
            .block(Block::default().title(title).borders(Borders::ALL))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, area, &mut self.table);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ field  ←/→ choose  type mileage (Esc leaves)  Enter estimate  x reset  s sort  o order  f make  j/k scroll  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn result_lines(result: &EstimateResult) -> Vec<Line<'static>> {
    let model = if result.model.is_empty() { "(any model)" } else { result.model.as_str() };
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{} {} {} | {} mi",
            result.year,
            result.make,
            model,
            format_number(result.mileage)
        ),
        Style::default().fg(Color::Gray),
    ))];

    let Some(est) = &result.estimation else {
        lines.push(Line::from(Span::styled(
            format!("Insufficient data for make '{}'.", result.make),
            Style::default().fg(Color::Yellow),
        )));
        return lines;
    };

    lines.push(Line::from(Span::styled(
        format_currency(est.estimated_price as f64),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!(
        "Range: {} - {}",
        format_currency(est.price_range.0 as f64),
        format_currency(est.price_range.1 as f64)
    )));
    lines.push(Line::from(format!("Confidence: {}", est.confidence.display_name())));
    lines.push(Line::from(format!(
        "Based on {} comparable listings",
        est.comparable_count
    )));
    lines
}

/// `None` -> first make -> ... -> last make -> `None`.
fn next_make_filter(makes: &[String], current: Option<&str>) -> Option<String> {
    match current {
        None => makes.first().cloned(),
        Some(cur) => {
            let idx = makes.iter().position(|m| m == cur)?;
            makes.get(idx + 1).cloned()
        }
    }
}

fn deal_color(rating: DealRating) -> Color {
    match rating {
        DealRating::GreatDeal => Color::Green,
        DealRating::GoodDeal => Color::Cyan,
        DealRating::FairDeal => Color::White,
        DealRating::Overpriced => Color::Red,
    }
}

fn fmt_axis_miles(v: f64) -> String {
    format!("{:.0}k", v / 1000.0)
}

fn fmt_axis_price(v: f64) -> String {
    format!("${:.0}k", v / 1000.0)
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_miles(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_price(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("mileage (mi)")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("price")
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
