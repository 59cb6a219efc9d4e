//! Dashboard view: stat cards, monthly chart, appliance shares, and the
//! records table for one signed-in home.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use energy_core::analytics;
use energy_core::formatting::{self, format_currency, format_kwh, hour_label, percentage};
use energy_core::models::{EnergyRecord, MonthlyPoint};

use crate::themes::Theme;

/// Everything the dashboard renders, computed once per record set.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_kwh: f64,
    pub highest: (String, f64),
    pub peak_hour: (u32, f64),
    pub per_person: f64,
    pub estimated_cost: f64,
    pub by_appliance: Vec<(String, f64)>,
    pub by_season: Vec<(String, f64)>,
    pub monthly: Vec<MonthlyPoint>,
}

impl DashboardSummary {
    pub fn compute(records: &[EnergyRecord], household_size: u32, rate_per_kwh: f64) -> Self {
        Self {
            total_kwh: analytics::total_consumption(records),
            highest: analytics::highest_consumption_appliance(records),
            peak_hour: analytics::peak_usage_hour(records),
            per_person: analytics::per_person_average(records, household_size),
            estimated_cost: analytics::estimated_cost(records, rate_per_kwh),
            by_appliance: analytics::consumption_by_appliance(records),
            by_season: analytics::consumption_by_season(records),
            monthly: analytics::monthly_consumption(records),
        }
    }
}

// ── ShareBar ─────────────────────────────────────────────────────────────────

/// Horizontal bar showing one appliance's share of total consumption.
///
/// Renders as a coloured fill + empty portion followed by the kWh figure and
/// the percentage.
pub struct ShareBar<'a> {
    pub label: String,
    pub kwh: f64,
    /// Share of the home total, `[0.0, 100.0]`.
    pub percentage: f64,
    pub theme: &'a Theme,
    /// Total width of the bar portion in terminal columns.
    pub width: u16,
}

impl<'a> ShareBar<'a> {
    pub fn new(label: String, kwh: f64, total: f64, theme: &'a Theme) -> Self {
        Self {
            label,
            kwh,
            percentage: percentage(kwh, total, 1),
            theme,
            width: 24,
        }
    }

    /// Render the bar as a [`Line`] suitable for embedding in a paragraph.
    pub fn to_line(&self) -> Line<'a> {
        let filled = ((self.percentage / 100.0) * self.width as f64) as u16;
        let empty = self.width.saturating_sub(filled);

        let filled_str: String = std::iter::repeat_n('\u{2588}', filled as usize).collect();
        let empty_str: String = std::iter::repeat_n('\u{2591}', empty as usize).collect();

        Line::from(vec![
            Span::styled(
                format!("{:<14} ", self.label),
                self.theme.share_label,
            ),
            Span::styled(filled_str, self.theme.share_style(self.percentage)),
            Span::styled(empty_str, self.theme.share_empty),
            Span::styled(
                format!(" {} ({:.1}%)", format_kwh(self.kwh), self.percentage),
                self.theme.share_label,
            ),
        ])
    }
}

// ── Rendering ────────────────────────────────────────────────────────────────

/// Render the full dashboard into `area`.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    home_id: &str,
    summary: &DashboardSummary,
    records: &[EnergyRecord],
    theme: &Theme,
) {
    if records.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(records.len().min(8) as u16 + 4),
        ])
        .split(area);

    render_stat_cards(frame, chunks[0], home_id, summary, theme);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_monthly_chart(frame, middle[0], &summary.monthly, theme);
    render_appliance_shares(frame, middle[1], summary, theme);

    render_records_table(frame, chunks[2], records, summary.total_kwh, theme);
}

/// The four headline cards across the top of the dashboard.
fn render_stat_cards(
    frame: &mut Frame,
    area: Rect,
    home_id: &str,
    summary: &DashboardSummary,
    theme: &Theme,
) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let (top_appliance, top_kwh) = &summary.highest;
    let (peak_hour, peak_kwh) = summary.peak_hour;

    stat_card(
        frame,
        cards[0],
        &format!(" Home {} · Total Usage ", home_id),
        format_kwh(summary.total_kwh),
        format!("{} per person", format_kwh(summary.per_person)),
        theme,
    );
    stat_card(
        frame,
        cards[1],
        " Top Appliance ",
        top_appliance.clone(),
        format_kwh(*top_kwh),
        theme,
    );
    stat_card(
        frame,
        cards[2],
        " Peak Hour ",
        hour_label(peak_hour),
        format_kwh(peak_kwh),
        theme,
    );
    stat_card(
        frame,
        cards[3],
        " Estimated Cost ",
        format_currency(summary.estimated_cost),
        "at your configured rate".to_string(),
        theme,
    );
}

fn stat_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    detail: String,
    theme: &Theme,
) {
    let lines = vec![
        Line::from(Span::styled(value, theme.value)),
        Line::from(Span::styled(detail, theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(title.to_string(), theme.header)),
        ),
        area,
    );
}

/// Monthly consumption as horizontal text bars scaled to the busiest month.
fn render_monthly_chart(frame: &mut Frame, area: Rect, monthly: &[MonthlyPoint], theme: &Theme) {
    let max = monthly
        .iter()
        .map(|p| p.consumption)
        .fold(0.0_f64, f64::max);

    let bar_width = area.width.saturating_sub(26).max(10);
    let lines: Vec<Line> = if monthly.is_empty() {
        vec![Line::from(Span::styled("No dated records", theme.dim))]
    } else {
        monthly
            .iter()
            .map(|point| {
                let filled = if max > 0.0 {
                    ((point.consumption / max) * bar_width as f64).round() as usize
                } else {
                    0
                };
                Line::from(vec![
                    Span::styled(format!("{:>8} ", point.month), theme.label),
                    Span::styled("\u{2588}".repeat(filled), theme.chart_bar),
                    Span::styled(format!(" {}", format_kwh(point.consumption)), theme.chart_value),
                ])
            })
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(" Monthly Consumption ", theme.header)),
        ),
        area,
    );
}

/// Per-appliance share bars plus a seasonal summary line.
fn render_appliance_shares(
    frame: &mut Frame,
    area: Rect,
    summary: &DashboardSummary,
    theme: &Theme,
) {
    let mut lines: Vec<Line> = summary
        .by_appliance
        .iter()
        .map(|(appliance, kwh)| {
            ShareBar::new(appliance.clone(), *kwh, summary.total_kwh, theme).to_line()
        })
        .collect();

    if !summary.by_season.is_empty() {
        lines.push(Line::from(""));
        let mut spans: Vec<Span> = vec![Span::styled("Seasons: ", theme.label)];
        for (season, kwh) in &summary.by_season {
            spans.push(Span::styled(
                format!("{} {}  ", season, format_kwh(*kwh)),
                theme.season_style(season),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(" By Appliance ", theme.header)),
        ),
        area,
    );
}

/// The raw records table with a highlighted totals row at the bottom.
fn render_records_table(
    frame: &mut Frame,
    area: Rect,
    records: &[EnergyRecord],
    total_kwh: f64,
    theme: &Theme,
) {
    let header_cells = ["Appliance", "Energy", "Time", "Date", "Outdoor", "Season"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(record.appliance.clone()),
                Cell::from(format_kwh(record.energy_kwh)),
                Cell::from(record.time.clone()),
                Cell::from(record.date.clone()),
                Cell::from(format!(
                    "{} °C",
                    formatting::format_number(record.outdoor_temp_c, 1)
                )),
                Cell::from(record.season.clone()).style(theme.season_style(&record.season)),
            ])
            .style(style)
        })
        .collect();

    let total_row = Row::new(vec![
        Cell::from("TOTAL").style(theme.table_total),
        Cell::from(format_kwh(total_kwh)),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
        Cell::from(format!("{} records", records.len())),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(" Usage Records ", theme.header)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when the home has no records.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No energy data found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check your data file or sign in to a home with records.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Energy Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
