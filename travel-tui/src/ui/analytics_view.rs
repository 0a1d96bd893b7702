use super::utils::truncate;
use super::*;
use crate::app::charts::{self, BarRow, PieShare};
use ratatui::widgets::{Bar, BarChart, BarGroup};

/// Shared color palette, same order for pie slices and bars
pub const PALETTE: [Color; 12] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
    Color::LightBlue,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightCyan,
    Color::LightRed,
];

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1))
}

fn no_data(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No data")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(empty, area);
}

pub fn render_analytics_view(frame: &mut Frame, app: &App, body: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Percentage(50),
            Constraint::Min(8),
        ])
        .split(body);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let data = app.analytics.as_ref();
    render_card(frame, cards[0], "Total expenses", charts::total_headline(data));
    render_card(
        frame,
        cards[1],
        "Average expense per trip",
        charts::average_headline(data),
    );

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    render_employee_panel(frame, app, middle[0]);
    render_category_panel(frame, app, middle[1]);
    render_count_panel(
        frame,
        bottom[0],
        "Popular destinations",
        data.map(charts::destination_counts).unwrap_or_default(),
    );
    render_count_panel(
        frame,
        bottom[1],
        "Employees with most trips",
        data.map(charts::trip_counts).unwrap_or_default(),
    );
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, value: Option<String>) {
    let block = panel(title);
    let (text, style) = match value {
        Some(value) => (
            value,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => ("No data".to_string(), Style::default().fg(Color::DarkGray)),
    };
    let card = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(card, area);
}

fn render_employee_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel("Expenses by employee");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(data) = app.analytics.as_ref().filter(|d| !d.expenses_by_employee.is_empty()) else {
        no_data(frame, inner);
        return;
    };

    // label column + bar + "  12 345.00"
    let label_width = (inner.width as usize / 3).clamp(8, 28);
    let value_width = 14;
    let bar_cols = (inner.width as usize)
        .saturating_sub(label_width + value_width + 1)
        .max(1);

    let lines: Vec<Line> = charts::employee_bars(data, bar_cols)
        .into_iter()
        .enumerate()
        .map(|(i, BarRow { label, value, filled })| {
            let color = PALETTE[i % PALETTE.len()];
            Line::from(vec![
                Span::styled(
                    format!("{:<width$} ", truncate(&label, label_width), width = label_width),
                    Style::default().fg(Color::White),
                ),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    "░".repeat(bar_cols - filled),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:>width$}", charts::format_amount(value), width = value_width),
                    Style::default().fg(Color::White),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_category_panel(frame: &mut Frame, app: &App, area: Rect) {
    use tui_piechart::{PieChart, PieSlice};

    let block = panel("Expenses by category");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shares: Vec<PieShare> = app
        .analytics
        .as_ref()
        .map(charts::category_shares)
        .unwrap_or_default();
    if shares.is_empty() {
        no_data(frame, inner);
        return;
    }

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    let slices: Vec<PieSlice> = shares
        .iter()
        .enumerate()
        .map(|(i, share)| {
            PieSlice::new(
                share.label.as_str(),
                share.percentage,
                PALETTE[i % PALETTE.len()],
            )
        })
        .collect();

    // Render pie without its built-in legend
    let pie = PieChart::new(slices)
        .show_legend(false)
        .show_percentages(false);
    frame.render_widget(pie, split[0]);

    let legend_lines: Vec<Line> = shares
        .iter()
        .enumerate()
        .map(|(i, share)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(PALETTE[i % PALETTE.len()])),
                Span::styled(
                    format!(
                        "{} {} ({:.0}%)",
                        share.label,
                        charts::format_amount(share.value),
                        share.percentage
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    let legend = Paragraph::new(legend_lines)
        .block(Block::default().padding(Padding::new(1, 0, 1, 0)));
    frame.render_widget(legend, split[1]);
}

fn render_count_panel(frame: &mut Frame, area: Rect, title: &str, counts: Vec<(String, u64)>) {
    let block = panel(title);
    if counts.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        no_data(frame, inner);
        return;
    }

    let inner_width = area.width.saturating_sub(4);
    let n = counts.len() as u16;
    let bar_width = (inner_width.saturating_sub(n.saturating_sub(1)) / n.max(1)).clamp(3, 16);

    let bars: Vec<Bar> = counts
        .into_iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let color = PALETTE[i % PALETTE.len()];
            Bar::default()
                .value(count)
                .label(Line::from(truncate(&label, bar_width as usize)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}
