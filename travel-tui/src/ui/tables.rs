use super::*;
use crate::app::charts::{destination_label, format_amount};
use crate::app::forms::format_date;
use ratatui::widgets::{Cell, Row, Table, TableState};

struct PageTable<'a> {
    title: &'a str,
    header: &'a [&'a str],
    widths: &'a [Constraint],
    rows: Vec<Row<'a>>,
}

fn render_table(frame: &mut Frame, app: &App, area: Rect, table: PageTable) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" {} ({}) ", table.title, table.rows.len()),
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1));

    if table.rows.is_empty() {
        let empty = Paragraph::new("No records")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        table
            .header
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow))),
    )
    .bottom_margin(1);

    let widget = Table::new(table.rows, table.widths.to_vec())
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default().with_selected(app.selected_index(app.page));
    frame.render_stateful_widget(widget, area, &mut state);
}

pub fn render_employees(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app
        .employees
        .iter()
        .map(|e| Row::new(vec![Cell::from(e.id.to_string()), Cell::from(e.fio.clone())]))
        .collect();

    render_table(
        frame,
        app,
        area,
        PageTable {
            title: "Employees",
            header: &["ID", "Full name"],
            widths: &[Constraint::Length(6), Constraint::Min(20)],
            rows,
        },
    );
}

pub fn render_expense_types(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app
        .expense_types
        .iter()
        .map(|t| Row::new(vec![Cell::from(t.id.to_string()), Cell::from(t.name.clone())]))
        .collect();

    render_table(
        frame,
        app,
        area,
        PageTable {
            title: "Expense Types",
            header: &["ID", "Name"],
            widths: &[Constraint::Length(6), Constraint::Min(20)],
            rows,
        },
    );
}

pub fn render_business_trips(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app
        .business_trips
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.id.to_string()),
                Cell::from(app.employee_label(t.employee_id)),
                Cell::from(destination_label(t.destination.as_deref())),
                Cell::from(format_date(t.start_trip)),
                Cell::from(format_date(t.end_trip)),
            ])
        })
        .collect();

    render_table(
        frame,
        app,
        area,
        PageTable {
            title: "Business Trips",
            header: &["ID", "Employee", "Destination", "Start", "End"],
            widths: &[
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Min(14),
                Constraint::Length(12),
                Constraint::Length(12),
            ],
            rows,
        },
    );
}

pub fn render_expenses(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app
        .expenses
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(e.id.to_string()),
                Cell::from(app.business_trip_label(e.business_trip_id)),
                Cell::from(app.expense_type_label(e.expense_type_id)),
                Cell::from(Line::from(format_amount(e.amount)).alignment(Alignment::Right)),
            ])
        })
        .collect();

    render_table(
        frame,
        app,
        area,
        PageTable {
            title: "Expenses",
            header: &["ID", "Business trip", "Type", "Amount"],
            widths: &[
                Constraint::Length(6),
                Constraint::Min(30),
                Constraint::Min(14),
                Constraint::Length(14),
            ],
            rows,
        },
    );
}
