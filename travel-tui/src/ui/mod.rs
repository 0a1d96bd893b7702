use crate::app::{App, Dialog, Page};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

mod analytics_view;
mod delete_dialog;
mod form_dialog;
mod report_dialog;
mod tables;
pub(super) mod utils;

const TITLE: &str = " Travel Expenses";
const NAV_WIDTH: u16 = 22;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, app, root[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(NAV_WIDTH), Constraint::Min(0)])
        .split(root[1]);

    render_nav(frame, app, columns[0]);

    let body = columns[1];
    match app.page {
        Page::Analytics => analytics_view::render_analytics_view(frame, app, body),
        Page::Employees => tables::render_employees(frame, app, body),
        Page::ExpenseTypes => tables::render_expense_types(frame, app, body),
        Page::BusinessTrips => tables::render_business_trips(frame, app, body),
        Page::Expenses => tables::render_expenses(frame, app, body),
    }

    render_controls(frame, app, root[2]);

    match &app.dialog {
        Some(Dialog::Form(dialog)) => form_dialog::render_form_dialog(frame, dialog),
        Some(Dialog::Delete(dialog)) => delete_dialog::render_delete_confirm_dialog(frame, dialog),
        None => {}
    }
    if let Some(picker) = &app.report_picker {
        report_dialog::render_report_dialog(frame, picker);
    }

    // Alert renders on top of everything, dialogs included
    if let Some(message) = &app.alert {
        render_alert(frame, message);
    }
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let throbber_area = Rect {
        x: area.x + 1,
        y: area.y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(TITLE, Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("  ·  {}", app.page.title()),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        label_area,
    );
}

fn render_nav(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let active = *page == app.page;
            let style = if active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if active { "▶ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(page.title(), style),
            ]))
        })
        .collect();

    let nav = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(" Pages ", Style::default().fg(Color::DarkGray)))
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(nav, area);
}

fn key_hints(page: Page) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("1-5 / Tab", "Page"), ("r", "Refresh")];
    if page == Page::Analytics {
        hints.push(("d", "Download report"));
    } else {
        hints.extend([
            ("j/k", "Select"),
            ("n", "New"),
            ("e", "Edit"),
            ("x", "Delete"),
        ]);
    }
    hints.push(("q", "Quit"));
    hints
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some(status) = &app.status_message {
        spans.push(Span::styled(
            format!("{}  │  ", status),
            Style::default().fg(Color::Green),
        ));
    }
    for (key, label) in key_hints(app.page) {
        spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}  ", label)));
    }

    let controls = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}

fn render_alert(frame: &mut Frame, message: &str) {
    let area = utils::centered_rect(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter / Esc", Style::default().fg(Color::Yellow)),
            Span::raw(": Dismiss"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(Span::styled(" Error ", Style::default().fg(Color::Red)))
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(paragraph, area);
}
