use super::utils::centered_rect;
use super::*;
use crate::app::ReportPicker;
use crate::types::{ReportDataset, ReportFormat};

pub fn render_report_dialog(frame: &mut Frame, picker: &ReportPicker) {
    let mut lines = vec![Line::from("")];

    let mut format_spans = vec![Span::styled("Format   ", Style::default().fg(Color::DarkGray))];
    for format in ReportFormat::ALL {
        let style = if format == picker.format() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        format_spans.push(Span::styled(format!(" {} ", format.as_str()), style));
        format_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(format_spans));
    lines.push(Line::from(""));

    for dataset in ReportDataset::ALL {
        let selected = dataset == picker.dataset();
        let (marker, style) = if selected {
            ("▶ ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, dataset.as_str()),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(": Dataset  "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(": Format  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Download  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Cancel"),
    ]));

    let area = centered_rect(64, lines.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(
                " Download report ",
                Style::default().fg(Color::Yellow),
            ))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(paragraph, area);
}
