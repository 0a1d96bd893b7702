use super::utils::centered_rect;
use super::*;
use crate::app::DeleteDialog;

pub fn render_delete_confirm_dialog(frame: &mut Frame, dialog: &DeleteDialog) {
    let area = centered_rect(56, 10, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            dialog.label.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("{} #{}", dialog.kind.label(), dialog.id),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Red)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Delete {}? ", dialog.kind.label()))
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
