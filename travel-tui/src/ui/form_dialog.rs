use super::utils::{centered_rect, truncate};
use super::*;
use crate::app::forms::FieldInput;
use crate::app::{FormDialog, FormMode};

const WIDTH: u16 = 70;
const LABEL_WIDTH: usize = 20;

pub fn render_form_dialog(frame: &mut Frame, dialog: &FormDialog) {
    let title = match dialog.mode {
        FormMode::Create => format!(" New {} ", dialog.kind.label()),
        FormMode::Edit(id) => format!(" Edit {} #{} ", dialog.kind.label(), id),
    };

    let value_width = (WIDTH as usize).saturating_sub(LABEL_WIDTH + 10);
    let mut lines = vec![Line::from("")];

    for (i, field) in dialog.form.fields.iter().enumerate() {
        let focused = i == dialog.form.focused;
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = vec![Span::styled(
            format!("{:<width$}", field.label, width = LABEL_WIDTH),
            label_style,
        )];
        match &field.input {
            FieldInput::Text(input) if focused => {
                let (before, after) = input.split_at_cursor();
                spans.push(Span::styled(before.to_string(), value_style));
                spans.push(Span::styled("│", Style::default().fg(Color::Yellow)));
                spans.push(Span::styled(after.to_string(), value_style));
            }
            FieldInput::Text(input) => {
                spans.push(Span::styled(truncate(&input.value, value_width), value_style));
            }
            FieldInput::Choice { options, selected } => {
                let current = selected
                    .and_then(|i| options.get(i))
                    .map(|o| truncate(&o.label, value_width))
                    .unwrap_or_else(|| {
                        if options.is_empty() {
                            "(nothing to choose)".to_string()
                        } else {
                            "(choose)".to_string()
                        }
                    });
                if focused {
                    spans.push(Span::styled("◀ ", Style::default().fg(Color::Yellow)));
                    spans.push(Span::styled(current, value_style));
                    spans.push(Span::styled(" ▶", Style::default().fg(Color::Yellow)));
                } else {
                    spans.push(Span::styled(current, value_style));
                }
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if let Some(err) = &dialog.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(": Next field  "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(": Choose  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Save  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Cancel"),
    ]));

    let height = lines.len() as u16 + 2;
    let area = centered_rect(WIDTH, height, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(title, Style::default().fg(Color::Yellow)))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(paragraph, area);
}
