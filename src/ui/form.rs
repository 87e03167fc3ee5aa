use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::AppState;
use crate::app::form::FormState;
use crate::ui::components::centered_rect;
use crate::validation::Field;

/// Create/edit modal: one line per field, its error (if touched) beneath it.
pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState, form: &FormState) {
    let label_w = Field::ALL.iter().map(|fl| fl.label().len()).max().unwrap_or(0);
    let mut lines: Vec<Line> = Vec::new();

    for (idx, field) in Field::ALL.iter().copied().enumerate() {
        let focused = idx == form.focus;
        let marker = if focused { "▶ " } else { "  " };
        let value = form.draft.get(field);
        let mut value_style = Style::default().fg(app.theme.text);
        if !form.is_editable(field) {
            value_style = value_style.fg(app.theme.muted).add_modifier(Modifier::ITALIC);
        }
        if focused {
            value_style = value_style.add_modifier(Modifier::UNDERLINED);
        }
        let cursor = if focused && form.is_editable(field) && !form.submitting { "_" } else { "" };
        let suffix = if form.is_editable(field) { "" } else { " (read-only)" };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{:>width$}: ", field.label(), width = label_w),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{value}{cursor}"), value_style),
            Span::styled(suffix, Style::default().fg(app.theme.muted)),
        ]));
        if let Some(err) = form.visible_error(field) {
            lines.push(Line::from(Span::styled(
                format!("{:width$}  {err}", "", width = label_w + 2),
                Style::default().fg(app.theme.error),
            )));
        }
    }

    lines.push(Line::raw(""));
    if let Some(err) = &form.submit_error {
        lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(app.theme.error))));
    }
    let actions = if form.submitting {
        "Saving…".to_string()
    } else {
        format!("Enter: {}   Esc: Cancel   Tab/Up/Down: move", form.submit_label())
    };
    lines.push(Line::from(Span::styled(actions, Style::default().add_modifier(Modifier::ITALIC))));

    let width = 70u16.min(area.width.saturating_sub(4)).max(40);
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2)).max(8);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
