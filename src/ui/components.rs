//! Shared UI components (status bar, dialogs, help).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, Fetch, InputMode, ModalState};

/// Bottom line: mode, route, counts and the last notice.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let users = match &app.list.users {
        Fetch::Loading => "…".to_string(),
        Fetch::Ready(all) => format!("{}/{}", app.list.visible().len(), all.len()),
        Fetch::Failed(_) => "error".to_string(),
    };
    let mut msg = format!("mode: {mode}  route: {}  users: {users}  ?: help", app.route());
    if let Some(status) = &app.status {
        msg.push_str("  | ");
        msg.push_str(status);
    }
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn dialog_block<'a>(title: impl Into<Line<'a>>, app: &AppState) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}

pub fn render_delete_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::DeleteConfirm { target, selected, pending, error } = state else {
        return;
    };
    let rect = centered_rect(56u16.min(area.width.saturating_sub(4)).max(40), 9, area);
    let mut lines = vec![
        Line::from(Span::styled(
            "Are you sure you want to delete this user?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(format!("{} ({}) #{}", target.name, target.username, target.id)),
        Line::raw(""),
    ];
    if *pending {
        lines.push(Line::raw("Deleting…"));
    } else {
        let button = |idx: usize, label: &'static str| {
            let style = if idx == *selected {
                Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Span::styled(format!(" {label} "), style)
        };
        lines.push(Line::from(vec![button(0, "Confirm"), Span::raw("    "), button(1, "Cancel")]));
    }
    if let Some(err) = error {
        lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(app.theme.error))));
    }
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(dialog_block("Delete user", app));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::Info { message } = state else {
        return;
    };
    let width = 48u16.min(area.width.saturating_sub(4)).max(24);
    let inner = width.saturating_sub(2).max(1) as usize;
    let wrapped = message.lines().map(|l| l.chars().count().div_ceil(inner).max(1)).sum::<usize>();
    let height = (wrapped as u16 + 2).clamp(3, area.height.saturating_sub(2).max(3));
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(message.clone())
        .wrap(Wrap { trim: false })
        .block(dialog_block("Info", app));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_goto_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    let ModalState::GoTo { path, error } = state else {
        return;
    };
    let rect = centered_rect(50u16.min(area.width.saturating_sub(4)).max(30), 6, area);
    let mut lines = vec![Line::raw(format!("{path}_"))];
    match error {
        Some(err) => lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(app.theme.error)))),
        None => lines.push(Line::from(Span::styled(
            "Paths: /  or  /user/{id}",
            Style::default().fg(app.theme.muted),
        ))),
    }
    let p = Paragraph::new(lines).block(dialog_block("Go to", app));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Help overlay built from the live keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = 24u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let sections: [(&str, &[(KeyAction, &str)]); 2] = [
        (
            "User list",
            &[
                (KeyAction::MoveUp, "Move up"),
                (KeyAction::MoveDown, "Move down"),
                (KeyAction::PageUp, "Page up"),
                (KeyAction::PageDown, "Page down"),
                (KeyAction::StartSearch, "Search by name"),
                (KeyAction::NewUser, "Create user"),
                (KeyAction::EditSelection, "Edit user"),
                (KeyAction::DeleteSelection, "Delete user"),
                (KeyAction::OpenDetails, "View details"),
            ],
        ),
        (
            "General",
            &[
                (KeyAction::Back, "Back / clear search"),
                (KeyAction::Reload, "Reload screen"),
                (KeyAction::GoTo, "Go to path"),
                (KeyAction::OpenHelp, "Help"),
                (KeyAction::Quit, "Quit"),
            ],
        ),
    ];

    let mut lines: Vec<Line> = Vec::new();
    for (title, entries) in sections {
        lines.push(Line::from(Span::styled(
            format!("{title}:"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (action, label) in entries {
            lines.push(help_row(label, &keys_text(&app.keymap, *action)));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(Span::styled("Form:", Style::default().add_modifier(Modifier::BOLD))));
    for (label, keys) in [
        ("Next / previous field", "Tab, Down / BackTab, Up"),
        ("Submit", "Enter"),
        ("Cancel", "Esc"),
    ] {
        lines.push(help_row(label, keys));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Delete dialog:", Style::default().add_modifier(Modifier::BOLD))));
    for (label, keys) in [("Choose", "Left, Right"), ("Apply", "Enter"), ("Confirm / cancel", "y / n, Esc")] {
        lines.push(help_row(label, keys));
    }

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(dialog_block("Help", app));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

fn keys_text(keymap: &Keymap, action: KeyAction) -> String {
    keymap.keys_for(action).join(", ")
}

fn help_row(label: &str, keys: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {label:>22} │ ")),
        Span::styled(keys.to_string(), Style::default().add_modifier(Modifier::ITALIC)),
    ])
}
