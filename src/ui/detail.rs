use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{AppState, Fetch};

/// Detail screen for the routed user: placeholder while loading, the full
/// field set once loaded, an error if the fetch failed.
pub fn render_user_detail(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let Some(detail) = app.detail.as_ref() else {
        f.render_widget(block, area);
        return;
    };

    let p = match &detail.user {
        Fetch::Loading => Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block.title(format!("User {}", detail.id))),
        Fetch::Failed(message) => Paragraph::new(format!(
            "Could not load user {}: {message}\n\nPress r to try again, Esc to go back.",
            detail.id
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.error))
        .block(block.title(format!("User {}", detail.id))),
        Fetch::Ready(user) => {
            let label = |name: &'static str| {
                Span::styled(format!("{name}: "), Style::default().add_modifier(Modifier::BOLD))
            };
            let lines = vec![
                Line::from(Span::styled(
                    format!("{}'s Details", user.name),
                    Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
                )),
                Line::raw(""),
                Line::from(vec![label("ID"), Span::raw(user.id.to_string())]),
                Line::from(vec![label("Username"), Span::raw(user.username.clone())]),
                Line::from(vec![label("Email"), Span::raw(user.email.clone())]),
                Line::from(vec![label("Phone"), Span::raw(user.phone.clone())]),
                Line::from(vec![label("Website"), Span::raw(user.website.clone())]),
                Line::from(vec![label("Company"), Span::raw(user.company.name.clone())]),
                Line::from(vec![label("Address"), Span::raw(user.address_line())]),
                Line::raw(""),
                Line::from(Span::styled(
                    "Esc: back to user list",
                    Style::default().fg(app.theme.muted).add_modifier(Modifier::ITALIC),
                )),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.theme.text))
                .block(block.title(user.name.clone()))
        }
    };
    f.render_widget(p, area);
}
