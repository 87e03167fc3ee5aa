use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, Fetch};

pub fn render_users_screen(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    match app.list.users {
        Fetch::Ready(_) => render_users_table(f, area, app),
        Fetch::Loading => {
            let p = Paragraph::new("Loading users…")
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.theme.muted))
                .block(block);
            f.render_widget(p, area);
        }
        Fetch::Failed(ref message) => {
            let p = Paragraph::new(format!("Could not load users: {message}\n\nPress r to try again."))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(app.theme.error))
                .block(block);
            f.render_widget(p, area);
        }
    }
}

fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.list.rows_per_page = body_height;
    }
    let rpp = app.list.rows_per_page.max(1);

    let visible = app.list.visible();
    let title = format!("Users ({}/{})", visible.len(), total_users(app));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    if visible.is_empty() {
        let msg = if app.list.search_query.is_empty() {
            "No users. Press n to create one.".to_string()
        } else {
            format!("No users match \"{}\".", app.list.search_query)
        };
        let p = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let start = (app.list.selected / rpp) * rpp;
    let end = (start + rpp).min(visible.len());

    let rows = visible[start..end].iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.list.selected {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else if absolute_index % 2 == 1 {
            Style::default().fg(app.theme.text).bg(app.theme.row_alt_bg)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(u.name.clone()),
            Cell::from(u.username.clone()),
            Cell::from(u.email.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(35),
        Constraint::Percentage(20),
        Constraint::Percentage(45),
    ];
    let header = Row::new(vec!["ID", "Name", "Username", "Email"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

fn total_users(app: &AppState) -> usize {
    match &app.list.users {
        Fetch::Ready(users) => users.len(),
        _ => 0,
    }
}
