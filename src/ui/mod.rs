//! Rendering. Pure functions of [`AppState`] apart from recording the visible
//! page height for paging.

pub mod components;
pub mod detail;
pub mod form;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};
use crate::router::Route;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(f.area());

    render_header(f, root[0], app);

    match app.route() {
        Route::List => users::render_users_screen(f, root[1], app),
        Route::Detail(_) => detail::render_user_detail(f, root[1], app),
    }

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let title = match app.route() {
        Route::List => "User List".to_string(),
        Route::Detail(_) => "User Details".to_string(),
    };
    let prompt = match app.input_mode {
        InputMode::Search => format!("  Search by name: {}_", app.list.search_query),
        InputMode::Normal | InputMode::Modal if !app.list.search_query.is_empty() && app.route() == Route::List => {
            format!("  Search by name: {}", app.list.search_query)
        }
        _ => String::new(),
    };
    let p = Paragraph::new(format!("{title}  {}{prompt}", app.route()))
        .block(
            Block::default()
                .title(format!("usrdesk ({})", app.base_url))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(state) = app.modal.as_ref() else {
        return;
    };
    match state {
        ModalState::UserForm(form) => form::render_user_form(f, area, app, form),
        ModalState::DeleteConfirm { .. } => components::render_delete_modal(f, area, app, state),
        ModalState::Info { .. } => components::render_info_modal(f, area, app, state),
        ModalState::Help { scroll } => components::render_help_modal(f, area, app, *scroll),
        ModalState::GoTo { .. } => components::render_goto_modal(f, area, app, state),
    }
}
