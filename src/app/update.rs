use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use crate::api::UserService;
use crate::app::keymap::KeyAction;
use crate::app::tasks::{Completion, Dispatcher, Outcome};
use crate::app::{AppState, Fetch, InputMode, ModalState};
use crate::router::Route;
use crate::ui;

const TICK: Duration = Duration::from_millis(100);

/// Drive the TUI until the user quits.
///
/// Each tick: draw, hand queued requests to the dispatcher, apply finished
/// requests, then wait up to one tick for a key.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    handle: Handle,
    service: Arc<dyn UserService>,
    mut app: AppState,
) -> Result<()> {
    let (dispatcher, mut completions) = Dispatcher::new(handle, service);
    info!(route = %app.route(), base_url = %app.base_url, "starting event loop");

    while !app.should_quit {
        for pending in app.take_outbox() {
            dispatcher.dispatch(pending);
        }
        while let Ok(completion) = completions.try_recv() {
            apply_completion(&mut app, completion);
        }

        terminal.draw(|f| ui::render(f, &mut app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key);
                }
            }
        }
    }

    info!(uptime_secs = app.started_at.elapsed().as_secs(), "event loop finished");
    Ok(())
}

/// Route a key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => match key.code {
            KeyCode::Enter => app.input_mode = InputMode::Normal,
            KeyCode::Esc => {
                app.list.set_search(String::new());
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => app.search_backspace(),
            KeyCode::Char(c) => app.search_input(c),
            _ => {}
        },
        InputMode::Modal => handle_modal_key(app, key),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) {
    let Some(action) = app.keymap.resolve(&key) else {
        return;
    };
    match (action, app.route()) {
        (KeyAction::Quit, _) => app.should_quit = true,
        (KeyAction::OpenHelp, _) => app.open_help(),
        (KeyAction::GoTo, _) => app.open_goto(),
        (KeyAction::Reload, _) => app.activate(),
        (KeyAction::Back, Route::Detail(_)) => app.back(),
        (KeyAction::Back, Route::List) => {
            if !app.list.search_query.is_empty() {
                app.list.set_search(String::new());
            }
        }
        (KeyAction::StartSearch, Route::List) => app.start_search(),
        (KeyAction::NewUser, Route::List) => app.open_create_form(),
        (KeyAction::EditSelection, Route::List) => app.open_edit_form(),
        (KeyAction::DeleteSelection, Route::List) => app.open_delete_confirm(),
        (KeyAction::OpenDetails, Route::List) => app.open_selected_details(),
        (KeyAction::MoveUp, Route::List) => app.list.move_up(),
        (KeyAction::MoveDown, Route::List) => app.list.move_down(),
        (KeyAction::PageUp, Route::List) => app.list.page_up(),
        (KeyAction::PageDown, Route::List) => app.list.page_down(),
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) {
    match app.modal.as_mut() {
        // The form stays up until its save resolves.
        Some(ModalState::UserForm(form)) if form.submitting => {}
        Some(ModalState::UserForm(form)) => match key.code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Enter => app.submit_form(),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.input_char(c),
            _ => {}
        },
        Some(ModalState::DeleteConfirm { selected, pending, .. }) => {
            if *pending {
                return;
            }
            match key.code {
                KeyCode::Esc | KeyCode::Char('n') => app.close_modal(),
                KeyCode::Char('y') => app.confirm_delete(),
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                    *selected = 1 - *selected;
                }
                KeyCode::Enter => {
                    if *selected == 0 {
                        app.confirm_delete();
                    } else {
                        app.close_modal();
                    }
                }
                _ => {}
            }
        }
        Some(ModalState::Help { scroll }) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => app.close_modal(),
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        Some(ModalState::GoTo { path, error }) => match key.code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Backspace => {
                path.pop();
                *error = None;
            }
            KeyCode::Char(c) => {
                path.push(c);
                *error = None;
            }
            KeyCode::Enter => match Route::parse(path.as_str()) {
                Ok(route) => {
                    app.close_modal();
                    app.navigate(route);
                }
                Err(e) => *error = Some(e.to_string()),
            },
            _ => {}
        },
        Some(ModalState::Info { .. }) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                app.close_modal();
            }
        }
        None => app.input_mode = InputMode::Normal,
    }
}

/// Fold a finished request into the state, unless it belongs to an earlier activation.
pub fn apply_completion(app: &mut AppState, completion: Completion) {
    if completion.ticket.generation != app.generation {
        debug!(
            ticket = completion.ticket.generation,
            current = app.generation,
            "discarding stale completion"
        );
        return;
    }

    match completion.outcome {
        Outcome::Users(Ok(users)) => {
            info!(count = users.len(), "loaded users");
            app.list.users = Fetch::Ready(users);
            app.list.clamp_selection();
        }
        Outcome::Users(Err(e)) => {
            error!(error = %e, "error fetching users");
            app.list.users = Fetch::Failed(e.to_string());
        }
        Outcome::User { id, result } => {
            let Some(detail) = app.detail.as_mut().filter(|d| d.id == id) else {
                debug!(id, "detail result for a different user, dropping");
                return;
            };
            detail.user = match result {
                Ok(user) => Fetch::Ready(user),
                Err(e) => {
                    error!(id, error = %e, "error fetching user details");
                    Fetch::Failed(e.to_string())
                }
            };
        }
        Outcome::Created(Ok(user)) => {
            info!(id = user.id, username = %user.username, "user created");
            app.status = Some(format!("Created user {} (id {})", user.name, user.id));
            app.list.append(user);
            close_submitting_form(app);
        }
        Outcome::Updated { id, result: Ok(user) } => {
            info!(id, "user updated");
            app.status = Some(format!("Updated user {}", user.name));
            if !app.list.replace(id, user) {
                warn!(id, "updated user no longer in list");
            }
            close_submitting_form(app);
        }
        Outcome::Created(Err(e)) | Outcome::Updated { result: Err(e), .. } => {
            error!(error = %e, "error saving user");
            match app.modal.as_mut() {
                Some(ModalState::UserForm(form)) => form.submit_failed(e.to_string()),
                _ => app.status = Some(format!("Save failed: {e}")),
            }
        }
        Outcome::Deleted { id, result: Ok(()) } => {
            info!(id, "user deleted");
            app.list.remove(id);
            app.status = Some(format!("Deleted user {id}"));
            if matches!(app.modal, Some(ModalState::DeleteConfirm { .. })) {
                app.close_modal();
            }
        }
        Outcome::Deleted { id, result: Err(e) } => {
            error!(id, error = %e, "error deleting user");
            match app.modal.as_mut() {
                Some(ModalState::DeleteConfirm { pending, error, .. }) => {
                    *pending = false;
                    *error = Some(e.to_string());
                }
                _ => app.status = Some(format!("Delete failed: {e}")),
            }
        }
    }
}

/// Close the form only if it is the one waiting on this result.
fn close_submitting_form(app: &mut AppState) {
    if let Some(ModalState::UserForm(form)) = &app.modal {
        if form.submitting {
            app.close_modal();
        }
    }
}
