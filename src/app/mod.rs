//! Application state and the operations the screens expose.
//!
//! [`AppState`] owns the router, the list screen (and with it the only copy
//! of the user collection), the detail screen and the open modal. Operations
//! never perform I/O: they queue [`tasks::Pending`] requests in
//! [`AppState::outbox`], which the event loop hands to the dispatcher.
//!
pub mod detail;
pub mod form;
pub mod keymap;
pub mod list;
pub mod tasks;
pub mod theme;
pub mod update;

use std::time::Instant;

use tracing::debug;

use crate::api::User;
use crate::router::{Route, Router};
use detail::DetailScreen;
use form::{FormState, FormSubmission};
use keymap::Keymap;
use list::ListScreen;
use tasks::{Pending, Request, Ticket};
pub use theme::Theme;

/// Result of one fetch: still running, done, or failed with a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetch<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading)
    }
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Modal overlays. At most one is open at a time.
#[derive(Clone, Debug)]
pub enum ModalState {
    UserForm(Box<FormState>),
    DeleteConfirm {
        target: User,
        /// 0 = Confirm, 1 = Cancel.
        selected: usize,
        pending: bool,
        error: Option<String>,
    },
    Info {
        message: String,
    },
    Help {
        scroll: u16,
    },
    GoTo {
        path: String,
        error: Option<String>,
    },
}

pub struct AppState {
    pub started_at: Instant,
    pub router: Router,
    /// Activity token; bumped on every screen activation.
    pub generation: u64,
    pub list: ListScreen,
    pub detail: Option<DetailScreen>,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub outbox: Vec<Pending>,
    pub status: Option<String>,
    pub base_url: String,
    pub should_quit: bool,
}

impl AppState {
    /// Build the state and activate `initial`, queueing its first fetch.
    pub fn new(initial: Route, theme: Theme, keymap: Keymap, base_url: impl Into<String>) -> Self {
        let mut app = Self {
            started_at: Instant::now(),
            router: Router::new(initial),
            generation: 0,
            list: ListScreen::default(),
            detail: None,
            input_mode: InputMode::Normal,
            modal: None,
            theme,
            keymap,
            outbox: Vec::new(),
            status: None,
            base_url: base_url.into(),
            should_quit: false,
        };
        app.activate();
        app
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn ticket(&self) -> Ticket {
        Ticket { generation: self.generation }
    }

    fn request(&mut self, request: Request) {
        let ticket = self.ticket();
        self.outbox.push(Pending { ticket, request });
    }

    pub fn take_outbox(&mut self) -> Vec<Pending> {
        std::mem::take(&mut self.outbox)
    }

    /// Mount the screen for the current route with fresh state and fetch its data.
    /// Results still in flight for the previous activation become stale.
    pub fn activate(&mut self) {
        self.generation += 1;
        self.modal = None;
        self.input_mode = InputMode::Normal;
        debug!(route = %self.route(), generation = self.generation, "activating screen");
        match self.route() {
            Route::List => {
                self.detail = None;
                self.list = ListScreen::default();
                self.request(Request::FetchUsers);
            }
            Route::Detail(id) => {
                self.detail = Some(DetailScreen::new(id));
                self.request(Request::FetchUser { id });
            }
        }
    }

    pub fn navigate(&mut self, route: Route) {
        if self.router.navigate(route) {
            self.activate();
        }
    }

    pub fn back(&mut self) {
        if self.router.back() {
            self.activate();
        }
    }

    /// Open the detail screen for the selected row.
    pub fn open_selected_details(&mut self) {
        if let Some(id) = self.list.selected_user().map(|u| u.id) {
            self.navigate(Route::Detail(id));
        }
    }

    fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn open_create_form(&mut self) {
        if self.route() == Route::List && matches!(self.list.users, Fetch::Ready(_)) {
            self.open_modal(ModalState::UserForm(Box::new(FormState::for_create())));
        }
    }

    pub fn open_edit_form(&mut self) {
        match self.list.selected_user().map(FormState::for_edit) {
            Some(form) => self.open_modal(ModalState::UserForm(Box::new(form))),
            None => self.show_info("No user selected."),
        }
    }

    pub fn open_delete_confirm(&mut self) {
        let Some(user) = self.list.selected_user().cloned() else {
            self.show_info("No user selected.");
            return;
        };
        self.open_modal(ModalState::DeleteConfirm {
            target: user,
            selected: 1,
            pending: false,
            error: None,
        });
    }

    pub fn open_help(&mut self) {
        self.open_modal(ModalState::Help { scroll: 0 });
    }

    pub fn open_goto(&mut self) {
        self.open_modal(ModalState::GoTo { path: self.route().path(), error: None });
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.open_modal(ModalState::Info { message: message.into() });
    }

    /// Validate the open form and, when it yields a submission, queue the call.
    pub fn submit_form(&mut self) {
        let Some(ModalState::UserForm(form)) = self.modal.as_mut() else {
            return;
        };
        let request = match form.try_submit() {
            Some(FormSubmission::Create(payload)) => Request::CreateUser { payload },
            Some(FormSubmission::Update { id, payload }) => Request::UpdateUser { id, payload },
            None => return,
        };
        self.request(request);
    }

    /// Confirm the open delete dialog, queueing the call once.
    pub fn confirm_delete(&mut self) {
        let Some(ModalState::DeleteConfirm { target, pending, error, .. }) = self.modal.as_mut() else {
            return;
        };
        if *pending {
            return;
        }
        *pending = true;
        *error = None;
        let id = target.id;
        self.request(Request::DeleteUser { id });
    }

    pub fn start_search(&mut self) {
        self.list.set_search(String::new());
        self.input_mode = InputMode::Search;
    }

    pub fn search_input(&mut self, c: char) {
        let mut q = std::mem::take(&mut self.list.search_query);
        q.push(c);
        self.list.set_search(q);
    }

    pub fn search_backspace(&mut self) {
        let mut q = std::mem::take(&mut self.list.search_query);
        q.pop();
        self.list.set_search(q);
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
