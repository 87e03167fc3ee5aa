//! Remote calls issued by the screens and the results that come back.
//!
//! The event loop never awaits. Screens queue a [`Pending`] request stamped
//! with the current activity generation; the [`Dispatcher`] runs it on the
//! tokio runtime and sends a [`Completion`] carrying the same [`Ticket`] back
//! over a channel. The loop drains that channel each tick and drops results
//! whose ticket no longer matches.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, info_span};

use crate::api::{ApiError, User, UserPayload, UserService};

/// Activity token stamped on a request when it is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    FetchUsers,
    FetchUser { id: u64 },
    CreateUser { payload: UserPayload },
    UpdateUser { id: u64, payload: UserPayload },
    DeleteUser { id: u64 },
}

impl Request {
    fn name(&self) -> &'static str {
        match self {
            Request::FetchUsers => "fetch_users",
            Request::FetchUser { .. } => "fetch_user",
            Request::CreateUser { .. } => "create_user",
            Request::UpdateUser { .. } => "update_user",
            Request::DeleteUser { .. } => "delete_user",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: Request,
}

#[derive(Debug)]
pub enum Outcome {
    Users(Result<Vec<User>, ApiError>),
    User { id: u64, result: Result<User, ApiError> },
    Created(Result<User, ApiError>),
    Updated { id: u64, result: Result<User, ApiError> },
    Deleted { id: u64, result: Result<(), ApiError> },
}

#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

/// Run one request against the service. Exactly one attempt is made.
pub async fn execute(service: &dyn UserService, request: Request) -> Outcome {
    match request {
        Request::FetchUsers => Outcome::Users(service.list_users().await),
        Request::FetchUser { id } => Outcome::User { id, result: service.get_user(id).await },
        Request::CreateUser { payload } => Outcome::Created(service.create_user(&payload).await),
        Request::UpdateUser { id, payload } => Outcome::Updated {
            id,
            result: service.update_user(id, &payload).await,
        },
        Request::DeleteUser { id } => Outcome::Deleted { id, result: service.delete_user(id).await },
    }
}

/// Spawns requests onto a runtime and funnels their completions into one channel.
pub struct Dispatcher {
    handle: Handle,
    service: Arc<dyn UserService>,
    tx: mpsc::UnboundedSender<Completion>,
}

impl Dispatcher {
    pub fn new(
        handle: Handle,
        service: Arc<dyn UserService>,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { handle, service, tx }, rx)
    }

    pub fn dispatch(&self, pending: Pending) {
        let Pending { ticket, request } = pending;
        let span = info_span!("request", kind = request.name(), generation = ticket.generation);
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.handle.spawn(
            async move {
                let outcome = execute(service.as_ref(), request).await;
                if tx.send(Completion { ticket, outcome }).is_err() {
                    debug!("event loop gone, dropping completion");
                }
            }
            .instrument(span),
        );
    }
}
