use crate::api::User;

use super::Fetch;

/// Detail screen for the user named by the `/user/{id}` route.
#[derive(Clone, Debug)]
pub struct DetailScreen {
    pub id: u64,
    pub user: Fetch<User>,
}

impl DetailScreen {
    pub fn new(id: u64) -> Self {
        Self { id, user: Fetch::Loading }
    }
}
