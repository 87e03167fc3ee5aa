//! The user list screen: owner of the in-memory user collection.

use crate::api::User;
use crate::search;

use super::Fetch;

#[derive(Clone, Debug)]
pub struct ListScreen {
    pub users: Fetch<Vec<User>>,
    pub search_query: String,
    /// Index into the visible (filtered) rows.
    pub selected: usize,
    pub rows_per_page: usize,
}

impl Default for ListScreen {
    fn default() -> Self {
        Self {
            users: Fetch::Loading,
            search_query: String::new(),
            selected: 0,
            rows_per_page: 10,
        }
    }
}

impl ListScreen {
    /// Users matching the current search, in collection order.
    pub fn visible(&self) -> Vec<&User> {
        match &self.users {
            Fetch::Ready(users) => search::filter_by_name(users, &self.search_query),
            Fetch::Loading | Fetch::Failed(_) => Vec::new(),
        }
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.visible().get(self.selected).copied()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.visible().len() {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.rows_per_page.max(1));
    }

    pub fn page_down(&mut self) {
        let len = self.visible().len();
        let next = self.selected.saturating_add(self.rows_per_page.max(1));
        self.selected = next.min(len.saturating_sub(1));
    }

    pub fn set_search(&mut self, query: String) {
        self.search_query = query;
        self.clamp_selection();
    }

    /// Append a record acknowledged by the service.
    pub fn append(&mut self, user: User) {
        match &mut self.users {
            Fetch::Ready(users) => users.push(user),
            other => *other = Fetch::Ready(vec![user]),
        }
    }

    /// Replace the record with `id` in place. Returns whether one was found.
    pub fn replace(&mut self, id: u64, user: User) -> bool {
        if let Fetch::Ready(users) = &mut self.users {
            if let Some(slot) = users.iter_mut().find(|u| u.id == id) {
                *slot = user;
                return true;
            }
        }
        false
    }

    /// Remove every record with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: u64) -> bool {
        let removed = match &mut self.users {
            Fetch::Ready(users) => {
                let before = users.len();
                users.retain(|u| u.id != id);
                users.len() != before
            }
            _ => false,
        };
        self.clamp_selection();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Address, Company};

    fn mk_user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.into(),
            username: format!("u{id}"),
            email: format!("u{id}@example.com"),
            phone: "555 123 4567".into(),
            website: String::new(),
            company: Company::default(),
            address: Address::default(),
        }
    }

    fn ready(names: &[&str]) -> ListScreen {
        ListScreen {
            users: Fetch::Ready(names.iter().enumerate().map(|(i, n)| mk_user(i as u64 + 1, n)).collect()),
            ..ListScreen::default()
        }
    }

    #[test]
    fn selection_follows_filtered_rows() {
        let mut list = ready(&["Alice", "bob", "ALFRED"]);
        list.set_search("al".into());
        list.move_down();
        assert_eq!(list.selected_user().map(|u| u.name.as_str()), Some("ALFRED"));
        list.move_down();
        assert_eq!(list.selected, 1);
        list.set_search("bob".into());
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn search_does_not_touch_collection() {
        let mut list = ready(&["Alice", "bob"]);
        list.set_search("zzz".into());
        assert!(list.visible().is_empty());
        match &list.users {
            Fetch::Ready(users) => assert_eq!(users.len(), 2),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn paging_clamps() {
        let mut list = ready(&["a1", "a2", "a3", "a4", "a5"]);
        list.rows_per_page = 2;
        list.page_down();
        list.page_down();
        list.page_down();
        assert_eq!(list.selected, 4);
        list.page_up();
        assert_eq!(list.selected, 2);
    }

    #[test]
    fn remove_keeps_order_and_clamps_selection() {
        let mut list = ready(&["a", "b", "c"]);
        list.selected = 2;
        assert!(list.remove(3));
        assert_eq!(list.selected, 1);
        assert!(!list.remove(99));
    }
}
