use crate::api::User;

/// Indices into `users` whose name contains `query`, case-insensitively.
///
/// An empty query matches everything. The slice is never reordered or modified.
pub fn matching_indices(users: &[User], query: &str) -> Vec<usize> {
    let q = query.to_lowercase();
    users
        .iter()
        .enumerate()
        .filter(|(_, u)| q.is_empty() || u.name.to_lowercase().contains(&q))
        .map(|(i, _)| i)
        .collect()
}

/// Users whose name contains `query`, in collection order.
pub fn filter_by_name<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    matching_indices(users, query)
        .into_iter()
        .map(|i| &users[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Address, Company};

    fn mk_user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: format!("user{id}"),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555 000 1111".to_string(),
            website: String::new(),
            company: Company::default(),
            address: Address::default(),
        }
    }

    #[test]
    fn search_is_case_insensitive_substring_on_name() {
        let users = vec![mk_user(1, "Alice"), mk_user(2, "bob"), mk_user(3, "ALFRED")];
        let names: Vec<&str> = filter_by_name(&users, "al").iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Alice", "ALFRED"]);
    }

    #[test]
    fn search_ignores_other_fields() {
        let mut bob = mk_user(2, "bob");
        bob.email = "alpha@example.com".into();
        bob.username = "al".into();
        assert!(filter_by_name(&[bob], "al").is_empty());
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let users = vec![mk_user(1, "Zed"), mk_user(2, "Amy")];
        assert_eq!(matching_indices(&users, ""), vec![0, 1]);
    }
}
