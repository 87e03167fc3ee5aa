//! Remote user service: record types, the service seam and its errors.
//!
//! The TUI never talks HTTP directly; it goes through [`UserService`], which
//! [`HttpUserService`] implements over `reqwest`. Tests plug in fakes.

mod http;

pub use http::HttpUserService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Postal address as carried by the user service. Extra wire fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
}

/// A user record as returned by the remote service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub address: Address,
}

impl User {
    /// Single-line address as shown on the detail screen.
    pub fn address_line(&self) -> String {
        format!("{}, {}", self.address.street, self.address.city)
    }
}

/// Request body for create and update calls.
///
/// `id` is only sent on updates; on create the server assigns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub company: Company,
    pub address: Address,
}

/// Client-side error for calls against the user service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

/// The four CRUD operations plus single fetch exposed by the remote service.
///
/// One attempt per call; callers decide what to do with failures.
#[async_trait]
pub trait UserService: Send + Sync + 'static {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
    async fn get_user(&self, id: u64) -> Result<User, ApiError>;
    async fn create_user(&self, payload: &UserPayload) -> Result<User, ApiError>;
    async fn update_user(&self, id: u64, payload: &UserPayload) -> Result<User, ApiError>;
    async fn delete_user(&self, id: u64) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_decodes_placeholder_shape_and_ignores_extra_fields() {
        let raw = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough",
                        "zipcode": "92998-3874", "geo": {"lat": "-37.3159", "lng": "81.1496"}},
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {"name": "Romaguera-Crona", "catchPhrase": "x", "bs": "y"}
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.company.name, "Romaguera-Crona");
        assert_eq!(user.address_line(), "Kulas Light, Gwenborough");
    }

    #[test]
    fn user_defaults_missing_optional_sections() {
        let raw = r#"{"id": 11, "name": "New", "username": "USER-ABCDE",
                      "email": "n@x.io", "phone": "555 123 4567"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.website, "");
        assert_eq!(user.company, Company::default());
        assert_eq!(user.address, Address::default());
    }

    #[test]
    fn create_payload_omits_id() {
        let payload = UserPayload {
            id: None,
            name: "Ann".into(),
            username: "USER-00000".into(),
            email: "a@b.com".into(),
            phone: "5551234567".into(),
            website: String::new(),
            company: Company::default(),
            address: Address { street: "Main".into(), city: "Oslo".into() },
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert!(v.get("id").is_none());
        assert_eq!(v["address"]["city"], "Oslo");

        let v = serde_json::to_value(UserPayload { id: Some(3), ..payload }).unwrap();
        assert_eq!(v["id"], 3);
    }
}
