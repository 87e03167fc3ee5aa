use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{ApiError, User, UserPayload, UserService};

/// `reqwest`-backed [`UserService`] rooted at a base URL such as
/// `https://jsonplaceholder.typicode.com`.
#[derive(Clone, Debug)]
pub struct HttpUserService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpUserService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    /// Map non-success statuses to [`ApiError::Server`], keeping the body as message.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status: code, message: body });
        }
        Ok(resp)
    }

    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let resp = Self::check(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }
}

#[async_trait]
impl UserService for HttpUserService {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        debug!("GET /users");
        let resp = self.http.get(self.collection_url()).send().await?;
        Self::parse(resp).await
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: u64) -> Result<User, ApiError> {
        debug!("GET /users/{id}");
        let resp = self.http.get(self.item_url(id)).send().await?;
        Self::parse(resp).await
    }

    #[instrument(skip(self, payload), fields(username = %payload.username))]
    async fn create_user(&self, payload: &UserPayload) -> Result<User, ApiError> {
        debug!("POST /users");
        let resp = self.http.post(self.collection_url()).json(payload).send().await?;
        Self::parse(resp).await
    }

    #[instrument(skip(self, payload))]
    async fn update_user(&self, id: u64, payload: &UserPayload) -> Result<User, ApiError> {
        debug!("PUT /users/{id}");
        let resp = self.http.put(self.item_url(id)).json(payload).send().await?;
        Self::parse(resp).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        debug!("DELETE /users/{id}");
        let resp = self.http.delete(self.item_url(id)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
