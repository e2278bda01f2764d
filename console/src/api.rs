//! Reqwest-backed user API client.
//!
//! This adapter owns transport details only: request construction, HTTP
//! status mapping, and JSON decoding. Every call is single-shot: it either
//! resolves once or fails once with an [`ApiError`]; there are no retries,
//! timeouts, or cancellation.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use thiserror::Error;

use crate::model::{User, UserDraft};

/// Failures surfaced by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("request failed (status {status}): {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body text, as sent by the server.
        body: String,
    },
    /// The request never completed: connection failures, invalid bodies, and
    /// anything else reqwest reports.
    #[error("request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Port the view layer depends on; lets tests drive the view without a
/// network.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch all users in server order.
    async fn get_users(&self) -> Result<Vec<User>, ApiError>;

    /// Create a user; the response carries the assigned id.
    async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError>;

    /// Replace an existing user's name and email.
    async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<User, ApiError>;

    /// Delete a user by id.
    async fn delete_user(&self, id: u64) -> Result<(), ApiError>;
}

/// HTTP implementation of [`UserApi`].
pub struct HttpUserApi {
    client: Client,
    base_url: Url,
}

impl HttpUserApi {
    /// Build a client against the given base URL (scheme, host, and port;
    /// any path component is ignored).
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn users_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/api/users");
        url
    }

    fn user_url(&self, id: u64) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("/api/users/{id}"));
        url
    }
}

/// Pass through successful responses and turn everything else into
/// [`ApiError::Status`] carrying the status code and body text.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self.client.get(self.users_url()).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.users_url())
            .json(draft)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<User, ApiError> {
        let response = self
            .client
            .put(self.user_url(id))
            .json(draft)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let response = self.client.delete(self.user_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn status_errors_render_status_and_body() {
        let err = ApiError::Status {
            status: 500,
            body: "boom".to_owned(),
        };
        assert_eq!(err.to_string(), "request failed (status 500): boom");
    }

    #[rstest]
    fn endpoint_urls_ignore_base_path_components() {
        let api = HttpUserApi::new(Url::parse("http://localhost:8080/ignored").expect("url"));
        assert_eq!(api.users_url().as_str(), "http://localhost:8080/api/users");
        assert_eq!(api.user_url(7).as_str(), "http://localhost:8080/api/users/7");
    }
}
