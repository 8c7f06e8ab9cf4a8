//! Hosted Backend Client
//!
//! Thin typed REST wrappers over the managed backend (relational rows under
//! `rest/v1`, sessions under `auth/v1`, objects under `storage/v1`) and the
//! external calendar provider. Every call is attempted exactly once; errors
//! bubble up as `ApiError` for the caller to log and degrade on.

pub mod auth;
pub mod calendar;
pub mod chat;
pub mod files;
pub mod notes;
pub mod presence;
pub mod tasks;
pub mod users;
pub mod whiteboard;

use leptos::prelude::*;
use reqwest::{Method, RequestBuilder, Response};
use thiserror::Error;

use crate::config::BackendConfig;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend replied {status}: {message}")]
    Status { status: u16, message: String },
    #[error("backend reply was empty")]
    EmptyReply,
    #[error("not signed in")]
    MissingAuth,
}

/// Session tokens once sign-in completes. The provider token is what the
/// external calendar API accepts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tokens {
    pub access: Option<String>,
    pub provider: Option<String>,
}

/// Shared client for the hosted backend. Cheap to clone; all clones see the
/// same session tokens.
#[derive(Clone)]
pub struct Backend {
    client: reqwest::Client,
    config: BackendConfig,
    tokens: RwSignal<Tokens>,
}

impl Backend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            tokens: RwSignal::new(Tokens::default()),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Raw HTTP client, for calls that bypass the hosted backend entirely
    /// (the external calendar provider).
    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn set_session(&self, tokens: Tokens) {
        self.tokens.set(tokens);
    }

    pub fn clear_session(&self) {
        self.tokens.set(Tokens::default());
    }

    pub fn provider_token(&self) -> Option<String> {
        self.tokens.with_untracked(|t| t.provider.clone())
    }

    fn access_token(&self) -> Option<String> {
        self.tokens.with_untracked(|t| t.access.clone())
    }

    /// Request with the backend's api key plus the session bearer (falling
    /// back to the anon key before sign-in, as the backend expects).
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .access_token()
            .unwrap_or_else(|| self.config.anon_key().to_string());
        self.client
            .request(method, url)
            .header("apikey", self.config.anon_key())
            .bearer_auth(bearer)
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    pub(crate) fn patch(&self, url: &str) -> RequestBuilder {
        self.request(Method::PATCH, url)
    }

    pub(crate) fn delete_req(&self, url: &str) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    /// Map non-success replies to `ApiError::Status` with the body text.
    pub(crate) async fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let message = resp.text().await.unwrap_or_default();
            Err(ApiError::Status { status: status.as_u16(), message })
        }
    }
}
