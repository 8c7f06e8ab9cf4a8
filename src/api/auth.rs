//! Session handling against the backend's OAuth surface.
//!
//! Sign-in is a redirect to `auth/v1/authorize`; the backend sends the
//! browser back with tokens in the URL fragment, which we parse here. The
//! calendar read scope is requested so the provider token can be used
//! against the external calendar API.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::api::{ApiError, Backend, Tokens};
use crate::config::BackendConfig;
use crate::models::UserProfile;

const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

/// Full redirect URL for the OAuth sign-in flow.
pub fn authorize_url(config: &BackendConfig, redirect_to: &str) -> String {
    format!(
        "{}?provider=google&redirect_to={}&access_type=offline&prompt=consent&scopes={}",
        config.auth_url("authorize"),
        utf8_percent_encode(redirect_to, NON_ALPHANUMERIC),
        utf8_percent_encode(CALENDAR_SCOPE, NON_ALPHANUMERIC),
    )
}

/// Parse session tokens out of the post-redirect URL fragment
/// (`#access_token=...&provider_token=...&...`).
pub fn parse_fragment(hash: &str) -> Option<Tokens> {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    let mut tokens = Tokens::default();
    for pair in hash.split('&') {
        let (key, value) = pair.split_once('=')?;
        match key {
            "access_token" => tokens.access = Some(value.to_string()),
            "provider_token" => tokens.provider = Some(value.to_string()),
            _ => {}
        }
    }
    tokens.access.is_some().then_some(tokens)
}

#[derive(Debug, Deserialize)]
struct AuthUserReply {
    id: String,
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

/// Fetch the signed-in user for the current session tokens.
pub async fn fetch_user(backend: &Backend) -> Result<UserProfile, ApiError> {
    let resp = backend.get(&backend.config().auth_url("user")).send().await?;
    let reply: AuthUserReply = Backend::check(resp).await?.json().await?;
    Ok(UserProfile {
        display_name: reply.user_metadata.full_name.or_else(|| Some(reply.email.clone())),
        avatar_url: reply.user_metadata.avatar_url,
        id: reply.id,
        email: reply.email,
    })
}

/// Invalidate the session server-side. Local teardown happens regardless of
/// whether this call succeeds.
pub async fn sign_out(backend: &Backend) -> Result<(), ApiError> {
    let resp = backend.post(&backend.config().auth_url("logout")).send().await?;
    Backend::check(resp).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_with_both_tokens_parses() {
        let tokens = parse_fragment("#access_token=abc&provider_token=xyz&expires_in=3600").unwrap();
        assert_eq!(tokens.access.as_deref(), Some("abc"));
        assert_eq!(tokens.provider.as_deref(), Some("xyz"));
    }

    #[test]
    fn fragment_without_access_token_is_rejected() {
        assert!(parse_fragment("#expires_in=3600").is_none());
        assert!(parse_fragment("").is_none());
    }

    #[test]
    fn authorize_url_escapes_redirect_and_scope() {
        let cfg = crate::config::BackendConfig::for_tests("https://backend.example", &[]);
        let url = authorize_url(&cfg, "https://app.example/");
        assert!(url.starts_with("https://backend.example/auth/v1/authorize?provider=google"));
        assert!(url.contains("redirect_to=https%3A%2F%2Fapp%2Eexample%2F"));
        assert!(!url.contains("calendar.readonly"), "scope must be escaped");
    }
}
