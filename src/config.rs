//! Backend Configuration
//!
//! Endpoints and keys for the hosted backend, resolved at build time.

/// Default backend URL for local development
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:54321";

/// Hosted-backend endpoints plus the sign-in allow-list.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    base_url: String,
    anon_key: String,
    allowed_emails: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let base_url = option_env!("TEAMDECK_BACKEND_URL")
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim_end_matches('/')
            .to_string();
        let anon_key = option_env!("TEAMDECK_ANON_KEY").unwrap_or("").to_string();
        let allowed_emails = option_env!("TEAMDECK_ALLOWED_EMAILS")
            .unwrap_or("")
            .split(',')
            .map(|e| e.trim().to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { base_url, anon_key, allowed_emails }
    }
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn for_tests(base_url: &str, allowed: &[&str]) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: "test-anon-key".to_string(),
            allowed_emails: allowed.iter().map(|e| e.to_ascii_lowercase()).collect(),
        }
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Table endpoint under the relational REST surface.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Endpoint under the auth surface (`user`, `logout`, `authorize`).
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Object endpoint under the storage surface.
    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    /// Allow-list check, case-insensitive on the email.
    pub fn is_allowed(&self, email: &str) -> bool {
        let email = email.to_ascii_lowercase();
        self.allowed_emails.iter().any(|e| e == &email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_helpers_join_segments() {
        let cfg = BackendConfig::for_tests("https://backend.example/", &[]);
        assert_eq!(cfg.rest_url("tasks"), "https://backend.example/rest/v1/tasks");
        assert_eq!(cfg.auth_url("user"), "https://backend.example/auth/v1/user");
        assert_eq!(
            cfg.storage_url("object/docs/a.txt"),
            "https://backend.example/storage/v1/object/docs/a.txt"
        );
    }

    #[test]
    fn allow_list_is_case_insensitive() {
        let cfg = BackendConfig::for_tests("http://x", &["Team@Example.com"]);
        assert!(cfg.is_allowed("team@example.com"));
        assert!(cfg.is_allowed("TEAM@EXAMPLE.COM"));
        assert!(!cfg.is_allowed("other@example.com"));
    }
}
