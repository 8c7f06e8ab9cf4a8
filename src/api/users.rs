//! User Directory
//!
//! `allowed_users` table wrapper implementing the board's `UserDirectory`
//! seam. Only allow-listed users are eligible as assignees.

use crate::api::{ApiError, Backend};
use crate::board::UserDirectory;
use crate::models::UserProfile;

impl UserDirectory for Backend {
    async fn fetch_allowed_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        let resp = self
            .get(&self.config().rest_url("allowed_users"))
            .query(&[("select", "id,email,display_name,avatar_url")])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}
