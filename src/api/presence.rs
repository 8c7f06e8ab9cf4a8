//! Presence roster over a `presence` table.
//!
//! The original design rode the backend's realtime presence channel; that
//! service stays opaque here, so presence is a heartbeat row per user plus a
//! recency-filtered read.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, Backend};
use crate::models::UserProfile;

/// Users whose last heartbeat is older than this are considered offline.
const ONLINE_WINDOW_SECS: i64 = 30;

#[derive(Serialize, Deserialize)]
struct PresenceRow {
    user_id: String,
    email: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
    last_seen: DateTime<Utc>,
}

/// Upsert this session's heartbeat row.
pub async fn heartbeat(backend: &Backend, user: &UserProfile) -> Result<(), ApiError> {
    let resp = backend
        .post(&backend.config().rest_url("presence"))
        .query(&[("on_conflict", "user_id")])
        .header("Prefer", "resolution=merge-duplicates")
        .json(&[PresenceRow {
            user_id: user.id.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
            last_seen: Utc::now(),
        }])
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

/// Everyone with a recent heartbeat.
pub async fn roster(backend: &Backend) -> Result<Vec<UserProfile>, ApiError> {
    let cutoff = Utc::now() - Duration::seconds(ONLINE_WINDOW_SECS);
    let resp = backend
        .get(&backend.config().rest_url("presence"))
        .query(&[
            ("select", "*".to_string()),
            ("last_seen", format!("gt.{}", cutoff.to_rfc3339())),
        ])
        .send()
        .await?;
    let rows: Vec<PresenceRow> = Backend::check(resp).await?.json().await?;
    Ok(rows
        .into_iter()
        .map(|r| UserProfile {
            id: r.user_id,
            email: r.email,
            display_name: r.display_name,
            avatar_url: r.avatar_url,
        })
        .collect())
}
