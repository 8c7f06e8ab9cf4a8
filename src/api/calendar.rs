//! External calendar provider (read-only).
//!
//! Events come straight from the provider's REST API using the session's
//! provider token; nothing calendar-related touches the hosted backend.

use serde::Deserialize;

use crate::api::{ApiError, Backend};
use crate::models::CalendarEvent;

const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";

#[derive(Deserialize)]
struct EventsReply {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

/// Upcoming events on the signed-in user's primary calendar, soonest first.
pub async fn fetch_events(backend: &Backend) -> Result<Vec<CalendarEvent>, ApiError> {
    let token = backend.provider_token().ok_or(ApiError::MissingAuth)?;
    let resp = backend
        .client()
        .get(EVENTS_URL)
        .bearer_auth(token)
        .query(&[
            ("maxResults", "100".to_string()),
            ("orderBy", "startTime".to_string()),
            ("singleEvents", "true".to_string()),
            ("timeMin", chrono::Utc::now().to_rfc3339()),
        ])
        .send()
        .await?;
    let reply: EventsReply = Backend::check(resp).await?.json().await?;
    Ok(reply.items)
}
