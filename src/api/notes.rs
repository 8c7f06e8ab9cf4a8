//! Meeting notes over the `meet_notes` table. Note bodies are markdown.

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::{ApiError, Backend};
use crate::models::MeetNote;

#[derive(Serialize)]
struct NewMeetNote<'a> {
    name: &'a str,
    date: NaiveDate,
    created_by: &'a str,
    notes: String,
}

#[derive(Serialize)]
struct NoteUpdate<'a> {
    name: &'a str,
    date: NaiveDate,
    created_by: &'a str,
    notes: &'a str,
}

/// Markdown skeleton for a fresh note, dated like "Sunday, Aug 30, 2026".
pub fn default_note_body(date: NaiveDate) -> String {
    let formatted = date.format("%A, %b %-d, %Y");
    format!(
        "# Meeting Notes\n\n**{formatted}**\n\n## Agenda\n\n- \n\n## Notes\n\n- \n\n## Action Items\n\n- [ ] \n"
    )
}

pub async fn list_notes(backend: &Backend) -> Result<Vec<MeetNote>, ApiError> {
    let resp = backend
        .get(&backend.config().rest_url("meet_notes"))
        .query(&[("select", "*"), ("order", "created_at.asc")])
        .send()
        .await?;
    Ok(Backend::check(resp).await?.json().await?)
}

/// Insert a new note with the default body; returns the server row (id and
/// timestamp assigned by the backend).
pub async fn create_note(
    backend: &Backend,
    created_by: &str,
    date: NaiveDate,
) -> Result<MeetNote, ApiError> {
    let resp = backend
        .post(&backend.config().rest_url("meet_notes"))
        .header("Prefer", "return=representation")
        .json(&[NewMeetNote {
            name: "New Meeting",
            date,
            created_by,
            notes: default_note_body(date),
        }])
        .send()
        .await?;
    let rows: Vec<MeetNote> = Backend::check(resp).await?.json().await?;
    rows.into_iter().next().ok_or(ApiError::EmptyReply)
}

pub async fn update_note(backend: &Backend, note: &MeetNote) -> Result<(), ApiError> {
    let resp = backend
        .patch(&backend.config().rest_url("meet_notes"))
        .query(&[("id", format!("eq.{}", note.id))])
        .json(&NoteUpdate {
            name: &note.name,
            date: note.date,
            created_by: &note.created_by,
            notes: &note.notes,
        })
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

pub async fn delete_note(backend: &Backend, id: i64) -> Result<(), ApiError> {
    let resp = backend
        .delete_req(&backend.config().rest_url("meet_notes"))
        .query(&[("id", format!("eq.{id}"))])
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_body_carries_the_formatted_date() {
        let body = default_note_body(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
        assert!(body.contains("**Sunday, Aug 30, 2026**"));
        assert!(body.starts_with("# Meeting Notes"));
    }

    #[test]
    fn default_body_day_is_unpadded() {
        let body = default_note_body(NaiveDate::from_ymd_opt(2026, 9, 5).unwrap());
        assert!(body.contains("Sep 5, 2026"));
        assert!(!body.contains("Sep 05"));
    }
}
