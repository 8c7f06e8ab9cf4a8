//! Frontend Models
//!
//! Data structures matching the hosted backend's row shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One checklist entry inside a task.
/// Ids are client-generated UUID strings; they only need to be unique
/// within their task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub done: bool,
}

/// A board task as the UI works with it. Column membership is not a field
/// here: it is derived from which column list currently contains the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subtasks: Vec<Subtask>,
    pub assigned_to: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Fresh local task: synthetic id, default title, current timestamp.
    pub fn draft() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: "New Task".to_string(),
            description: String::new(),
            subtasks: Vec::new(),
            assigned_to: None,
            deadline: None,
            created_at: Utc::now(),
        }
    }
}

/// A `tasks` table row. `status` stays a raw string so that rows with an
/// unrecognized status can be surfaced as a data-integrity error instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub assigned_to: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    pub status: String,
    // Server-assigned; omitted on upsert so the backend fills it in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            subtasks: self.subtasks,
            assigned_to: self.assigned_to,
            deadline: self.deadline,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn from_task(task: &Task, status: &str) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            assigned_to: task.assigned_to.clone(),
            deadline: task.deadline,
            subtasks: task.subtasks.clone(),
            status: status.to_string(),
            created_at: None,
        }
    }
}

/// Allow-listed user from the user directory, eligible as task assignee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Short label for card badges: first word of the display name,
    /// falling back to the email.
    pub fn short_name(&self) -> String {
        self.display_name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .unwrap_or(&self.email)
            .to_string()
    }
}

/// Chat message row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Meeting note row. Body is markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetNote {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub created_by: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// A `file_items` row: one file or folder in the shared document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub sanitized_name: String,
    /// "file" or "folder"
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
    pub parent_path: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FileEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == "folder"
    }
}

/// One freehand whiteboard stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub points: Vec<(f64, f64)>,
}

/// The shared whiteboard scene, persisted as a single row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhiteboardScene {
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

/// Event time as the external calendar provider encodes it: all-day events
/// carry `date`, timed events carry `dateTime`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "dateTime")]
    pub date_time: Option<DateTime<Utc>>,
}

/// An event from the external calendar provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "htmlLink")]
    pub html_link: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
}

impl CalendarEvent {
    /// Calendar day the event starts on, in the provider's local terms.
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.start
            .date
            .or_else(|| self.start.date_time.map(|dt| dt.date_naive()))
    }
}
