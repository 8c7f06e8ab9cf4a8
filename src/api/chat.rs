//! Chat message wrappers over the `messages` table.
//!
//! Live delivery is the backend's realtime channel in the original design;
//! here the panel polls `list_messages` instead, so every wrapper is plain
//! request/response.

use serde::Serialize;

use crate::api::{ApiError, Backend};
use crate::models::{Message, UserProfile};

#[derive(Serialize)]
struct NewMessage<'a> {
    user_id: &'a str,
    content: &'a str,
    name: Option<&'a str>,
    avatar: Option<&'a str>,
}

/// All messages, oldest first.
pub async fn list_messages(backend: &Backend) -> Result<Vec<Message>, ApiError> {
    let resp = backend
        .get(&backend.config().rest_url("messages"))
        .query(&[("select", "*"), ("order", "created_at.asc")])
        .send()
        .await?;
    Ok(Backend::check(resp).await?.json().await?)
}

pub async fn send_message(backend: &Backend, user: &UserProfile, content: &str) -> Result<(), ApiError> {
    let resp = backend
        .post(&backend.config().rest_url("messages"))
        .json(&NewMessage {
            user_id: &user.id,
            content,
            name: user.display_name.as_deref().or(Some(&user.email)),
            avatar: user.avatar_url.as_deref(),
        })
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

/// Edit one of the caller's own messages; the `user_id` filter keeps this
/// from touching anyone else's rows.
pub async fn update_message(
    backend: &Backend,
    id: &str,
    user_id: &str,
    content: &str,
) -> Result<(), ApiError> {
    let resp = backend
        .patch(&backend.config().rest_url("messages"))
        .query(&[("id", format!("eq.{id}")), ("user_id", format!("eq.{user_id}"))])
        .json(&serde_json::json!({ "content": content }))
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}

pub async fn delete_message(backend: &Backend, id: &str, user_id: &str) -> Result<(), ApiError> {
    let resp = backend
        .delete_req(&backend.config().rest_url("messages"))
        .query(&[("id", format!("eq.{id}")), ("user_id", format!("eq.{user_id}"))])
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}
