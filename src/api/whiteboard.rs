//! Shared whiteboard persistence: one `whiteboard` row holding the whole
//! scene as JSON, last write wins across sessions.

use serde::{Deserialize, Serialize};

use crate::api::{ApiError, Backend};
use crate::models::WhiteboardScene;

/// The single shared scene's row id.
const SCENE_ID: &str = "shared";

#[derive(Serialize, Deserialize)]
struct SceneRow {
    id: String,
    data: WhiteboardScene,
}

/// Load the shared scene; a missing row is an empty board, not an error.
pub async fn load_scene(backend: &Backend) -> Result<WhiteboardScene, ApiError> {
    let resp = backend
        .get(&backend.config().rest_url("whiteboard"))
        .query(&[("select", "*".to_string()), ("id", format!("eq.{SCENE_ID}"))])
        .send()
        .await?;
    let rows: Vec<SceneRow> = Backend::check(resp).await?.json().await?;
    Ok(rows.into_iter().next().map(|r| r.data).unwrap_or_default())
}

pub async fn save_scene(backend: &Backend, scene: &WhiteboardScene) -> Result<(), ApiError> {
    let resp = backend
        .post(&backend.config().rest_url("whiteboard"))
        .query(&[("on_conflict", "id")])
        .header("Prefer", "resolution=merge-duplicates")
        .json(&[SceneRow { id: SCENE_ID.to_string(), data: scene.clone() }])
        .send()
        .await?;
    Backend::check(resp).await?;
    Ok(())
}
