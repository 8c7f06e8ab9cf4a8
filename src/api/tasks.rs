//! Task Store
//!
//! `tasks` table wrappers implementing the board's `TaskStore` seam.

use crate::api::{ApiError, Backend};
use crate::board::{ColumnKey, TaskStore};
use crate::models::TaskRecord;

impl TaskStore for Backend {
    async fn fetch_all(&self) -> Result<Vec<TaskRecord>, ApiError> {
        let resp = self
            .get(&self.config().rest_url("tasks"))
            .query(&[("select", "*")])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn upsert(&self, record: &TaskRecord) -> Result<TaskRecord, ApiError> {
        let resp = self
            .post(&self.config().rest_url("tasks"))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(std::slice::from_ref(record))
            .send()
            .await?;
        let rows: Vec<TaskRecord> = Self::check(resp).await?.json().await?;
        rows.into_iter().next().ok_or(ApiError::EmptyReply)
    }

    async fn update_status(&self, id: &str, status: ColumnKey) -> Result<(), ApiError> {
        let resp = self
            .patch(&self.config().rest_url("tasks"))
            .query(&[("id", format!("eq.{id}"))])
            .json(&serde_json::json!({ "status": status.as_str() }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .delete_req(&self.config().rest_url("tasks"))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}
