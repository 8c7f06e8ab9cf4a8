//! Task Board Synchronizer
//!
//! Owns the three ordered task columns, mediates drag-and-drop moves, and
//! keeps the remote task store eventually consistent with local order via
//! optimistic updates and rollback on failure. Remote calls go through the
//! `TaskStore`/`UserDirectory` seams so the whole thing is testable against
//! mocks.

use std::fmt;

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::api::ApiError;
use crate::models::{Subtask, Task, TaskRecord, UserProfile};

/// One of the three workflow columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Todo,
    InProgress,
    Completed,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 3] = [ColumnKey::Todo, ColumnKey::InProgress, ColumnKey::Completed];

    /// Wire name used for the persisted `status` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::Todo => "todo",
            ColumnKey::InProgress => "inprogress",
            ColumnKey::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(ColumnKey::Todo),
            "inprogress" => Some(ColumnKey::InProgress),
            "completed" => Some(ColumnKey::Completed),
            _ => None,
        }
    }

    /// Column header label.
    pub fn title(self) -> &'static str {
        match self {
            ColumnKey::Todo => "To Do",
            ColumnKey::InProgress => "In Progress",
            ColumnKey::Completed => "Completed",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three ordered column lists. Invariant: a task id appears in exactly
/// one list at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardColumns {
    pub todo: Vec<Task>,
    pub inprogress: Vec<Task>,
    pub completed: Vec<Task>,
}

impl BoardColumns {
    pub fn column(&self, key: ColumnKey) -> &Vec<Task> {
        match key {
            ColumnKey::Todo => &self.todo,
            ColumnKey::InProgress => &self.inprogress,
            ColumnKey::Completed => &self.completed,
        }
    }

    pub fn column_mut(&mut self, key: ColumnKey) -> &mut Vec<Task> {
        match key {
            ColumnKey::Todo => &mut self.todo,
            ColumnKey::InProgress => &mut self.inprogress,
            ColumnKey::Completed => &mut self.completed,
        }
    }

    /// Split fetched rows into columns by stored status, preserving fetch
    /// order within each column. Rows with an unrecognized status are
    /// returned separately instead of being dropped silently.
    pub fn partition(records: Vec<TaskRecord>) -> (Self, Vec<TaskRecord>) {
        let mut columns = Self::default();
        let mut rejected = Vec::new();
        for record in records {
            match ColumnKey::parse(&record.status) {
                Some(key) => columns.column_mut(key).push(record.into_task()),
                None => rejected.push(record),
            }
        }
        (columns, rejected)
    }

    /// Which column currently holds the given task id.
    pub fn column_of(&self, id: &str) -> Option<ColumnKey> {
        ColumnKey::ALL
            .into_iter()
            .find(|key| self.column(*key).iter().any(|t| t.id == id))
    }

    /// Remove at `src_idx` in `src`, insert at `dst_idx` in `dst`
    /// (clamped to append). Returns the moved task's id, or `None` when
    /// `src_idx` is out of range.
    pub fn apply_move(
        &mut self,
        src: ColumnKey,
        src_idx: usize,
        dst: ColumnKey,
        dst_idx: usize,
    ) -> Option<String> {
        if src_idx >= self.column(src).len() {
            return None;
        }
        let task = self.column_mut(src).remove(src_idx);
        let id = task.id.clone();
        let dst_list = self.column_mut(dst);
        let at = dst_idx.min(dst_list.len());
        dst_list.insert(at, task);
        Some(id)
    }

    /// Replace every occurrence of the task's id with this record, placed in
    /// the column matching `status`. Keeps the one-copy invariant even when
    /// the status changed mid-edit.
    pub fn place(&mut self, task: Task, status: ColumnKey) {
        self.remove(&task.id);
        self.column_mut(status).push(task);
    }

    /// Drop the id from all three lists (defensive: the invariant says at
    /// most one should match).
    pub fn remove(&mut self, id: &str) {
        for key in ColumnKey::ALL {
            self.column_mut(key).retain(|t| t.id != id);
        }
    }

    pub fn total(&self) -> usize {
        self.todo.len() + self.inprogress.len() + self.completed.len()
    }
}

/// Remote task store contract (consumed, not redesigned).
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    async fn fetch_all(&self) -> Result<Vec<TaskRecord>, ApiError>;
    /// Insert-or-update keyed by id; returns the server-confirmed record.
    async fn upsert(&self, record: &TaskRecord) -> Result<TaskRecord, ApiError>;
    async fn update_status(&self, id: &str, status: ColumnKey) -> Result<(), ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Remote user directory contract.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    async fn fetch_allowed_users(&self) -> Result<Vec<UserProfile>, ApiError>;
}

/// Signal-backed board state plus the synchronizer operations.
///
/// Every user action awaits its own remote call; each call is attempted
/// exactly once per action (no retry, no backoff). Optimistic writes are an
/// explicit snapshot-and-restore pair, never incidental closure capture.
#[derive(Clone)]
pub struct TaskBoard<S> {
    store: S,
    pub columns: RwSignal<BoardColumns>,
    /// At most one task open for editing. Distinct from its last-persisted
    /// remote counterpart until saved.
    pub draft: RwSignal<Option<Task>>,
    pub users: RwSignal<Vec<UserProfile>>,
    pub loading: RwSignal<bool>,
}

impl<S> TaskBoard<S>
where
    S: TaskStore + UserDirectory + Clone + 'static,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            columns: RwSignal::new(BoardColumns::default()),
            draft: RwSignal::new(None),
            users: RwSignal::new(Vec::new()),
            loading: RwSignal::new(true),
        }
    }

    /// Fetch all tasks and the assignable-user list, then partition tasks by
    /// stored status. Fetch failures degrade to stale/empty state; the
    /// loading flag clears either way.
    pub async fn load(&self) {
        self.loading.set(true);
        match self.store.fetch_all().await {
            Ok(records) => {
                let (columns, rejected) = BoardColumns::partition(records);
                for row in &rejected {
                    log::error!(
                        "task {} has unrecognized status {:?}; leaving it off the board",
                        row.id,
                        row.status
                    );
                }
                self.columns.set(columns);
            }
            Err(e) => log::error!("fetching tasks failed: {e}"),
        }
        match self.store.fetch_allowed_users().await {
            Ok(users) => self.users.set(users),
            Err(e) => log::error!("fetching allowed users failed: {e}"),
        }
        self.loading.set(false);
    }

    /// Drag-and-drop move. Applied locally first, then (for cross-column
    /// moves) persisted as a status update. On remote failure the full
    /// pre-move column state is restored — never a partial undo.
    /// Intra-column position is session-local and never persisted.
    pub async fn reorder(&self, src: ColumnKey, src_idx: usize, dst: ColumnKey, dst_idx: usize) {
        if src == dst && src_idx == dst_idx {
            return;
        }
        let snapshot = self.columns.get_untracked();
        let mut next = snapshot.clone();
        let Some(moved_id) = next.apply_move(src, src_idx, dst, dst_idx) else {
            log::warn!("reorder ignored: index {src_idx} out of range in {src}");
            return;
        };
        // Optimistic: the new order is visible before the round-trip resolves.
        self.columns.set(next);

        if src != dst {
            if let Err(e) = self.store.update_status(&moved_id, dst).await {
                log::error!("status update for task {moved_id} failed: {e}; rolling back");
                self.columns.set(snapshot);
            }
        }
    }

    /// Synthesize a new task, append it to `todo` immediately, and open it
    /// for editing. Nothing is written remotely until `save_draft`.
    pub fn create_draft(&self) -> Task {
        let task = Task::draft();
        self.columns.update(|c| c.todo.push(task.clone()));
        self.draft.set(Some(task.clone()));
        task
    }

    /// Open an existing task for editing.
    pub fn open_draft(&self, task: Task) {
        self.draft.set(Some(task));
    }

    /// Discard the open draft without saving. Local lists are untouched.
    pub fn close_draft(&self) {
        self.draft.set(None);
    }

    /// Mutate the active draft in place. No-op without a draft.
    pub fn edit_draft(&self, edit: impl FnOnce(&mut Task)) {
        self.draft.update(|d| {
            if let Some(task) = d.as_mut() {
                edit(task);
            }
        });
    }

    pub fn add_subtask(&self) {
        let id = uuid::Uuid::new_v4().to_string();
        self.edit_draft(|t| {
            t.subtasks.push(Subtask { id, title: String::new(), done: false })
        });
    }

    pub fn toggle_subtask(&self, idx: usize) {
        self.edit_draft(|t| {
            if let Some(st) = t.subtasks.get_mut(idx) {
                st.done = !st.done;
            }
        });
    }

    pub fn rename_subtask(&self, idx: usize, title: String) {
        self.edit_draft(|t| {
            if let Some(st) = t.subtasks.get_mut(idx) {
                st.title = title;
            }
        });
    }

    pub fn remove_subtask(&self, idx: usize) {
        self.edit_draft(|t| {
            if idx < t.subtasks.len() {
                t.subtasks.remove(idx);
            }
        });
    }

    /// Upsert the draft with its current column as `status`, then reconcile
    /// local state to the server-confirmed record: any prior copy of the id
    /// is replaced by exactly one copy in the confirmed status column.
    pub async fn save_draft(&self) {
        let Some(draft) = self.draft.get_untracked() else {
            return;
        };
        // Newly created tasks that were never columned fall back to todo.
        let status = self
            .columns
            .with_untracked(|c| c.column_of(&draft.id))
            .unwrap_or(ColumnKey::Todo);
        let record = TaskRecord::from_task(&draft, status.as_str());

        match self.store.upsert(&record).await {
            Ok(confirmed) => {
                let confirmed_status = match ColumnKey::parse(&confirmed.status) {
                    Some(key) => key,
                    None => {
                        log::warn!(
                            "server confirmed task {} with unrecognized status {:?}; keeping {status}",
                            confirmed.id,
                            confirmed.status
                        );
                        status
                    }
                };
                let task = confirmed.into_task();
                self.columns.update(|c| c.place(task, confirmed_status));
                self.draft.set(None);
            }
            Err(e) => {
                // Draft stays open and local lists are left as-is, so a
                // failed save of a brand-new task leaves its optimistic card
                // on the board, unsaved.
                log::error!("saving task {} failed: {e}", draft.id);
            }
        }
    }

    /// Delete remotely, then drop the id from every column. A failed remote
    /// delete is logged but local removal proceeds; the remote copy may be
    /// stale until the next load.
    pub async fn delete_task(&self, id: &str) {
        if let Err(e) = self.store.delete(id).await {
            log::error!("deleting task {id} failed: {e}");
        }
        self.columns.update(|c| c.remove(id));
        if self
            .draft
            .with_untracked(|d| d.as_ref().is_some_and(|t| t.id == id))
        {
            self.draft.set(None);
        }
    }
}

/// Completed / total subtask counts for a card's progress bar.
pub fn completion_count(task: &Task) -> (usize, usize) {
    let completed = task.subtasks.iter().filter(|st| st.done).count();
    (completed, task.subtasks.len())
}

/// Day-granularity deadline category with a fixed display tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeadlineStatus {
    Today,
    Overdue,
    Upcoming,
}

impl DeadlineStatus {
    pub fn tag(self) -> &'static str {
        match self {
            DeadlineStatus::Today => "today",
            DeadlineStatus::Overdue => "overdue",
            DeadlineStatus::Upcoming => "upcoming",
        }
    }
}

pub fn deadline_status(deadline: NaiveDate, today: NaiveDate) -> DeadlineStatus {
    if deadline == today {
        DeadlineStatus::Today
    } else if deadline < today {
        DeadlineStatus::Overdue
    } else {
        DeadlineStatus::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RemoteState {
        rows: Vec<TaskRecord>,
        status_updates: Vec<(String, ColumnKey)>,
        fail_update_status: bool,
        fail_upsert: bool,
        fail_delete: bool,
        fail_fetch: bool,
    }

    /// Scriptable in-memory stand-in for the hosted task store.
    #[derive(Clone, Default)]
    struct MockStore(Rc<RefCell<RemoteState>>);

    impl MockStore {
        fn with_rows(rows: Vec<TaskRecord>) -> Self {
            let store = Self::default();
            store.0.borrow_mut().rows = rows;
            store
        }
    }

    fn remote_err() -> ApiError {
        ApiError::Status { status: 500, message: "boom".into() }
    }

    impl TaskStore for MockStore {
        async fn fetch_all(&self) -> Result<Vec<TaskRecord>, ApiError> {
            let state = self.0.borrow();
            if state.fail_fetch {
                return Err(remote_err());
            }
            Ok(state.rows.clone())
        }

        async fn upsert(&self, record: &TaskRecord) -> Result<TaskRecord, ApiError> {
            let mut state = self.0.borrow_mut();
            if state.fail_upsert {
                return Err(remote_err());
            }
            let mut confirmed = record.clone();
            confirmed.created_at = Some(Utc::now());
            match state.rows.iter_mut().find(|r| r.id == record.id) {
                Some(row) => *row = confirmed.clone(),
                None => state.rows.push(confirmed.clone()),
            }
            Ok(confirmed)
        }

        async fn update_status(&self, id: &str, status: ColumnKey) -> Result<(), ApiError> {
            let mut state = self.0.borrow_mut();
            if state.fail_update_status {
                return Err(remote_err());
            }
            if let Some(row) = state.rows.iter_mut().find(|r| r.id == id) {
                row.status = status.as_str().to_string();
            }
            state.status_updates.push((id.to_string(), status));
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<(), ApiError> {
            let mut state = self.0.borrow_mut();
            if state.fail_delete {
                return Err(remote_err());
            }
            state.rows.retain(|r| r.id != id);
            Ok(())
        }
    }

    impl UserDirectory for MockStore {
        async fn fetch_allowed_users(&self) -> Result<Vec<UserProfile>, ApiError> {
            Ok(vec![UserProfile {
                id: "u1".into(),
                email: "ada@example.com".into(),
                display_name: Some("Ada Lovelace".into()),
                avatar_url: None,
            }])
        }
    }

    fn record(id: &str, status: &str) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            assigned_to: None,
            deadline: None,
            subtasks: Vec::new(),
            status: status.to_string(),
            created_at: Some(Utc::now()),
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    async fn loaded_board(rows: Vec<TaskRecord>) -> (TaskBoard<MockStore>, MockStore) {
        let store = MockStore::with_rows(rows);
        let board = TaskBoard::new(store.clone());
        board.load().await;
        (board, store)
    }

    #[tokio::test]
    async fn load_partitions_by_status_in_fetch_order() {
        let owner = Owner::new();
        owner.set();
        let (board, _) = loaded_board(vec![
            record("a", "todo"),
            record("b", "inprogress"),
            record("c", "todo"),
            record("d", "completed"),
        ])
        .await;

        let cols = board.columns.get_untracked();
        assert_eq!(ids(&cols.todo), ["a", "c"]);
        assert_eq!(ids(&cols.inprogress), ["b"]);
        assert_eq!(ids(&cols.completed), ["d"]);
        assert!(!board.loading.get_untracked());
        assert_eq!(board.users.get_untracked().len(), 1);
    }

    #[tokio::test]
    async fn load_reports_unrecognized_status_without_crashing() {
        let owner = Owner::new();
        owner.set();
        let (board, _) = loaded_board(vec![record("a", "todo"), record("x", "archived")]).await;

        let cols = board.columns.get_untracked();
        assert_eq!(cols.total(), 1);
        assert_eq!(cols.column_of("x"), None);
    }

    #[tokio::test]
    async fn load_failure_keeps_stale_state_and_clears_loading() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![record("a", "todo")]).await;
        store.0.borrow_mut().fail_fetch = true;

        board.load().await;

        assert_eq!(ids(&board.columns.get_untracked().todo), ["a"]);
        assert!(!board.loading.get_untracked());
    }

    #[tokio::test]
    async fn reorder_across_columns_lands_at_dest_index_and_persists_status() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![
            record("a", "todo"),
            record("b", "todo"),
            record("c", "inprogress"),
        ])
        .await;

        board.reorder(ColumnKey::Todo, 0, ColumnKey::InProgress, 1).await;

        let cols = board.columns.get_untracked();
        assert_eq!(ids(&cols.todo), ["b"]);
        assert_eq!(ids(&cols.inprogress), ["c", "a"]);
        assert_eq!(
            store.0.borrow().status_updates,
            [("a".to_string(), ColumnKey::InProgress)]
        );
    }

    #[tokio::test]
    async fn reorder_within_column_relocates_without_remote_write() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![
            record("a", "todo"),
            record("b", "todo"),
            record("c", "todo"),
        ])
        .await;

        board.reorder(ColumnKey::Todo, 2, ColumnKey::Todo, 0).await;

        assert_eq!(ids(&board.columns.get_untracked().todo), ["c", "a", "b"]);
        // Position is local-only; no status write for same-column moves.
        assert!(store.0.borrow().status_updates.is_empty());
    }

    #[tokio::test]
    async fn reorder_to_identical_slot_is_a_noop() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![record("a", "todo"), record("b", "todo")]).await;
        let before = board.columns.get_untracked();

        board.reorder(ColumnKey::Todo, 1, ColumnKey::Todo, 1).await;

        assert_eq!(board.columns.get_untracked(), before);
        assert!(store.0.borrow().status_updates.is_empty());
    }

    #[tokio::test]
    async fn reorder_appends_when_dest_index_is_list_length() {
        let owner = Owner::new();
        owner.set();
        let (board, _) = loaded_board(vec![
            record("a", "todo"),
            record("b", "inprogress"),
        ])
        .await;

        board.reorder(ColumnKey::Todo, 0, ColumnKey::InProgress, 1).await;

        assert_eq!(ids(&board.columns.get_untracked().inprogress), ["b", "a"]);
    }

    #[tokio::test]
    async fn reorder_with_out_of_range_source_is_ignored() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![record("a", "todo")]).await;
        let before = board.columns.get_untracked();

        board.reorder(ColumnKey::Todo, 5, ColumnKey::Completed, 0).await;

        assert_eq!(board.columns.get_untracked(), before);
        assert!(store.0.borrow().status_updates.is_empty());
    }

    #[tokio::test]
    async fn failed_status_update_rolls_back_to_pre_move_state() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![
            record("a", "todo"),
            record("b", "todo"),
            record("c", "inprogress"),
        ])
        .await;
        store.0.borrow_mut().fail_update_status = true;
        let before = board.columns.get_untracked();

        board.reorder(ColumnKey::Todo, 0, ColumnKey::InProgress, 0).await;
        assert_eq!(board.columns.get_untracked(), before);

        // Idempotent: a second failed attempt from the same starting state
        // produces the same rollback state.
        board.reorder(ColumnKey::Todo, 0, ColumnKey::InProgress, 0).await;
        assert_eq!(board.columns.get_untracked(), before);
    }

    #[tokio::test]
    async fn unsaved_draft_does_not_survive_a_reload() {
        let owner = Owner::new();
        owner.set();
        let (board, _) = loaded_board(vec![record("a", "todo")]).await;

        let draft = board.create_draft();
        assert_eq!(
            board.columns.with_untracked(|c| c.column_of(&draft.id)),
            Some(ColumnKey::Todo)
        );

        board.load().await;
        assert_eq!(board.columns.with_untracked(|c| c.column_of(&draft.id)), None);
    }

    #[tokio::test]
    async fn save_draft_leaves_exactly_one_copy_in_the_confirmed_column() {
        let owner = Owner::new();
        owner.set();
        let (board, _) = loaded_board(vec![record("a", "inprogress"), record("b", "todo")]).await;

        let task = board.columns.with_untracked(|c| c.inprogress[0].clone());
        board.open_draft(task);
        board.edit_draft(|t| t.title = "renamed".into());
        board.save_draft().await;

        let cols = board.columns.get_untracked();
        assert_eq!(cols.column_of("a"), Some(ColumnKey::InProgress));
        let copies = ColumnKey::ALL
            .into_iter()
            .flat_map(|k| cols.column(k).iter())
            .filter(|t| t.id == "a")
            .count();
        assert_eq!(copies, 1);
        assert_eq!(cols.inprogress[0].title, "renamed");
        assert!(board.draft.get_untracked().is_none());
    }

    #[tokio::test]
    async fn save_draft_of_new_task_defaults_to_todo_and_persists() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![]).await;

        let draft = board.create_draft();
        board.edit_draft(|t| t.description = "details".into());
        board.save_draft().await;

        let cols = board.columns.get_untracked();
        assert_eq!(cols.column_of(&draft.id), Some(ColumnKey::Todo));
        // Reconciled to the server-confirmed record (timestamp assigned).
        let row = store.0.borrow().rows.iter().find(|r| r.id == draft.id).cloned();
        assert_eq!(row.map(|r| r.status), Some("todo".to_string()));
    }

    #[tokio::test]
    async fn failed_save_keeps_draft_open_and_lists_unchanged() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![]).await;
        store.0.borrow_mut().fail_upsert = true;

        let draft = board.create_draft();
        let before = board.columns.get_untracked();
        board.save_draft().await;

        // Source behavior: the optimistic insert stays visible, unsaved.
        assert_eq!(board.columns.get_untracked(), before);
        assert_eq!(
            board.draft.with_untracked(|d| d.as_ref().map(|t| t.id.clone())),
            Some(draft.id)
        );
    }

    #[tokio::test]
    async fn save_draft_without_active_draft_is_a_noop() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![record("a", "todo")]).await;

        board.save_draft().await;

        assert_eq!(store.0.borrow().rows.len(), 1);
        assert_eq!(board.columns.get_untracked().total(), 1);
    }

    #[tokio::test]
    async fn delete_task_removes_from_every_column_and_clears_matching_draft() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![record("a", "todo"), record("b", "completed")]).await;

        let task = board.columns.with_untracked(|c| c.todo[0].clone());
        board.open_draft(task);
        board.delete_task("a").await;

        assert_eq!(board.columns.with_untracked(|c| c.column_of("a")), None);
        assert!(board.draft.get_untracked().is_none());
        assert!(store.0.borrow().rows.iter().all(|r| r.id != "a"));
    }

    #[tokio::test]
    async fn delete_task_keeps_unrelated_draft_open() {
        let owner = Owner::new();
        owner.set();
        let (board, _) = loaded_board(vec![record("a", "todo"), record("b", "todo")]).await;

        let task = board.columns.with_untracked(|c| c.todo[1].clone());
        board.open_draft(task);
        board.delete_task("a").await;

        assert_eq!(
            board.draft.with_untracked(|d| d.as_ref().map(|t| t.id.clone())),
            Some("b".to_string())
        );
    }

    #[tokio::test]
    async fn delete_failure_still_removes_locally() {
        let owner = Owner::new();
        owner.set();
        let (board, store) = loaded_board(vec![record("a", "todo")]).await;
        store.0.borrow_mut().fail_delete = true;

        board.delete_task("a").await;

        // Documented policy choice: local removal proceeds, remote row stays.
        assert_eq!(board.columns.get_untracked().total(), 0);
        assert_eq!(store.0.borrow().rows.len(), 1);
    }

    #[tokio::test]
    async fn subtask_edits_mutate_only_the_draft() {
        let owner = Owner::new();
        owner.set();
        let (board, _) = loaded_board(vec![]).await;
        board.create_draft();

        board.add_subtask();
        board.add_subtask();
        board.rename_subtask(0, "write tests".into());
        board.toggle_subtask(0);
        board.remove_subtask(1);

        let draft = board.draft.get_untracked().unwrap();
        assert_eq!(draft.subtasks.len(), 1);
        assert_eq!(draft.subtasks[0].title, "write tests");
        assert!(draft.subtasks[0].done);
        // The optimistic todo card is untouched until save.
        assert!(board.columns.with_untracked(|c| c.todo[0].subtasks.is_empty()));
    }

    #[tokio::test]
    async fn added_subtasks_get_distinct_ids() {
        let owner = Owner::new();
        owner.set();
        let (board, _) = loaded_board(vec![]).await;
        board.create_draft();

        // Back-to-back adds land within the same instant; ids must still
        // differ or checklist row edits hit the wrong entry.
        board.add_subtask();
        board.add_subtask();
        board.add_subtask();

        let draft = board.draft.get_untracked().unwrap();
        let mut ids: Vec<_> = draft.subtasks.iter().map(|s| s.id.clone()).collect();
        assert!(ids.iter().all(|id| !id.is_empty()));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn completion_count_tallies_done_subtasks() {
        let mut task = Task::draft();
        for done in [true, false, true] {
            task.subtasks.push(Subtask {
                id: task.subtasks.len().to_string(),
                title: String::new(),
                done,
            });
        }
        assert_eq!(completion_count(&task), (2, 3));
    }

    #[test]
    fn deadline_status_buckets_by_calendar_day() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert_eq!(deadline_status(today, today), DeadlineStatus::Today);
        assert_eq!(
            deadline_status(today - Duration::days(1), today),
            DeadlineStatus::Overdue
        );
        assert_eq!(
            deadline_status(today + Duration::days(7), today),
            DeadlineStatus::Upcoming
        );
        assert_eq!(DeadlineStatus::Today.tag(), "today");
    }
}
