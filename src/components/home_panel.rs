//! Home
//!
//! Landing view: quick stats across the workspace plus the next few task
//! deadlines.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{chat, files, notes, Backend};
use crate::board::{deadline_status, BoardColumns, ColumnKey, TaskStore};
use crate::context::use_session;
use crate::models::Task;

#[derive(Clone, Copy, Default)]
struct Stats {
    todo: usize,
    in_progress: usize,
    completed: usize,
    messages_today: usize,
    notes: usize,
    documents: usize,
}

async fn gather_stats(backend: &Backend) -> (Stats, Vec<Task>) {
    let mut stats = Stats::default();
    let mut upcoming = Vec::new();

    match TaskStore::fetch_all(backend).await {
        Ok(records) => {
            let (columns, _) = BoardColumns::partition(records);
            stats.todo = columns.column(ColumnKey::Todo).len();
            stats.in_progress = columns.column(ColumnKey::InProgress).len();
            stats.completed = columns.column(ColumnKey::Completed).len();
            upcoming = columns
                .column(ColumnKey::Todo)
                .iter()
                .chain(columns.column(ColumnKey::InProgress))
                .filter(|t| t.deadline.is_some())
                .cloned()
                .collect();
            upcoming.sort_by_key(|t| t.deadline);
            upcoming.truncate(5);
        }
        Err(e) => log::warn!("home stats: tasks unavailable: {e}"),
    }

    let today = Local::now().date_naive();
    match chat::list_messages(backend).await {
        Ok(rows) => {
            stats.messages_today = rows
                .iter()
                .filter(|m| m.created_at.with_timezone(&Local).date_naive() == today)
                .count();
        }
        Err(e) => log::warn!("home stats: chat unavailable: {e}"),
    }
    match notes::list_notes(backend).await {
        Ok(rows) => stats.notes = rows.len(),
        Err(e) => log::warn!("home stats: notes unavailable: {e}"),
    }
    match files::list_dir(backend, "").await {
        Ok(rows) => stats.documents = rows.len(),
        Err(e) => log::warn!("home stats: files unavailable: {e}"),
    }

    (stats, upcoming)
}

#[component]
pub fn HomePanel() -> impl IntoView {
    let session = use_session();
    let backend = StoredValue::new(session.backend().clone());
    let user = session.user;

    let stats = RwSignal::new(Stats::default());
    let upcoming = RwSignal::new(Vec::<Task>::new());

    spawn_local(async move {
        let (s, tasks) = gather_stats(&backend.get_value()).await;
        stats.set(s);
        upcoming.set(tasks);
    });

    let greeting = move || {
        let name = user
            .get()
            .map(|u| u.short_name())
            .unwrap_or_else(|| "there".into());
        format!("Welcome back, {name}")
    };

    view! {
        <div class="panel home">
            <div class="panel-header">
                <h2>{greeting}</h2>
            </div>
            <div class="stat-cards">
                <StatCard label="To Do" value=Signal::derive(move || stats.get().todo) />
                <StatCard
                    label="In Progress"
                    value=Signal::derive(move || stats.get().in_progress)
                />
                <StatCard label="Completed" value=Signal::derive(move || stats.get().completed) />
                <StatCard
                    label="Messages Today"
                    value=Signal::derive(move || stats.get().messages_today)
                />
                <StatCard label="Meeting Notes" value=Signal::derive(move || stats.get().notes) />
                <StatCard label="Documents" value=Signal::derive(move || stats.get().documents) />
            </div>
            <div class="upcoming">
                <h3>"Upcoming Deadlines"</h3>
                <Show
                    when=move || !upcoming.get().is_empty()
                    fallback=|| view! { <p class="upcoming-empty">"Nothing due soon."</p> }
                >
                    <For
                        each=move || upcoming.get()
                        key=|t| t.id.clone()
                        children=move |task| {
                            let badge = task.deadline.map(|d| {
                                let status = deadline_status(d, Local::now().date_naive());
                                view! {
                                    <span class=format!(
                                        "deadline-badge deadline-{}",
                                        status.tag(),
                                    )>{d.format("%b %-d").to_string()}</span>
                                }
                            });
                            view! {
                                <div class="upcoming-row">
                                    <span class="upcoming-title">{task.title.clone()}</span>
                                    {badge}
                                </div>
                            }
                        }
                    />
                </Show>
            </div>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-value">{move || value.get()}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}
