//! Task Board
//!
//! Three-column kanban backed by `TaskBoard`. Cards drag between columns
//! with the shared dnd signals; drops resolve to a (column, index) slot and
//! are handed to the synchronizer.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{
    bind_global_mouseup, create_dnd_signals, make_on_mousedown, make_on_mouseleave,
    make_on_slot_mouseenter, DndSignals, Slot,
};

use crate::api::Backend;
use crate::board::{completion_count, deadline_status, ColumnKey, TaskBoard};
use crate::components::TaskEditor;
use crate::context::use_session;
use crate::models::Task;

pub type AppBoard = TaskBoard<Backend>;

#[component]
pub fn TaskBoardView() -> impl IntoView {
    let session = use_session();
    let board = TaskBoard::new(session.backend().clone());

    let columns = board.columns;
    let loading = board.loading;
    let draft = board.draft;

    let dnd = create_dnd_signals();
    let board = StoredValue::new(board);

    {
        let b = board.get_value();
        spawn_local(async move { b.load().await });
    }

    // Resolve a drop: find where the dragged card currently sits, then let
    // the synchronizer move it. Dropping below the card's own position has
    // to account for the removal shifting later slots up by one.
    bind_global_mouseup(dnd, move |task_id: String, slot: Slot| {
        let Some(dst) = ColumnKey::parse(&slot.column) else {
            return;
        };
        let snapshot = columns.get_untracked();
        let Some(src) = snapshot.column_of(&task_id) else {
            return;
        };
        let Some(src_idx) = snapshot.column(src).iter().position(|t| t.id == task_id) else {
            return;
        };
        let mut dst_idx = slot.index;
        if src == dst && dst_idx > src_idx {
            dst_idx -= 1;
        }
        let b = board.get_value();
        spawn_local(async move {
            b.reorder(src, src_idx, dst, dst_idx).await;
        });
    });

    view! {
        <div class="panel task-board">
            <div class="panel-header">
                <h2>"Task Board"</h2>
                <button
                    class="btn-primary"
                    on:click=move |_| {
                        board.with_value(|b| {
                            b.create_draft();
                        });
                    }
                >
                    "+ New Task"
                </button>
            </div>
            <Show when=move || loading.get()>
                <div class="board-loading">"Loading tasks…"</div>
            </Show>
            <div class="board-columns">
                {ColumnKey::ALL
                    .iter()
                    .map(|&col| view! { <BoardColumn col=col board=board dnd=dnd /> })
                    .collect_view()}
            </div>
            <Show when=move || draft.get().is_some()>
                <TaskEditor board=board />
            </Show>
        </div>
    }
}

#[component]
fn BoardColumn(col: ColumnKey, board: StoredValue<AppBoard>, dnd: DndSignals) -> impl IntoView {
    let columns = board.with_value(|b| b.columns);
    let cards = move || {
        columns
            .get()
            .column(col)
            .iter()
            .cloned()
            .enumerate()
            .collect::<Vec<_>>()
    };
    let tail_slot = move || columns.get().column(col).len();

    view! {
        <div class="board-column" data-column=col.as_str()>
            <div class="column-header">
                <span class="column-title">{col.title()}</span>
                <span class="column-count">{move || columns.get().column(col).len()}</span>
            </div>
            <div class="column-cards" on:mouseleave=make_on_mouseleave(dnd)>
                // Index is part of the key: reorders must re-render cards so
                // their slot positions stay current.
                <For
                    each=cards
                    key=|(idx, t)| (*idx, t.id.clone())
                    children=move |(index, task)| {
                        view! { <TaskCard task=task index=index col=col board=board dnd=dnd /> }
                    }
                />
                // Tail slot catches drops below the last card.
                <div
                    class="column-tail"
                    class:drop-target=move || {
                        dnd.drop_slot_read.get()
                            == Some(Slot::new(col.as_str(), tail_slot()))
                    }
                    on:mouseenter=move |ev| {
                        make_on_slot_mouseenter(dnd, col.as_str().to_string(), tail_slot())(ev)
                    }
                ></div>
            </div>
        </div>
    }
}

#[component]
fn TaskCard(
    task: Task,
    index: usize,
    col: ColumnKey,
    board: StoredValue<AppBoard>,
    dnd: DndSignals,
) -> impl IntoView {
    let users = board.with_value(|b| b.users);
    let id = task.id.clone();
    let (done, total) = completion_count(&task);

    let assigned_to = task.assigned_to.clone();
    let assignee = move || {
        let assigned_to = assigned_to.clone()?;
        users
            .get()
            .iter()
            .find(|u| u.id == assigned_to)
            .map(|u| u.short_name())
    };
    let has_assignee = {
        let assignee = assignee.clone();
        move || assignee().is_some()
    };
    let assignee_label = {
        let assignee = assignee.clone();
        move || assignee().unwrap_or_default()
    };
    let description = task.description.clone();
    let has_description = {
        let description = description.clone();
        move || !description.is_empty()
    };

    let deadline_badge = task.deadline.map(|d| {
        let status = deadline_status(d, Local::now().date_naive());
        view! {
            <span class=format!("deadline-badge deadline-{}", status.tag())>
                {d.format("%b %-d").to_string()}
            </span>
        }
    });

    let on_open = {
        let task = task.clone();
        move |_| {
            // A drag that just ended still fires a click; swallow it.
            if dnd.drag_just_ended_read.get_untracked() {
                return;
            }
            board.with_value(|b| b.open_draft(task.clone()));
        }
    };
    let on_delete = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let id = id.clone();
            let b = board.get_value();
            spawn_local(async move {
                b.delete_task(&id).await;
            });
        }
    };

    view! {
        <div
            class="task-card"
            class:dragging=move || dnd.dragging_id_read.get().as_deref() == Some(id.as_str())
            class:drop-target=move || {
                dnd.drop_slot_read.get() == Some(Slot::new(col.as_str(), index))
            }
            on:mousedown=make_on_mousedown(dnd, task.id.clone())
            on:mouseenter=make_on_slot_mouseenter(dnd, col.as_str().to_string(), index)
            on:click=on_open
        >
            <div class="card-top">
                <span class="card-title">{task.title.clone()}</span>
                <button class="card-delete" on:click=on_delete>
                    "×"
                </button>
            </div>
            <Show when=has_description>
                <p class="card-desc">{description.clone()}</p>
            </Show>
            <Show when=move || { total > 0 }>
                <div class="card-progress">
                    <div class="progress-track">
                        <div
                            class="progress-fill"
                            style:width=format!("{}%", done * 100 / total.max(1))
                        ></div>
                    </div>
                    <span class="progress-label">{format!("{done}/{total}")}</span>
                </div>
            </Show>
            <div class="card-meta">
                {deadline_badge}
                <Show when=has_assignee>
                    <span class="assignee-badge">{assignee_label.clone()}</span>
                </Show>
            </div>
        </div>
    }
}
