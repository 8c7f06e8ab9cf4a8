//! Task Editor
//!
//! Modal over the board editing the draft task. Every field writes through
//! the board's draft ops so the card list never sees half-edited state.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::task_board::AppBoard;

#[component]
pub fn TaskEditor(board: StoredValue<AppBoard>) -> impl IntoView {
    let draft = board.with_value(|b| b.draft);
    let users = board.with_value(|b| b.users);

    let title = move || draft.get().map(|t| t.title).unwrap_or_default();
    let description = move || draft.get().map(|t| t.description).unwrap_or_default();
    let assigned_to = move || {
        draft
            .get()
            .and_then(|t| t.assigned_to)
            .unwrap_or_default()
    };
    let deadline = move || {
        draft
            .get()
            .and_then(|t| t.deadline)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    let subtasks = move || {
        draft
            .get()
            .map(|t| t.subtasks.into_iter().enumerate().collect::<Vec<_>>())
            .unwrap_or_default()
    };
    let subtask_summary = move || {
        let (done, total) = draft
            .get()
            .map(|t| {
                let done = t.subtasks.iter().filter(|s| s.done).count();
                (done, t.subtasks.len())
            })
            .unwrap_or((0, 0));
        format!("({done}/{total})")
    };

    let on_save = move |_| {
        let b = board.get_value();
        spawn_local(async move {
            b.save_draft().await;
        });
    };
    let on_cancel = move |_| board.with_value(|b| b.close_draft());

    view! {
        <div class="modal-backdrop" on:click=on_cancel>
            <div class="modal task-editor" on:click=move |ev| ev.stop_propagation()>
                <h3>"Edit Task"</h3>
                <label class="field">
                    <span>"Title"</span>
                    <input
                        type="text"
                        prop:value=title
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            board.with_value(|b| b.edit_draft(|t| t.title = value));
                        }
                    />
                </label>
                <label class="field">
                    <span>"Description"</span>
                    <textarea
                        prop:value=description
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            board.with_value(|b| b.edit_draft(|t| t.description = value));
                        }
                    ></textarea>
                </label>
                <div class="field-row">
                    <label class="field">
                        <span>"Assignee"</span>
                        <select
                            prop:value=assigned_to
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                let assignee = (!value.is_empty()).then_some(value);
                                board.with_value(|b| b.edit_draft(|t| t.assigned_to = assignee));
                            }
                        >
                            <option value="">"Unassigned"</option>
                            <For
                                each=move || users.get()
                                key=|u| u.id.clone()
                                children=|u| {
                                    view! { <option value=u.id.clone()>{u.short_name()}</option> }
                                }
                            />
                        </select>
                    </label>
                    <label class="field">
                        <span>"Deadline"</span>
                        <input
                            type="date"
                            prop:value=deadline
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                let parsed = NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok();
                                board.with_value(|b| b.edit_draft(|t| t.deadline = parsed));
                            }
                        />
                    </label>
                </div>
                <div class="subtasks">
                    <div class="subtasks-header">
                        <span>"Subtasks " {subtask_summary}</span>
                        <button
                            class="btn-ghost"
                            on:click=move |_| board.with_value(|b| b.add_subtask())
                        >
                            "+ Add"
                        </button>
                    </div>
                    // Index participates in the key so removals re-render the
                    // shifted rows with their new index.
                    <For
                        each=subtasks
                        key=|(idx, s)| (*idx, s.id.clone())
                        children=move |(idx, sub)| {
                            view! {
                                <div class="subtask-row">
                                    <input
                                        type="checkbox"
                                        prop:checked=sub.done
                                        on:change=move |_| {
                                            board.with_value(|b| b.toggle_subtask(idx));
                                        }
                                    />
                                    <input
                                        type="text"
                                        prop:value=sub.title.clone()
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            board.with_value(|b| b.rename_subtask(idx, value));
                                        }
                                    />
                                    <button
                                        class="btn-ghost"
                                        on:click=move |_| {
                                            board.with_value(|b| b.remove_subtask(idx));
                                        }
                                    >
                                        "×"
                                    </button>
                                </div>
                            }
                        }
                    />
                </div>
                <div class="modal-actions">
                    <button class="btn-secondary" on:click=on_cancel>
                        "Cancel"
                    </button>
                    <button class="btn-primary" on:click=on_save>
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}
