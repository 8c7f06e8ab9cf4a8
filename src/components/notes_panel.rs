//! Meeting Notes
//!
//! Note list with a markdown editor and live preview. New notes start from
//! the dated template; saves flash the shared toast.

use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::notes;
use crate::context::use_session;
use crate::markdown;
use crate::models::MeetNote;
use crate::store::{store_mark_saved, use_app_store};

#[component]
pub fn NotesPanel() -> impl IntoView {
    let session = use_session();
    let backend = StoredValue::new(session.backend().clone());
    let user = session.user;
    let store = use_app_store();

    let all_notes = RwSignal::new(Vec::<MeetNote>::new());
    let open = RwSignal::new(None::<MeetNote>);
    let preview = RwSignal::new(false);

    spawn_local(async move {
        match notes::list_notes(&backend.get_value()).await {
            Ok(rows) => all_notes.set(rows),
            Err(e) => log::error!("loading notes failed: {e}"),
        }
    });

    let on_new = move |_| {
        let Some(me) = user.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let today = Local::now().date_naive();
            match notes::create_note(&backend.get_value(), &me.id, today).await {
                Ok(note) => {
                    all_notes.update(|rows| rows.insert(0, note.clone()));
                    open.set(Some(note));
                    preview.set(false);
                }
                Err(e) => log::error!("creating note failed: {e}"),
            }
        });
    };

    let on_save = move |_| {
        let Some(note) = open.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match notes::update_note(&backend.get_value(), &note).await {
                Ok(()) => {
                    all_notes.update(|rows| {
                        if let Some(row) = rows.iter_mut().find(|r| r.id == note.id) {
                            *row = note.clone();
                        }
                    });
                    store_mark_saved(&store);
                }
                Err(e) => log::error!("saving note failed: {e}"),
            }
        });
    };

    let on_delete = move |id: i64| {
        spawn_local(async move {
            if let Err(e) = notes::delete_note(&backend.get_value(), id).await {
                log::error!("deleting note failed: {e}");
                return;
            }
            all_notes.update(|rows| rows.retain(|r| r.id != id));
            if open.get_untracked().is_some_and(|n| n.id == id) {
                open.set(None);
            }
        });
    };

    let edit_open = move |edit: &dyn Fn(&mut MeetNote)| {
        open.update(|slot| {
            if let Some(note) = slot.as_mut() {
                edit(note);
            }
        });
    };

    view! {
        <div class="panel notes">
            <div class="notes-list">
                <div class="panel-header">
                    <h2>"Meeting Notes"</h2>
                    <button class="btn-primary" on:click=on_new>
                        "+ New"
                    </button>
                </div>
                <For
                    each=move || all_notes.get()
                    key=|n| (n.id, n.name.clone(), n.date)
                    children=move |note| {
                        let id = note.id;
                        let selected = move || {
                            open.get().is_some_and(|n| n.id == id)
                        };
                        let pick = note.clone();
                        view! {
                            <div
                                class="note-item"
                                class:selected=selected
                                on:click=move |_| {
                                    open.set(Some(pick.clone()));
                                    preview.set(false);
                                }
                            >
                                <span class="note-name">{note.name.clone()}</span>
                                <span class="note-date">
                                    {note.date.format("%b %-d, %Y").to_string()}
                                </span>
                                <button
                                    class="btn-ghost"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        on_delete(id);
                                    }
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
            <Show
                when=move || open.get().is_some()
                fallback=|| view! { <div class="notes-empty">"Select or create a note"</div> }
            >
                <div class="note-editor">
                    <div class="note-editor-head">
                        <input
                            type="text"
                            class="note-title"
                            prop:value=move || open.get().map(|n| n.name).unwrap_or_default()
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                edit_open(&|n| n.name = value.clone());
                            }
                        />
                        <input
                            type="date"
                            prop:value=move || {
                                open.get()
                                    .map(|n| n.date.format("%Y-%m-%d").to_string())
                                    .unwrap_or_default()
                            }
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                                    edit_open(&|n| n.date = date);
                                }
                            }
                        />
                        <button
                            class="btn-secondary"
                            on:click=move |_| preview.update(|p| *p = !*p)
                        >
                            {move || if preview.get() { "Edit" } else { "Preview" }}
                        </button>
                        <button class="btn-primary" on:click=on_save>
                            "Save"
                        </button>
                    </div>
                    <Show
                        when=move || preview.get()
                        fallback=move || {
                            view! {
                                <textarea
                                    class="note-body"
                                    prop:value=move || {
                                        open.get().map(|n| n.notes).unwrap_or_default()
                                    }
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        edit_open(&|n| n.notes = value.clone());
                                    }
                                ></textarea>
                            }
                        }
                    >
                        <div
                            class="note-preview"
                            inner_html=move || {
                                markdown::render(
                                    &open.get().map(|n| n.notes).unwrap_or_default(),
                                )
                            }
                        ></div>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
