//! Team Chat
//!
//! Single shared room. Messages refresh on a short poll while the panel is
//! mounted; sending, editing and deleting refresh immediately.

use chrono::Local;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::chat;
use crate::context::use_session;
use crate::markdown;
use crate::models::Message;

const POLL_INTERVAL_MS: u32 = 5_000;

#[component]
pub fn ChatPanel() -> impl IntoView {
    let session = use_session();
    let backend = session.backend().clone();
    let user = session.user;

    let messages = RwSignal::new(Vec::<Message>::new());
    let input = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<String>);
    let (alive, set_alive) = signal(true);
    on_cleanup(move || set_alive.set(false));

    {
        let backend = backend.clone();
        spawn_local(async move {
            loop {
                match chat::list_messages(&backend).await {
                    Ok(rows) => messages.set(rows),
                    Err(e) => log::warn!("chat refresh failed: {e}"),
                }
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
                if !alive.get_untracked() {
                    break;
                }
            }
        });
    }

    let submit = {
        let backend = backend.clone();
        move || {
            let content = input.get_untracked().trim().to_string();
            if content.is_empty() {
                return;
            }
            let Some(me) = user.get_untracked() else {
                return;
            };
            let backend = backend.clone();
            spawn_local(async move {
                let result = match editing.get_untracked() {
                    Some(id) => chat::update_message(&backend, &id, &me.id, &content).await,
                    None => chat::send_message(&backend, &me, &content).await,
                };
                match result {
                    Ok(()) => {
                        input.set(String::new());
                        editing.set(None);
                        if let Ok(rows) = chat::list_messages(&backend).await {
                            messages.set(rows);
                        }
                    }
                    Err(e) => log::error!("chat send failed: {e}"),
                }
            });
        }
    };

    let on_submit = {
        let submit = submit.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            submit();
        }
    };

    let delete = {
        let backend = backend.clone();
        move |id: String| {
            let Some(me) = user.get_untracked() else {
                return;
            };
            let backend = backend.clone();
            spawn_local(async move {
                if let Err(e) = chat::delete_message(&backend, &id, &me.id).await {
                    log::error!("chat delete failed: {e}");
                    return;
                }
                if let Ok(rows) = chat::list_messages(&backend).await {
                    messages.set(rows);
                }
            });
        }
    };

    view! {
        <div class="panel chat">
            <div class="panel-header">
                <h2>"Team Chat"</h2>
            </div>
            <div class="chat-messages">
                <For
                    each=move || messages.get()
                    key=|m| (m.id.clone(), m.content.clone())
                    children=move |msg| {
                        let author_id = msg.user_id.clone();
                        let mine = move || {
                            user.get().is_some_and(|me| me.id == author_id)
                        };
                        let delete = delete.clone();
                        let msg_id = msg.id.clone();
                        let edit_id = msg.id.clone();
                        let edit_content = msg.content.clone();
                        let when = msg
                            .created_at
                            .with_timezone(&Local)
                            .format("%b %-d, %H:%M")
                            .to_string();
                        view! {
                            <div class="chat-message" class:mine=mine.clone()>
                                <div class="message-head">
                                    <span class="message-author">
                                        {msg.name.clone().unwrap_or_else(|| "Unknown".into())}
                                    </span>
                                    <span class="message-time">{when}</span>
                                </div>
                                <div
                                    class="message-body"
                                    inner_html=markdown::render_inline(&msg.content)
                                ></div>
                                <Show when=mine.clone()>
                                    <div class="message-actions">
                                        <button
                                            class="btn-ghost"
                                            on:click={
                                                let id = edit_id.clone();
                                                let content = edit_content.clone();
                                                move |_| {
                                                    editing.set(Some(id.clone()));
                                                    input.set(content.clone());
                                                }
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            class="btn-ghost"
                                            on:click={
                                                let delete = delete.clone();
                                                let id = msg_id.clone();
                                                move |_| delete(id.clone())
                                            }
                                        >
                                            "Delete"
                                        </button>
                                    </div>
                                </Show>
                            </div>
                        }
                    }
                />
            </div>
            <form class="chat-compose" on:submit=on_submit>
                <Show when=move || editing.get().is_some()>
                    <button
                        type="button"
                        class="btn-ghost"
                        on:click=move |_| {
                            editing.set(None);
                            input.set(String::new());
                        }
                    >
                        "Cancel edit"
                    </button>
                </Show>
                <input
                    type="text"
                    placeholder="Write a message…"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button type="submit" class="btn-primary">
                    {move || if editing.get().is_some() { "Update" } else { "Send" }}
                </button>
            </form>
        </div>
    }
}
