//! App Shell
//!
//! Sidebar navigation, presence roster and the signed-in user footer, with
//! the active panel rendered alongside.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_session;
use crate::store::{use_app_store, AppStateStoreFields};

/// The dashboard panels reachable from the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Home,
    Tasks,
    Chat,
    Notes,
    Files,
    Calendar,
    Whiteboard,
}

impl Panel {
    pub const ALL: [Panel; 7] = [
        Panel::Home,
        Panel::Tasks,
        Panel::Chat,
        Panel::Notes,
        Panel::Files,
        Panel::Calendar,
        Panel::Whiteboard,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Panel::Home => "Home",
            Panel::Tasks => "Tasks",
            Panel::Chat => "Chat",
            Panel::Notes => "Notes",
            Panel::Files => "Documents",
            Panel::Calendar => "Calendar",
            Panel::Whiteboard => "Whiteboard",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Panel::Home => "🏠",
            Panel::Tasks => "📋",
            Panel::Chat => "💬",
            Panel::Notes => "📝",
            Panel::Files => "📁",
            Panel::Calendar => "📅",
            Panel::Whiteboard => "🖊",
        }
    }
}

#[component]
pub fn Layout(
    active: ReadSignal<Panel>,
    set_active: WriteSignal<Panel>,
    children: Children,
) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();
    let user = session.user;
    let session = StoredValue::new(session);

    let display_name = move || {
        user.get()
            .map(|u| u.short_name())
            .unwrap_or_default()
    };
    let on_sign_out = move |_| {
        let s = session.get_value();
        spawn_local(async move {
            s.sign_out().await;
        });
    };

    view! {
        <div class="layout">
            <aside class="sidebar">
                <div class="brand">"Teamdeck"</div>
                <nav class="nav">
                    {Panel::ALL
                        .iter()
                        .map(|&panel| {
                            view! {
                                <button
                                    class="nav-item"
                                    class:active=move || active.get() == panel
                                    on:click=move |_| set_active.set(panel)
                                >
                                    <span class="nav-icon">{panel.icon()}</span>
                                    <span class="nav-label">{panel.label()}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <div class="presence">
                    <span class="presence-title">"Online"</span>
                    <For
                        each=move || store.online_users().get()
                        key=|u| u.id.clone()
                        children=|u| {
                            view! {
                                <div class="presence-user">
                                    <span class="presence-dot"></span>
                                    {u.short_name()}
                                </div>
                            }
                        }
                    />
                </div>
                <div class="sidebar-footer">
                    <span class="me">{display_name}</span>
                    <button class="btn-ghost" on:click=on_sign_out>
                        "Sign out"
                    </button>
                </div>
            </aside>
            <main class="content">{children()}</main>
        </div>
    }
}
