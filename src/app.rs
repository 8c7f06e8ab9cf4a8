//! Application Root
//!
//! Wires the backend client, session and presence providers and the store,
//! then gates the dashboard behind sign-in.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::Backend;
use crate::components::{
    CalendarPanel, ChatPanel, FilesPanel, HomePanel, Layout, Login, NotesPanel, Panel, SavedToast,
    TaskBoardView, WhiteboardPanel,
};
use crate::config::BackendConfig;
use crate::context::{PresenceContext, SessionContext};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let backend = Backend::new(BackendConfig::new());
    let session = SessionContext::new(backend);
    let store = Store::new(AppState::default());
    provide_context(store);
    provide_context(session.clone());

    let user = session.user;
    let loading = session.loading;

    // Probe for a resumed session once at startup.
    {
        let session = session.clone();
        spawn_local(async move {
            session.init().await;
        });
    }

    // Presence follows the session: each sign-in starts a fresh loop, and
    // the loop winds itself down when that user goes away.
    let presence = PresenceContext::new(store);
    Effect::new(move |_| {
        if user.get().is_some() {
            presence.start(session.clone());
        }
    });

    let (active, set_active) = signal(Panel::Home);

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! { <div class="app-loading">"Loading…"</div> }
        >
            <Show when=move || user.get().is_some() fallback=|| view! { <Login /> }>
                <Layout active=active set_active=set_active>
                    {move || match active.get() {
                        Panel::Home => view! { <HomePanel /> }.into_any(),
                        Panel::Tasks => view! { <TaskBoardView /> }.into_any(),
                        Panel::Chat => view! { <ChatPanel /> }.into_any(),
                        Panel::Notes => view! { <NotesPanel /> }.into_any(),
                        Panel::Files => view! { <FilesPanel /> }.into_any(),
                        Panel::Calendar => view! { <CalendarPanel /> }.into_any(),
                        Panel::Whiteboard => view! { <WhiteboardPanel /> }.into_any(),
                    }}
                </Layout>
                <SavedToast />
            </Show>
        </Show>
    }
}
