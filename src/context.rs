//! Application Context
//!
//! Session and presence, provided via the Leptos Context API as explicit
//! provider objects: initialized at session start, torn down at sign-out.
//! Nothing here is an ambient singleton.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, auth, Backend};
use crate::models::UserProfile;
use crate::store::{store_set_online_users, AppStore};

/// Milliseconds between presence heartbeats / roster polls.
const PRESENCE_INTERVAL_MS: u32 = 10_000;

/// Current signed-in user plus the sign-in/out operations.
#[derive(Clone)]
pub struct SessionContext {
    backend: Backend,
    pub user: ReadSignal<Option<UserProfile>>,
    set_user: WriteSignal<Option<UserProfile>>,
    /// True until the initial session probe finishes.
    pub loading: ReadSignal<bool>,
    set_loading: WriteSignal<bool>,
}

impl SessionContext {
    pub fn new(backend: Backend) -> Self {
        let (user, set_user) = signal(None::<UserProfile>);
        let (loading, set_loading) = signal(true);
        Self { backend, user, set_user, loading, set_loading }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Resume a session from the post-OAuth URL fragment, if one is there.
    /// Users missing from the allow list are signed straight back out.
    pub async fn init(&self) {
        let location = web_sys::window().map(|w| w.location());
        let hash = location
            .as_ref()
            .and_then(|l| l.hash().ok())
            .unwrap_or_default();

        if let Some(tokens) = auth::parse_fragment(&hash) {
            self.backend.set_session(tokens);
            if let Some(l) = &location {
                // Tokens should not linger in the address bar.
                let _ = l.set_hash("");
            }
            match auth::fetch_user(&self.backend).await {
                Ok(user) if self.backend.config().is_allowed(&user.email) => {
                    self.set_user.set(Some(user));
                }
                Ok(user) => {
                    log::warn!("{} is not on the allow list; signing out", user.email);
                    self.backend.clear_session();
                }
                Err(e) => {
                    log::error!("fetching signed-in user failed: {e}");
                    self.backend.clear_session();
                }
            }
        }
        self.set_loading.set(false);
    }

    /// Redirect to the backend's OAuth flow. The page unloads here.
    pub fn sign_in(&self) {
        if let Some(win) = web_sys::window() {
            let location = win.location();
            let origin = location.origin().unwrap_or_default();
            let _ = location.set_href(&auth::authorize_url(self.backend.config(), &origin));
        }
    }

    /// Tear the session down: server-side invalidation (best effort), then
    /// local token and user state.
    pub async fn sign_out(&self) {
        if let Err(e) = auth::sign_out(&self.backend).await {
            log::warn!("server-side sign-out failed: {e}");
        }
        self.backend.clear_session();
        self.set_user.set(None);
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Online-presence roster provider, backed by the app store.
#[derive(Clone)]
pub struct PresenceContext {
    store: AppStore,
}

impl PresenceContext {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Heartbeat-and-poll loop for the signed-in user. Runs until the
    /// session ends (sign-out or a different user), then clears the roster.
    pub fn start(&self, session: SessionContext) {
        let store = self.store;
        spawn_local(async move {
            let Some(me) = session.user.get_untracked() else {
                return;
            };
            let backend = session.backend().clone();
            loop {
                let still_me = session
                    .user
                    .with_untracked(|u| u.as_ref().is_some_and(|u| u.id == me.id));
                if !still_me {
                    break;
                }
                if let Err(e) = api::presence::heartbeat(&backend, &me).await {
                    log::warn!("presence heartbeat failed: {e}");
                }
                match api::presence::roster(&backend).await {
                    Ok(users) => store_set_online_users(&store, users),
                    Err(e) => log::warn!("presence roster fetch failed: {e}"),
                }
                TimeoutFuture::new(PRESENCE_INTERVAL_MS).await;
            }
            store_set_online_users(&store, Vec::new());
        });
    }
}
