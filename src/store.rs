//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::UserProfile;

/// Dashboard-wide state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Online-presence roster, refreshed by the presence loop
    pub online_users: Vec<UserProfile>,
    /// Bumped after each successful save to replay the saved toast
    pub saved_ticks: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the online roster
pub fn store_set_online_users(store: &AppStore, users: Vec<UserProfile>) {
    *store.online_users().write() = users;
}

/// Signal a completed save (notes, whiteboard)
pub fn store_mark_saved(store: &AppStore) {
    *store.saved_ticks().write() += 1;
}
