//! Saved Toast
//!
//! Brief "Saved" flash driven by the store's save counter. A newer save
//! while visible restarts the timer instead of cutting the toast short.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::store::{use_app_store, AppStateStoreFields};

const TOAST_MS: u32 = 2_000;

#[component]
pub fn SavedToast() -> impl IntoView {
    let store = use_app_store();
    let visible = RwSignal::new(false);

    Effect::new(move |_| {
        let tick = store.saved_ticks().get();
        if tick == 0 {
            return;
        }
        visible.set(true);
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            if store.saved_ticks().get_untracked() == tick {
                visible.set(false);
            }
        });
    });

    view! {
        <Show when=move || visible.get()>
            <div class="saved-toast">"Saved"</div>
        </Show>
    }
}
