//! Login
//!
//! Sign-in gate. The OAuth redirect leaves the page, so there is nothing to
//! await here.

use leptos::prelude::*;

use crate::context::use_session;

#[component]
pub fn Login() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="login">
            <div class="login-card">
                <h1>"Teamdeck"</h1>
                <p>"Your team's shared workspace."</p>
                <button class="btn-primary login-btn" on:click=move |_| session.sign_in()>
                    "Sign in with Google"
                </button>
            </div>
        </div>
    }
}
