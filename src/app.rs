//! LinkPick App
//!
//! Root component: session bootstrap, store wiring, playlist page layout.

use leptos::prelude::*;

use crate::api::{HttpPlaylistStore, StoreHandle};
use crate::components::{PlaylistItems, ToastHost};
use crate::config::ApiConfig;
use crate::context::{AppContext, AuthSession};

#[component]
pub fn App() -> impl IntoView {
    let (auth, set_auth) = signal(AuthSession::default());
    let ctx = AppContext::new(auth);
    provide_context(ctx);
    let store: StoreHandle = StoredValue::new_local(HttpPlaylistStore::new(&ApiConfig::from_window()));
    provide_context(store);

    Effect::new(move |_| {
        let session = AuthSession::from_browser();
        log::debug!(
            "session bootstrap: logged_in={} member_id={:?}",
            session.logged_in,
            session.member_id
        );
        set_auth.set(session);
    });

    let playlist_id = playlist_id_from_location();
    let is_owner = Signal::derive(move || auth.get().logged_in);

    view! {
        <div class="app-layout">
            <main class="main-content">
                <h1>"LinkPick"</h1>
                <PlaylistItems playlist_id=playlist_id is_owner=is_owner />
            </main>
            <ToastHost />
        </div>
    }
}

/// Playlist id from the `?playlist=` query, default 1
fn playlist_id_from_location() -> i64 {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| {
            search
                .trim_start_matches('?')
                .split('&')
                .find_map(|pair| pair.strip_prefix("playlist=").and_then(|v| v.parse().ok()))
        })
        .unwrap_or(1)
}
