//! Add Link Form Component
//!
//! Collapsible form for appending a new link to the playlist.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::StoreHandle;
use crate::context::AppContext;
use crate::reconcile::{self, AddSync, LinkEdit};
use crate::reorder::SeqGuard;

#[component]
pub fn AddLinkForm(
    playlist_id: i64,
    guard: Arc<SeqGuard>,
    #[prop(into)] on_result: Callback<AddSync>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_context::<StoreHandle>().expect("StoreHandle should be provided");
    let guard = StoredValue::new(guard);

    let (open, set_open) = signal(false);
    let (url, set_url) = signal(String::new());
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let link = LinkEdit {
            title: title.get(),
            url: url.get(),
            description: description.get(),
        };
        if link.title.trim().is_empty() || link.url.trim().is_empty() {
            return;
        }
        set_submitting.set(true);
        let store = store.get_value();
        let guard = guard.get_value();
        spawn_local(async move {
            let auth = ctx.auth.get_untracked();
            let outcome = reconcile::add_link(&store, &auth, playlist_id, &link, &guard).await;
            if matches!(outcome, AddSync::Added(_)) {
                set_url.set(String::new());
                set_title.set(String::new());
                set_description.set(String::new());
                set_open.set(false);
            }
            on_result.run(outcome);
            set_submitting.set(false);
        });
    };

    view! {
        <div class="add-link">
            <Show when=move || !open.get()>
                <button class="add-link-btn" on:click=move |_| set_open.set(true)>
                    "+ 링크 추가"
                </button>
            </Show>
            <Show when=move || open.get()>
                <form class="add-link-form" on:submit=submit>
                    <input
                        type="url"
                        placeholder="https://example.com"
                        prop:value=move || url.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_url.set(input.value());
                        }
                    />
                    <input
                        type="text"
                        placeholder="링크 제목"
                        prop:value=move || title.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_title.set(input.value());
                        }
                    />
                    <textarea
                        placeholder="링크에 대한 설명"
                        prop:value=move || description.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                            set_description.set(input.value());
                        }
                    ></textarea>
                    <div class="add-link-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| set_open.set(false)>
                            "취소"
                        </button>
                        <button type="submit" disabled=move || submitting.get()>
                            {move || if submitting.get() { "추가 중..." } else { "추가" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
