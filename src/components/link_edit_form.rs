//! Link Edit Form Component
//!
//! Side panel for editing a link's title, url and description. Buffers are
//! seeded from the item when the panel opens; the parent applies the
//! outcome to its state.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::StoreHandle;
use crate::context::AppContext;
use crate::models::PlaylistItem;
use crate::reconcile::{self, EditSync, LinkEdit};
use crate::reorder::SeqGuard;

#[component]
pub fn LinkEditForm(
    playlist_id: i64,
    item: PlaylistItem,
    guard: Arc<SeqGuard>,
    #[prop(into)] on_result: Callback<EditSync>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_context::<StoreHandle>().expect("StoreHandle should be provided");
    let guard = StoredValue::new(guard);

    let item_id = item.id;
    let (title, set_title) = signal(item.title.clone());
    let (url, set_url) = signal(item.url.clone());
    let (description, set_description) = signal(item.description.clone().unwrap_or_default());
    let (submitting, set_submitting) = signal(false);

    let save = move || {
        if submitting.get_untracked() {
            return;
        }
        let edit = LinkEdit {
            title: title.get_untracked(),
            url: url.get_untracked(),
            description: description.get_untracked(),
        };
        set_submitting.set(true);
        let store = store.get_value();
        let guard = guard.get_value();
        spawn_local(async move {
            let auth = ctx.auth.get_untracked();
            let outcome =
                reconcile::save_link_edit(&store, &auth, playlist_id, item_id, &edit, &guard).await;
            on_result.run(outcome);
            set_submitting.set(false);
        });
    };

    view! {
        <div class="edit-panel">
            <div class="edit-panel-header">
                <span class="edit-panel-title">"링크 정보 편집"</span>
                <button class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
            </div>

            <div class="editor-section">
                <label class="editor-label">"제목"</label>
                <input
                    type="text"
                    class="editor-input"
                    prop:value=move || title.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_title.set(input.value());
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            save();
                        }
                    }
                />
            </div>

            <div class="editor-section">
                <label class="editor-label">"URL"</label>
                <input
                    type="url"
                    class="editor-input"
                    prop:value=move || url.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_url.set(input.value());
                    }
                />
            </div>

            <div class="editor-section">
                <label class="editor-label">"설명"</label>
                <textarea
                    class="editor-textarea"
                    prop:value=move || description.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        set_description.set(input.value());
                    }
                ></textarea>
            </div>

            <div class="edit-panel-footer">
                <button class="cancel-btn" disabled=move || submitting.get() on:click=move |_| on_close.run(())>
                    "취소"
                </button>
                <button class="save-btn" disabled=move || submitting.get() on:click=move |_| save()>
                    {move || if submitting.get() { "저장 중..." } else { "저장하기" }}
                </button>
            </div>
        </div>
    }
}
