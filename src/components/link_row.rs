//! Link Row Component
//!
//! A single link, either top-level or nested inside a curation group.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, DndSignals, DragSource, ListId};

use crate::components::DeleteConfirmButton;
use crate::grouping::{strip_id_tags, CURATION_URL_SEGMENT};
use crate::models::PlaylistItem;
use crate::reconcile::DeleteTarget;

fn link_type_icon(url: &str) -> &'static str {
    if url.contains("pdf") {
        "📄"
    } else if url.contains(CURATION_URL_SEGMENT) {
        "📚"
    } else {
        "🔗"
    }
}

#[component]
pub fn LinkRow(
    item: PlaylistItem,
    list: ListId,
    #[prop(into)] is_owner: Signal<bool>,
    dnd: DndSignals,
    #[prop(into)] on_edit: Callback<PlaylistItem>,
    #[prop(into)] on_delete: Callback<DeleteTarget>,
) -> impl IntoView {
    let id = item.id;
    let icon = link_type_icon(&item.url);
    let description = item
        .description
        .as_deref()
        .map(strip_id_tags)
        .filter(|d| !d.is_empty());
    let url = item.url.clone();
    let title = item.title.clone();
    let edit_item = item;

    let raw_mousedown = make_on_mousedown(dnd, DragSource { list, id });
    let on_mousedown = move |ev: web_sys::MouseEvent| {
        if is_owner.get_untracked() {
            raw_mousedown(ev);
        }
    };
    let is_dragging =
        move || matches!(dnd.dragging_read.get(), Some(src) if src.id == id && src.list == list);

    view! {
        <div class="link-row" class:dragging=is_dragging on:mousedown=on_mousedown>
            <Show when=move || is_owner.get()>
                <span class="drag-handle">"⋮⋮"</span>
            </Show>
            <div class="link-main">
                <div class="link-title-line">
                    <span class="link-icon">{icon}</span>
                    <h3 class="link-title">{title}</h3>
                </div>
                {description.map(|d| view! { <p class="link-description">{d}</p> })}
                <div class="link-url-line">
                    <a class="link-url" href=url.clone() target="_blank" rel="noopener noreferrer">
                        {url.clone()}
                    </a>
                </div>
            </div>
            <Show when=move || is_owner.get()>
                <div class="link-actions">
                    <button
                        class="edit-btn"
                        on:click={
                            let edit_item = edit_item.clone();
                            move |ev: web_sys::MouseEvent| {
                                ev.stop_propagation();
                                on_edit.run(edit_item.clone());
                            }
                        }
                    >
                        "편집"
                    </button>
                    <DeleteConfirmButton
                        button_class="delete-btn"
                        confirm_text="링크를 삭제할까요?"
                        on_confirm=move || on_delete.run(DeleteTarget::Single { item_id: id })
                    />
                </div>
            </Show>
        </div>
    }
}
