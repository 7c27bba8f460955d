//! Curation Group Row Component
//!
//! Header row for a curation group with an expandable child link list.
//! The child list reads its links reactively so an in-group reorder shows
//! up without rebuilding the top-level sequence.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, DndSignals, DragSource, ListId};

use crate::components::{DeleteConfirmButton, DropZone, LinkRow};
use crate::models::{CurationGroup, CurationRef, PlaylistItem};
use crate::reconcile::DeleteTarget;

#[component]
pub fn GroupRow(
    curation: CurationRef,
    header: PlaylistItem,
    groups: ReadSignal<Vec<CurationGroup>>,
    #[prop(into)] expanded: Signal<bool>,
    #[prop(into)] on_toggle: Callback<()>,
    #[prop(into)] is_owner: Signal<bool>,
    dnd: DndSignals,
    #[prop(into)] on_edit: Callback<PlaylistItem>,
    #[prop(into)] on_delete: Callback<DeleteTarget>,
) -> impl IntoView {
    let header_id = header.id;
    let sub = ListId::Sub(curation.id);

    let links = Signal::derive(move || {
        groups.with(|gs| {
            gs.iter()
                .find(|g| g.curation == curation)
                .map(|g| g.links.clone())
                .unwrap_or_default()
        })
    });
    let link_count = move || links.with(|l| l.len());

    let raw_mousedown = make_on_mousedown(dnd, DragSource { list: ListId::Root, id: header_id });
    let on_mousedown = move |ev: web_sys::MouseEvent| {
        if is_owner.get_untracked() {
            raw_mousedown(ev);
        }
    };
    let is_dragging = move || {
        matches!(dnd.dragging_read.get(), Some(src) if src.id == header_id && src.list == ListId::Root)
    };

    let title = header.title.clone();
    let description = header.description.clone();
    let header_url = header.url.clone();
    let edit_header = header;

    view! {
        <div class="group-row-container">
            <div class="group-row" class:dragging=is_dragging on:mousedown=on_mousedown>
                <Show when=move || is_owner.get()>
                    <span class="drag-handle">"⋮⋮"</span>
                </Show>
                <button
                    class="collapse-btn"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation();
                        on_toggle.run(());
                    }
                >
                    {move || if expanded.get() { "▼" } else { "▶" }}
                </button>
                <div class="group-main">
                    <div class="group-title-line">
                        <span class="group-badge">"📚"</span>
                        <h3 class="group-title">{title}</h3>
                        <span class="group-count">{move || format!("{} 링크", link_count())}</span>
                    </div>
                    {description.map(|d| view! { <p class="group-description">{d}</p> })}
                    <a class="link-url" href=header_url target="_blank" rel="noopener noreferrer">
                        "큐레이션 보기"
                    </a>
                </div>
                <Show when=move || is_owner.get()>
                    <div class="link-actions">
                        <button
                            class="edit-btn"
                            on:click={
                                let edit_header = edit_header.clone();
                                move |ev: web_sys::MouseEvent| {
                                    ev.stop_propagation();
                                    on_edit.run(edit_header.clone());
                                }
                            }
                        >
                            "편집"
                        </button>
                        <DeleteConfirmButton
                            button_class="delete-btn"
                            confirm_text="그룹의 모든 링크도 함께 삭제됩니다. 계속할까요?"
                            on_confirm=move || {
                                let link_ids =
                                    links.with_untracked(|l| l.iter().map(|link| link.id).collect());
                                on_delete.run(DeleteTarget::Group { header_id, link_ids });
                            }
                        />
                    </div>
                </Show>
            </div>

            <Show when={move || expanded.get() && link_count() > 0}>
                <div class="group-links">
                    <DropZone dnd=dnd list=sub index=0 />
                    <For
                        each={move || links.get().into_iter().enumerate().collect::<Vec<_>>()}
                        key=|(idx, link)| {
                            (
                                *idx,
                                link.id,
                                link.title.clone(),
                                link.url.clone(),
                                link.description.clone(),
                            )
                        }
                        children=move |(idx, link)| {
                            view! {
                                <LinkRow
                                    item=link
                                    list=sub
                                    is_owner=is_owner
                                    dnd=dnd
                                    on_edit=on_edit
                                    on_delete=on_delete
                                />
                                <DropZone dnd=dnd list=sub index={idx + 1} />
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
