//! Playlist Items Component
//!
//! The ordering surface: renders the draggable projection, wires drops
//! into the reconciler, and owns the playlist-local view state
//! (expand/collapse, edit target, delete-in-flight flag).

use std::collections::HashMap;
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{
    bind_global_mouseup, create_dnd_signals, make_on_mouseleave, make_on_zone_mouseenter,
    DndSignals, DropTarget, ListId,
};

use crate::api::StoreHandle;
use crate::components::{AddLinkForm, GroupRow, LinkEditForm, LinkRow};
use crate::context::AppContext;
use crate::grouping::classify;
use crate::models::{CurationGroup, DraggableEntry, PlaylistItem};
use crate::projection::build_projection;
use crate::reconcile::{self, AddSync, DeleteSync, DeleteTarget, EditSync, LoadSync, OrderSync};
use crate::reorder::SeqGuard;

/// Delay before the post-reorder authoritative refetch
const REFRESH_DELAY_MS: u32 = 500;

#[component]
pub fn PlaylistItems(playlist_id: i64, #[prop(into)] is_owner: Signal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_context::<StoreHandle>().expect("StoreHandle should be provided");
    let guard = StoredValue::new(Arc::new(SeqGuard::new()));

    let (items, set_items) = signal(Vec::<PlaylistItem>::new());
    let (groups, set_groups) = signal(Vec::<CurationGroup>::new());
    let (draggables, set_draggables) = signal(Vec::<DraggableEntry>::new());
    let (expanded, set_expanded) = signal(HashMap::<u64, bool>::new());
    let (load_error, set_load_error) = signal(None::<String>);
    let (deleting, set_deleting) = signal(false);
    let (editing, set_editing) = signal(None::<PlaylistItem>);

    // Initial load, re-run whenever a reload is requested
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let store = store.get_value();
        let guard = guard.get_value();
        spawn_local(async move {
            match reconcile::load_playlist(&store, playlist_id, &guard).await {
                LoadSync::Loaded(list) => {
                    set_load_error.set(None);
                    set_items.set(list);
                }
                LoadSync::Stale => {}
                LoadSync::Failed(err) => {
                    set_load_error.set(Some(format!("플레이리스트를 불러오지 못했습니다: {err}")));
                }
            }
        });
    });

    // Reclassify whenever the flat list changes; groups collapse again
    // after every round-trip
    Effect::new(move |_| {
        let list = items.get();
        let classification = classify(&list);
        let entries = build_projection(&list, &classification);
        set_expanded.set(
            classification
                .groups
                .iter()
                .map(|g| (g.curation.id, false))
                .collect(),
        );
        set_groups.set(classification.groups);
        set_draggables.set(entries);
    });

    let toggle_group = move |curation_id: u64| {
        set_expanded.update(|map| {
            let entry = map.entry(curation_id).or_insert(false);
            *entry = !*entry;
        });
    };

    // Drop handling: plan the move, splice optimistically, submit the full
    // hierarchical order, then adopt whatever the store answers with
    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |source, target| {
        if !is_owner.get_untracked() {
            return;
        }
        let entries = draggables.get_untracked();
        let group_list = groups.get_untracked();
        let order = match (source.list, target.list) {
            (ListId::Root, ListId::Root) => {
                match reconcile::plan_top_level_move(&entries, &group_list, source.id, target.index)
                {
                    Some((next, order)) => {
                        set_draggables.set(next);
                        Some(order)
                    }
                    None => None,
                }
            }
            (ListId::Sub(src), ListId::Sub(dst)) if src == dst => {
                let curation = group_list
                    .iter()
                    .find(|g| g.curation.id == src)
                    .map(|g| g.curation);
                match curation.and_then(|c| {
                    reconcile::plan_group_move(&entries, &group_list, c, source.id, target.index)
                }) {
                    Some((next, order)) => {
                        set_groups.set(next);
                        Some(order)
                    }
                    None => None,
                }
            }
            _ => None,
        };
        let Some(order) = order else { return };

        let store = store.get_value();
        let guard = guard.get_value();
        spawn_local(async move {
            match reconcile::submit_order(&store, playlist_id, &order, &guard).await {
                OrderSync::Applied(list) => {
                    set_items.set(list);
                    ctx.notify("순서가 변경되었습니다", "플레이리스트 아이템 순서가 적용되었습니다.");
                    // delayed refetch to defeat caches between us and the service
                    TimeoutFuture::new(REFRESH_DELAY_MS).await;
                    if let LoadSync::Loaded(list) =
                        reconcile::load_playlist(&store, playlist_id, &guard).await
                    {
                        set_items.set(list);
                    }
                }
                OrderSync::Stale => {}
                OrderSync::RolledBack(list) => {
                    set_items.set(list);
                    ctx.notify_error("순서 변경 실패", "플레이리스트 아이템 순서 변경에 실패했습니다.");
                }
                OrderSync::Unavailable(err) => {
                    ctx.notify_error("순서 변경 실패", &err.to_string());
                }
            }
        });
    });

    let on_delete = Callback::new(move |target: DeleteTarget| {
        if deleting.get_untracked() {
            return;
        }
        set_deleting.set(true);
        let store = store.get_value();
        let guard = guard.get_value();
        spawn_local(async move {
            let auth = ctx.auth.get_untracked();
            match reconcile::delete_entry(&store, &auth, playlist_id, &target, &guard).await {
                DeleteSync::LoginRequired => ctx.login_required(),
                DeleteSync::Removed { item_ids } => {
                    let removed_group = item_ids.len() > 1;
                    set_items.update(|list| list.retain(|i| !item_ids.contains(&i.id)));
                    if removed_group {
                        ctx.notify("큐레이션 그룹 삭제 완료", "그룹과 하위 링크가 삭제되었습니다.");
                    } else {
                        ctx.notify("링크 삭제 완료", "링크가 삭제되었습니다.");
                    }
                }
                DeleteSync::Stale => {}
                DeleteSync::RolledBack(list) => {
                    set_items.set(list);
                    ctx.notify_error("삭제 실패", "아이템 삭제 중 오류가 발생했습니다.");
                }
                DeleteSync::Unavailable(err) => {
                    ctx.notify_error("삭제 실패", &err.to_string());
                }
            }
            set_deleting.set(false);
        });
    });

    let on_edit = Callback::new(move |item: PlaylistItem| set_editing.set(Some(item)));

    let on_edit_result = Callback::new(move |outcome: EditSync| match outcome {
        EditSync::LoginRequired => {
            ctx.login_required();
            set_editing.set(None);
        }
        EditSync::Skipped => {}
        EditSync::Updated { item_id, edit } => {
            set_items.update(|list| {
                if let Some(it) = list.iter_mut().find(|i| i.id == item_id) {
                    it.title = edit.title.clone();
                    it.url = edit.url.clone();
                    it.description = (!edit.description.is_empty()).then(|| edit.description.clone());
                }
            });
            ctx.notify("링크 수정 완료", "링크 정보가 수정되었습니다.");
            set_editing.set(None);
        }
        EditSync::Stale => set_editing.set(None),
        EditSync::RolledBack(list) => {
            set_items.set(list);
            ctx.notify_error("링크 수정 실패", "링크 정보 수정 중 오류가 발생했습니다.");
        }
        EditSync::Unavailable(err) => {
            ctx.notify_error("링크 수정 실패", &err.to_string());
        }
    });

    let on_add_result = Callback::new(move |outcome: AddSync| match outcome {
        AddSync::LoginRequired => ctx.login_required(),
        AddSync::Skipped => {}
        AddSync::Added(list) => {
            set_items.set(list);
            ctx.notify("링크 추가 완료", "새 링크가 플레이리스트에 추가되었습니다.");
        }
        AddSync::Stale => {}
        AddSync::RolledBack(list) => {
            set_items.set(list);
            ctx.notify_error("링크 추가 실패", "링크 추가 중 오류가 발생했습니다.");
        }
        AddSync::Unavailable(err) => {
            ctx.notify_error("링크 추가 실패", &err.to_string());
        }
    });

    view! {
        <div class="playlist-items">
            <div class="playlist-header">
                <h2>"링크 목록"</h2>
                <Show when=move || is_owner.get()>
                    <AddLinkForm
                        playlist_id=playlist_id
                        guard=guard.get_value()
                        on_result=on_add_result
                    />
                </Show>
            </div>

            {move || {
                load_error.get().map(|msg| {
                    view! {
                        <p class="load-error">
                            {msg}
                            <button class="retry-btn" on:click=move |_| ctx.reload()>
                                "다시 시도"
                            </button>
                        </p>
                    }
                })
            }}

            <div class="entry-list">
                <DropZone dnd=dnd list=ListId::Root index=0 />
                <For
                    each={move || draggables.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key={|(idx, entry)| match entry {
                        DraggableEntry::Group { header, .. } => (
                            *idx,
                            header.id,
                            header.title.clone(),
                            header.url.clone(),
                            header.description.clone(),
                        ),
                        DraggableEntry::Single { item } => (
                            *idx,
                            item.id,
                            item.title.clone(),
                            item.url.clone(),
                            item.description.clone(),
                        ),
                    }}
                    children=move |(idx, entry)| {
                        let row = match entry {
                            DraggableEntry::Group { curation, header } => {
                                let cid = curation.id;
                                let expanded_sig = Signal::derive(move || {
                                    expanded.with(|m| m.get(&cid).copied().unwrap_or(false))
                                });
                                view! {
                                    <GroupRow
                                        curation=curation
                                        header=header
                                        groups=groups
                                        expanded=expanded_sig
                                        on_toggle=move || toggle_group(cid)
                                        is_owner=is_owner
                                        dnd=dnd
                                        on_edit=on_edit
                                        on_delete=on_delete
                                    />
                                }
                                .into_any()
                            }
                            DraggableEntry::Single { item } => view! {
                                <LinkRow
                                    item=item
                                    list=ListId::Root
                                    is_owner=is_owner
                                    dnd=dnd
                                    on_edit=on_edit
                                    on_delete=on_delete
                                />
                            }
                            .into_any(),
                        };
                        view! {
                            {row}
                            <DropZone dnd=dnd list=ListId::Root index={idx + 1} />
                        }
                    }
                />
                <Show when=move || draggables.with(|d| d.is_empty()) && load_error.with(|e| e.is_none())>
                    <p class="empty-list">"아직 추가된 링크가 없습니다."</p>
                </Show>
            </div>

            {move || {
                editing.get().map(|item| {
                    view! {
                        <LinkEditForm
                            playlist_id=playlist_id
                            item=item
                            guard=guard.get_value()
                            on_result=on_edit_result
                            on_close=move || set_editing.set(None)
                        />
                    }
                })
            }}
        </div>
    }
}

/// Drop slot between entries; only lights up for drags from its own list
#[component]
pub fn DropZone(dnd: DndSignals, list: ListId, index: usize) -> impl IntoView {
    let target = DropTarget { list, index };
    let on_mouseenter = make_on_zone_mouseenter(dnd, target);
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_active = move || dnd.drop_target_read.get() == Some(target);
    let is_relevant = move || matches!(dnd.dragging_read.get(), Some(src) if src.list == list);

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if !is_relevant() {
            c.push_str(" hidden");
        }
        if is_active() {
            c.push_str(" active");
        }
        c
    };

    view! { <div class=zone_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave /> }
}
