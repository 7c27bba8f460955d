//! Reorder Reconciler
//!
//! Async flows that translate UI intents — moves, deletes, edits, adds —
//! into store calls, with optimistic local update, authoritative resync
//! and stale-response rejection.
//!
//! Policy: a failed mutation never leaves optimistic and authoritative
//! state diverged. Every error path refetches the playlist and hands the
//! caller the store's view; the caller surfaces a transient notice and
//! moves on. Nothing is retried automatically.

use crate::api::{ApiError, PlaylistStore};
use crate::context::AuthSession;
use crate::models::{
    sort_by_display_order, CurationGroup, CurationRef, DraggableEntry, LinkCreate, LinkPatch,
    OrderEntry, PlaylistItem,
};
use crate::projection::hierarchical_order;
use crate::reorder::{plan_zone_move, reinsert, SeqGuard};

/// Edit/create form buffer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkEdit {
    pub title: String,
    pub url: String,
    pub description: String,
}

fn sorted(mut items: Vec<PlaylistItem>) -> Vec<PlaylistItem> {
    sort_by_display_order(&mut items);
    items
}

/// Authoritative refetch after a failed mutation
enum Recovery {
    Fresh(Vec<PlaylistItem>),
    Stale,
    Failed(ApiError),
}

async fn recover<S: PlaylistStore>(store: &S, playlist_id: i64, seq: u64, guard: &SeqGuard) -> Recovery {
    match store.get_playlist(playlist_id).await {
        Ok(playlist) if guard.is_latest(seq) => Recovery::Fresh(sorted(playlist.items)),
        Ok(_) => {
            log::warn!("discarding stale recovery fetch (seq {seq})");
            Recovery::Stale
        }
        Err(err) => {
            log::warn!("recovery fetch failed: {err}");
            Recovery::Failed(err)
        }
    }
}

// ---- planning ----------------------------------------------------------

/// Apply a top-level drop. Returns the spliced entry sequence and the
/// order to submit, or `None` when the drop is an identity move or the
/// source is unknown — a hard no-op with no request and no state change.
pub fn plan_top_level_move(
    entries: &[DraggableEntry],
    groups: &[CurationGroup],
    source_id: i64,
    zone: usize,
) -> Option<(Vec<DraggableEntry>, Vec<OrderEntry>)> {
    let from = entries.iter().position(|e| e.item_id() == source_id)?;
    let dest = plan_zone_move(entries.len(), from, zone)?;
    let mut next = entries.to_vec();
    reinsert(&mut next, from, dest);
    let order = hierarchical_order(&next, groups);
    Some((next, order))
}

/// Apply a drop inside one group's child list. The top-level sequence is
/// untouched; the submitted order still covers the whole playlist.
pub fn plan_group_move(
    entries: &[DraggableEntry],
    groups: &[CurationGroup],
    curation: CurationRef,
    source_id: i64,
    zone: usize,
) -> Option<(Vec<CurationGroup>, Vec<OrderEntry>)> {
    let group_idx = groups.iter().position(|g| g.curation == curation)?;
    let from = groups[group_idx].links.iter().position(|l| l.id == source_id)?;
    let dest = plan_zone_move(groups[group_idx].links.len(), from, zone)?;
    let mut next = groups.to_vec();
    reinsert(&mut next[group_idx].links, from, dest);
    let order = hierarchical_order(entries, &next);
    Some((next, order))
}

// ---- reads -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum LoadSync {
    Loaded(Vec<PlaylistItem>),
    /// A newer request was issued while this one was in flight
    Stale,
    /// Read failed; the caller keeps its previous state
    Failed(ApiError),
}

pub async fn load_playlist<S: PlaylistStore>(store: &S, playlist_id: i64, guard: &SeqGuard) -> LoadSync {
    let seq = guard.issue();
    match store.get_playlist(playlist_id).await {
        Ok(playlist) if guard.is_latest(seq) => {
            log::debug!(
                "playlist {} ({}) loaded: {} items",
                playlist.id,
                playlist.title,
                playlist.items.len()
            );
            LoadSync::Loaded(sorted(playlist.items))
        }
        Ok(_) => {
            log::warn!("discarding stale playlist read (seq {seq})");
            LoadSync::Stale
        }
        Err(err) => {
            log::warn!("playlist read failed: {err}");
            LoadSync::Failed(err)
        }
    }
}

// ---- reorder -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum OrderSync {
    /// Store accepted the order; items are the new authoritative list
    Applied(Vec<PlaylistItem>),
    Stale,
    /// Store rejected the order; items are a fresh authoritative fetch
    RolledBack(Vec<PlaylistItem>),
    /// Store rejected the order and the recovery fetch failed too
    Unavailable(ApiError),
}

pub async fn submit_order<S: PlaylistStore>(
    store: &S,
    playlist_id: i64,
    order: &[OrderEntry],
    guard: &SeqGuard,
) -> OrderSync {
    let seq = guard.issue();
    match store.set_order(playlist_id, order).await {
        Ok(playlist) => {
            if !guard.is_latest(seq) {
                log::warn!("discarding stale reorder response (seq {seq})");
                return OrderSync::Stale;
            }
            OrderSync::Applied(sorted(playlist.items))
        }
        Err(err) => {
            log::warn!("order update failed, resyncing: {err}");
            match recover(store, playlist_id, seq, guard).await {
                Recovery::Fresh(items) => OrderSync::RolledBack(items),
                Recovery::Stale => OrderSync::Stale,
                Recovery::Failed(err) => OrderSync::Unavailable(err),
            }
        }
    }
}

// ---- delete ------------------------------------------------------------

/// What a delete removes, captured at confirmation time
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Single { item_id: i64 },
    Group { header_id: i64, link_ids: Vec<i64> },
}

impl DeleteTarget {
    fn request_id(&self) -> i64 {
        match self {
            DeleteTarget::Single { item_id } => *item_id,
            DeleteTarget::Group { header_id, .. } => *header_id,
        }
    }

    fn delete_children(&self) -> bool {
        matches!(self, DeleteTarget::Group { .. })
    }

    /// Ids to strip from local state once the store confirms
    pub fn removed_ids(&self) -> Vec<i64> {
        match self {
            DeleteTarget::Single { item_id } => vec![*item_id],
            DeleteTarget::Group { header_id, link_ids } => {
                let mut ids = Vec::with_capacity(link_ids.len() + 1);
                ids.push(*header_id);
                ids.extend_from_slice(link_ids);
                ids
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteSync {
    /// No session: aborted before any network call
    LoginRequired,
    /// Store confirmed; strip these ids from local state in one update
    Removed { item_ids: Vec<i64> },
    Stale,
    RolledBack(Vec<PlaylistItem>),
    Unavailable(ApiError),
}

pub async fn delete_entry<S: PlaylistStore>(
    store: &S,
    auth: &AuthSession,
    playlist_id: i64,
    target: &DeleteTarget,
    guard: &SeqGuard,
) -> DeleteSync {
    if !auth.logged_in {
        return DeleteSync::LoginRequired;
    }
    let seq = guard.issue();
    match store
        .delete_item(playlist_id, target.request_id(), target.delete_children())
        .await
    {
        Ok(()) => DeleteSync::Removed { item_ids: target.removed_ids() },
        Err(err) => {
            log::warn!("delete failed, resyncing: {err}");
            match recover(store, playlist_id, seq, guard).await {
                Recovery::Fresh(items) => DeleteSync::RolledBack(items),
                Recovery::Stale => DeleteSync::Stale,
                Recovery::Failed(err) => DeleteSync::Unavailable(err),
            }
        }
    }
}

// ---- edit --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum EditSync {
    LoginRequired,
    /// Blank title or url: silently ignored, no request
    Skipped,
    /// Store confirmed; patch the item in place locally
    Updated { item_id: i64, edit: LinkEdit },
    Stale,
    RolledBack(Vec<PlaylistItem>),
    Unavailable(ApiError),
}

pub async fn save_link_edit<S: PlaylistStore>(
    store: &S,
    auth: &AuthSession,
    playlist_id: i64,
    item_id: i64,
    edit: &LinkEdit,
    guard: &SeqGuard,
) -> EditSync {
    if !auth.logged_in {
        return EditSync::LoginRequired;
    }
    let title = edit.title.trim();
    let url = edit.url.trim();
    if title.is_empty() || url.is_empty() {
        return EditSync::Skipped;
    }
    let description = edit.description.trim();

    let seq = guard.issue();
    let patch = LinkPatch { title, url, description };
    match store.update_item(playlist_id, item_id, &patch).await {
        Ok(()) => EditSync::Updated {
            item_id,
            edit: LinkEdit {
                title: title.to_string(),
                url: url.to_string(),
                description: description.to_string(),
            },
        },
        Err(err) => {
            log::warn!("link update failed, resyncing: {err}");
            match recover(store, playlist_id, seq, guard).await {
                Recovery::Fresh(items) => EditSync::RolledBack(items),
                Recovery::Stale => EditSync::Stale,
                Recovery::Failed(err) => EditSync::Unavailable(err),
            }
        }
    }
}

// ---- add ---------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum AddSync {
    LoginRequired,
    Skipped,
    /// Store returned the updated playlist
    Added(Vec<PlaylistItem>),
    Stale,
    RolledBack(Vec<PlaylistItem>),
    Unavailable(ApiError),
}

pub async fn add_link<S: PlaylistStore>(
    store: &S,
    auth: &AuthSession,
    playlist_id: i64,
    link: &LinkEdit,
    guard: &SeqGuard,
) -> AddSync {
    if !auth.logged_in {
        return AddSync::LoginRequired;
    }
    let title = link.title.trim();
    let url = link.url.trim();
    if title.is_empty() || url.is_empty() {
        return AddSync::Skipped;
    }

    let seq = guard.issue();
    let create = LinkCreate { url, title, description: link.description.trim() };
    match store.add_link(playlist_id, &create).await {
        Ok(playlist) => {
            if !guard.is_latest(seq) {
                return AddSync::Stale;
            }
            AddSync::Added(sorted(playlist.items))
        }
        Err(err) => {
            log::warn!("add link failed, resyncing: {err}");
            match recover(store, playlist_id, seq, guard).await {
                Recovery::Fresh(items) => AddSync::RolledBack(items),
                Recovery::Stale => AddSync::Stale,
                Recovery::Failed(err) => AddSync::Unavailable(err),
            }
        }
    }
}
