//! Playlist Data Model
//!
//! Wire structures matching the playlist service API, plus the derived
//! grouping structures the UI works with.

use serde::{Deserialize, Serialize};

/// A single persisted playlist entry (matches the service DTO)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    pub display_order: i64,
}

/// Playlist payload returned by read and mutation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

/// Typed reference to the curation a group header links to.
/// Extracted once from the header URL, never re-parsed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurationRef {
    pub id: u64,
}

impl CurationRef {
    /// Stable rendering/grouping key, e.g. `curation-5`
    pub fn key(&self) -> String {
        format!("curation-{}", self.id)
    }
}

/// A derived curation group: one header plus the items claimed for it.
/// `links` is kept sorted by display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CurationGroup {
    pub curation: CurationRef,
    pub header: PlaylistItem,
    pub links: Vec<PlaylistItem>,
}

/// One entry of the top-level drag sequence
#[derive(Debug, Clone, PartialEq)]
pub enum DraggableEntry {
    Group { curation: CurationRef, header: PlaylistItem },
    Single { item: PlaylistItem },
}

impl DraggableEntry {
    /// The playlist item id this entry stands for (the header id for groups)
    pub fn item_id(&self) -> i64 {
        match self {
            DraggableEntry::Group { header, .. } => header.id,
            DraggableEntry::Single { item } => item.id,
        }
    }
}

/// One element of the hierarchical order submitted to the service.
/// `children` is only present for group headers with linked items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<i64>>,
}

/// Request body for editing a link in place
#[derive(Debug, Clone, Serialize)]
pub struct LinkPatch<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub description: &'a str,
}

/// Request body for adding a link to the playlist
#[derive(Debug, Clone, Serialize)]
pub struct LinkCreate<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

/// Sort into the service's total order: display order ascending, id as tiebreak
pub fn sort_by_display_order(items: &mut [PlaylistItem]) {
    items.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_breaks_display_order_ties_by_id() {
        let mut items = vec![
            PlaylistItem { id: 9, title: "b".into(), url: "https://b".into(), description: None, item_type: None, display_order: 1 },
            PlaylistItem { id: 3, title: "a".into(), url: "https://a".into(), description: None, item_type: None, display_order: 1 },
            PlaylistItem { id: 1, title: "c".into(), url: "https://c".into(), description: None, item_type: None, display_order: 0 },
        ];
        sort_by_display_order(&mut items);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3, 9]);
    }

    #[test]
    fn order_entry_omits_empty_children_on_the_wire() {
        let order = vec![
            OrderEntry { id: 3, children: Some(vec![7, 8]) },
            OrderEntry { id: 1, children: None },
        ];
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(json, r#"[{"id":3,"children":[7,8]},{"id":1}]"#);
    }

    #[test]
    fn playlist_item_decodes_camel_case_fields() {
        let item: PlaylistItem = serde_json::from_str(
            r#"{"id":4,"title":"글","url":"https://example.com","displayOrder":12,"itemType":"LINK"}"#,
        )
        .unwrap();
        assert_eq!(item.display_order, 12);
        assert_eq!(item.item_type.as_deref(), Some("LINK"));
        assert!(item.description.is_none());
    }
}
