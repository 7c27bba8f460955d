//! Draggable Projection Builder
//!
//! Derives the flat top-level drag sequence from the item list and its
//! classification, and serializes the hierarchical order submitted to the
//! service. Both are pure functions of their inputs.

use crate::grouping::{curation_ref, Classification};
use crate::models::{sort_by_display_order, CurationGroup, DraggableEntry, OrderEntry, PlaylistItem};

/// Build the top-level sequence: one entry per group header, one per item
/// that is neither a header nor claimed by any group, in flat display order.
/// Claimed children are omitted; they render nested inside their group.
pub fn build_projection(items: &[PlaylistItem], classification: &Classification) -> Vec<DraggableEntry> {
    let mut sorted = items.to_vec();
    sort_by_display_order(&mut sorted);

    let mut entries = Vec::new();
    for item in &sorted {
        if let Some(curation) = curation_ref(item) {
            if let Some(group) = classification.group(curation) {
                // A duplicate header merged into an existing group is not
                // re-projected; only the registered header represents it.
                if group.header.id == item.id {
                    entries.push(DraggableEntry::Group {
                        curation,
                        header: item.clone(),
                    });
                }
            }
            continue;
        }
        let claimed = classification
            .groups
            .iter()
            .any(|g| g.links.iter().any(|l| l.id == item.id));
        if !claimed {
            entries.push(DraggableEntry::Single { item: item.clone() });
        }
    }
    entries
}

/// Serialize the current top-level sequence plus each group's child order
/// into the wire format. `children` is omitted for singles and empty groups.
pub fn hierarchical_order(entries: &[DraggableEntry], groups: &[CurationGroup]) -> Vec<OrderEntry> {
    entries
        .iter()
        .map(|entry| match entry {
            DraggableEntry::Group { curation, header } => {
                let children: Vec<i64> = groups
                    .iter()
                    .find(|g| g.curation == *curation)
                    .map(|g| g.links.iter().map(|l| l.id).collect())
                    .unwrap_or_default();
                OrderEntry {
                    id: header.id,
                    children: (!children.is_empty()).then_some(children),
                }
            }
            DraggableEntry::Single { item } => OrderEntry {
                id: item.id,
                children: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::classify;
    use crate::grouping::tests::{header, item};

    fn playlist_fixture() -> Vec<PlaylistItem> {
        vec![
            header(1, 0, 5),
            item(2, 1, "글", "https://blog.example/posts/5"),
            item(3, 2, "근처 글", "https://blog.example/near"),
            item(4, 15, "혼자", "https://blog.example/solo"),
            header(5, 30, 8),
            item(6, 31, "글2", "https://blog.example/posts/8-notes"),
        ]
    }

    #[test]
    fn projection_keeps_top_level_order_and_hides_children() {
        let items = playlist_fixture();
        let c = classify(&items);
        let entries = build_projection(&items, &c);

        let ids: Vec<i64> = entries.iter().map(|e| e.item_id()).collect();
        assert_eq!(ids, vec![1, 4, 5]);
        assert!(matches!(entries[0], DraggableEntry::Group { .. }));
        assert!(matches!(entries[1], DraggableEntry::Single { .. }));
        assert!(matches!(entries[2], DraggableEntry::Group { .. }));
    }

    #[test]
    fn projection_is_deterministic() {
        let items = playlist_fixture();
        let c = classify(&items);
        assert_eq!(build_projection(&items, &c), build_projection(&items, &c));
    }

    #[test]
    fn expanded_flatten_reproduces_display_order_ranking() {
        let items = playlist_fixture();
        let c = classify(&items);
        let entries = build_projection(&items, &c);

        // headers + singles in order, each group's children appended
        let mut flattened = Vec::new();
        for entry in &entries {
            match entry {
                DraggableEntry::Group { curation, header } => {
                    flattened.push(header.id);
                    let group = c.group(*curation).unwrap();
                    flattened.extend(group.links.iter().map(|l| l.id));
                }
                DraggableEntry::Single { item } => flattened.push(item.id),
            }
        }

        let mut ranked = items.clone();
        sort_by_display_order(&mut ranked);
        let ranked_ids: Vec<i64> = ranked.iter().map(|i| i.id).collect();
        assert_eq!(flattened, ranked_ids);
    }

    #[test]
    fn order_serialization_nests_children_under_headers() {
        let items = playlist_fixture();
        let c = classify(&items);
        let entries = build_projection(&items, &c);
        let order = hierarchical_order(&entries, &c.groups);

        assert_eq!(
            order,
            vec![
                OrderEntry { id: 1, children: Some(vec![2, 3]) },
                OrderEntry { id: 4, children: None },
                OrderEntry { id: 5, children: Some(vec![6]) },
            ]
        );
    }

    #[test]
    fn every_id_appears_exactly_once_in_the_order() {
        let items = playlist_fixture();
        let c = classify(&items);
        let order = hierarchical_order(&build_projection(&items, &c), &c.groups);

        let mut ids: Vec<i64> = order
            .iter()
            .flat_map(|e| {
                std::iter::once(e.id).chain(e.children.clone().unwrap_or_default())
            })
            .collect();
        ids.sort_unstable();
        let expected: Vec<i64> = (1..=6).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn empty_group_serializes_without_children() {
        let items = vec![header(1, 0, 5), item(2, 40, "혼자", "https://blog.example/solo")];
        let c = classify(&items);
        let order = hierarchical_order(&build_projection(&items, &c), &c.groups);
        assert_eq!(
            order,
            vec![
                OrderEntry { id: 1, children: None },
                OrderEntry { id: 2, children: None },
            ]
        );
    }
}
