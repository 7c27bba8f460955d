//! Curation Grouping Classifier
//!
//! Partitions the flat, server-ordered item list into curation groups
//! (a header linking to another curation, plus the items claimed for it)
//! and standalone items.
//!
//! Membership is heuristic. The rules are evaluated in a fixed order and
//! the first registered group with any matching rule claims the item; the
//! proximity fallback in particular can claim an unrelated item that merely
//! sits near a header. That is a known limitation of the rule set, kept
//! as the service behaves today.

use crate::models::{sort_by_display_order, CurationGroup, CurationRef, PlaylistItem};

/// Title prefix the service puts on curation header items
pub const CURATION_TITLE_PREFIX: &str = "[큐레이션]";
/// URL fragment marking a link into another curation
pub const CURATION_URL_SEGMENT: &str = "/curation/";
/// Prefix of the id tag the service embeds in link descriptions
pub const CURATION_ID_TAG_PREFIX: &str = "[큐레이션ID:";
/// Proximity fallback window around a header's display order
pub const PROXIMITY_WINDOW: i64 = 10;

/// Classifier output: groups in first-registered order, plus everything
/// that is neither a header nor claimed by a group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub groups: Vec<CurationGroup>,
    pub singles: Vec<PlaylistItem>,
}

impl Classification {
    pub fn group(&self, curation: CurationRef) -> Option<&CurationGroup> {
        self.groups.iter().find(|g| g.curation == curation)
    }
}

/// Recognize a group header and extract its curation reference.
///
/// The title must carry the marker prefix and the URL must point into
/// `/curation/` with a numeric trailing path segment.
pub fn curation_ref(item: &PlaylistItem) -> Option<CurationRef> {
    if !item.title.starts_with(CURATION_TITLE_PREFIX) || !item.url.contains(CURATION_URL_SEGMENT) {
        return None;
    }
    let tail = item.url.rsplit('/').next()?;
    match tail.parse::<u64>() {
        Ok(id) => Some(CurationRef { id }),
        Err(_) => {
            log::debug!("curation marker on item {} but non-numeric url tail {tail:?}", item.id);
            None
        }
    }
}

/// The embedded description tag for a curation, e.g. `[큐레이션ID:5]`
pub fn id_tag(curation: CurationRef) -> String {
    format!("{}{}]", CURATION_ID_TAG_PREFIX, curation.id)
}

/// Remove embedded `[큐레이션ID:{id}]` tags from a description for display
pub fn strip_id_tags(description: &str) -> String {
    let mut out = String::with_capacity(description.len());
    let mut rest = description;
    while let Some(start) = rest.find(CURATION_ID_TAG_PREFIX) {
        let after = &rest[start + CURATION_ID_TAG_PREFIX.len()..];
        match after.find(']') {
            Some(end) if end > 0 && after[..end].bytes().all(|b| b.is_ascii_digit()) => {
                out.push_str(rest[..start].trim_end());
                rest = after[end + 1..].trim_start();
            }
            _ => {
                out.push_str(&rest[..start + CURATION_ID_TAG_PREFIX.len()]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// One membership rule: a pure predicate over (item, group)
type MembershipRule = fn(&PlaylistItem, &CurationGroup) -> bool;

fn url_mentions_curation(item: &PlaylistItem, group: &CurationGroup) -> bool {
    item.url.contains(&group.curation.id.to_string())
}

fn description_has_id_tag(item: &PlaylistItem, group: &CurationGroup) -> bool {
    item.description
        .as_deref()
        .is_some_and(|d| d.contains(&id_tag(group.curation)))
}

fn description_mentions_header(item: &PlaylistItem, group: &CurationGroup) -> bool {
    item.description
        .as_deref()
        .is_some_and(|d| d.contains(&group.header.title))
}

fn near_header(item: &PlaylistItem, group: &CurationGroup) -> bool {
    (item.display_order - group.header.display_order).abs() <= PROXIMITY_WINDOW
}

/// Ranked rule list, strongest signal first
const MEMBERSHIP_RULES: &[(&str, MembershipRule)] = &[
    ("url-mentions-curation", url_mentions_curation),
    ("description-id-tag", description_has_id_tag),
    ("description-mentions-header", description_mentions_header),
    ("near-header", near_header),
];

/// First registered group any rule claims the item for
fn claimed_by(item: &PlaylistItem, groups: &[CurationGroup]) -> Option<(usize, &'static str)> {
    for (idx, group) in groups.iter().enumerate() {
        for (name, rule) in MEMBERSHIP_RULES {
            if rule(item, group) {
                return Some((idx, name));
            }
        }
    }
    None
}

/// Partition a flat item list into curation groups and standalone items.
///
/// Pure function of the input; reclassifying the same list reproduces the
/// same assignments. Duplicate headers for one curation merge into the
/// first-seen header's group.
pub fn classify(items: &[PlaylistItem]) -> Classification {
    let mut sorted = items.to_vec();
    sort_by_display_order(&mut sorted);

    // Pass 1: register group headers in scan order
    let mut groups: Vec<CurationGroup> = Vec::new();
    for item in &sorted {
        if let Some(curation) = curation_ref(item) {
            if !groups.iter().any(|g| g.curation == curation) {
                groups.push(CurationGroup {
                    curation,
                    header: item.clone(),
                    links: Vec::new(),
                });
            }
        }
    }

    // Pass 2: assign the remaining items
    let mut singles = Vec::new();
    for item in &sorted {
        if curation_ref(item).is_some() {
            continue;
        }
        match claimed_by(item, &groups) {
            Some((idx, rule)) => {
                log::debug!(
                    "item {} claimed by {} via {rule}",
                    item.id,
                    groups[idx].curation.key()
                );
                groups[idx].links.push(item.clone());
            }
            None => singles.push(item.clone()),
        }
    }

    for group in &mut groups {
        sort_by_display_order(&mut group.links);
    }

    Classification { groups, singles }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(id: i64, order: i64, title: &str, url: &str) -> PlaylistItem {
        PlaylistItem {
            id,
            title: title.to_string(),
            url: url.to_string(),
            description: None,
            item_type: None,
            display_order: order,
        }
    }

    pub(crate) fn header(id: i64, order: i64, curation_id: u64) -> PlaylistItem {
        item(
            id,
            order,
            &format!("[큐레이션] 모음 {curation_id}"),
            &format!("https://linkpick.example/curation/{curation_id}"),
        )
    }

    #[test]
    fn recognizes_headers_with_numeric_curation_tail() {
        let h = header(1, 0, 5);
        assert_eq!(curation_ref(&h), Some(CurationRef { id: 5 }));

        let mut no_marker = h.clone();
        no_marker.title = "모음 5".into();
        assert_eq!(curation_ref(&no_marker), None);

        let mut bad_tail = h.clone();
        bad_tail.url = "https://linkpick.example/curation/abc".into();
        assert_eq!(curation_ref(&bad_tail), None);
    }

    #[test]
    fn classifies_headers_links_and_standalones() {
        // Spec scenario: header at order 0, one link matched by URL, one by
        // proximity, one standalone far away.
        let items = vec![
            header(1, 0, 5),
            item(2, 1, "관련 글", "https://blog.example/posts/5-intro"),
            item(3, 2, "근처 글", "https://blog.example/other"),
            item(4, 20, "동떨어진 글", "https://blog.example/far"),
        ];
        let c = classify(&items);

        assert_eq!(c.groups.len(), 1);
        let group = &c.groups[0];
        assert_eq!(group.curation.key(), "curation-5");
        assert_eq!(group.header.id, 1);
        let link_ids: Vec<i64> = group.links.iter().map(|l| l.id).collect();
        assert_eq!(link_ids, vec![2, 3]);
        let single_ids: Vec<i64> = c.singles.iter().map(|s| s.id).collect();
        assert_eq!(single_ids, vec![4]);
    }

    #[test]
    fn description_tag_beats_proximity_distance() {
        let mut tagged = item(7, 50, "태그된 글", "https://blog.example/tagged");
        tagged.description = Some("정리해둔 글 [큐레이션ID:5]".into());
        let items = vec![header(1, 0, 5), tagged];
        let c = classify(&items);
        assert_eq!(c.groups[0].links.len(), 1);
        assert_eq!(c.groups[0].links[0].id, 7);
        assert!(c.singles.is_empty());
    }

    #[test]
    fn first_registered_group_wins_over_later_matches() {
        // order 4 sits within the proximity window of both headers; the
        // earlier-registered group claims it.
        let items = vec![
            header(1, 0, 5),
            header(2, 3, 9),
            item(3, 4, "사이 글", "https://blog.example/between"),
        ];
        let c = classify(&items);
        assert_eq!(c.groups[0].curation.id, 5);
        assert_eq!(c.groups[0].links.len(), 1);
        assert!(c.groups[1].links.is_empty());
    }

    #[test]
    fn duplicate_headers_merge_first_seen_wins() {
        let items = vec![header(1, 0, 5), header(2, 30, 5)];
        let c = classify(&items);
        assert_eq!(c.groups.len(), 1);
        assert_eq!(c.groups[0].header.id, 1);
    }

    #[test]
    fn classification_is_idempotent() {
        let mut far = item(9, 40, "멀리", "https://blog.example/far");
        far.description = Some("큐레이션과 무관".into());
        let items = vec![
            header(1, 0, 5),
            item(2, 1, "글", "https://blog.example/posts/5"),
            header(3, 25, 8),
            item(4, 26, "글2", "https://blog.example/b"),
            far,
        ];
        let first = classify(&items);

        // Rebuild a flat list from the classification and classify again
        let mut reflattened = Vec::new();
        for group in &first.groups {
            reflattened.push(group.header.clone());
            reflattened.extend(group.links.iter().cloned());
        }
        reflattened.extend(first.singles.iter().cloned());
        let second = classify(&reflattened);

        assert_eq!(first, second);
    }

    #[test]
    fn every_item_lands_in_exactly_one_bucket() {
        let items = vec![
            header(1, 0, 5),
            item(2, 1, "글", "https://blog.example/posts/5"),
            item(3, 2, "글2", "https://blog.example/c"),
            header(4, 30, 8),
            item(5, 31, "글3", "https://blog.example/d"),
            item(6, 60, "글4", "https://blog.example/e"),
        ];
        let c = classify(&items);

        let mut seen: Vec<i64> = c
            .groups
            .iter()
            .flat_map(|g| g.links.iter().map(|l| l.id))
            .chain(c.singles.iter().map(|s| s.id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![2, 3, 5, 6]);

        // no item appears in two groups
        let mut dedup = seen.clone();
        dedup.dedup();
        assert_eq!(seen, dedup);
    }

    #[test]
    fn strips_embedded_id_tags_for_display() {
        assert_eq!(strip_id_tags("설명 [큐레이션ID:5]"), "설명");
        assert_eq!(strip_id_tags("[큐레이션ID:5] 설명"), "설명");
        assert_eq!(strip_id_tags("앞 [큐레이션ID:12] 뒤"), "앞뒤");
        assert_eq!(strip_id_tags("태그 없음"), "태그 없음");
        assert_eq!(strip_id_tags("[큐레이션ID:x] 그대로"), "[큐레이션ID:x] 그대로");
    }
}
