//! Reorder Move Math
//!
//! Pure helpers for turning a drop on an insertion slot into a splice of
//! the affected sequence, plus the request sequence guard that keeps a
//! late store response from clobbering newer local state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Map a drop slot to the destination index of the moved element.
///
/// Slots sit between entries, so a list of `len` entries has slots
/// `0..=len`. Dropping an entry into the slot directly before or after
/// itself leaves the sequence unchanged and returns `None`: a hard no-op,
/// no request, no state change.
pub fn plan_zone_move(len: usize, from: usize, zone: usize) -> Option<usize> {
    if from >= len || zone > len {
        return None;
    }
    if zone == from || zone == from + 1 {
        return None;
    }
    Some(if zone > from { zone - 1 } else { zone })
}

/// Remove-then-insert splice, matching how the view sequence is rebuilt
pub fn reinsert<T>(seq: &mut Vec<T>, from: usize, to: usize) {
    let entry = seq.remove(from);
    seq.insert(to, entry);
}

/// Monotonic request sequence numbers for store round-trips.
///
/// Every store call takes a fresh number before suspending; a response is
/// only applied while its number is still the latest issued. State stays
/// single-writer on the UI event loop, the atomic just satisfies the
/// reactive storage bounds.
#[derive(Debug, Default)]
pub struct SeqGuard {
    issued: AtomicU64,
}

impl SeqGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next sequence number
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Whether `seq` is still the most recently issued number
    pub fn is_latest(&self, seq: u64) -> bool {
        self.issued.load(Ordering::Relaxed) == seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_drops_are_no_ops() {
        // dropping right before or right after itself changes nothing
        assert_eq!(plan_zone_move(3, 1, 1), None);
        assert_eq!(plan_zone_move(3, 1, 2), None);
        assert_eq!(plan_zone_move(1, 0, 0), None);
        assert_eq!(plan_zone_move(1, 0, 1), None);
    }

    #[test]
    fn out_of_range_drops_are_rejected() {
        assert_eq!(plan_zone_move(3, 3, 0), None);
        assert_eq!(plan_zone_move(3, 0, 4), None);
        assert_eq!(plan_zone_move(0, 0, 0), None);
    }

    #[test]
    fn moving_backwards_keeps_the_slot_index() {
        assert_eq!(plan_zone_move(3, 2, 0), Some(0));
        let mut seq = vec!['a', 'b', 'c'];
        reinsert(&mut seq, 2, 0);
        assert_eq!(seq, vec!['c', 'a', 'b']);
    }

    #[test]
    fn moving_forwards_accounts_for_the_removal() {
        assert_eq!(plan_zone_move(3, 0, 3), Some(2));
        let mut seq = vec!['a', 'b', 'c'];
        reinsert(&mut seq, 0, 2);
        assert_eq!(seq, vec!['b', 'c', 'a']);

        assert_eq!(plan_zone_move(4, 1, 3), Some(2));
        let mut seq = vec!['a', 'b', 'c', 'd'];
        reinsert(&mut seq, 1, 2);
        assert_eq!(seq, vec!['a', 'c', 'b', 'd']);
    }

    #[test]
    fn guard_tracks_only_the_latest_request() {
        let guard = SeqGuard::new();
        let first = guard.issue();
        assert!(guard.is_latest(first));

        let second = guard.issue();
        assert!(!guard.is_latest(first));
        assert!(guard.is_latest(second));
    }
}
