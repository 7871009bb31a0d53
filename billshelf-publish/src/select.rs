//! Best-of-group selection.

use std::collections::BTreeMap;

use billshelf_core::{best_by_recency, BillKey, CandidateRecord};

/// Group candidates by bill identity and keep the single most-recent record
/// per group.
///
/// The map is ordered, so callers iterate bills in a reproducible order.
/// Within a group the documented recency ordering decides; exact ties keep
/// the first-encountered (discovery-order) candidate.
pub fn select_winners(candidates: Vec<CandidateRecord>) -> BTreeMap<BillKey, CandidateRecord> {
    let mut groups: BTreeMap<BillKey, Vec<CandidateRecord>> = BTreeMap::new();
    for candidate in candidates {
        groups
            .entry(candidate.key.clone())
            .or_default()
            .push(candidate);
    }

    let mut winners = BTreeMap::new();
    for (key, members) in groups {
        let considered = members.len();
        if let Some(winner) = best_by_recency(members, |candidate| candidate.recency) {
            tracing::debug!(
                "picked {} for {key} ({considered} version(s) considered)",
                winner.path.display()
            );
            winners.insert(key, winner);
        }
    }
    winners
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
