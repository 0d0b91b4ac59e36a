// libs/schedule-cell/src/services/immersion.rs
use std::collections::HashSet;
use tracing::debug;

use crate::models::{ScheduleEntry, TimeRange};

/// Splice a visit into a contiguous block of on-call coverage.
///
/// E.g. with a visit 11:00-12:30 and candidates [on call 10:00-12:00,
/// on call 12:00-14:00], the result is [on call 10:00-11:00,
/// visit 11:00-12:30, on call 12:30-14:00].
///
/// Every candidate must interfere with the visit, share its doctor and carry
/// no patient, and the candidates must form one gapless block that fully
/// covers the visit. Any failed condition is a rejection, not an error: the
/// input set comes back unchanged, so callers compare the result against the
/// input to tell "accepted" from "rejected".
pub fn immerse(
    visit: &ScheduleEntry,
    on_calls: &HashSet<ScheduleEntry>,
) -> HashSet<ScheduleEntry> {
    // A fold over zero candidates has no merge result; an empty set is an
    // immediate rejection.
    if on_calls.is_empty() {
        debug!("no on-call candidates to immerse into");
        return on_calls.clone();
    }
    if cannot_be_immersed(visit, on_calls) {
        debug!("visit cannot be immersed into the candidate set");
        return on_calls.clone();
    }

    let total_range = match merged_range(on_calls) {
        Some(range) if !range.is_empty() => range,
        _ => {
            debug!("on-call candidates do not form a contiguous block");
            return on_calls.clone();
        }
    };
    if !total_range.contains(visit.from()) || !total_range.contains(visit.to()) {
        debug!("on-call block does not fully cover the visit");
        return on_calls.clone();
    }

    let mut result = HashSet::new();
    if let Some(leading) = visit.on_call_remainder(total_range.from, visit.from()) {
        result.insert(leading);
    }
    if let Some(trailing) = visit.on_call_remainder(visit.to(), total_range.to) {
        result.insert(trailing);
    }
    result.insert(visit.clone());
    result
}

fn cannot_be_immersed(visit: &ScheduleEntry, on_calls: &HashSet<ScheduleEntry>) -> bool {
    !visit.is_visit()
        || on_calls.iter().any(|entry| {
            entry.is_visit()
                || entry.doctor() != visit.doctor()
                || !entry.interferes_with(visit)
        })
}

/// Total range of the candidates, sorted by start and merged pairwise.
/// Collapses to the empty sentinel as soon as a consecutive pair is not
/// exactly adjacent.
fn merged_range(on_calls: &HashSet<ScheduleEntry>) -> Option<TimeRange> {
    let mut sorted: Vec<&ScheduleEntry> = on_calls.iter().collect();
    sorted.sort_by_key(|entry| entry.from());
    sorted
        .iter()
        .map(|entry| entry.range())
        .reduce(|merged, next| {
            if merged.is_empty() {
                merged
            } else {
                merged.merge_adjacent(&next)
            }
        })
}
