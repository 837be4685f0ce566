//! Merging of candidates from several prediction sources.
//!
//! Every source (dataset overlap, trained classifier, heuristic) produces
//! [`Prediction`] candidates independently. [`reconcile`] turns the union into
//! the final ranked list:
//!
//! 1. Candidates with zero confidence are dropped.
//! 2. Per disease, the higher confidence wins. On an exact tie the source with
//!    higher precedence wins (`dataset` > `model` > `heuristic`).
//! 3. The survivors are sorted by confidence descending, then source
//!    precedence, then disease identifier ascending.
//! 4. The list is cut to `limit` entries.

use super::entities::Prediction;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Reconcile candidates into a ranked, de-duplicated list of at most `limit`
pub fn reconcile(candidates: impl IntoIterator<Item = Prediction>, limit: usize) -> Vec<Prediction> {
    let mut best: BTreeMap<String, Prediction> = BTreeMap::new();

    for candidate in candidates {
        if candidate.confidence <= 0.0 {
            continue;
        }
        match best.entry(candidate.disease.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if outranks(&candidate, slot.get()) {
                    slot.insert(candidate);
                }
            }
        }
    }

    let mut ranked: Vec<Prediction> = best.into_values().collect();
    ranked.sort_by(rank_order);
    ranked.truncate(limit);
    ranked
}

/// Whether `challenger` should replace `incumbent` for the same disease
fn outranks(challenger: &Prediction, incumbent: &Prediction) -> bool {
    match challenger.confidence.total_cmp(&incumbent.confidence) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => challenger.source.priority() < incumbent.source.priority(),
    }
}

/// Total order used for the final list
pub fn rank_order(a: &Prediction, b: &Prediction) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.source.priority().cmp(&b.source.priority()))
        .then_with(|| a.disease.cmp(&b.disease))
}
