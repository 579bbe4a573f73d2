use std::collections::HashSet;

use crate::scoring::align::ScoredPair;
use crate::scoring::overlap::{IdentityMatrix, OverlapMatrix};
use crate::types::{AlignmentPair, Decision, ScoreVector};

/// Classify selected pairs and unmatched events into the four decision
/// classes. A pair above the threshold is a hit when the labels' classes
/// match and a confusion otherwise; a pair at or below the threshold is
/// discarded, leaving its events to be counted as a miss and a false alarm.
///
/// The returned counts always satisfy `hit + confusion + miss == R` and
/// `hit + confusion + false_alarm == H`.
pub fn label_decisions(
    pairs: &[ScoredPair],
    matrix: &OverlapMatrix,
    identity: &IdentityMatrix,
    threshold: f64,
) -> (ScoreVector, Vec<AlignmentPair>) {
    let mut aligned_refs: HashSet<usize> = HashSet::new();
    let mut aligned_hyps: HashSet<usize> = HashSet::new();
    let mut alignment = Vec::new();
    let (mut hit, mut confusion) = (0u64, 0u64);

    for pair in pairs {
        if pair.overlap <= threshold {
            continue;
        }
        aligned_refs.insert(pair.ref_idx);
        aligned_hyps.insert(pair.hyp_idx);

        let decision = if identity.get(pair.ref_idx, pair.hyp_idx) {
            hit += 1;
            Decision::Hit
        } else {
            confusion += 1;
            Decision::Confusion
        };
        alignment.push(AlignmentPair {
            ref_idx: Some(pair.ref_idx),
            hyp_idx: Some(pair.hyp_idx),
            overlap: pair.overlap,
            decision,
        });
    }

    let mut miss = 0u64;
    for ref_idx in 0..matrix.rows() {
        if aligned_refs.contains(&ref_idx) {
            continue;
        }
        miss += 1;
        alignment.push(AlignmentPair {
            ref_idx: Some(ref_idx),
            hyp_idx: None,
            overlap: matrix.row_max(ref_idx),
            decision: Decision::Miss,
        });
    }

    let mut false_alarm = 0u64;
    for hyp_idx in 0..matrix.cols() {
        if aligned_hyps.contains(&hyp_idx) {
            continue;
        }
        false_alarm += 1;
        alignment.push(AlignmentPair {
            ref_idx: None,
            hyp_idx: Some(hyp_idx),
            overlap: matrix.col_max(hyp_idx),
            decision: Decision::FalseAlarm,
        });
    }

    let score = ScoreVector::new(hit as f64, miss as f64, false_alarm as f64, confusion as f64);
    (score, alignment)
}
