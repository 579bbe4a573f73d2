use crate::engine::traits::{OverlapScorer, PairSelector};
use crate::scoring::align::{select_pairs, ScoredPair};
use crate::scoring::overlap::{raw_overlap, relative_overlap, OverlapMatrix};
use crate::types::Event;

/// Relative length-of-overlap in `[0, 1]`; the discrete detection default.
pub struct RelativeOverlapScorer;

impl OverlapScorer for RelativeOverlapScorer {
    fn overlap(&self, ref_event: &Event, hyp_event: &Event) -> f64 {
        relative_overlap(ref_event, hyp_event)
    }
}

/// Seconds of overlap; used by the continuous segmentation scorer.
pub struct RawOverlapScorer;

impl OverlapScorer for RawOverlapScorer {
    fn overlap(&self, ref_event: &Event, hyp_event: &Event) -> f64 {
        raw_overlap(ref_event, hyp_event)
    }
}

/// Region-local greedy max-overlap selection.
pub struct GreedyRegionSelector;

impl PairSelector for GreedyRegionSelector {
    fn select(&self, matrix: &OverlapMatrix) -> Vec<ScoredPair> {
        select_pairs(matrix)
    }
}
