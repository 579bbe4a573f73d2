use crate::scoring::align::ScoredPair;
use crate::scoring::overlap::OverlapMatrix;
use crate::types::Event;

/// Pairwise overlap score between a reference and a hypothesis event.
pub trait OverlapScorer: Send + Sync {
    fn overlap(&self, ref_event: &Event, hyp_event: &Event) -> f64;
}

/// Turns an overlap matrix into the set of candidate aligned pairs under the
/// one-to-one constraint. The default is region-local greedy selection; an
/// exact weighted-matching selector could be substituted here without
/// changing the engine contract.
pub trait PairSelector: Send + Sync {
    fn select(&self, matrix: &OverlapMatrix) -> Vec<ScoredPair>;
}
