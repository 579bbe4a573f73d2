use crate::scoring::overlap::OverlapMatrix;
use crate::scoring::regions::{extract_regions, Region};

/// A selected candidate pair with its overlap value. Produced before decision
/// labeling; `overlap` may still fall below the detection threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPair {
    pub ref_idx: usize,
    pub hyp_idx: usize,
    pub overlap: f64,
}

/// Select overlap-maximizing pairs across the whole matrix, one region at a
/// time. This is a locality heuristic, not an exact bipartite matching: each
/// region is solved greedily and independently, which matches the original
/// scorer's behavior.
pub fn select_pairs(matrix: &OverlapMatrix) -> Vec<ScoredPair> {
    let mut pairs = Vec::new();
    for region in extract_regions(matrix) {
        select_in_region(matrix, region, &mut pairs);
    }
    pairs
}

/// Greedy max-overlap selection within one region under the one-to-one
/// constraint: take the best cell, drop every remaining cell sharing its row
/// or column, repeat. Cells are scanned in lexicographic `(ref_idx, hyp_idx)`
/// order and only a strictly greater value displaces the current best, so the
/// lexicographically first cell wins ties.
fn select_in_region(matrix: &OverlapMatrix, mut region: Region, out: &mut Vec<ScoredPair>) {
    if region.len() == 1 {
        let (ref_idx, hyp_idx) = region[0];
        out.push(ScoredPair {
            ref_idx,
            hyp_idx,
            overlap: matrix.get(ref_idx, hyp_idx),
        });
        return;
    }

    while !region.is_empty() {
        let mut best = region[0];
        let mut best_value = matrix.get(best.0, best.1);
        for &(ref_idx, hyp_idx) in &region[1..] {
            let value = matrix.get(ref_idx, hyp_idx);
            if value > best_value {
                best = (ref_idx, hyp_idx);
                best_value = value;
            }
        }

        out.push(ScoredPair {
            ref_idx: best.0,
            hyp_idx: best.1,
            overlap: best_value,
        });
        region.retain(|&(ref_idx, hyp_idx)| ref_idx != best.0 && hyp_idx != best.1);
    }
}
