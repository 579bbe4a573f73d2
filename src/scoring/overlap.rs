use crate::error::ScoringError;
use crate::types::{Event, EventClassMap};

/// Dense row-major `R x H` matrix of overlap scores between reference events
/// (rows) and hypothesis events (columns). Cells of non-intersecting event
/// pairs hold exactly 0.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapMatrix {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl OverlapMatrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, ref_idx: usize, hyp_idx: usize) -> f64 {
        self.values[ref_idx * self.cols + hyp_idx]
    }

    /// Best overlap in a row, 0 for an empty matrix. Used to annotate misses.
    pub fn row_max(&self, ref_idx: usize) -> f64 {
        (0..self.cols)
            .map(|hyp_idx| self.get(ref_idx, hyp_idx))
            .fold(0.0, f64::max)
    }

    /// Best overlap in a column, 0 for an empty matrix.
    pub fn col_max(&self, hyp_idx: usize) -> f64 {
        (0..self.rows)
            .map(|ref_idx| self.get(ref_idx, hyp_idx))
            .fold(0.0, f64::max)
    }

    /// Build from an arbitrary pairwise overlap function. The named
    /// constructors below cover the two standard strategies.
    pub fn from_fn(
        ref_events: &[Event],
        hyp_events: &[Event],
        overlap: impl Fn(&Event, &Event) -> f64,
    ) -> Self {
        let rows = ref_events.len();
        let cols = hyp_events.len();
        let mut values = vec![0.0; rows * cols];
        for (i, re) in ref_events.iter().enumerate() {
            for (j, he) in hyp_events.iter().enumerate() {
                values[i * cols + j] = overlap(re, he);
            }
        }
        Self { values, rows, cols }
    }

    /// Relative length-of-overlap matrix for discrete detection scoring.
    /// Raw LoO lives in `(-inf, 1]`; non-positive values mean displacement
    /// and are clamped to 0, so stored cells are always in `[0, 1]`.
    pub fn relative(ref_events: &[Event], hyp_events: &[Event]) -> Self {
        Self::from_fn(ref_events, hyp_events, relative_overlap)
    }

    /// Raw seconds-of-overlap matrix for continuous segmentation scoring.
    pub fn raw(ref_events: &[Event], hyp_events: &[Event]) -> Self {
        Self::from_fn(ref_events, hyp_events, raw_overlap)
    }
}

/// `2 * t_overlap / (d_ref + d_hyp)`, clamped to `[0, 1]`.
pub fn relative_overlap(ref_event: &Event, hyp_event: &Event) -> f64 {
    let intersection = raw_overlap(ref_event, hyp_event);
    let denom = ref_event.duration + hyp_event.duration;
    if denom <= 0.0 {
        return 0.0;
    }
    (2.0 * intersection / denom).min(1.0)
}

/// Seconds of temporal intersection, 0 for disjoint events.
pub fn raw_overlap(ref_event: &Event, hyp_event: &Event) -> f64 {
    (ref_event.end().min(hyp_event.end()) - ref_event.onset.max(hyp_event.onset)).max(0.0)
}

/// `R x H` label-match matrix: `true` where the reference and hypothesis
/// labels map to the same class id. Independent of the overlap signal; the
/// two are only combined by the decision labeler.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityMatrix {
    values: Vec<bool>,
    cols: usize,
}

impl IdentityMatrix {
    pub fn build(
        ref_events: &[Event],
        hyp_events: &[Event],
        classes: &EventClassMap,
    ) -> Result<Self, ScoringError> {
        let ref_classes = ref_events
            .iter()
            .map(|event| classes.class_of(&event.label))
            .collect::<Result<Vec<_>, _>>()?;
        let hyp_classes = hyp_events
            .iter()
            .map(|event| classes.class_of(&event.label))
            .collect::<Result<Vec<_>, _>>()?;

        let cols = hyp_classes.len();
        let mut values = Vec::with_capacity(ref_classes.len() * cols);
        for rc in &ref_classes {
            for hc in &hyp_classes {
                values.push(rc == hc);
            }
        }
        Ok(Self { values, cols })
    }

    pub fn get(&self, ref_idx: usize, hyp_idx: usize) -> bool {
        self.values[ref_idx * self.cols + hyp_idx]
    }
}
