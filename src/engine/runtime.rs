use std::collections::BTreeMap;

use crate::config::{ScoringConfig, ScoringMode};
use crate::engine::traits::{OverlapScorer, PairSelector};
use crate::error::ScoringError;
use crate::scoring::decisions::label_decisions;
use crate::scoring::overlap::{IdentityMatrix, OverlapMatrix};
use crate::scoring::segmentation::score_segmentation;
use crate::types::{filter_events, AlignmentPair, Event, EventClassMap, EventListMap, ScoreVector};

/// Score and decision alignment for one recording. Segmentation scoring has
/// no per-event decisions, so its alignment is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingScore {
    pub score: ScoreVector,
    pub alignment: Vec<AlignmentPair>,
}

/// The interval alignment and scoring engine. Holds the class map, the
/// scoring configuration and the pluggable overlap/selection strategies;
/// every scoring call is a pure function of its inputs.
pub struct ScoringEngine {
    classes: EventClassMap,
    config: ScoringConfig,
    overlap_scorer: Box<dyn OverlapScorer>,
    pair_selector: Box<dyn PairSelector>,
}

pub(crate) struct ScoringEngineParts {
    pub classes: EventClassMap,
    pub config: ScoringConfig,
    pub overlap_scorer: Box<dyn OverlapScorer>,
    pub pair_selector: Box<dyn PairSelector>,
}

impl ScoringEngine {
    pub(crate) fn from_parts(parts: ScoringEngineParts) -> Self {
        Self {
            classes: parts.classes,
            config: parts.config,
            overlap_scorer: parts.overlap_scorer,
            pair_selector: parts.pair_selector,
        }
    }

    pub fn classes(&self) -> &EventClassMap {
        &self.classes
    }

    pub fn config(&self) -> ScoringConfig {
        self.config
    }

    /// Score one recording under the given mode. Empty reference or
    /// hypothesis lists are legal and produce all-miss / all-false-alarm
    /// scores.
    pub fn score(
        &self,
        mode: ScoringMode,
        ref_events: &[Event],
        hyp_events: &[Event],
    ) -> Result<RecordingScore, ScoringError> {
        validate_scoring("reference", ref_events)?;
        validate_scoring("hypothesis", hyp_events)?;

        let filtered;
        let (ref_events, hyp_events) = if self.config.filter_null {
            let keep = self.classes.non_null_labels();
            filtered = (filter_events(ref_events, &keep), filter_events(hyp_events, &keep));
            (filtered.0.as_slice(), filtered.1.as_slice())
        } else {
            (ref_events, hyp_events)
        };

        match mode {
            ScoringMode::Detection => self.score_detection(ref_events, hyp_events, self.config.threshold),
            ScoringMode::Identification => self.score_detection(ref_events, hyp_events, 0.0),
            ScoringMode::Segmentation => {
                let score = score_segmentation(ref_events, hyp_events, &self.classes)?;
                Ok(RecordingScore {
                    score,
                    alignment: Vec::new(),
                })
            }
        }
    }

    /// Score every recording of a corpus. Recordings present on only one
    /// side are scored against an empty counterpart (all misses or all false
    /// alarms) with a warning; the reference map itself must be non-empty.
    pub fn score_corpus(
        &self,
        mode: ScoringMode,
        refs: &EventListMap,
        hyps: &EventListMap,
    ) -> Result<BTreeMap<String, ScoreVector>, ScoringError> {
        if refs.is_empty() {
            return Err(ScoringError::invalid_input("reference corpus is empty"));
        }

        let mut per_rec = BTreeMap::new();
        for (rec_id, ref_events) in refs {
            let hyp_events = match hyps.get(rec_id) {
                Some(events) => events.as_slice(),
                None => {
                    tracing::warn!(recording = %rec_id, "no hypothesis for recording, scoring as all-miss");
                    &[]
                }
            };
            let outcome = self.score(mode, ref_events, hyp_events)?;
            per_rec.insert(rec_id.clone(), outcome.score);
        }

        for rec_id in hyps.keys() {
            if refs.contains_key(rec_id) {
                continue;
            }
            tracing::warn!(recording = %rec_id, "no reference for recording, scoring as all-false-alarm");
            let outcome = self.score(mode, &[], &hyps[rec_id])?;
            per_rec.insert(rec_id.clone(), outcome.score);
        }

        Ok(per_rec)
    }

    fn score_detection(
        &self,
        ref_events: &[Event],
        hyp_events: &[Event],
        threshold: f64,
    ) -> Result<RecordingScore, ScoringError> {
        let matrix = OverlapMatrix::from_fn(ref_events, hyp_events, |re, he| {
            self.overlap_scorer.overlap(re, he)
        });
        let identity = IdentityMatrix::build(ref_events, hyp_events, &self.classes)?;
        let pairs = self.pair_selector.select(&matrix);
        tracing::debug!(
            refs = ref_events.len(),
            hyps = hyp_events.len(),
            candidates = pairs.len(),
            "aligned candidate pairs"
        );
        let (score, alignment) = label_decisions(&pairs, &matrix, &identity, threshold);
        Ok(RecordingScore { score, alignment })
    }
}

fn validate_scoring(side: &str, events: &[Event]) -> Result<(), ScoringError> {
    for (idx, event) in events.iter().enumerate() {
        if !event.onset.is_finite() || event.onset < 0.0 {
            return Err(ScoringError::invalid_input(format!(
                "{side} event {idx} ('{}') has invalid onset {}",
                event.label, event.onset
            )));
        }
        if !event.duration.is_finite() || event.duration <= 0.0 {
            return Err(ScoringError::invalid_input(format!(
                "{side} event {idx} ('{}') has non-positive duration {}",
                event.label, event.duration
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::builder::ScoringEngineBuilder;
    use crate::types::Decision;

    fn classes() -> EventClassMap {
        [("snore", 1), ("cough", 2), ("null", 0)].into_iter().collect()
    }

    fn engine(config: ScoringConfig) -> ScoringEngine {
        ScoringEngineBuilder::new(classes(), config).build().unwrap()
    }

    fn default_engine() -> ScoringEngine {
        engine(ScoringConfig::default())
    }

    #[test]
    fn identity_alignment_is_all_hits() {
        let events = vec![
            Event::new("snore", 0.0, 2.0),
            Event::new("cough", 3.0, 1.0),
            Event::new("snore", 5.5, 2.5),
        ];
        for threshold in [0.0, 0.5, 0.99] {
            let engine = engine(ScoringConfig::with_threshold(threshold));
            let out = engine.score(ScoringMode::Detection, &events, &events).unwrap();
            assert_eq!(out.score, ScoreVector::new(3.0, 0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn snore_three_quarter_overlap_is_a_hit() {
        let ref_events = vec![Event::new("snore", 0.0, 2.0)];
        let hyp_events = vec![Event::new("snore", 0.5, 2.0)];
        let out = default_engine()
            .score(ScoringMode::Detection, &ref_events, &hyp_events)
            .unwrap();
        assert_eq!(out.score, ScoreVector::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(out.alignment[0].decision, Decision::Hit);
        assert!((out.alignment[0].overlap - 0.75).abs() < 1e-12);
    }

    #[test]
    fn empty_hypothesis_is_all_miss() {
        let ref_events = vec![Event::new("snore", 0.0, 5.0)];
        let out = default_engine()
            .score(ScoringMode::Detection, &ref_events, &[])
            .unwrap();
        assert_eq!(out.score, ScoreVector::new(0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn identification_counts_any_overlap() {
        // Overlap 0.4 fails the detection threshold but passes identification.
        let ref_events = vec![Event::new("snore", 0.0, 2.0)];
        let hyp_events = vec![Event::new("snore", 1.2, 2.0)];
        let engine = default_engine();
        let der = engine.score(ScoringMode::Detection, &ref_events, &hyp_events).unwrap();
        assert_eq!(der.score.hit, 0.0);
        let ier = engine
            .score(ScoringMode::Identification, &ref_events, &hyp_events)
            .unwrap();
        assert_eq!(ier.score.hit, 1.0);
    }

    #[test]
    fn segmentation_mode_returns_durations() {
        let ref_events = vec![Event::new("snore", 0.0, 2.0)];
        let hyp_events = vec![Event::new("snore", 1.0, 2.0)];
        let out = default_engine()
            .score(ScoringMode::Segmentation, &ref_events, &hyp_events)
            .unwrap();
        assert!((out.score.hit - 1.0).abs() < 1e-9);
        assert!(out.alignment.is_empty());
    }

    #[test]
    fn null_events_filtered_when_configured() {
        let config = ScoringConfig {
            filter_null: true,
            ..ScoringConfig::default()
        };
        let ref_events = vec![Event::new("null", 0.0, 10.0), Event::new("snore", 12.0, 2.0)];
        let hyp_events = vec![Event::new("snore", 12.5, 2.0), Event::new("null", 20.0, 5.0)];
        let out = engine(config)
            .score(ScoringMode::Detection, &ref_events, &hyp_events)
            .unwrap();
        assert_eq!(out.score, ScoreVector::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_duration_rejected() {
        let bad = vec![Event::new("snore", 0.0, 0.0)];
        let result = default_engine().score(ScoringMode::Detection, &bad, &[]);
        assert!(matches!(result, Err(ScoringError::InvalidInput { .. })));
    }

    #[test]
    fn corpus_scores_union_of_recordings() {
        let refs: EventListMap = [
            ("rec_a".to_string(), vec![Event::new("snore", 0.0, 2.0)]),
            ("rec_b".to_string(), vec![Event::new("snore", 0.0, 2.0)]),
        ]
        .into_iter()
        .collect();
        let hyps: EventListMap = [
            ("rec_a".to_string(), vec![Event::new("snore", 0.0, 2.0)]),
            ("rec_c".to_string(), vec![Event::new("snore", 5.0, 1.0)]),
        ]
        .into_iter()
        .collect();

        let per_rec = default_engine()
            .score_corpus(ScoringMode::Detection, &refs, &hyps)
            .unwrap();
        assert_eq!(per_rec.len(), 3);
        assert_eq!(per_rec["rec_a"], ScoreVector::new(1.0, 0.0, 0.0, 0.0));
        // rec_b has no hypothesis, rec_c no reference.
        assert_eq!(per_rec["rec_b"], ScoreVector::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(per_rec["rec_c"], ScoreVector::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn empty_reference_corpus_is_an_error() {
        let refs = EventListMap::new();
        let hyps = EventListMap::new();
        let result = default_engine().score_corpus(ScoringMode::Detection, &refs, &hyps);
        assert!(matches!(result, Err(ScoringError::InvalidInput { .. })));
    }
}
