use crate::error::ScoringError;
use crate::scoring::overlap::{IdentityMatrix, OverlapMatrix};
use crate::types::{Event, EventClassMap, ScoreVector};

/// Continuous segmentation scoring: every second of overlap contributes
/// directly, so no region extraction or pair selection is needed. Hits are
/// overlapping seconds with matching classes, confusions overlapping seconds
/// with mismatched classes; misses and false alarms are the uncovered
/// remainders of the reference and hypothesis durations.
pub fn score_segmentation(
    ref_events: &[Event],
    hyp_events: &[Event],
    classes: &EventClassMap,
) -> Result<ScoreVector, ScoringError> {
    let ref_duration: f64 = ref_events.iter().map(|event| event.duration).sum();
    let hyp_duration: f64 = hyp_events.iter().map(|event| event.duration).sum();

    if hyp_events.is_empty() {
        return Ok(ScoreVector::new(0.0, round8(ref_duration), 0.0, 0.0));
    }
    if ref_events.is_empty() {
        return Ok(ScoreVector::new(0.0, 0.0, round8(hyp_duration), 0.0));
    }

    let overlap = OverlapMatrix::raw(ref_events, hyp_events);
    let identity = IdentityMatrix::build(ref_events, hyp_events, classes)?;

    let mut hit = 0.0;
    let mut total_overlap = 0.0;
    for i in 0..overlap.rows() {
        for j in 0..overlap.cols() {
            let value = overlap.get(i, j);
            total_overlap += value;
            if identity.get(i, j) {
                hit += value;
            }
        }
    }
    let confusion = total_overlap - hit;

    // Rounding sheds f64 accumulation noise so fully covered references
    // report an exact zero miss.
    let miss = round8(ref_duration - hit - confusion);
    let false_alarm = round8(hyp_duration - hit - confusion);
    Ok(ScoreVector::new(hit, miss, false_alarm, confusion))
}

fn round8(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> EventClassMap {
        [("snore", 1), ("cough", 2), ("null", 0)].into_iter().collect()
    }

    #[test]
    fn exact_match_is_all_hit() {
        let events = vec![Event::new("snore", 0.0, 2.0), Event::new("snore", 5.0, 1.0)];
        let s = score_segmentation(&events, &events, &classes()).unwrap();
        assert!((s.hit - 3.0).abs() < 1e-9);
        assert_eq!(s.miss, 0.0);
        assert_eq!(s.false_alarm, 0.0);
        assert_eq!(s.confusion, 0.0);
    }

    #[test]
    fn partial_overlap_splits_durations() {
        // ref [0, 2], hyp [1, 3]: 1s hit, 1s miss, 1s false alarm.
        let ref_events = vec![Event::new("snore", 0.0, 2.0)];
        let hyp_events = vec![Event::new("snore", 1.0, 2.0)];
        let s = score_segmentation(&ref_events, &hyp_events, &classes()).unwrap();
        assert!((s.hit - 1.0).abs() < 1e-9);
        assert!((s.miss - 1.0).abs() < 1e-9);
        assert!((s.false_alarm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_labels_become_confusion_seconds() {
        let ref_events = vec![Event::new("snore", 0.0, 2.0)];
        let hyp_events = vec![Event::new("cough", 0.0, 2.0)];
        let s = score_segmentation(&ref_events, &hyp_events, &classes()).unwrap();
        assert_eq!(s.hit, 0.0);
        assert!((s.confusion - 2.0).abs() < 1e-9);
        assert_eq!(s.miss, 0.0);
        assert_eq!(s.false_alarm, 0.0);
    }

    #[test]
    fn empty_hypothesis_misses_total_reference_duration() {
        let ref_events = vec![Event::new("snore", 0.0, 2.5), Event::new("snore", 4.0, 1.5)];
        let s = score_segmentation(&ref_events, &[], &classes()).unwrap();
        assert_eq!(s, ScoreVector::new(0.0, 4.0, 0.0, 0.0));
    }

    #[test]
    fn empty_reference_false_alarms_total_hypothesis_duration() {
        let hyp_events = vec![Event::new("snore", 0.0, 3.0)];
        let s = score_segmentation(&[], &hyp_events, &classes()).unwrap();
        assert_eq!(s, ScoreVector::new(0.0, 0.0, 3.0, 0.0));
    }

    #[test]
    fn both_empty_is_zero() {
        let s = score_segmentation(&[], &[], &classes()).unwrap();
        assert!(s.is_zero());
    }

    #[test]
    fn one_hypothesis_may_cover_many_references() {
        let ref_events = vec![Event::new("snore", 0.0, 1.0), Event::new("snore", 2.0, 1.0)];
        let hyp_events = vec![Event::new("snore", 0.0, 3.0)];
        let s = score_segmentation(&ref_events, &hyp_events, &classes()).unwrap();
        assert!((s.hit - 2.0).abs() < 1e-9);
        assert_eq!(s.miss, 0.0);
        assert!((s.false_alarm - 1.0).abs() < 1e-9);
    }
}
