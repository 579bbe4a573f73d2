use crate::error::ScoringError;
use crate::types::{MetricsResult, ScoreVector};

/// Derive precision, recall, F1, error rate and Jaccard index/distance from a
/// score vector. Zero denominators are reported as `UndefinedMetric` rather
/// than propagated as NaN.
pub fn compute_metrics(score: ScoreVector) -> Result<MetricsResult, ScoringError> {
    let ScoreVector {
        hit,
        miss,
        false_alarm,
        confusion,
    } = score;

    for (name, value) in [
        ("hit", hit),
        ("miss", miss),
        ("false_alarm", false_alarm),
        ("confusion", confusion),
    ] {
        if value < 0.0 {
            return Err(ScoringError::invalid_input(format!(
                "score component '{name}' is negative: {value}"
            )));
        }
    }

    let precision_denom = hit + confusion + miss;
    if precision_denom == 0.0 {
        return Err(ScoringError::undefined_metric(
            "precision denominator H + C + M is zero",
        ));
    }
    let recall_denom = hit + confusion + false_alarm;
    if recall_denom == 0.0 {
        return Err(ScoringError::undefined_metric(
            "recall denominator H + C + FA is zero",
        ));
    }

    let precision = hit / precision_denom;
    let recall = hit / recall_denom;
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };
    let error_rate = 100.0 * (miss + false_alarm + confusion) / precision_denom;
    let jaccard_index = hit / (hit + miss + confusion + false_alarm);

    Ok(MetricsResult {
        score,
        precision,
        recall,
        f1,
        error_rate,
        jaccard_index,
        jaccard_distance: 1.0 - jaccard_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_score_boundary() {
        let m = compute_metrics(ScoreVector::new(3.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(m.precision, 1.0);
        assert_eq!(m.recall, 1.0);
        assert_eq!(m.f1, 1.0);
        assert_eq!(m.error_rate, 0.0);
        assert_eq!(m.jaccard_index, 1.0);
        assert_eq!(m.jaccard_distance, 0.0);
    }

    #[test]
    fn mixed_score() {
        // H=2, M=1, FA=1, C=1.
        let m = compute_metrics(ScoreVector::new(2.0, 1.0, 1.0, 1.0)).unwrap();
        assert!((m.precision - 0.5).abs() < 1e-12);
        assert!((m.recall - 0.5).abs() < 1e-12);
        assert!((m.f1 - 0.5).abs() < 1e-12);
        assert!((m.error_rate - 75.0).abs() < 1e-12);
        assert!((m.jaccard_index - 0.4).abs() < 1e-12);
        assert!((m.jaccard_distance - 0.6).abs() < 1e-12);
    }

    #[test]
    fn zero_hits_gives_zero_f1_without_nan() {
        let m = compute_metrics(ScoreVector::new(0.0, 1.0, 1.0, 0.0)).unwrap();
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
        assert!(m.error_rate.is_finite());
    }

    #[test]
    fn undefined_precision_is_an_error() {
        // Only false alarms: H + C + M == 0.
        let result = compute_metrics(ScoreVector::new(0.0, 0.0, 2.0, 0.0));
        assert!(matches!(result, Err(ScoringError::UndefinedMetric { .. })));
    }

    #[test]
    fn undefined_recall_is_an_error() {
        // Only misses: H + C + FA == 0.
        let result = compute_metrics(ScoreVector::new(0.0, 2.0, 0.0, 0.0));
        assert!(matches!(result, Err(ScoringError::UndefinedMetric { .. })));
    }

    #[test]
    fn negative_component_rejected() {
        let result = compute_metrics(ScoreVector::new(1.0, -1.0, 0.0, 0.0));
        assert!(matches!(result, Err(ScoringError::InvalidInput { .. })));
    }

    #[test]
    fn error_rate_can_exceed_hundred() {
        let m = compute_metrics(ScoreVector::new(1.0, 2.0, 3.0, 0.0)).unwrap();
        assert!(m.error_rate > 100.0);
    }
}
