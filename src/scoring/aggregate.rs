use std::collections::BTreeMap;

use crate::error::ScoringError;
use crate::types::{GroupingMap, ScoreVector};

pub const TOTAL_GROUP_ID: &str = "total";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulationMode {
    /// One group containing every recording, keyed `"total"`.
    Total,
    /// One group per entry of the supplied grouping (typically per subject).
    PerGroup,
}

/// Sum per-recording score vectors into per-group totals. `PerGroup` requires
/// a non-empty grouping whose every recording id exists in `per_rec`;
/// recordings absent from all groups are simply not accumulated.
pub fn accumulate(
    per_rec: &BTreeMap<String, ScoreVector>,
    mode: AccumulationMode,
    grouping: Option<&GroupingMap>,
) -> Result<BTreeMap<String, ScoreVector>, ScoringError> {
    if per_rec.is_empty() {
        return Err(ScoringError::aggregation("per-recording score map is empty"));
    }

    let mut out = BTreeMap::new();
    match mode {
        AccumulationMode::Total => {
            let total: ScoreVector = per_rec.values().copied().sum();
            out.insert(TOTAL_GROUP_ID.to_string(), total);
        }
        AccumulationMode::PerGroup => {
            let grouping = grouping.ok_or_else(|| {
                ScoringError::aggregation("per-group accumulation requires a grouping map")
            })?;
            if grouping.is_empty() {
                return Err(ScoringError::aggregation("grouping map is empty"));
            }
            for (group_id, recordings) in grouping {
                let mut acc = ScoreVector::default();
                for rec_id in recordings {
                    let score = per_rec.get(rec_id).ok_or_else(|| {
                        ScoringError::aggregation(format!(
                            "group '{group_id}' references unknown recording '{rec_id}'"
                        ))
                    })?;
                    acc += *score;
                }
                out.insert(group_id.clone(), acc);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_rec() -> BTreeMap<String, ScoreVector> {
        [
            ("rec_a".to_string(), ScoreVector::new(2.0, 1.0, 0.0, 0.0)),
            ("rec_b".to_string(), ScoreVector::new(1.0, 0.0, 2.0, 1.0)),
            ("rec_c".to_string(), ScoreVector::new(0.0, 3.0, 1.0, 0.0)),
        ]
        .into_iter()
        .collect()
    }

    fn grouping() -> GroupingMap {
        [
            ("sub_1".to_string(), vec!["rec_a".to_string(), "rec_b".to_string()]),
            ("sub_2".to_string(), vec!["rec_c".to_string()]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn total_sums_everything() {
        let out = accumulate(&per_rec(), AccumulationMode::Total, None).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[TOTAL_GROUP_ID], ScoreVector::new(3.0, 4.0, 3.0, 1.0));
    }

    #[test]
    fn per_group_sums_members() {
        let out = accumulate(&per_rec(), AccumulationMode::PerGroup, Some(&grouping())).unwrap();
        assert_eq!(out["sub_1"], ScoreVector::new(3.0, 1.0, 2.0, 1.0));
        assert_eq!(out["sub_2"], ScoreVector::new(0.0, 3.0, 1.0, 0.0));
    }

    #[test]
    fn partition_totals_match_total_mode() {
        let total = accumulate(&per_rec(), AccumulationMode::Total, None).unwrap();
        let groups = accumulate(&per_rec(), AccumulationMode::PerGroup, Some(&grouping())).unwrap();
        let summed: ScoreVector = groups.values().copied().sum();
        assert_eq!(summed, total[TOTAL_GROUP_ID]);
    }

    #[test]
    fn per_group_needs_grouping() {
        assert!(matches!(
            accumulate(&per_rec(), AccumulationMode::PerGroup, None),
            Err(ScoringError::Aggregation { .. })
        ));
        let empty = GroupingMap::new();
        assert!(accumulate(&per_rec(), AccumulationMode::PerGroup, Some(&empty)).is_err());
    }

    #[test]
    fn unknown_recording_is_an_error() {
        let bad: GroupingMap =
            [("sub_1".to_string(), vec!["rec_x".to_string()])].into_iter().collect();
        assert!(accumulate(&per_rec(), AccumulationMode::PerGroup, Some(&bad)).is_err());
    }

    #[test]
    fn empty_score_map_is_an_error() {
        let empty = BTreeMap::new();
        assert!(accumulate(&empty, AccumulationMode::Total, None).is_err());
    }
}
