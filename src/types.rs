use std::collections::{BTreeMap, HashMap, HashSet};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Label reserved for the background class in an [`EventClassMap`].
pub const NULL_LABEL: &str = "null";

/// A labeled time interval. Onset and duration share one time unit (seconds
/// in the upstream annotation format); duration must be positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub label: String,
    pub onset: f64,
    pub duration: f64,
}

impl Event {
    pub fn new(label: impl Into<String>, onset: f64, duration: f64) -> Self {
        Self {
            label: label.into(),
            onset,
            duration,
        }
    }

    pub fn end(&self) -> f64 {
        self.onset + self.duration
    }
}

/// Maps textual event labels to numeric class ids. Several labels may share a
/// class id (synonyms, e.g. central/obstructive apnea scored as one class).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventClassMap {
    labels: HashMap<String, i64>,
}

impl EventClassMap {
    pub fn new(labels: HashMap<String, i64>) -> Self {
        Self { labels }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn class_of(&self, label: &str) -> Result<i64, ScoringError> {
        self.labels.get(label).copied().ok_or_else(|| {
            ScoringError::invalid_input(format!("event label '{label}' is not in the class map"))
        })
    }

    pub fn null_class(&self) -> Option<i64> {
        self.labels.get(NULL_LABEL).copied()
    }

    /// Labels that do not map to the null/background class. When no null label
    /// is defined, every label is returned.
    pub fn non_null_labels(&self) -> HashSet<&str> {
        let null_class = self.null_class();
        self.labels
            .iter()
            .filter(|(label, class)| {
                label.as_str() != NULL_LABEL && Some(**class) != null_class
            })
            .map(|(label, _)| label.as_str())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for EventClassMap {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Keep only events whose label is in `keep`. Order is preserved.
pub fn filter_events(scoring: &[Event], keep: &HashSet<&str>) -> Vec<Event> {
    scoring
        .iter()
        .filter(|event| keep.contains(event.label.as_str()))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Hit,
    Confusion,
    Miss,
    FalseAlarm,
}

/// One row of the decision alignment. Misses carry no hypothesis index and
/// false alarms no reference index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignmentPair {
    pub ref_idx: Option<usize>,
    pub hyp_idx: Option<usize>,
    /// For hits/confusions the winning overlap; for misses/false alarms the
    /// best overlap the event saw, useful when diagnosing near-detections.
    pub overlap: f64,
    pub decision: Decision,
}

/// Hit / Miss / FalseAlarm / Confusion totals for one recording or one group.
/// Values are event counts for detection scoring and seconds for segmentation
/// scoring. Addition is element-wise, associative and commutative, so
/// accumulation order never changes a total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreVector {
    pub hit: f64,
    pub miss: f64,
    pub false_alarm: f64,
    pub confusion: f64,
}

impl ScoreVector {
    pub fn new(hit: f64, miss: f64, false_alarm: f64, confusion: f64) -> Self {
        Self {
            hit,
            miss,
            false_alarm,
            confusion,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.hit == 0.0 && self.miss == 0.0 && self.false_alarm == 0.0 && self.confusion == 0.0
    }
}

impl Add for ScoreVector {
    type Output = ScoreVector;

    fn add(self, rhs: ScoreVector) -> ScoreVector {
        ScoreVector {
            hit: self.hit + rhs.hit,
            miss: self.miss + rhs.miss,
            false_alarm: self.false_alarm + rhs.false_alarm,
            confusion: self.confusion + rhs.confusion,
        }
    }
}

impl AddAssign for ScoreVector {
    fn add_assign(&mut self, rhs: ScoreVector) {
        *self = *self + rhs;
    }
}

impl Sum for ScoreVector {
    fn sum<I: Iterator<Item = ScoreVector>>(iter: I) -> ScoreVector {
        iter.fold(ScoreVector::default(), Add::add)
    }
}

/// A score vector together with the five derived detection metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsResult {
    pub score: ScoreVector,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Percentage, `100 * (M + FA + C) / (H + C + M)`. Can exceed 100.
    pub error_rate: f64,
    pub jaccard_index: f64,
    pub jaccard_distance: f64,
}

/// Per-recording event lists keyed by recording id. BTreeMap keeps report
/// output deterministic.
pub type EventListMap = BTreeMap<String, Vec<Event>>;

/// Maps a group id (typically a subject) to its recording ids.
pub type GroupingMap = BTreeMap<String, Vec<String>>;
