use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ScoringMode;
use crate::scoring::metrics::compute_metrics;
use crate::types::{MetricsResult, ScoreVector};

const SCHEMA_VERSION: u32 = 1;

/// Serializable summary of one scoring run: per-recording scores, optional
/// per-group totals and the corpus total, each with derived metrics where
/// those are defined.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub per_recording: BTreeMap<String, ReportEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_group: Option<BTreeMap<String, ReportEntry>>,
    pub total: ReportEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub mode: &'static str,
    pub threshold: f64,
    pub recording_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub score: ScoreVector,
    /// Absent when the metrics are undefined for this score (zero
    /// denominator), e.g. a recording with neither hits nor misses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<DerivedMetrics>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DerivedMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub error_rate: f64,
    pub jaccard_index: f64,
    pub jaccard_distance: f64,
}

impl From<MetricsResult> for DerivedMetrics {
    fn from(m: MetricsResult) -> Self {
        Self {
            precision: m.precision,
            recall: m.recall,
            f1: m.f1,
            error_rate: m.error_rate,
            jaccard_index: m.jaccard_index,
            jaccard_distance: m.jaccard_distance,
        }
    }
}

impl ReportEntry {
    /// Metrics are best-effort per entry: an undefined denominator demotes
    /// the entry to score-only instead of failing the whole report.
    pub fn from_score(id: &str, score: ScoreVector) -> Self {
        let metrics = match compute_metrics(score) {
            Ok(metrics) => Some(DerivedMetrics::from(metrics)),
            Err(err) => {
                tracing::warn!(entry = %id, %err, "metrics undefined for entry, reporting score only");
                None
            }
        };
        Self { score, metrics }
    }
}

pub fn build_report(
    mode: ScoringMode,
    threshold: f64,
    per_rec: &BTreeMap<String, ScoreVector>,
    per_group: Option<&BTreeMap<String, ScoreVector>>,
    total: ScoreVector,
) -> ScoringReport {
    let per_recording = per_rec
        .iter()
        .map(|(id, score)| (id.clone(), ReportEntry::from_score(id, *score)))
        .collect();
    let per_group = per_group.map(|groups| {
        groups
            .iter()
            .map(|(id, score)| (id.clone(), ReportEntry::from_score(id, *score)))
            .collect()
    });

    ScoringReport {
        schema_version: SCHEMA_VERSION,
        meta: Meta {
            generated_at: chrono::Utc::now().to_rfc3339(),
            mode: mode.as_str(),
            threshold,
            recording_count: per_rec.len(),
        },
        per_recording,
        per_group,
        total: ReportEntry::from_score("total", total),
    }
}

/// One text line per scored unit, in the original result-file format:
/// `rec01 - error [%] 33.33 - f1 0.8000 - [H/M/FA/C] : [2 1 0 0]`.
pub fn format_score_line(id: &str, entry: &ReportEntry) -> String {
    let s = entry.score;
    let counts = format!(
        "[{} {} {} {}]",
        fmt_value(s.hit),
        fmt_value(s.miss),
        fmt_value(s.false_alarm),
        fmt_value(s.confusion)
    );
    match &entry.metrics {
        Some(m) => format!(
            "{id} - error [%] {:.2} - f1 {:.4} - [H/M/FA/C] : {counts}",
            m.error_rate, m.f1
        ),
        None => format!("{id} - metrics undefined - [H/M/FA/C] : {counts}"),
    }
}

fn fmt_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}
