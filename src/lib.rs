pub mod config;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod report;
pub mod scoring;
pub mod types;

pub use config::{ScoringConfig, ScoringMode};
pub use engine::builder::ScoringEngineBuilder;
pub use engine::runtime::{RecordingScore, ScoringEngine};
pub use engine::traits::{OverlapScorer, PairSelector};
pub use error::ScoringError;
pub use report::{build_report, format_score_line, ScoringReport};
pub use scoring::aggregate::{accumulate, AccumulationMode};
pub use scoring::metrics::compute_metrics;
pub use types::{
    AlignmentPair, Decision, Event, EventClassMap, EventListMap, GroupingMap, MetricsResult,
    ScoreVector,
};
