use crate::config::ScoringConfig;
use crate::engine::defaults::{GreedyRegionSelector, RelativeOverlapScorer};
use crate::engine::runtime::{ScoringEngine, ScoringEngineParts};
use crate::engine::traits::{OverlapScorer, PairSelector};
use crate::error::ScoringError;
use crate::types::EventClassMap;

pub struct ScoringEngineBuilder {
    classes: EventClassMap,
    config: ScoringConfig,
    overlap_scorer: Option<Box<dyn OverlapScorer>>,
    pair_selector: Option<Box<dyn PairSelector>>,
}

impl ScoringEngineBuilder {
    pub fn new(classes: EventClassMap, config: ScoringConfig) -> Self {
        Self {
            classes,
            config,
            overlap_scorer: None,
            pair_selector: None,
        }
    }

    pub fn with_overlap_scorer(mut self, overlap_scorer: Box<dyn OverlapScorer>) -> Self {
        self.overlap_scorer = Some(overlap_scorer);
        self
    }

    pub fn with_pair_selector(mut self, pair_selector: Box<dyn PairSelector>) -> Self {
        self.pair_selector = Some(pair_selector);
        self
    }

    pub fn build(self) -> Result<ScoringEngine, ScoringError> {
        if self.classes.is_empty() {
            return Err(ScoringError::invalid_input("event class map is empty"));
        }
        self.config.validate()?;
        if self.config.filter_null && self.classes.null_class().is_none() {
            return Err(ScoringError::invalid_input(
                "null filtering requested but the class map defines no 'null' label",
            ));
        }

        Ok(ScoringEngine::from_parts(ScoringEngineParts {
            classes: self.classes,
            config: self.config,
            overlap_scorer: self
                .overlap_scorer
                .unwrap_or_else(|| Box::new(RelativeOverlapScorer)),
            pair_selector: self
                .pair_selector
                .unwrap_or_else(|| Box::new(GreedyRegionSelector)),
        }))
    }
}
