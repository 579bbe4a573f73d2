use crate::error::ScoringError;

/// Scoring parameters passed explicitly into every call. There is no
/// process-wide configuration state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Minimal relative overlap for a successful detection. Strictly-greater
    /// comparison, so `0.0` means any true overlap counts.
    pub threshold: f64,
    /// Drop events mapping to the null/background class from both sides
    /// before scoring. Requires the class map to define a `null` label.
    pub filter_null: bool,
}

impl ScoringConfig {
    pub const DEFAULT_THRESHOLD: f64 = 2.0 / 3.0;

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ScoringError> {
        if self.threshold < 0.0 {
            return Err(ScoringError::invalid_input(format!(
                "threshold must be non-negative, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            filter_null: false,
        }
    }
}

/// The closed set of scoring protocols. The original system dispatched these
/// by string name; callers here resolve the mode before invoking the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Discrete event detection: threshold-gated alignment, counts.
    Detection,
    /// Detection with the threshold forced to 0 (any overlap is a detection).
    Identification,
    /// Continuous segmentation: duration-weighted overlap, seconds.
    Segmentation,
}

impl ScoringMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Detection => "der",
            Self::Identification => "ier",
            Self::Segmentation => "ser",
        }
    }
}
