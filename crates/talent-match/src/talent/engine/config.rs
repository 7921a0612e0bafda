use serde::{Deserialize, Serialize};

pub const DEFAULT_RATE_CEILING: f64 = 150.0;
pub const DEFAULT_TOP_STRENGTHS: usize = 3;

/// Scoring knobs shared by the engine and the ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRateConfig {
    /// Upper cap applied to every variable rate.
    pub rate_ceiling: f64,
    /// Number of strengths themes listed per ranked candidate.
    pub top_strengths: usize,
}

impl Default for MatchRateConfig {
    fn default() -> Self {
        Self {
            rate_ceiling: DEFAULT_RATE_CEILING,
            top_strengths: DEFAULT_TOP_STRENGTHS,
        }
    }
}
