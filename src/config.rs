use serde::{Deserialize, Serialize};

pub const DEFAULT_TOLERANCE: f64 = 1e-9;
pub const DEFAULT_SATURATION_TOLERANCE: f64 = 1e-7;

/// Numeric knobs of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Slack used for capacity, demand and residual comparisons.
    pub tolerance: f64,
    /// Slack used when deciding whether an edge is saturated in a certificate.
    pub saturation_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            saturation_tolerance: DEFAULT_SATURATION_TOLERANCE,
        }
    }
}
