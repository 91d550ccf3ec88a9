//! Decision banding
//!
//! Maps the default probability to one of three risk bands via fixed
//! thresholds. Intervals are half-open: [0, 0.4) / [0.4, 0.7) / [0.7, 1].

use serde::{Deserialize, Serialize};

pub const MODERATE_THRESHOLD: f64 = 0.4;
pub const HIGH_THRESHOLD: f64 = 0.7;

/// Risk band returned to the advisor dashboard. Serialized labels are the
/// French decision strings the dashboard displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    #[serde(rename = "Éligible")]
    Eligible,
    #[serde(rename = "Risque modéré")]
    ModerateRisk,
    #[serde(rename = "Risque élevé")]
    HighRisk,
}

impl RiskBand {
    pub fn from_probability(p: f64) -> Self {
        if p < MODERATE_THRESHOLD {
            RiskBand::Eligible
        } else if p < HIGH_THRESHOLD {
            RiskBand::ModerateRisk
        } else {
            RiskBand::HighRisk
        }
    }
}
