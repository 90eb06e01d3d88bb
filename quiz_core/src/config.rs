//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Minimum differences that make a comparison fair.
///
/// Pairs closer than these thresholds would make the question a coin flip,
/// so the selector rejects them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FairnessThresholds {
    /// Registration years apart for an age question.
    pub years: i32,
    /// Employee headcount difference.
    pub employees: f64,
    /// Revenue difference in euros.
    pub revenue: f64,
    /// Profit difference in euros.
    pub profit: f64,
    /// Labor tax difference in euros.
    pub labor_taxes: f64,
}

impl Default for FairnessThresholds {
    fn default() -> Self {
        Self {
            years: 7,
            employees: 20.0,
            revenue: 2_000_000.0,
            profit: 500_000.0,
            labor_taxes: 100_000.0,
        }
    }
}

/// Immutable engine configuration, passed in at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// A question kind cannot repeat within this many questions.
    pub type_cooldown: usize,
    /// A company cannot reappear within this many questions.
    pub company_cooldown: usize,
    /// Score at which the one-time promo reveal fires.
    pub promo_threshold: i32,
    /// Upper bound on the random sample scanned for a fair pair.
    pub sample_cap: usize,
    pub thresholds: FairnessThresholds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            type_cooldown: 5,
            company_cooldown: 2,
            promo_threshold: 5,
            sample_cap: 500,
            thresholds: FairnessThresholds::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
