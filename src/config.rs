//! Configuration types for the analysis engine.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameter-validation failures, raised before any computation runs.
/// Invalid parameters are never silently clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("volatility {0} must be non-negative")]
    InvalidVolatility(f64),
    #[error("iteration count must be positive")]
    InvalidIterations,
    #[error("sample size {0} must be at least 2")]
    InvalidSampleSize(u32),
    #[error("effect size must be non-zero")]
    InvalidEffectSize,
}

/// Configuration for the critical-path scheduler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Tasks with slack in (0, threshold] are reported as near-critical.
    pub near_critical_threshold: f64,
    /// Verbosity level: 0=silent, 1=summary, 2=detail, 3=trace.
    pub verbosity: u8,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            near_critical_threshold: 1.0,
            verbosity: 0,
        }
    }
}

/// Configuration for one Monte Carlo outcome simulation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Expected outcome value.
    pub base_case: f64,
    /// Standard deviation as a non-negative fraction of the base case.
    pub volatility: f64,
    /// Number of samples to draw.
    pub iterations: usize,
    /// Whether to inject low-probability catastrophic outcomes.
    pub black_swan: bool,
    /// Per-sample probability of a catastrophic overwrite.
    pub black_swan_probability: f64,
    /// Catastrophic outcome as a fraction of the base case.
    pub black_swan_severity: f64,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a config around the given base case with the standard
    /// defaults: 30% volatility, 10k iterations, black swans enabled at
    /// 1% probability and 10% residual value.
    pub fn new(base_case: f64) -> Self {
        Self {
            base_case,
            volatility: 0.3,
            iterations: 10_000,
            black_swan: true,
            black_swan_probability: 0.01,
            black_swan_severity: 0.1,
            seed: None,
        }
    }

    /// Checks every parameter before a simulation consumes the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.volatility.is_nan() || self.volatility < 0.0 {
            return Err(ConfigError::InvalidVolatility(self.volatility));
        }
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        if !(0.0..=1.0).contains(&self.black_swan_probability) {
            return Err(ConfigError::InvalidProbability(self.black_swan_probability));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Historical base rates keyed by scenario category.
///
/// Passed explicitly at call time so alternate tables never affect
/// concurrent callers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BaseRateTable {
    rates: FxHashMap<String, f64>,
}

impl BaseRateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            rates: FxHashMap::default(),
        }
    }

    /// Adds or replaces a category rate.
    pub fn with_rate(mut self, category: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(category.into(), rate);
        self
    }

    /// Looks up the rate for a category.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.rates.get(category).copied()
    }

    /// Number of categories in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table has no categories.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for BaseRateTable {
    /// Empirical success rates for common venture scenarios.
    fn default() -> Self {
        Self::new()
            .with_rate("startup_unicorn", 0.00006)
            .with_rate("new_product_success", 0.05)
            .with_rate("it_project_on_time", 0.16)
            .with_rate("ma_value_creation", 0.30)
            .with_rate("platform_network_effects", 0.01)
            .with_rate("behavior_change_scale", 0.08)
            .with_rate("regulatory_approval_new", 0.22)
            .with_rate("disruption_incumbent", 0.03)
    }
}
