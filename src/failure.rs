//! Failure-mode ranking by expected loss.

use crate::config::ConfigError;
use crate::models::{FailureMode, FailureModeReport};

/// Ranks failure modes by risk score (probability times impact),
/// descending, with name as the tie-breaker for a deterministic order.
///
/// An empty input yields a neutral report: zero expected loss and no
/// highest-anything names.
pub fn rank_failure_modes(modes: &[FailureMode]) -> Result<FailureModeReport, ConfigError> {
    for mode in modes {
        if !(0.0..=1.0).contains(&mode.probability) {
            return Err(ConfigError::InvalidProbability(mode.probability));
        }
    }

    let mut ranked = modes.to_vec();
    ranked.sort_by(|a, b| {
        b.risk_score()
            .total_cmp(&a.risk_score())
            .then_with(|| a.name.cmp(&b.name))
    });

    let total_expected_loss = ranked.iter().map(FailureMode::risk_score).sum();
    let highest_probability = modes
        .iter()
        .max_by(|a, b| a.probability.total_cmp(&b.probability))
        .map(|m| m.name.clone());
    let highest_impact = modes
        .iter()
        .max_by(|a, b| a.impact.total_cmp(&b.impact))
        .map(|m| m.name.clone());

    Ok(FailureModeReport {
        highest_risk: ranked.first().map(|m| m.name.clone()),
        highest_probability,
        highest_impact,
        total_expected_loss,
        ranked,
    })
}
