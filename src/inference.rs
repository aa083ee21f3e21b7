//! Bayesian belief updates and frequentist interval estimation.

use crate::config::ConfigError;
use crate::models::ConfidenceInterval;
use crate::stats;

/// Below this sample size the interval estimator switches from the normal
/// to the t distribution.
const NORMAL_APPROXIMATION_MIN_N: u32 = 30;

fn check_probability(p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::InvalidProbability(p));
    }
    Ok(())
}

/// Updates a prior probability given the likelihood of the observed
/// evidence under the hypothesis and under its negation.
///
/// Zero total evidence is non-informative and returns the prior
/// unchanged. The posterior always lies in [0, 1].
pub fn bayesian_update(
    prior: f64,
    likelihood_given_true: f64,
    likelihood_given_false: f64,
) -> Result<f64, ConfigError> {
    check_probability(prior)?;
    check_probability(likelihood_given_true)?;
    check_probability(likelihood_given_false)?;

    let evidence = likelihood_given_true * prior + likelihood_given_false * (1.0 - prior);
    if evidence == 0.0 {
        return Ok(prior);
    }
    Ok(likelihood_given_true * prior / evidence)
}

/// Symmetric two-tailed confidence interval around a point estimate.
///
/// Uses Student's t with `sample_size - 1` degrees of freedom below 30
/// samples, the normal approximation at or above. Sample sizes below 2
/// are rejected: the t path needs at least one degree of freedom.
pub fn confidence_interval(
    estimate: f64,
    standard_error: f64,
    sample_size: u32,
    confidence_level: f64,
) -> Result<ConfidenceInterval, ConfigError> {
    if sample_size < 2 {
        return Err(ConfigError::InvalidSampleSize(sample_size));
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(ConfigError::InvalidProbability(confidence_level));
    }

    let critical_value = if sample_size < NORMAL_APPROXIMATION_MIN_N {
        stats::t_critical_value(confidence_level, sample_size - 1)
    } else {
        stats::normal_critical_value(confidence_level)
    };

    let margin = critical_value * standard_error;
    Ok(ConfidenceInterval {
        lower: estimate - margin,
        upper: estimate + margin,
    })
}

/// Required per-group sample size for a two-tailed test to detect the
/// given standardized effect size at the given power and significance.
///
/// `n = ceil(((z_crit + z_power)^2 * 2) / effect_size^2)`, rounded up.
pub fn required_sample_size(effect_size: f64, power: f64, alpha: f64) -> Result<u64, ConfigError> {
    if effect_size == 0.0 {
        return Err(ConfigError::InvalidEffectSize);
    }
    if !(power > 0.0 && power < 1.0) {
        return Err(ConfigError::InvalidProbability(power));
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ConfigError::InvalidProbability(alpha));
    }

    let z_crit = stats::normal_ppf(1.0 - alpha / 2.0);
    let z_power = stats::normal_ppf(power);
    let n = ((z_crit + z_power) * (z_crit + z_power) * 2.0) / (effect_size * effect_size);
    Ok(n.ceil() as u64)
}

/// Probability of every event occurring.
///
/// Independent events multiply directly; for dependent events the product
/// is discounted by a conservative 0.7 factor. An empty list yields the
/// multiplicative identity 1.0.
pub fn joint_probability(probabilities: &[f64], independent: bool) -> Result<f64, ConfigError> {
    for &p in probabilities {
        check_probability(p)?;
    }
    let joint: f64 = probabilities.iter().product();
    Ok(if independent { joint } else { joint * 0.7 })
}
