//! Monte Carlo outcome simulation with fat-tail shock injection.
//!
//! Samples outcomes from a normal distribution around a base case, then
//! independently overwrites a small expected fraction of samples with a
//! catastrophic residual value. The realized catastrophic fraction is a
//! random variable near the configured probability, not an exact count.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, SimulationConfig};
use crate::models::SimulationResult;
use crate::stats;

/// Runs a simulation with a generator built from the config.
///
/// A fixed `seed` makes two runs with identical config bit-identical;
/// without one the generator is seeded from the OS and results are only
/// statistically bounded.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationResult, ConfigError> {
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    simulate_with_rng(config, &mut rng)
}

/// Runs a simulation consuming a caller-supplied generator.
///
/// Samples are drawn sequentially and are mutually independent, so a
/// caller may shard the iteration count across workers, provided each
/// shard gets its own generator and the aggregation happens after all
/// samples are collected (with seeded runs, shard boundaries must be
/// deterministic to keep results reproducible).
pub fn simulate_with_rng<R: Rng>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationResult, ConfigError> {
    config.validate()?;

    let spread = config.base_case * config.volatility;
    let shock_value = config.base_case * config.black_swan_severity;

    let mut samples = Vec::with_capacity(config.iterations);
    for _ in 0..config.iterations {
        let mut outcome = config.base_case + spread * standard_normal(rng);
        if config.black_swan && rng.random::<f64>() < config.black_swan_probability {
            outcome = shock_value;
        }
        samples.push(outcome);
    }

    Ok(summarize(&mut samples))
}

/// One standard normal deviate via the Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - U keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Collapses a non-empty sample set into the full statistic snapshot.
/// Sorts the samples in place.
fn summarize(samples: &mut [f64]) -> SimulationResult {
    let mean = stats::mean(samples);
    let std_dev = stats::std_dev(samples);
    let losses = samples.iter().filter(|&&s| s < 0.0).count();

    samples.sort_by(|a, b| a.total_cmp(b));

    let p5 = stats::percentile(samples, 5.0);
    let value_at_risk_95 = p5;
    let tail_len = samples.partition_point(|&s| s <= value_at_risk_95);
    let conditional_value_at_risk_95 = stats::mean(&samples[..tail_len]);

    SimulationResult {
        mean,
        median: stats::median(samples),
        std_dev,
        p5,
        p10: stats::percentile(samples, 10.0),
        p25: stats::percentile(samples, 25.0),
        p50: stats::percentile(samples, 50.0),
        p75: stats::percentile(samples, 75.0),
        p90: stats::percentile(samples, 90.0),
        p95: stats::percentile(samples, 95.0),
        min: samples[0],
        max: samples[samples.len() - 1],
        probability_of_loss: losses as f64 / samples.len() as f64,
        value_at_risk_95,
        conditional_value_at_risk_95,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_rate::adjust_for_base_rate;
    use crate::config::BaseRateTable;

    fn seeded(base_case: f64, seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::new(base_case)
        }
    }

    #[test]
    fn test_seeded_runs_are_bit_identical() {
        let config = seeded(1_000_000.0, 42);
        let first = simulate(&config).unwrap();
        let second = simulate(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let first = simulate(&seeded(1_000_000.0, 1)).unwrap();
        let second = simulate(&seeded(1_000_000.0, 2)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_injected_rng_matches_seeded_wrapper() {
        let config = seeded(500.0, 7);
        let via_wrapper = simulate(&config).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let via_injection = simulate_with_rng(&config, &mut rng).unwrap();
        assert_eq!(via_wrapper, via_injection);
    }

    #[test]
    fn test_percentiles_non_decreasing() {
        for seed in 0..5 {
            let result = simulate(&seeded(10_000.0, seed)).unwrap();
            let percentiles = result.percentiles();
            for pair in percentiles.windows(2) {
                assert!(
                    pair[0] <= pair[1],
                    "percentiles out of order: {:?}",
                    percentiles
                );
            }
            assert!(result.min <= result.p5);
            assert!(result.p95 <= result.max);
        }
    }

    #[test]
    fn test_probability_of_loss_in_unit_range() {
        let result = simulate(&seeded(100.0, 3)).unwrap();
        assert!((0.0..=1.0).contains(&result.probability_of_loss));

        // A deeply negative base case loses essentially always
        let config = SimulationConfig {
            volatility: 0.01,
            black_swan: false,
            ..seeded(-1_000.0, 3)
        };
        let result = simulate(&config).unwrap();
        assert_eq!(result.probability_of_loss, 1.0);
    }

    #[test]
    fn test_zero_volatility_degenerates_to_base_case() {
        let config = SimulationConfig {
            volatility: 0.0,
            black_swan: false,
            iterations: 100,
            ..seeded(250.0, 9)
        };
        let result = simulate(&config).unwrap();
        assert_eq!(result.mean, 250.0);
        assert_eq!(result.std_dev, 0.0);
        assert_eq!(result.p5, 250.0);
        assert_eq!(result.p95, 250.0);
        assert_eq!(result.min, 250.0);
        assert_eq!(result.max, 250.0);
    }

    #[test]
    fn test_certain_black_swan_overwrites_every_sample() {
        let config = SimulationConfig {
            black_swan_probability: 1.0,
            iterations: 100,
            ..seeded(1_000.0, 11)
        };
        let result = simulate(&config).unwrap();
        assert_eq!(result.mean, 100.0);
        assert_eq!(result.min, 100.0);
        assert_eq!(result.max, 100.0);
    }

    #[test]
    fn test_sample_moments_track_config() {
        let config = SimulationConfig {
            volatility: 0.2,
            black_swan: false,
            ..seeded(100.0, 17)
        };
        let result = simulate(&config).unwrap();
        assert!((result.mean - 100.0).abs() < 2.0);
        assert!((result.std_dev - 20.0).abs() < 2.0);
        assert!((result.median - 100.0).abs() < 2.0);
    }

    #[test]
    fn test_black_swans_fatten_the_left_tail() {
        let without = SimulationConfig {
            volatility: 0.1,
            black_swan: false,
            ..seeded(100.0, 23)
        };
        let with = SimulationConfig {
            black_swan: true,
            black_swan_probability: 0.1,
            ..without.clone()
        };
        let base = simulate(&without).unwrap();
        let shocked = simulate(&with).unwrap();
        // 10% shocks at a 10x haircut drag the 5th percentile far below
        // the unshocked one
        assert!(shocked.p5 < base.p5 - 10.0);
        assert!(shocked.min <= base.min);
    }

    #[test]
    fn test_realized_swan_fraction_is_approximate() {
        // With probability 0.05 and the samples collapsing to exactly the
        // shock value, count the realized fraction through the result
        let config = SimulationConfig {
            volatility: 0.0,
            black_swan: true,
            black_swan_probability: 0.05,
            ..seeded(1_000.0, 29)
        };
        let result = simulate(&config).unwrap();
        // Shocked samples land at 100, the rest at 1000
        let fraction = (result.mean - 1_000.0) / (100.0 - 1_000.0);
        assert!((fraction - 0.05).abs() < 0.01);
        assert!(fraction > 0.0);
    }

    #[test]
    fn test_cvar_at_or_below_var() {
        for seed in [5, 13, 31] {
            let result = simulate(&seeded(10_000.0, seed)).unwrap();
            assert!(result.conditional_value_at_risk_95 <= result.value_at_risk_95);
            assert_eq!(result.value_at_risk_95, result.p5);
        }
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let config = SimulationConfig {
            volatility: -0.5,
            ..SimulationConfig::new(100.0)
        };
        assert_eq!(
            simulate(&config),
            Err(ConfigError::InvalidVolatility(-0.5))
        );

        let config = SimulationConfig {
            iterations: 0,
            ..SimulationConfig::new(100.0)
        };
        assert_eq!(simulate(&config), Err(ConfigError::InvalidIterations));
    }

    #[test]
    fn test_single_iteration() {
        let config = SimulationConfig {
            iterations: 1,
            ..seeded(50.0, 1)
        };
        let result = simulate(&config).unwrap();
        assert_eq!(result.min, result.max);
        assert_eq!(result.mean, result.median);
        assert_eq!(result.p5, result.p95);
    }

    #[test]
    fn test_adjusted_projection_pipeline() {
        // Base-rate correction feeding the simulator, the end-to-end
        // outcome-risk path
        let adjusted =
            adjust_for_base_rate(10_000_000.0, "new_product_success", &BaseRateTable::default());
        let config = SimulationConfig {
            volatility: 0.5,
            ..seeded(adjusted, 99)
        };
        let result = simulate(&config).unwrap();
        assert!((result.mean - adjusted).abs() < adjusted * 0.05);
        assert!(result.p5 < result.median && result.median < result.p95);
    }
}
