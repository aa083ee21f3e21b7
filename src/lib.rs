//! Quantitative risk and schedule analysis engine.
//!
//! A pure computation library over in-memory inputs, covering two
//! decision-support paths that callers can combine into one report:
//!
//! - **Outcome risk**: discount an optimistic projection against a
//!   historical base rate ([`adjust_for_base_rate`]), run a Monte Carlo
//!   simulation with fat-tail shocks ([`simulate`]), and read the
//!   percentile and tail-risk snapshot ([`SimulationResult`]).
//! - **Planning risk**: validate a task dependency graph and compute the
//!   critical path, per-task slack, and near-critical set ([`schedule`]).
//!
//! Belief updates ([`bayesian_update`]), confidence intervals, power
//! analysis, and failure-mode ranking round out the toolkit. Everything
//! is synchronous and deterministic apart from the simulator's random
//! source, which is explicit and seedable.

pub mod base_rate;
pub mod config;
pub mod critical_path;
pub mod failure;
pub mod inference;
pub mod logging;
pub mod models;
pub mod simulation;
pub mod stats;

pub use base_rate::adjust_for_base_rate;
pub use config::{BaseRateTable, ConfigError, SchedulerConfig, SimulationConfig};
pub use critical_path::{schedule, GraphError};
pub use failure::rank_failure_modes;
pub use inference::{
    bayesian_update, confidence_interval, joint_probability, required_sample_size,
};
pub use models::{
    ConfidenceInterval, FailureMode, FailureModeReport, ScheduleResult, SimulationResult, Task,
    TaskTiming,
};
pub use simulation::{simulate, simulate_with_rng};
