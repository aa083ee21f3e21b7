//! Core value objects for the risk and schedule analysis engine.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A unit of work in a project dependency graph.
///
/// Durations are abstract non-negative time units; the caller defines what
/// one unit means. Keeping durations finite and non-negative is the
/// caller's responsibility.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Time units this task takes. Zero marks a milestone.
    pub duration: f64,
    /// Identifiers of tasks that must finish before this one starts.
    pub dependencies: Vec<String>,
    /// Populated in place by a successful scheduling pass; `None` before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<TaskTiming>,
}

impl Task {
    /// Creates a task with the given dependencies.
    pub fn new(id: impl Into<String>, duration: f64, dependencies: Vec<String>) -> Self {
        Self {
            id: id.into(),
            duration,
            dependencies,
            timing: None,
        }
    }
}

/// Per-task timing information from a scheduling pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start.
    pub slack: f64,
}

impl TaskTiming {
    /// Whether this task sits on a critical path.
    pub fn is_critical(&self) -> bool {
        // Allow small epsilon for floating point comparison
        self.slack.abs() < 1e-9
    }
}

/// Immutable result of one scheduling pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Max earliest finish across all tasks (the makespan).
    pub project_duration: f64,
    /// Zero-slack task ids, ordered by earliest start (ties by id).
    /// Disjoint zero-slack chains all appear here.
    pub critical_path: Vec<String>,
    /// Slack per task id.
    pub slack: FxHashMap<String, f64>,
    /// Tasks with small positive slack (at most the configured threshold),
    /// ordered by ascending slack, ties by id.
    pub near_critical: Vec<String>,
}

/// A way the modeled endeavor can fail, with how likely and how bad.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureMode {
    /// Unique mode name.
    pub name: String,
    /// Probability of occurrence, in [0, 1].
    pub probability: f64,
    /// Severity if it occurs (non-negative scalar).
    pub impact: f64,
}

impl FailureMode {
    pub fn new(name: impl Into<String>, probability: f64, impact: f64) -> Self {
        Self {
            name: name.into(),
            probability,
            impact,
        }
    }

    /// Expected loss contribution: probability times impact.
    pub fn risk_score(&self) -> f64 {
        self.probability * self.impact
    }
}

/// Ranked failure-mode assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureModeReport {
    /// Modes sorted by risk score descending (ties by name).
    pub ranked: Vec<FailureMode>,
    /// Sum of all risk scores.
    pub total_expected_loss: f64,
    /// Name of the mode with the highest risk score.
    pub highest_risk: Option<String>,
    /// Name of the mode with the highest probability.
    pub highest_probability: Option<String>,
    /// Name of the mode with the highest impact.
    pub highest_impact: Option<String>,
}

/// Immutable snapshot of one Monte Carlo run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation of the samples.
    pub std_dev: f64,
    pub p5: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    /// Worst sampled outcome.
    pub min: f64,
    /// Best sampled outcome.
    pub max: f64,
    /// Fraction of samples below zero, in [0, 1].
    pub probability_of_loss: f64,
    /// 5th percentile outcome.
    pub value_at_risk_95: f64,
    /// Mean of samples at or below the value at risk.
    pub conditional_value_at_risk_95: f64,
}

impl SimulationResult {
    /// The percentile set in rank order, for monotonicity checks and
    /// range summaries.
    pub fn percentiles(&self) -> [f64; 7] {
        [
            self.p5, self.p10, self.p25, self.p50, self.p75, self.p90, self.p95,
        ]
    }
}

/// Symmetric interval around a point estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
