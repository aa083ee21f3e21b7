//! Critical-path analysis over task dependency graphs.
//!
//! The forward and backward passes each run exactly once over an explicit
//! topological order (Kahn's algorithm). A graph with no valid order is
//! rejected as cyclic up front; there is no fixed-point iteration that
//! could spin on bad input.

use std::cmp::Ordering;
use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::SchedulerConfig;
use crate::models::{ScheduleResult, Task, TaskTiming};
use crate::{log_detail, log_summary, log_trace};

/// Errors that can occur while scheduling a task graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate task id '{0}'")]
    DuplicateTask(String),
    #[error("task '{task}' depends on unknown task '{dependency}'")]
    DanglingDependency { task: String, dependency: String },
    #[error("circular dependency involving tasks {0:?}")]
    CycleDetected(Vec<String>),
}

/// Schedules a task collection: validates the graph, runs the forward and
/// backward passes, and extracts slack and critical-path information.
///
/// On success every task's `timing` is populated in place and the returned
/// result is an immutable snapshot. On error the tasks are left untouched.
/// The `&mut` borrow confines the mutation to this single call; callers
/// needing concurrent analysis of one collection should hand out copies.
///
/// Re-running on the same input fields yields an identical result.
pub fn schedule(
    tasks: &mut [Task],
    config: &SchedulerConfig,
) -> Result<ScheduleResult, GraphError> {
    let (deps, dependents) = build_edges(tasks)?;
    let order = topological_order(tasks, &deps, &dependents)?;
    log_trace!(
        config.verbosity,
        "topological order: {:?}",
        order.iter().map(|&i| tasks[i].id.as_str()).collect::<Vec<_>>()
    );

    let n = tasks.len();
    let mut timings = vec![TaskTiming::default(); n];

    // Forward pass: earliest start is the latest finish among dependencies
    for &i in &order {
        let mut earliest_start: f64 = 0.0;
        for &d in &deps[i] {
            earliest_start = earliest_start.max(timings[d].earliest_finish);
        }
        timings[i].earliest_start = earliest_start;
        timings[i].earliest_finish = earliest_start + tasks[i].duration;
    }

    let project_duration = timings
        .iter()
        .map(|t| t.earliest_finish)
        .fold(0.0, f64::max);

    // Backward pass in reverse topological order: latest finish is the
    // earliest latest-start among dependents, or the project end for sinks
    for &i in order.iter().rev() {
        let mut latest_finish = f64::MAX;
        for &d in &dependents[i] {
            latest_finish = latest_finish.min(timings[d].latest_start);
        }
        if latest_finish == f64::MAX {
            latest_finish = project_duration;
        }
        timings[i].latest_finish = latest_finish;
        timings[i].latest_start = latest_finish - tasks[i].duration;
        timings[i].slack = timings[i].latest_start - timings[i].earliest_start;
        log_detail!(
            config.verbosity,
            "task '{}': es={:.3} ef={:.3} ls={:.3} lf={:.3} slack={:.3}",
            tasks[i].id,
            timings[i].earliest_start,
            timings[i].earliest_finish,
            timings[i].latest_start,
            timings[i].latest_finish,
            timings[i].slack
        );
    }

    let mut critical: Vec<usize> = (0..n).filter(|&i| timings[i].is_critical()).collect();
    critical.sort_by(|&a, &b| {
        cmp_f64(timings[a].earliest_start, timings[b].earliest_start)
            .then_with(|| tasks[a].id.cmp(&tasks[b].id))
    });

    let mut near: Vec<usize> = (0..n)
        .filter(|&i| {
            !timings[i].is_critical()
                && timings[i].slack > 0.0
                && timings[i].slack <= config.near_critical_threshold
        })
        .collect();
    near.sort_by(|&a, &b| {
        cmp_f64(timings[a].slack, timings[b].slack).then_with(|| tasks[a].id.cmp(&tasks[b].id))
    });

    let result = ScheduleResult {
        project_duration,
        critical_path: critical.iter().map(|&i| tasks[i].id.clone()).collect(),
        slack: tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), timings[i].slack))
            .collect(),
        near_critical: near.iter().map(|&i| tasks[i].id.clone()).collect(),
    };

    log_summary!(
        config.verbosity,
        "scheduled {} tasks: duration {:.3}, {} critical, {} near-critical",
        n,
        project_duration,
        result.critical_path.len(),
        result.near_critical.len()
    );

    // Publish timings only once the whole pass has succeeded
    for (task, timing) in tasks.iter_mut().zip(timings) {
        task.timing = Some(timing);
    }

    Ok(result)
}

/// Compare f64 values for sorting, treating incomparable values as equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Resolve dependency ids to slice indices, building forward and reverse
/// adjacency lists. Rejects duplicate ids and dangling references.
fn build_edges(tasks: &[Task]) -> Result<(Vec<Vec<usize>>, Vec<Vec<usize>>), GraphError> {
    let mut index: FxHashMap<&str, usize> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for (i, task) in tasks.iter().enumerate() {
        if index.insert(task.id.as_str(), i).is_some() {
            return Err(GraphError::DuplicateTask(task.id.clone()));
        }
    }

    let mut deps: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    for (i, task) in tasks.iter().enumerate() {
        for dep in &task.dependencies {
            let Some(&j) = index.get(dep.as_str()) else {
                return Err(GraphError::DanglingDependency {
                    task: task.id.clone(),
                    dependency: dep.clone(),
                });
            };
            deps[i].push(j);
            dependents[j].push(i);
        }
    }

    Ok((deps, dependents))
}

/// Kahn's algorithm. Returns indices in dependency-first order, or the
/// set of ids left unordered when the graph has a cycle.
fn topological_order(
    tasks: &[Task],
    deps: &[Vec<usize>],
    dependents: &[Vec<usize>],
) -> Result<Vec<usize>, GraphError> {
    let mut in_degree: Vec<usize> = deps.iter().map(Vec::len).collect();

    let mut queue: VecDeque<usize> = (0..tasks.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order: Vec<usize> = Vec::with_capacity(tasks.len());

    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &d in &dependents[i] {
            in_degree[d] -= 1;
            if in_degree[d] == 0 {
                queue.push_back(d);
            }
        }
    }

    if order.len() != tasks.len() {
        let mut stuck: Vec<String> = (0..tasks.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| tasks[i].id.clone())
            .collect();
        stuck.sort();
        return Err(GraphError::CycleDetected(stuck));
    }

    Ok(order)
}
