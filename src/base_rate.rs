//! Base-rate discounting of optimistic projections.

use crate::config::BaseRateTable;

/// Blends an optimistic projection with the historical base rate for its
/// scenario category.
///
/// Known categories are weighted 70% base rate, 30% projection. Unmodeled
/// categories fall back to a conservative one third of the projection.
/// Pure arithmetic; keeping the projection in a sensible numeric domain
/// is the caller's responsibility.
pub fn adjust_for_base_rate(
    optimistic_projection: f64,
    scenario_category: &str,
    base_rates: &BaseRateTable,
) -> f64 {
    match base_rates.get(scenario_category) {
        Some(rate) => rate * 0.7 + optimistic_projection * 0.3,
        None => optimistic_projection / 3.0,
    }
}
