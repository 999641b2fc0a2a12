//! Route planner: nearest-neighbor construction, 2-opt refinement over an
//! open path, and the `plan_route` orchestration entry point.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::matrix::DistanceMatrix;
use crate::table::{DistanceTable, FallbackSource, TableSource};
use crate::traits::Location;

/// Improvement threshold for 2-opt; swaps below this are floating-point noise.
const IMPROVEMENT_EPSILON: f64 = 1e-6;

/// Default cap on full 2-opt passes.
pub const DEFAULT_MAX_ITERATIONS: usize = 2000;

/// Which distance source backs the matrix for a plan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMode {
    /// Consult only the measured-distance table. Any required pair absent
    /// from the table refuses the plan with the offending pairs reported.
    TableOnly,
    /// Table first, great-circle estimate for coordinate-bearing pairs the
    /// table does not cover.
    TableWithFallback,
}

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub mode: DistanceMode,
    /// Cap on full 2-opt passes.
    pub max_iterations: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            mode: DistanceMode::TableWithFallback,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    /// Location names are the session-unique key; a repeated name would
    /// alias matrix rows.
    #[error("duplicate location name in request: {0}")]
    DuplicateLocation(String),
}

/// Outcome of one plan request.
///
/// Unknown distances are never an error: they surface here as
/// `missing_pairs` and an incomplete tour, and the caller decides policy.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
    /// Visiting order as indices into the requested location list.
    /// Starts at 0 when non-empty; empty on strict-mode refusal.
    pub order: Vec<usize>,
    /// Sum of the finite legs of the order, in kilometers.
    pub total_km: f64,
    /// True when every location is visited and every leg resolved.
    pub complete: bool,
    /// Name pairs the active source could not resolve.
    pub missing_pairs: Vec<(String, String)>,
}

/// Greedy open-path construction from the fixed start at index 0.
///
/// Each step extends to the unvisited index with the smallest finite
/// distance from the last stop (strict `<`, so ties go to the lowest
/// index). Stops early when no finite candidate remains; the returned
/// tour is then partial.
pub fn nearest_neighbor(matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut last = 0;
    order.push(last);
    visited[last] = true;

    for _ in 1..n {
        let mut best: Option<(usize, f64)> = None;
        for j in 0..n {
            if visited[j] {
                continue;
            }
            if let Some(d) = matrix.get(last, j) {
                if best.is_none_or(|(_, best_d)| d < best_d) {
                    best = Some((j, d));
                }
            }
        }
        match best {
            Some((j, _)) => {
                visited[j] = true;
                order.push(j);
                last = j;
            }
            // Remaining locations are unreachable from here.
            None => break,
        }
    }

    order
}

/// 2-opt refinement of an open path; position 0 stays fixed.
///
/// First-improvement: each pass scans sub-path reversals in (i, k) order
/// and applies a swap as soon as its delta beats the epsilon. A pass with
/// at least one swap triggers another; stops on a clean pass or at
/// `max_iterations` passes.
///
/// Unknown legs evaluate as positive infinity in the delta, so a swap is
/// taken only when it is a strict finite improvement or when it replaces
/// an unknown leg with known ones (INF - INF is NaN, and NaN comparisons
/// are false, so trading one unknown leg for another never "improves").
pub fn two_opt(order: &mut [usize], matrix: &DistanceMatrix, max_iterations: usize) {
    let n = order.len();
    if n < 4 {
        return;
    }

    let leg = |a: usize, b: usize| matrix.get(a, b).unwrap_or(f64::INFINITY);

    let mut passes = 0;
    while passes < max_iterations {
        passes += 1;
        let mut improved = false;
        for i in 1..n - 2 {
            for k in i + 1..n - 1 {
                let a = order[i - 1];
                let b = order[i];
                let c = order[k];
                let d = order[k + 1];
                let delta = (leg(a, c) + leg(b, d)) - (leg(a, b) + leg(c, d));
                if delta < -IMPROVEMENT_EPSILON {
                    order[i..=k].reverse();
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
    debug!(passes, "2-opt finished");
}

/// Sum of the finite legs of an order, plus whether any leg was unknown.
pub fn path_length(order: &[usize], matrix: &DistanceMatrix) -> (f64, bool) {
    let mut total = 0.0;
    let mut has_unknown = false;
    for pair in order.windows(2) {
        match matrix.get(pair[0], pair[1]) {
            Some(d) => total += d,
            None => has_unknown = true,
        }
    }
    (total, has_unknown)
}

/// Plan an open-path route over the requested locations.
///
/// The start is the location at position 0 by convention. The matrix and
/// tour are freshly built per call; nothing is shared between requests.
pub fn plan_route(
    locations: &[Location],
    table: &DistanceTable,
    options: &PlanOptions,
) -> Result<PlanResult, PlanError> {
    let mut seen = HashSet::new();
    for location in locations {
        if !seen.insert(location.name()) {
            return Err(PlanError::DuplicateLocation(location.name().to_string()));
        }
    }

    let matrix = match options.mode {
        DistanceMode::TableOnly => DistanceMatrix::build(locations, &TableSource::new(table)),
        DistanceMode::TableWithFallback => {
            DistanceMatrix::build(locations, &FallbackSource::new(table))
        }
    };

    let missing_pairs: Vec<(String, String)> = matrix
        .missing_pairs()
        .into_iter()
        .map(|(i, j)| {
            (
                locations[i].name().to_string(),
                locations[j].name().to_string(),
            )
        })
        .collect();

    if options.mode == DistanceMode::TableOnly && !missing_pairs.is_empty() {
        debug!(
            missing = missing_pairs.len(),
            "refusing table-only plan with unresolved pairs"
        );
        return Ok(PlanResult {
            order: Vec::new(),
            total_km: 0.0,
            complete: false,
            missing_pairs,
        });
    }

    let mut order = nearest_neighbor(&matrix);
    two_opt(&mut order, &matrix, options.max_iterations);

    let (total_km, has_unknown_leg) = path_length(&order, &matrix);
    let complete = order.len() == locations.len() && !has_unknown_leg;
    debug!(
        stops = order.len(),
        total_km, complete, "plan request finished"
    );

    Ok(PlanResult {
        order,
        total_km,
        complete,
        missing_pairs,
    })
}
