//! # Route Optimizer
//!
//! Reorders a trip's stops to approximate the shortest path through them.
//!
//! ## Algorithm
//! 1. Set aside stops without usable coordinates
//! 2. Build a full pairwise [`DistanceMatrix`] over the remaining stops
//! 3. Walk nearest-neighbor from the start stop, breaking ties by lowest index
//! 4. Optionally refine the walk with first-improvement 2-opt
//! 5. Append the set-aside stops in their original relative order
//!
//! This is a heuristic. It does not guarantee the shortest route, and the
//! reordered route can even be longer than the input order, which is why
//! [`calculate_savings`] may be negative.
//!
//! Both the matrix and the walk are O(n²), fine for itineraries of a few
//! dozen stops. This is not meant for large TSP instances.

use log::{debug, info, warn};
use std::fmt;

use crate::geo_utils::{distance_miles, path_length_miles};
use crate::{Coordinate, Stop};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum number of stops with coordinates before reordering is attempted.
/// Two stops have only one possible path, so there is nothing to gain below three.
pub const MIN_STOPS_TO_OPTIMIZE: usize = 3;

/// Minimum improvement (miles) for a 2-opt move to be accepted.
const TWO_OPT_EPSILON: f64 = 1e-9;

/// Options for [`optimize_route`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptimizeOptions {
    /// Index, among the stops that have coordinates, of the stop the route starts from.
    /// Default: 0 (the first located stop never moves)
    pub start_index: usize,

    /// Run a 2-opt pass over the nearest-neighbor result.
    /// Default: false
    pub refine_with_two_opt: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            refine_with_two_opt: false,
        }
    }
}

/// What [`optimize_route`] did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OptimizationStatus {
    /// Stops were reordered (the order may still happen to match the input)
    Optimized,
    /// Fewer than three stops have coordinates; input returned as-is
    TooFewStops,
    /// No stop has coordinates; input returned as-is
    NoUsableCoordinates,
    /// `start_index` does not name a located stop; input returned as-is
    StartIndexOutOfRange,
}

impl fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationStatus::Optimized => write!(f, "optimized"),
            OptimizationStatus::TooFewStops => write!(f, "too few stops"),
            OptimizationStatus::NoUsableCoordinates => write!(f, "no usable coordinates"),
            OptimizationStatus::StartIndexOutOfRange => write!(f, "start index out of range"),
        }
    }
}

/// Result of [`optimize_route`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptimizedRoute {
    /// Stops in visiting order
    pub stops: Vec<Stop>,
    pub status: OptimizationStatus,
    /// How many stops lacked coordinates and were appended at the end
    pub unlocated_count: usize,
}

impl OptimizedRoute {
    fn unchanged(stops: &[Stop], status: OptimizationStatus, unlocated_count: usize) -> Self {
        Self {
            stops: stops.to_vec(),
            status,
            unlocated_count,
        }
    }

    /// True if the heuristic actually ran.
    pub fn was_optimized(&self) -> bool {
        self.status == OptimizationStatus::Optimized
    }
}

/// Symmetric pairwise distances (miles) with a zero diagonal.
///
/// Indexed by position in the slice it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Build the full matrix for a list of coordinates.
    ///
    /// Only the upper triangle is computed; the lower triangle mirrors it so
    /// `get(i, j) == get(j, i)` holds exactly.
    pub fn from_coordinates(coords: &[Coordinate]) -> Self {
        let size = coords.len();
        let mut values = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let d = distance_miles(&coords[i], &coords[j]);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }

        Self { size, values }
    }

    pub fn from_stops(stops: &[Stop]) -> Self {
        let coords: Vec<Coordinate> = stops.iter().map(|s| s.coordinates).collect();
        Self::from_coordinates(&coords)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of visiting matrix positions in `order`.
    pub fn path_length(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

// ============================================================================
// Core Functions
// ============================================================================

/// Reorder stops with the nearest-neighbor heuristic.
///
/// Stops without coordinates never take part in distance comparisons; they
/// are appended after the located stops in their original relative order.
/// When optimization cannot proceed the input is returned unchanged and
/// [`OptimizedRoute::status`] says why. With fewer than three located stops
/// the located stops keep their order and the rest still move to the end.
///
/// # Example
/// ```
/// use trip_insights::{Coordinate, Stop, OptimizeOptions, OptimizationStatus, optimize_route};
///
/// let stops = vec![
///     Stop::new("a", "A", Coordinate::new(40.0, -100.0)),
///     Stop::new("c", "C", Coordinate::new(42.0, -100.0)),
///     Stop::new("b", "B", Coordinate::new(41.0, -100.0)),
/// ];
///
/// let route = optimize_route(&stops, &OptimizeOptions::default());
/// assert_eq!(route.status, OptimizationStatus::Optimized);
/// let ids: Vec<&str> = route.stops.iter().map(|s| s.id.as_str()).collect();
/// assert_eq!(ids, vec!["a", "b", "c"]);
/// ```
pub fn optimize_route(stops: &[Stop], options: &OptimizeOptions) -> OptimizedRoute {
    debug!(
        "[TripOptimizer] optimize_route called with {} stops (start_index={}, two_opt={})",
        stops.len(),
        options.start_index,
        options.refine_with_two_opt
    );

    let (located, unlocated): (Vec<usize>, Vec<usize>) =
        (0..stops.len()).partition(|&i| stops[i].has_coordinates());

    if located.is_empty() && !stops.is_empty() {
        warn!("[TripOptimizer] No stop has usable coordinates, returning input order");
        return OptimizedRoute::unchanged(stops, OptimizationStatus::NoUsableCoordinates, unlocated.len());
    }

    if located.len() < MIN_STOPS_TO_OPTIMIZE {
        debug!("[TripOptimizer] {} located stops, nothing to reorder", located.len());
        // Unlocated stops still move behind the located ones
        let partitioned: Vec<Stop> = located
            .iter()
            .chain(&unlocated)
            .map(|&i| stops[i].clone())
            .collect();
        return OptimizedRoute {
            stops: partitioned,
            status: OptimizationStatus::TooFewStops,
            unlocated_count: unlocated.len(),
        };
    }

    if options.start_index >= located.len() {
        warn!(
            "[TripOptimizer] start_index {} out of range for {} located stops",
            options.start_index,
            located.len()
        );
        return OptimizedRoute::unchanged(stops, OptimizationStatus::StartIndexOutOfRange, unlocated.len());
    }

    let located_stops: Vec<Stop> = located.iter().map(|&i| stops[i].clone()).collect();
    let matrix = DistanceMatrix::from_stops(&located_stops);

    let mut order = nearest_neighbor_order(&matrix, options.start_index);
    if options.refine_with_two_opt {
        order = two_opt_refine(order, &matrix);
    }

    let mut result: Vec<Stop> = Vec::with_capacity(stops.len());
    result.extend(order.iter().map(|&i| located_stops[i].clone()));
    result.extend(unlocated.iter().map(|&i| stops[i].clone()));

    info!(
        "[TripOptimizer] Reordered {} stops: {:.1} -> {:.1} miles ({} without coordinates appended)",
        located_stops.len(),
        path_length_miles(&located_stops),
        matrix.path_length(&order),
        unlocated.len()
    );

    OptimizedRoute {
        stops: result,
        status: OptimizationStatus::Optimized,
        unlocated_count: unlocated.len(),
    }
}

/// Total miles of visiting `stops` in the given order.
///
/// Legs touching a stop without coordinates count as zero.
pub fn calculate_total_distance(stops: &[Stop]) -> f64 {
    path_length_miles(stops)
}

/// Miles saved by `optimized` relative to `original`.
///
/// Negative when the reordered route is longer.
pub fn calculate_savings(original: &[Stop], optimized: &[Stop]) -> f64 {
    calculate_total_distance(original) - calculate_total_distance(optimized)
}

/// Optimize many independent stop lists sequentially.
pub fn optimize_routes(routes: &[Vec<Stop>], options: &OptimizeOptions) -> Vec<OptimizedRoute> {
    routes.iter().map(|stops| optimize_route(stops, options)).collect()
}

/// Optimize many independent stop lists using rayon.
///
/// Same output as [`optimize_routes`], in the same order.
#[cfg(feature = "parallel")]
pub fn optimize_routes_parallel(routes: &[Vec<Stop>], options: &OptimizeOptions) -> Vec<OptimizedRoute> {
    info!("[TripOptimizer] Optimizing {} routes in parallel", routes.len());
    routes
        .par_iter()
        .map(|stops| optimize_route(stops, options))
        .collect()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Greedy walk from `start`, always moving to the closest unvisited position.
/// Strict `<` while scanning in index order keeps the lowest index on ties.
fn nearest_neighbor_order(matrix: &DistanceMatrix, start: usize) -> Vec<usize> {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = start;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let mut nearest: Option<(usize, f64)> = None;

        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let d = matrix.get(current, candidate);
            match nearest {
                Some((_, best)) if d >= best => {}
                _ => nearest = Some((candidate, d)),
            }
        }

        let Some((next, _)) = nearest else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// First-improvement 2-opt over an open path with a fixed first position.
///
/// Reversing `order[i..=j]` replaces legs (i-1, i) and (j, j+1) with
/// (i-1, j) and (i, j+1); when `j` is the last position there is no
/// trailing leg to replace.
fn two_opt_refine(mut order: Vec<usize>, matrix: &DistanceMatrix) -> Vec<usize> {
    let n = order.len();
    if n < 3 {
        return order;
    }

    let mut improved = true;
    let mut passes = 0;
    while improved {
        improved = false;
        passes += 1;

        for i in 1..n - 1 {
            for j in (i + 1)..n {
                let before_head = matrix.get(order[i - 1], order[i]);
                let after_head = matrix.get(order[i - 1], order[j]);
                let (before_tail, after_tail) = if j + 1 < n {
                    (matrix.get(order[j], order[j + 1]), matrix.get(order[i], order[j + 1]))
                } else {
                    (0.0, 0.0)
                };

                let delta = (after_head + after_tail) - (before_head + before_tail);
                if delta < -TWO_OPT_EPSILON {
                    order[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    debug!("[TripOptimizer] 2-opt converged after {} passes", passes);
    order
}

// ============================================================================
// Tests
// ============================================================================
