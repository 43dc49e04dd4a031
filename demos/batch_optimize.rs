//! Optimize many independent itineraries in parallel.
//!
//! Run with: cargo run --example batch_optimize --features parallel

use std::time::Instant;
use trip_insights::{
    calculate_savings, optimize_routes, optimize_routes_parallel, Coordinate, OptimizeOptions, Stop,
};

fn main() {
    println!("Batch Route Optimization Example\n");

    // Synthetic itineraries scattered over the western US
    let routes: Vec<Vec<Stop>> = (0..200).map(synthetic_route).collect();
    let options = OptimizeOptions::default();

    let start = Instant::now();
    let sequential = optimize_routes(&routes, &options);
    let sequential_time = start.elapsed();

    let start = Instant::now();
    let parallel = optimize_routes_parallel(&routes, &options);
    let parallel_time = start.elapsed();

    assert_eq!(sequential, parallel);

    let total_savings: f64 = routes
        .iter()
        .zip(&parallel)
        .map(|(original, optimized)| calculate_savings(original, &optimized.stops))
        .sum();
    let improved = routes
        .iter()
        .zip(&parallel)
        .filter(|(original, optimized)| calculate_savings(original, &optimized.stops) > 0.0)
        .count();

    println!("Optimized {} routes", routes.len());
    println!("  Sequential: {:?}", sequential_time);
    println!("  Parallel:   {:?}", parallel_time);
    println!("  Improved:   {} routes", improved);
    println!("  Saved:      {:.0} miles total", total_savings);
}

/// Deterministic pseudo-random stops for route `seed`.
fn synthetic_route(seed: usize) -> Vec<Stop> {
    let stop_count = 4 + seed % 12;
    (0..stop_count)
        .map(|i| {
            let k = (seed * 31 + i * 17) as f64;
            let lat = 32.0 + (k * 0.618).fract() * 15.0;
            let lng = -122.0 + (k * 0.414).fract() * 18.0;
            Stop::new(
                format!("r{seed}-s{i}"),
                format!("Stop {i}"),
                Coordinate::new(lat, lng),
            )
        })
        .collect()
}
