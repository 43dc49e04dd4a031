//! Spending and pacing metrics, plus the 0-100 trip efficiency score.

use crate::stats::{mean, round_to};
use crate::Trip;

const BASE_SCORE: u32 = 50;
const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EfficiencyMetrics {
    pub cost_per_day: f64,
    #[cfg_attr(feature = "serde", serde(rename = "costPerPark"))]
    pub cost_per_stop: f64,
    pub miles_per_day: f64,
    pub stops_per_trip: f64,
    /// Mean of the per-trip scores, 0-100
    pub efficiency_score: u32,
}

/// Score one trip from 0 to 100.
///
/// Starts at 50 and adds points for a low daily cost, for visiting several
/// stops and for short hops between them. A zero-day trip earns no cost
/// points and a stopless trip earns no distance points.
///
/// # Example
/// ```
/// use trip_insights::Trip;
/// use trip_insights::efficiency::trip_efficiency_score;
///
/// let stops = (0..4)
///     .map(|i| trip_insights::Stop::new(format!("s{i}"), "Stop", trip_insights::Coordinate::missing()))
///     .collect();
/// let trip = Trip::new("t", "Loop").with_stops(stops).with_totals(350.0, 1400.0, 7);
///
/// // $200/day: +10, 4 stops: +10, 87.5 mi/stop: +15
/// assert_eq!(trip_efficiency_score(&trip), 85);
/// ```
pub fn trip_efficiency_score(trip: &Trip) -> u32 {
    let mut score = BASE_SCORE;

    if trip.total_duration_days > 0 {
        let cost_per_day = trip.estimated_cost_usd / trip.total_duration_days as f64;
        if cost_per_day < 200.0 {
            score += 20;
        } else if cost_per_day < 300.0 {
            score += 10;
        }
    }

    let stops = trip.stop_count();
    score += match stops {
        5.. => 15,
        3..=4 => 10,
        2 => 5,
        _ => 0,
    };

    if stops > 0 {
        let miles_per_stop = trip.total_distance_miles / stops as f64;
        if miles_per_stop < 100.0 {
            score += 15;
        } else if miles_per_stop < 200.0 {
            score += 10;
        } else if miles_per_stop < 300.0 {
            score += 5;
        }
    }

    score.min(MAX_SCORE)
}

/// History-wide ratios and the averaged efficiency score.
///
/// Ratios are taken over history totals, not averaged per trip, and are 0
/// when their denominator is 0.
pub fn efficiency_metrics(trips: &[Trip]) -> EfficiencyMetrics {
    if trips.is_empty() {
        return EfficiencyMetrics::default();
    }

    let total_cost: f64 = trips.iter().map(|t| t.estimated_cost_usd).sum();
    let total_miles: f64 = trips.iter().map(|t| t.total_distance_miles).sum();
    let total_days: f64 = trips.iter().map(|t| t.total_duration_days as f64).sum();
    let total_stops = trips.iter().map(Trip::stop_count).sum::<usize>() as f64;

    let per = |numerator: f64, denominator: f64| {
        if denominator > 0.0 { numerator / denominator } else { 0.0 }
    };

    let scores: Vec<f64> = trips.iter().map(|t| trip_efficiency_score(t) as f64).collect();

    EfficiencyMetrics {
        cost_per_day: per(total_cost, total_days).round(),
        cost_per_stop: per(total_cost, total_stops).round(),
        miles_per_day: per(total_miles, total_days).round(),
        stops_per_trip: round_to(total_stops / trips.len() as f64, 1),
        efficiency_score: mean(&scores).round() as u32,
    }
}
