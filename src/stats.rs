//! Descriptive statistics over a trip history.
//!
//! Holds the small numeric helpers the other analytics modules share, plus
//! history-wide summaries: travel totals, per-mode breakdown, duration and
//! budget distributions, consistency scores and comparative extremes.

use crate::{TransportationMode, Trip};

// =============================================================================
// Numeric Helpers
// =============================================================================

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of the sorted values: the middle element for odd lengths, the
/// mean of the two middle elements for even lengths. 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population coefficient of variation, capped at 1.0.
///
/// 0.0 for fewer than two values or a non-positive mean.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    if avg <= 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    (variance.sqrt() / avg).min(1.0)
}

/// `part / whole` as a percentage rounded to one decimal, 0.0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, 1)
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

// =============================================================================
// Summary Types
// =============================================================================

/// Totals and averages across every trip.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TravelStats {
    pub total_trips: usize,
    pub total_stops: usize,
    pub total_distance_miles: f64,
    pub total_cost_usd: f64,
    pub total_days: u64,
    pub avg_trip_length_days: f64,
    pub avg_trip_cost: f64,
    pub avg_stops_per_trip: f64,
    pub avg_cost_per_day: f64,
    pub avg_cost_per_stop: f64,
    pub avg_distance_per_trip: f64,
}

/// Per-mode averages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ModeBreakdown {
    pub mode: TransportationMode,
    pub count: usize,
    pub percentage: f64,
    pub avg_cost: f64,
    pub avg_distance: f64,
    pub avg_duration: f64,
    pub avg_stops: f64,
}

/// One bucket of a duration or budget distribution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DistributionBucket {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub percentage: f64,
    pub avg_cost: f64,
    pub avg_duration: f64,
    pub avg_stops: f64,
}

/// 0-100 scores, higher = more consistent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consistency {
    pub budget: u32,
    pub duration: u32,
    pub transportation: u32,
}

/// The trips at either end of one metric.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Extremes {
    pub highest_trip_id: String,
    pub lowest_trip_id: String,
    pub range: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparativeAnalysis {
    pub cost: Extremes,
    pub duration: Extremes,
    pub stops: Extremes,
    pub distance: Extremes,
}

/// Everything in this module for one history.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HistoryStats {
    pub travel: TravelStats,
    pub transportation: Vec<ModeBreakdown>,
    pub duration_distribution: Vec<DistributionBucket>,
    pub budget_distribution: Vec<DistributionBucket>,
    pub consistency: Consistency,
    /// `None` for fewer than two trips
    pub comparison: Option<ComparativeAnalysis>,
}

// =============================================================================
// Core Functions
// =============================================================================

pub fn history_stats(trips: &[Trip]) -> HistoryStats {
    HistoryStats {
        travel: travel_stats(trips),
        transportation: transportation_breakdown(trips),
        duration_distribution: duration_distribution(trips),
        budget_distribution: budget_distribution(trips),
        consistency: consistency(trips),
        comparison: comparative_analysis(trips),
    }
}

pub fn travel_stats(trips: &[Trip]) -> TravelStats {
    if trips.is_empty() {
        return TravelStats::default();
    }

    let total_trips = trips.len();
    let total_stops: usize = trips.iter().map(Trip::stop_count).sum();
    let total_distance: f64 = trips.iter().map(|t| t.total_distance_miles).sum();
    let total_cost: f64 = trips.iter().map(|t| t.estimated_cost_usd).sum();
    let total_days: u64 = trips.iter().map(|t| u64::from(t.total_duration_days)).sum();
    let n = total_trips as f64;

    TravelStats {
        total_trips,
        total_stops,
        total_distance_miles: total_distance.round(),
        total_cost_usd: total_cost.round(),
        total_days,
        avg_trip_length_days: (total_days as f64 / n).round(),
        avg_trip_cost: (total_cost / n).round(),
        avg_stops_per_trip: round_to(total_stops as f64 / n, 1),
        avg_cost_per_day: ratio_or_zero(total_cost, total_days as f64).round(),
        avg_cost_per_stop: ratio_or_zero(total_cost, total_stops as f64).round(),
        avg_distance_per_trip: (total_distance / n).round(),
    }
}

/// Per-mode breakdown in order of first appearance.
pub fn transportation_breakdown(trips: &[Trip]) -> Vec<ModeBreakdown> {
    let mut modes: Vec<TransportationMode> = Vec::new();
    for trip in trips {
        if !modes.contains(&trip.transportation_mode) {
            modes.push(trip.transportation_mode);
        }
    }

    modes
        .into_iter()
        .map(|mode| {
            let group: Vec<&Trip> = trips.iter().filter(|t| t.transportation_mode == mode).collect();
            let count = group.len() as f64;
            ModeBreakdown {
                mode,
                count: group.len(),
                percentage: percentage(group.len(), trips.len()),
                avg_cost: (group.iter().map(|t| t.estimated_cost_usd).sum::<f64>() / count).round(),
                avg_distance: (group.iter().map(|t| t.total_distance_miles).sum::<f64>() / count).round(),
                avg_duration: (group.iter().map(|t| t.total_duration_days as f64).sum::<f64>() / count).round(),
                avg_stops: round_to(group.iter().map(|t| t.stop_count() as f64).sum::<f64>() / count, 1),
            }
        })
        .collect()
}

/// (key, label, inclusive lower day bound, inclusive upper day bound)
const DURATION_BUCKETS: &[(&str, &str, u32, u32)] = &[
    ("weekend", "Weekend (1-3 days)", 0, 3),
    ("short", "Short (4-7 days)", 4, 7),
    ("medium", "Medium (8-14 days)", 8, 14),
    ("extended", "Extended (15+ days)", 15, u32::MAX),
];

/// (key, label, inclusive lower cost bound, exclusive upper cost bound)
const BUDGET_BUCKETS: &[(&str, &str, f64, f64)] = &[
    ("budget", "Budget (< $1,000)", f64::NEG_INFINITY, 1000.0),
    ("moderate", "Moderate ($1,000 - $2,999)", 1000.0, 3000.0),
    ("premium", "Premium ($3,000 - $4,999)", 3000.0, 5000.0),
    ("luxury", "Luxury ($5,000+)", 5000.0, f64::INFINITY),
];

pub fn duration_distribution(trips: &[Trip]) -> Vec<DistributionBucket> {
    if trips.is_empty() {
        return Vec::new();
    }
    DURATION_BUCKETS
        .iter()
        .map(|&(key, label, min, max)| {
            let group: Vec<&Trip> = trips
                .iter()
                .filter(|t| (min..=max).contains(&t.total_duration_days))
                .collect();
            bucket(key, label, &group, trips.len())
        })
        .collect()
}

pub fn budget_distribution(trips: &[Trip]) -> Vec<DistributionBucket> {
    if trips.is_empty() {
        return Vec::new();
    }
    BUDGET_BUCKETS
        .iter()
        .map(|&(key, label, min, max)| {
            let group: Vec<&Trip> = trips
                .iter()
                .filter(|t| t.estimated_cost_usd >= min && t.estimated_cost_usd < max)
                .collect();
            bucket(key, label, &group, trips.len())
        })
        .collect()
}

fn bucket(key: &str, label: &str, group: &[&Trip], total: usize) -> DistributionBucket {
    let count = group.len() as f64;
    let avg = |value: fn(&Trip) -> f64| ratio_or_zero(group.iter().map(|t| value(t)).sum(), count);

    DistributionBucket {
        key: key.to_string(),
        label: label.to_string(),
        count: group.len(),
        percentage: percentage(group.len(), total),
        avg_cost: avg(|t| t.estimated_cost_usd).round(),
        avg_duration: avg(|t| t.total_duration_days as f64).round(),
        avg_stops: round_to(avg(|t| t.stop_count() as f64), 1),
    }
}

/// Budget and duration consistency from the coefficient of variation,
/// transportation consistency from the share of the most common mode.
pub fn consistency(trips: &[Trip]) -> Consistency {
    if trips.is_empty() {
        return Consistency::default();
    }

    let budgets: Vec<f64> = trips
        .iter()
        .map(|t| t.estimated_cost_usd)
        .filter(|&c| c > 0.0)
        .collect();
    let durations: Vec<f64> = trips
        .iter()
        .map(|t| t.total_duration_days.max(1) as f64)
        .collect();

    let score = |cv: f64| ((1.0 - cv) * 100.0).round() as u32;

    let driving = trips
        .iter()
        .filter(|t| t.transportation_mode == TransportationMode::Driving)
        .count();
    let dominant_mode = driving.max(trips.len() - driving);

    Consistency {
        budget: score(coefficient_of_variation(&budgets)),
        duration: score(coefficient_of_variation(&durations)),
        transportation: (dominant_mode as f64 / trips.len() as f64 * 100.0).round() as u32,
    }
}

/// Most/least extreme trips per metric; `None` for fewer than two trips.
///
/// Ties resolve to the earliest trip in the history.
pub fn comparative_analysis(trips: &[Trip]) -> Option<ComparativeAnalysis> {
    if trips.len() < 2 {
        return None;
    }

    Some(ComparativeAnalysis {
        cost: extremes(trips, |t| t.estimated_cost_usd),
        duration: extremes(trips, |t| t.total_duration_days as f64),
        stops: extremes(trips, |t| t.stop_count() as f64),
        distance: extremes(trips, |t| t.total_distance_miles),
    })
}

fn extremes(trips: &[Trip], metric: fn(&Trip) -> f64) -> Extremes {
    let mut highest = &trips[0];
    let mut lowest = &trips[0];
    for trip in &trips[1..] {
        if metric(trip) > metric(highest) {
            highest = trip;
        }
        if metric(trip) < metric(lowest) {
            lowest = trip;
        }
    }

    Extremes {
        highest_trip_id: highest.id.clone(),
        lowest_trip_id: lowest.id.clone(),
        range: metric(highest) - metric(lowest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn trip(id: &str, cost: f64, days: u32, miles: f64, mode: TransportationMode) -> Trip {
        Trip::new(id, id).with_mode(mode).with_totals(miles, cost, days)
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_coefficient_of_variation() {
        assert_eq!(coefficient_of_variation(&[5.0]), 0.0);
        assert_eq!(coefficient_of_variation(&[5.0, 5.0, 5.0]), 0.0);
        // mean 2, population std dev 1
        assert!(approx_eq(coefficient_of_variation(&[1.0, 3.0]), 0.5, 1e-12));
        assert_eq!(coefficient_of_variation(&[0.0, 0.0, 100.0]), 1.0);
    }

    #[test]
    fn test_percentage_and_rounding() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(round_to(87.456, 1), 87.5);
    }

    #[test]
    fn test_empty_history() {
        let stats = history_stats(&[]);
        assert_eq!(stats.travel, TravelStats::default());
        assert!(stats.transportation.is_empty());
        assert!(stats.duration_distribution.is_empty());
        assert!(stats.budget_distribution.is_empty());
        assert_eq!(stats.consistency, Consistency::default());
        assert!(stats.comparison.is_none());
    }

    #[test]
    fn test_travel_stats() {
        let trips = vec![
            trip("a", 1000.0, 4, 300.0, TransportationMode::Driving),
            trip("b", 3000.0, 6, 900.0, TransportationMode::Flying),
        ];
        let stats = travel_stats(&trips);
        assert_eq!(stats.total_trips, 2);
        assert_eq!(stats.total_days, 10);
        assert_eq!(stats.avg_trip_cost, 2000.0);
        assert_eq!(stats.avg_cost_per_day, 400.0);
        assert_eq!(stats.avg_distance_per_trip, 600.0);
        assert_eq!(stats.avg_cost_per_stop, 0.0);
    }

    #[test]
    fn test_total_days_past_u32_range() {
        let trips = vec![
            trip("a", 1000.0, u32::MAX, 0.0, TransportationMode::Driving),
            trip("b", 1000.0, u32::MAX, 0.0, TransportationMode::Driving),
        ];
        let stats = travel_stats(&trips);
        assert_eq!(stats.total_days, 2 * u64::from(u32::MAX));
        assert_eq!(stats.avg_trip_length_days, u32::MAX as f64);
    }

    #[test]
    fn test_transportation_breakdown_order_and_share() {
        let trips = vec![
            trip("a", 1000.0, 4, 300.0, TransportationMode::Flying),
            trip("b", 2000.0, 6, 500.0, TransportationMode::Driving),
            trip("c", 3000.0, 8, 700.0, TransportationMode::Driving),
        ];
        let breakdown = transportation_breakdown(&trips);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].mode, TransportationMode::Flying);
        assert_eq!(breakdown[1].count, 2);
        assert_eq!(breakdown[1].percentage, 66.7);
        assert_eq!(breakdown[1].avg_cost, 2500.0);
    }

    #[test]
    fn test_distributions() {
        let trips = vec![
            trip("a", 800.0, 2, 100.0, TransportationMode::Driving),
            trip("b", 3000.0, 10, 100.0, TransportationMode::Driving),
            trip("c", 7000.0, 20, 100.0, TransportationMode::Driving),
        ];
        let durations = duration_distribution(&trips);
        let counts: Vec<usize> = durations.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 1, 1]);

        let budgets = budget_distribution(&trips);
        let counts: Vec<usize> = budgets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 1, 1]);
        assert_eq!(budgets[2].key, "premium");
        assert_eq!(budgets[1].avg_cost, 0.0);
    }

    #[test]
    fn test_consistency() {
        let trips = vec![
            trip("a", 1000.0, 5, 100.0, TransportationMode::Driving),
            trip("b", 3000.0, 5, 100.0, TransportationMode::Driving),
            trip("c", 2000.0, 5, 100.0, TransportationMode::Flying),
            trip("d", 2000.0, 5, 100.0, TransportationMode::Driving),
        ];
        let result = consistency(&trips);
        assert_eq!(result.duration, 100);
        assert_eq!(result.transportation, 75);
        assert!(result.budget < 100);
    }

    #[test]
    fn test_comparative_analysis() {
        assert!(comparative_analysis(&[trip("a", 1.0, 1, 1.0, TransportationMode::Driving)]).is_none());

        let trips = vec![
            trip("a", 1000.0, 3, 900.0, TransportationMode::Driving),
            trip("b", 4000.0, 9, 200.0, TransportationMode::Driving),
        ];
        let comparison = comparative_analysis(&trips).unwrap();
        assert_eq!(comparison.cost.highest_trip_id, "b");
        assert_eq!(comparison.cost.lowest_trip_id, "a");
        assert_eq!(comparison.cost.range, 3000.0);
        assert_eq!(comparison.distance.highest_trip_id, "a");
        assert_eq!(comparison.stops.range, 0.0);
    }
}
