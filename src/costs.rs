//! Trip cost model.
//!
//! The same per-trip formulas back single-trip estimates
//! ([`estimate_trip_cost`], [`derive_trip_totals`]) and the historical
//! [`cost_breakdown`], so the two always agree.

use chrono::NaiveDate;
use log::debug;

use crate::optimizer::calculate_total_distance;
use crate::stats::round_to;
use crate::{TransportationMode, Trip};

/// Flat rates used by the cost model, in USD.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CostRates {
    /// Default: $85 per night, charged per trip day
    pub accommodation_per_night: f64,
    /// Default: $275 per stop when flying
    pub flight_per_stop: f64,
    /// Default: $0.20 per mile when driving
    pub driving_per_mile: f64,
    /// Default: $55 per day
    pub food_per_day: f64,
    /// Default: $30 per stop
    pub entrance_fee_per_stop: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            accommodation_per_night: 85.0,
            flight_per_stop: 275.0,
            driving_per_mile: 0.20,
            food_per_day: 55.0,
            entrance_fee_per_stop: 30.0,
        }
    }
}

/// Cost components of one trip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TripCostEstimate {
    pub accommodation: f64,
    pub transportation: f64,
    pub food: f64,
    pub entrance_fees: f64,
}

impl TripCostEstimate {
    pub fn total(&self) -> f64 {
        self.accommodation + self.transportation + self.food + self.entrance_fees
    }
}

/// Estimate the cost components of a trip.
///
/// # Example
/// ```
/// use trip_insights::{CostRates, TransportationMode};
/// use trip_insights::costs::estimate_trip_cost;
///
/// let estimate = estimate_trip_cost(7, 4, 350.0, TransportationMode::Driving, &CostRates::default());
/// assert_eq!(estimate.accommodation, 595.0);
/// assert_eq!(estimate.transportation, 70.0);
/// assert_eq!(estimate.food, 385.0);
/// assert_eq!(estimate.entrance_fees, 120.0);
/// ```
pub fn estimate_trip_cost(
    duration_days: u32,
    stop_count: usize,
    distance_miles: f64,
    mode: TransportationMode,
    rates: &CostRates,
) -> TripCostEstimate {
    let days = duration_days as f64;
    let stops = stop_count as f64;

    let transportation = match mode {
        TransportationMode::Flying => stops * rates.flight_per_stop,
        TransportationMode::Driving => distance_miles * rates.driving_per_mile,
    };

    TripCostEstimate {
        accommodation: days * rates.accommodation_per_night,
        transportation,
        food: days * rates.food_per_day,
        entrance_fees: stops * rates.entrance_fee_per_stop,
    }
}

/// Inclusive number of days between two dates, at least 1.
///
/// Missing dates, or an end before the start, give 1.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use trip_insights::calculate_trip_duration;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 1);
/// let end = NaiveDate::from_ymd_opt(2024, 6, 7);
/// assert_eq!(calculate_trip_duration(start, end), 7);
/// assert_eq!(calculate_trip_duration(start, None), 1);
/// ```
pub fn calculate_trip_duration(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u32 {
    match (start, end) {
        (Some(start), Some(end)) => {
            let days = (end - start).num_days() + 1;
            days.clamp(1, u32::MAX as i64) as u32
        }
        _ => 1,
    }
}

/// Freshly derived values for a trip's stored totals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TripTotals {
    pub total_distance_miles: f64,
    pub estimated_cost_usd: f64,
    pub total_duration_days: u32,
}

/// Recompute distance, cost and duration from a trip's stops, dates and mode.
///
/// The trip itself is left untouched; callers store the returned values.
pub fn derive_trip_totals(trip: &Trip, rates: &CostRates) -> TripTotals {
    let total_distance_miles = calculate_total_distance(&trip.stops);
    let total_duration_days = calculate_trip_duration(trip.start_date, trip.end_date);
    let estimate = estimate_trip_cost(
        total_duration_days,
        trip.stop_count(),
        total_distance_miles,
        trip.transportation_mode,
        rates,
    );

    debug!(
        "[TripCosts] Derived totals for {}: {:.1} mi, ${:.2}, {} days",
        trip.id,
        total_distance_miles,
        estimate.total(),
        total_duration_days
    );

    TripTotals {
        total_distance_miles,
        estimated_cost_usd: estimate.total(),
        total_duration_days,
    }
}

/// An amount and its share of the combined total.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostComponent {
    pub amount: f64,
    /// Percentage of the combined total, one decimal
    pub percentage: f64,
}

/// Modelled spending across a whole history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CostBreakdown {
    pub accommodation: CostComponent,
    pub transportation: CostComponent,
    pub food: CostComponent,
    pub entrance_fees: CostComponent,
    pub total: f64,
}

/// Sum the per-trip cost components over a history.
///
/// Uses each trip's stored duration, stop count and distance.
pub fn cost_breakdown(trips: &[Trip], rates: &CostRates) -> CostBreakdown {
    let sum = trips.iter().fold(TripCostEstimate::default(), |mut acc, trip| {
        let estimate = estimate_trip_cost(
            trip.total_duration_days,
            trip.stop_count(),
            trip.total_distance_miles,
            trip.transportation_mode,
            rates,
        );
        acc.accommodation += estimate.accommodation;
        acc.transportation += estimate.transportation;
        acc.food += estimate.food;
        acc.entrance_fees += estimate.entrance_fees;
        acc
    });

    let total = sum.total();
    let component = |amount: f64| CostComponent {
        amount,
        percentage: if total > 0.0 { round_to(amount / total * 100.0, 1) } else { 0.0 },
    };

    CostBreakdown {
        accommodation: component(sum.accommodation),
        transportation: component(sum.transportation),
        food: component(sum.food),
        entrance_fees: component(sum.entrance_fees),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, Stop};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_flying_cost_is_per_stop() {
        let estimate = estimate_trip_cost(3, 2, 5000.0, TransportationMode::Flying, &CostRates::default());
        assert_eq!(estimate.transportation, 550.0);
        assert_eq!(estimate.total(), 255.0 + 550.0 + 165.0 + 60.0);
    }

    #[test]
    fn test_trip_duration_edges() {
        assert_eq!(calculate_trip_duration(Some(date(2024, 6, 1)), Some(date(2024, 6, 1))), 1);
        assert_eq!(calculate_trip_duration(Some(date(2024, 6, 5)), Some(date(2024, 6, 1))), 1);
        assert_eq!(calculate_trip_duration(Some(date(2024, 2, 27)), Some(date(2024, 3, 1))), 4);
        assert_eq!(calculate_trip_duration(None, None), 1);
    }

    #[test]
    fn test_derive_trip_totals_matches_breakdown() {
        let trip = Trip::new("t", "Meridian run")
            .with_dates(date(2024, 5, 1), date(2024, 5, 5))
            .with_stops(vec![
                Stop::new("a", "A", Coordinate::new(40.0, -100.0)),
                Stop::new("b", "B", Coordinate::new(41.0, -100.0)),
            ]);

        let rates = CostRates::default();
        let totals = derive_trip_totals(&trip, &rates);
        assert_eq!(totals.total_duration_days, 5);
        assert!(approx_eq(totals.total_distance_miles, 69.1, 0.1));

        // The original trip is not modified
        assert_eq!(trip.total_duration_days, 0);

        let stored = trip.with_totals(totals.total_distance_miles, totals.estimated_cost_usd, totals.total_duration_days);
        let breakdown = cost_breakdown(&[stored], &rates);
        assert!(approx_eq(breakdown.total, totals.estimated_cost_usd, 1e-9));
    }

    #[test]
    fn test_cost_breakdown_percentages() {
        let trips = vec![
            Trip::new("a", "a").with_totals(500.0, 0.0, 2),
            Trip::new("b", "b").with_mode(TransportationMode::Flying).with_totals(0.0, 0.0, 1),
        ];
        let breakdown = cost_breakdown(&trips, &CostRates::default());

        // a: 170 + 100 + 110 + 0, b: 85 + 0 + 55 + 0
        assert_eq!(breakdown.accommodation.amount, 255.0);
        assert!(approx_eq(breakdown.transportation.amount, 100.0, 1e-9));
        assert_eq!(breakdown.food.amount, 165.0);
        assert_eq!(breakdown.entrance_fees.amount, 0.0);
        assert!(approx_eq(breakdown.total, 520.0, 1e-9));
        assert_eq!(breakdown.accommodation.percentage, 49.0);
        assert_eq!(breakdown.entrance_fees.percentage, 0.0);
    }

    #[test]
    fn test_empty_cost_breakdown() {
        let breakdown = cost_breakdown(&[], &CostRates::default());
        assert_eq!(breakdown, CostBreakdown::default());
    }
}
