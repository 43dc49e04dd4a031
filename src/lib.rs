//! # Trip Insights
//!
//! Itinerary logistics and trip history analytics for multi-stop trips.
//!
//! This library provides:
//! - Great-circle distances between stops (Haversine, in miles)
//! - Nearest-neighbor route reordering with optional 2-opt refinement
//! - Route analysis and constraint checking for a chosen stop order
//! - Aggregated insights over a traveller's trip history
//!
//! Every operation is a pure function over plain data: callers hand in stops
//! and trips, and get new result structures back. Nothing is cached or mutated.
//!
//! ## Features
//!
//! - **`serde`** - Serialize/Deserialize on boundary types, JSON ingestion
//! - **`parallel`** - Batch route optimization with rayon
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use trip_insights::{Coordinate, Stop, OptimizeOptions, optimize_route, calculate_savings};
//!
//! let stops = vec![
//!     Stop::new("yell", "Yellowstone", Coordinate::new(44.4280, -110.5885)),
//!     Stop::new("grca", "Grand Canyon", Coordinate::new(36.1069, -112.1129)),
//!     Stop::new("zion", "Zion", Coordinate::new(37.2982, -113.0263)),
//! ];
//!
//! let optimized = optimize_route(&stops, &OptimizeOptions::default());
//! assert!(optimized.was_optimized());
//! assert_eq!(optimized.stops[0].id, "yell");
//!
//! let savings = calculate_savings(&stops, &optimized.stops);
//! println!("Saved {:.0} miles", savings);
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

pub mod error;
pub use error::InsightsError;

// Distance primitives shared by every other module
pub mod geo_utils;
pub use geo_utils::distance_miles;

// Stop reordering (nearest-neighbor + optional 2-opt)
pub mod optimizer;
pub use optimizer::{
    DistanceMatrix, OptimizationStatus, OptimizeOptions, OptimizedRoute,
    calculate_savings, calculate_total_distance, optimize_route, optimize_routes,
};

#[cfg(feature = "parallel")]
pub use optimizer::optimize_routes_parallel;

// Route statistics and constraint checks
pub mod analyzer;
pub use analyzer::{
    ConstraintReport, EfficiencyRating, RouteAnalysisReport, RouteConstraints,
    analyze_route, check_constraints, suggest_stay_duration,
};

// Trip history analytics
pub mod classify;
pub mod costs;
pub mod efficiency;
pub mod insights;
pub mod preferences;
pub mod recommendations;
pub mod record;
pub mod stats;
pub mod trends;

pub use classify::{Region, Season, StopType};
pub use costs::{CostBreakdown, CostRates, TripTotals, calculate_trip_duration, derive_trip_totals};
pub use insights::{InsightsConfig, InsightsReport, generate_insights, generate_insights_with_config};
pub use recommendations::{Priority, Recommendation, RecommendationKind};
pub use record::{StopRecord, TripRecord};
pub use trends::Trend;

#[cfg(feature = "serde")]
pub use record::trips_from_json;

// ============================================================================
// Core Types
// ============================================================================

/// A latitude/longitude pair in degrees.
///
/// `(0.0, 0.0)` is reserved as "unknown": a stop geocoded nowhere is far more
/// likely than a stop in the Gulf of Guinea.
///
/// # Example
/// ```
/// use trip_insights::Coordinate;
/// let zion = Coordinate::new(37.2982, -113.0263);
/// assert!(zion.is_known());
/// assert!(!Coordinate::missing().is_known());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// The "unknown location" sentinel.
    pub fn missing() -> Self {
        Self { lat: 0.0, lng: 0.0 }
    }

    /// Check if the coordinate refers to a real location.
    ///
    /// Rejects the `(0, 0)` sentinel, non-finite values and anything outside
    /// the valid latitude/longitude ranges.
    pub fn is_known(&self) -> bool {
        if self.lat == 0.0 && self.lng == 0.0 {
            return false;
        }
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }
}

/// One destination within a trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinate,
    /// Free-form state or region name, e.g. "Utah" or "Wyoming, Montana"
    pub state_or_region: String,
    pub visit_date: Option<NaiveDate>,
    /// Planned stay in days (always at least 1)
    pub stay_duration_days: u32,
}

impl Stop {
    /// Create a stop with a one-day stay and no region.
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            state_or_region: String::new(),
            visit_date: None,
            stay_duration_days: 1,
        }
    }

    pub fn with_region(mut self, state_or_region: impl Into<String>) -> Self {
        self.state_or_region = state_or_region.into();
        self
    }

    /// Set the stay length. Zero is raised to one day.
    pub fn with_stay_days(mut self, days: u32) -> Self {
        self.stay_duration_days = days.max(1);
        self
    }

    pub fn with_visit_date(mut self, date: NaiveDate) -> Self {
        self.visit_date = Some(date);
        self
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates.is_known()
    }
}

/// How the traveller moves between stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportationMode {
    #[default]
    Driving,
    Flying,
}

impl fmt::Display for TransportationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportationMode::Driving => write!(f, "driving"),
            TransportationMode::Flying => write!(f, "flying"),
        }
    }
}

/// A planned or completed trip.
///
/// `stops` is itinerary order. `total_distance_miles`, `estimated_cost_usd`
/// and `total_duration_days` are derived values owned by the caller; see
/// [`derive_trip_totals`] for recomputing them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub stops: Vec<Stop>,
    pub transportation_mode: TransportationMode,
    pub total_distance_miles: f64,
    pub estimated_cost_usd: f64,
    pub total_duration_days: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Create an empty driving trip with no dates.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date: None,
            end_date: None,
            stops: Vec::new(),
            transportation_mode: TransportationMode::Driving,
            total_distance_miles: 0.0,
            estimated_cost_usd: 0.0,
            total_duration_days: 0,
            created_at: None,
        }
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_stops(mut self, stops: Vec<Stop>) -> Self {
        self.stops = stops;
        self
    }

    pub fn with_mode(mut self, mode: TransportationMode) -> Self {
        self.transportation_mode = mode;
        self
    }

    /// Set the stored derived totals.
    pub fn with_totals(mut self, distance_miles: f64, cost_usd: f64, duration_days: u32) -> Self {
        self.total_distance_miles = distance_miles;
        self.estimated_cost_usd = cost_usd;
        self.total_duration_days = duration_days;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(44.4280, -110.5885).is_known());
        assert!(!Coordinate::new(0.0, 0.0).is_known());
        assert!(!Coordinate::new(91.0, 10.0).is_known());
        assert!(!Coordinate::new(10.0, 181.0).is_known());
        assert!(!Coordinate::new(f64::NAN, 10.0).is_known());
        // Only the exact pair is the sentinel
        assert!(Coordinate::new(0.0, -78.5).is_known());
    }

    #[test]
    fn test_stop_builder_clamps_stay() {
        let stop = Stop::new("a", "Arches", Coordinate::new(38.7331, -109.5925))
            .with_region("Utah")
            .with_stay_days(0);
        assert_eq!(stop.stay_duration_days, 1);
        assert_eq!(stop.state_or_region, "Utah");
        assert!(stop.has_coordinates());
    }

    #[test]
    fn test_trip_builder() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let trip = Trip::new("t1", "Utah loop")
            .with_dates(start, end)
            .with_mode(TransportationMode::Flying)
            .with_totals(350.0, 1400.0, 7)
            .with_stops(vec![Stop::new("z", "Zion", Coordinate::new(37.2982, -113.0263))]);

        assert_eq!(trip.stop_count(), 1);
        assert_eq!(trip.transportation_mode.to_string(), "flying");
        assert_eq!(trip.total_duration_days, 7);
    }
}
