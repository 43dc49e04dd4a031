//! Route analysis for an ordered stop list.
//!
//! Produces leg statistics, a coarse efficiency rating and advisory
//! recommendations, and checks a route against daily driving and stay
//! length constraints.
//!
//! The rating is a dispersion signal only: it compares the longest leg to the
//! mean leg and flags routes where one leg dominates. It is not a statistical
//! measure of route quality.

use log::debug;
use std::fmt;

use crate::geo_utils::{distance_miles, segment_distances};
use crate::optimizer::calculate_total_distance;
use crate::Stop;

/// Longest/average leg ratio above which a route "could be improved".
pub const DISPERSION_RATING_THRESHOLD: f64 = 2.0;
/// Longest/average leg ratio above which reordering is suggested.
pub const REORDER_SUGGESTION_THRESHOLD: f64 = 2.5;
/// Total miles above which splitting into several trips is suggested.
pub const SPLIT_TRIP_MILES: f64 = 1500.0;
/// Stop count above which time per stop is called out.
pub const MANY_STOPS: usize = 8;

const ADD_STOPS_RECOMMENDATION: &str = "Add at least two stops to analyze the route";
const ADD_COORDINATES_RECOMMENDATION: &str =
    "Add locations for your stops so leg distances can be measured";
const REORDER_RECOMMENDATION: &str =
    "One leg is much longer than the rest; consider reordering stops to balance driving";
const SPLIT_TRIP_RECOMMENDATION: &str =
    "This route covers more than 1,500 miles; consider splitting it into multiple trips";
const MANY_STOPS_RECOMMENDATION: &str =
    "With more than 8 stops, make sure you plan adequate time at each one";
const LONG_LEG_SUGGESTION: &str =
    "Add an overnight stop on legs over your daily driving limit, or fly those legs";

/// Qualitative rating of a route's leg balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EfficiencyRating {
    #[cfg_attr(feature = "serde", serde(rename = "Good"))]
    Good,
    #[cfg_attr(feature = "serde", serde(rename = "Could be improved"))]
    CouldBeImproved,
    #[cfg_attr(feature = "serde", serde(rename = "N/A"))]
    NotApplicable,
}

impl fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyRating::Good => write!(f, "Good"),
            EfficiencyRating::CouldBeImproved => write!(f, "Could be improved"),
            EfficiencyRating::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Leg statistics for a route, all in miles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteAnalysisReport {
    pub total_distance: f64,
    pub average_segment: f64,
    pub longest_segment: f64,
    pub shortest_segment: f64,
    pub efficiency_rating: EfficiencyRating,
    pub recommendations: Vec<String>,
}

impl RouteAnalysisReport {
    fn not_applicable(recommendation: &str) -> Self {
        Self {
            total_distance: 0.0,
            average_segment: 0.0,
            longest_segment: 0.0,
            shortest_segment: 0.0,
            efficiency_rating: EfficiencyRating::NotApplicable,
            recommendations: vec![recommendation.to_string()],
        }
    }
}

/// Limits a route is checked against.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteConstraints {
    /// Longest acceptable leg between consecutive stops.
    /// Default: 500 miles
    pub max_daily_driving_miles: f64,

    /// Shortest stay worth recommending at a stop.
    /// Default: 1 day
    pub min_stay_days: u32,
}

impl Default for RouteConstraints {
    fn default() -> Self {
        Self {
            max_daily_driving_miles: 500.0,
            min_stay_days: 1,
        }
    }
}

/// Outcome of [`check_constraints`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintReport {
    pub violations: Vec<String>,
    pub suggestions: Vec<String>,
    /// True iff there are no violations; stay suggestions never block
    pub feasible: bool,
}

/// Analyze the legs of a route in its given order.
///
/// Legs touching a stop without coordinates are skipped. A route of fewer
/// than two stops, or with no measurable leg, is rated `N/A`.
///
/// # Example
/// ```
/// use trip_insights::{Coordinate, Stop, EfficiencyRating, analyze_route};
///
/// let stops = vec![
///     Stop::new("a", "A", Coordinate::new(40.0, -100.0)),
///     Stop::new("b", "B", Coordinate::new(41.0, -100.0)),
///     Stop::new("c", "C", Coordinate::new(42.0, -100.0)),
/// ];
///
/// let report = analyze_route(&stops);
/// assert_eq!(report.efficiency_rating, EfficiencyRating::Good);
/// assert!(report.recommendations.is_empty());
/// ```
pub fn analyze_route(stops: &[Stop]) -> RouteAnalysisReport {
    debug!("[RouteAnalyzer] analyze_route called with {} stops", stops.len());

    if stops.len() < 2 {
        return RouteAnalysisReport::not_applicable(ADD_STOPS_RECOMMENDATION);
    }

    let segments = segment_distances(stops);
    if segments.is_empty() {
        return RouteAnalysisReport::not_applicable(ADD_COORDINATES_RECOMMENDATION);
    }

    let total_distance = calculate_total_distance(stops);
    let average_segment = segments.iter().sum::<f64>() / segments.len() as f64;
    let longest_segment = segments.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let shortest_segment = segments.iter().copied().fold(f64::INFINITY, f64::min);

    let ratio = if average_segment > 0.0 {
        longest_segment / average_segment
    } else {
        0.0
    };

    let efficiency_rating = if ratio > DISPERSION_RATING_THRESHOLD {
        EfficiencyRating::CouldBeImproved
    } else {
        EfficiencyRating::Good
    };

    let mut recommendations = Vec::new();
    if ratio > REORDER_SUGGESTION_THRESHOLD {
        recommendations.push(REORDER_RECOMMENDATION.to_string());
    }
    if total_distance > SPLIT_TRIP_MILES {
        recommendations.push(SPLIT_TRIP_RECOMMENDATION.to_string());
    }
    if stops.len() > MANY_STOPS {
        recommendations.push(MANY_STOPS_RECOMMENDATION.to_string());
    }

    debug!(
        "[RouteAnalyzer] {} legs, avg {:.1} mi, longest/avg ratio {:.2}",
        segments.len(),
        average_segment,
        ratio
    );

    RouteAnalysisReport {
        total_distance,
        average_segment,
        longest_segment,
        shortest_segment,
        efficiency_rating,
        recommendations,
    }
}

/// Check a route against daily driving and stay constraints.
///
/// Every leg longer than `max_daily_driving_miles` is a violation naming both
/// endpoints. Short stays only produce suggestions.
///
/// # Example
/// ```
/// use trip_insights::{Coordinate, Stop, RouteConstraints, check_constraints};
///
/// let stops = vec![
///     Stop::new("yell", "Yellowstone", Coordinate::new(44.4280, -110.5885)),
///     Stop::new("zion", "Zion", Coordinate::new(37.2982, -113.0263)),
/// ];
///
/// let report = check_constraints(&stops, &RouteConstraints::default());
/// assert!(!report.feasible);
/// assert!(report.violations[0].contains("Yellowstone"));
/// ```
pub fn check_constraints(stops: &[Stop], constraints: &RouteConstraints) -> ConstraintReport {
    debug!(
        "[RouteAnalyzer] check_constraints: {} stops, max {:.0} mi/day, min stay {} days",
        stops.len(),
        constraints.max_daily_driving_miles,
        constraints.min_stay_days
    );

    let mut violations = Vec::new();
    let mut suggestions = Vec::new();

    for leg in stops.windows(2) {
        let (from, to) = (&leg[0], &leg[1]);
        let miles = distance_miles(&from.coordinates, &to.coordinates);
        if miles > constraints.max_daily_driving_miles {
            violations.push(format!(
                "{} to {} is {:.0} miles, over the daily limit of {:.0} miles",
                from.name, to.name, miles, constraints.max_daily_driving_miles
            ));
        }
    }

    if !violations.is_empty() {
        suggestions.push(LONG_LEG_SUGGESTION.to_string());
    }

    for stop in stops {
        if stop.stay_duration_days < constraints.min_stay_days {
            suggestions.push(format!(
                "Consider staying at least {} days at {} (currently {})",
                constraints.min_stay_days, stop.name, stop.stay_duration_days
            ));
        }
    }

    ConstraintReport {
        feasible: violations.is_empty(),
        violations,
        suggestions,
    }
}

/// Parks that reward a longer visit, matched by name containment.
const PARK_STAY_DAYS: &[(&str, u32)] = &[
    ("Yellowstone", 4),
    ("Grand Canyon", 3),
    ("Yosemite", 3),
    ("Glacier", 4),
    ("Olympic", 3),
    ("Great Smoky Mountains", 2),
    ("Zion", 2),
    ("Bryce Canyon", 2),
    ("Arches", 2),
    ("Canyonlands", 3),
];

const DEFAULT_STAY_DAYS: u32 = 2;

/// Suggested number of days to spend at a stop.
pub fn suggest_stay_duration(stop: &Stop) -> u32 {
    PARK_STAY_DAYS
        .iter()
        .find(|(park, _)| stop.name.contains(park))
        .map_or(DEFAULT_STAY_DAYS, |&(_, days)| days)
}
