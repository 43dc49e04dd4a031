//! Time series over a trip history.
//!
//! Trips are bucketed by the month and year they start (falling back to the
//! creation timestamp for undated trips). A half-vs-half comparison of each
//! series gives a coarse [`Trend`].

use chrono::{Datelike, NaiveDate};
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

use crate::preferences::rank_by_count;
use crate::stats::mean;
use crate::{Stop, Trip};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Second-half mean must exceed the first by this factor to count as growth.
const INCREASE_FACTOR: f64 = 1.1;
/// ...or fall below it by this factor to count as decline.
const DECREASE_FACTOR: f64 = 0.9;

/// Direction of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trend {
    #[cfg_attr(feature = "serde", serde(rename = "increasing"))]
    Increasing,
    #[cfg_attr(feature = "serde", serde(rename = "decreasing"))]
    Decreasing,
    #[cfg_attr(feature = "serde", serde(rename = "stable"))]
    Stable,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "insufficient data"))]
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Stable => write!(f, "stable"),
            Trend::InsufficientData => write!(f, "insufficient data"),
        }
    }
}

/// Classify a time-ordered series by comparing the means of its halves.
///
/// The first half is the first `n / 2` points; the second half is the rest,
/// so an odd middle point lands in the second half.
///
/// # Example
/// ```
/// use trip_insights::Trend;
/// use trip_insights::trends::classify_trend;
///
/// assert_eq!(classify_trend(&[1.0, 1.0, 3.0, 3.0]), Trend::Increasing);
/// assert_eq!(classify_trend(&[3.0, 3.0, 1.0, 1.0]), Trend::Decreasing);
/// assert_eq!(classify_trend(&[2.0, 2.1]), Trend::Stable);
/// assert_eq!(classify_trend(&[5.0]), Trend::InsufficientData);
/// ```
pub fn classify_trend(series: &[f64]) -> Trend {
    if series.len() < 2 {
        return Trend::InsufficientData;
    }

    let (first, second) = series.split_at(series.len() / 2);
    let first_mean = mean(first);
    let second_mean = mean(second);

    if second_mean > first_mean * INCREASE_FACTOR {
        Trend::Increasing
    } else if second_mean < first_mean * DECREASE_FACTOR {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Trips started in one calendar month.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthlyFrequency {
    /// e.g. "Jun 2024"
    pub label: String,
    pub year: i32,
    /// 1-based
    pub month: u32,
    pub trips: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct YearlyCost {
    pub year: i32,
    pub trips: usize,
    pub average_cost: f64,
}

/// How often a stop appears across all trips.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StopFrequency {
    /// Full name, used for counting
    pub name: String,
    /// Possibly truncated name for display
    pub display_name: String,
    pub visits: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrendAnalysis {
    /// Oldest month first; months without trips are omitted
    pub monthly_frequency: Vec<MonthlyFrequency>,
    /// Oldest year first
    pub yearly_costs: Vec<YearlyCost>,
    pub frequency_trend: Trend,
    pub cost_trend: Trend,
    pub top_stops: Vec<StopFrequency>,
}

/// "Mon YYYY" label for a date.
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", MONTH_ABBREVIATIONS[date.month0() as usize], date.year())
}

/// Truncate `name` to `limit` characters plus "..." when it is longer.
///
/// # Example
/// ```
/// use trip_insights::trends::display_name;
///
/// assert_eq!(display_name("Zion", 20), "Zion");
/// assert_eq!(display_name("Great Smoky Mountains National Park", 20), "Great Smoky Mountain...");
/// ```
pub fn display_name(name: &str, limit: usize) -> String {
    if name.chars().count() <= limit {
        return name.to_string();
    }
    let truncated: String = name.chars().take(limit).collect();
    format!("{truncated}...")
}

fn trip_date(trip: &Trip) -> Option<NaiveDate> {
    trip.start_date
        .or_else(|| trip.created_at.map(|ts| ts.date_naive()))
}

fn stop_key(stop: &Stop) -> &str {
    if stop.name.is_empty() {
        stop.id.as_str()
    } else {
        stop.name.as_str()
    }
}

/// Build the monthly/yearly series, their trends and the most visited stops.
pub fn analyze_trends(trips: &[Trip], top_stop_limit: usize, display_name_limit: usize) -> TrendAnalysis {
    debug!("[TripInsights] Analyzing trends over {} trips", trips.len());

    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    let mut years: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for trip in trips {
        let Some(date) = trip_date(trip) else {
            continue;
        };
        *months.entry((date.year(), date.month())).or_default() += 1;
        years.entry(date.year()).or_default().push(trip.estimated_cost_usd);
    }

    let monthly_frequency: Vec<MonthlyFrequency> = months
        .into_iter()
        .filter_map(|((year, month), count)| {
            let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlyFrequency {
                label: month_label(first_day),
                year,
                month,
                trips: count,
            })
        })
        .collect();

    // Trend runs on the exact means; only the reported figure is rounded
    let cost_series: Vec<f64> = years.values().map(|costs| mean(costs)).collect();
    let yearly_costs: Vec<YearlyCost> = years
        .into_iter()
        .zip(&cost_series)
        .map(|((year, costs), average)| YearlyCost {
            year,
            trips: costs.len(),
            average_cost: average.round(),
        })
        .collect();

    let frequency_series: Vec<f64> = monthly_frequency.iter().map(|m| m.trips as f64).collect();

    let top_stops = rank_by_count(trips.iter().flat_map(|t| t.stops.iter()).map(stop_key))
        .into_iter()
        .take(top_stop_limit)
        .map(|(name, visits)| StopFrequency {
            name: name.to_string(),
            display_name: display_name(name, display_name_limit),
            visits,
        })
        .collect();

    TrendAnalysis {
        frequency_trend: classify_trend(&frequency_series),
        cost_trend: classify_trend(&cost_series),
        monthly_frequency,
        yearly_costs,
        top_stops,
    }
}
