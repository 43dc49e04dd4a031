//! # Trip Insights
//!
//! Aggregates a trip history into one [`InsightsReport`].
//!
//! ## Algorithm
//!
//! 1. Summarize preferences (regions, seasons, stop types, modes, budget)
//! 2. Build monthly/yearly trend series and rank stops by visits
//! 3. Sum the per-trip cost model into a breakdown
//! 4. Compute efficiency ratios and the averaged 0-100 score
//! 5. Run the recommendation rules against the preference summary
//! 6. Add descriptive history statistics
//!
//! Every step reads only the stored fields of each trip; nothing is
//! recomputed from coordinates here.

use log::{debug, info};

use crate::costs::{cost_breakdown, CostBreakdown, CostRates};
use crate::efficiency::{efficiency_metrics, EfficiencyMetrics};
use crate::preferences::{summarize_preferences, PersonalPreferences};
use crate::recommendations::{recommend, Recommendation};
use crate::stats::{history_stats, HistoryStats};
use crate::trends::{analyze_trends, TrendAnalysis};
use crate::Trip;

/// Configuration for insights generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct InsightsConfig {
    /// Rates for the cost breakdown
    pub cost_rates: CostRates,
    /// Most visited stops to report. Default: 10
    pub top_stop_limit: usize,
    /// Characters kept in a stop's display name. Default: 20
    pub display_name_limit: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            cost_rates: CostRates::default(),
            top_stop_limit: 10,
            display_name_limit: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct InsightsReport {
    pub personal_preferences: PersonalPreferences,
    pub trend_analysis: TrendAnalysis,
    pub cost_breakdown: CostBreakdown,
    pub efficiency: EfficiencyMetrics,
    /// Highest priority first
    pub recommendations: Vec<Recommendation>,
    pub stats: HistoryStats,
}

impl InsightsReport {
    /// True when the report was built from an empty history.
    pub fn is_empty(&self) -> bool {
        self.personal_preferences.trip_count == 0
    }

    #[cfg(feature = "serde")]
    pub fn to_json_pretty(&self) -> Result<String, crate::InsightsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Generate insights with the default configuration.
///
/// # Example
/// ```
/// use trip_insights::{Trip, generate_insights};
///
/// let report = generate_insights(&[]);
/// assert!(report.is_empty());
/// assert!(report.recommendations.is_empty());
///
/// let trips = vec![Trip::new("t1", "Utah loop").with_totals(350.0, 1400.0, 7)];
/// let report = generate_insights(&trips);
/// assert_eq!(report.personal_preferences.trip_count, 1);
/// ```
pub fn generate_insights(trips: &[Trip]) -> InsightsReport {
    generate_insights_with_config(trips, &InsightsConfig::default())
}

/// Generate insights for a history.
///
/// Never fails: an empty history yields [`InsightsReport::default`], and
/// trips with missing fields contribute zeros for those fields.
pub fn generate_insights_with_config(trips: &[Trip], config: &InsightsConfig) -> InsightsReport {
    debug!("[TripInsights] Generating insights for {} trips", trips.len());

    if trips.is_empty() {
        return InsightsReport::default();
    }

    let personal_preferences = summarize_preferences(trips);
    let recommendations = recommend(&personal_preferences);

    let report = InsightsReport {
        trend_analysis: analyze_trends(trips, config.top_stop_limit, config.display_name_limit),
        cost_breakdown: cost_breakdown(trips, &config.cost_rates),
        efficiency: efficiency_metrics(trips),
        stats: history_stats(trips),
        personal_preferences,
        recommendations,
    };

    info!(
        "[TripInsights] {} trips: efficiency score {}, {} recommendations",
        trips.len(),
        report.efficiency.efficiency_score,
        report.recommendations.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendations::{Priority, RecommendationKind};
    use crate::{Coordinate, Stop, TransportationMode};
    use chrono::NaiveDate;

    fn region_trip(index: usize, state: &str) -> Trip {
        let start = NaiveDate::from_ymd_opt(2020 + index as i32, (index % 12) as u32 + 1, 10).unwrap();
        let end = start + chrono::Duration::days(6);
        let stop = Stop::new(format!("s{index}"), format!("Stop {index}"), Coordinate::new(36.0, -112.0))
            .with_region(state);
        let mode = if index % 2 == 0 { TransportationMode::Driving } else { TransportationMode::Flying };
        Trip::new(format!("t{index}"), format!("Trip {index}"))
            .with_dates(start, end)
            .with_stops(vec![stop])
            .with_mode(mode)
            .with_totals(200.0, 1500.0, 7)
    }

    #[test]
    fn test_empty_history_report() {
        let report = generate_insights(&[]);
        assert!(report.is_empty());
        assert!(report.personal_preferences.top_regions.is_empty());
        assert!(report.trend_analysis.monthly_frequency.is_empty());
        assert!(report.trend_analysis.top_stops.is_empty());
        assert_eq!(report.cost_breakdown.total, 0.0);
        assert_eq!(report.efficiency.efficiency_score, 0);
        assert!(report.recommendations.is_empty());
        assert_eq!(report.stats.travel.total_trips, 0);
        assert!(report.stats.comparison.is_none());
    }

    #[test]
    fn test_concentrated_region_is_high_priority_exploration() {
        let trips: Vec<Trip> = (0..10)
            .map(|i| region_trip(i, if i < 8 { "Arizona" } else { "Maine" }))
            .collect();
        let report = generate_insights(&trips);

        let first = &report.recommendations[0];
        assert_eq!(first.kind, RecommendationKind::Exploration);
        assert_eq!(first.priority, Priority::High);
        assert_eq!(report.personal_preferences.top_regions[0].percentage, 80.0);
    }

    #[test]
    fn test_recommendations_always_sorted() {
        let trips: Vec<Trip> = (0..10)
            .map(|i| {
                region_trip(i, "Utah")
                    .with_mode(TransportationMode::Driving)
                    .with_totals(900.0, 5000.0, 3)
            })
            .collect();
        let report = generate_insights(&trips);

        assert!(report.recommendations.len() >= 3);
        assert!(report
            .recommendations
            .windows(2)
            .all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_report_sections_agree_on_trip_count() {
        let trips: Vec<Trip> = (0..4).map(|i| region_trip(i, "Utah")).collect();
        let report = generate_insights(&trips);

        assert_eq!(report.personal_preferences.trip_count, 4);
        assert_eq!(report.stats.travel.total_trips, 4);
        assert_eq!(report.trend_analysis.yearly_costs.len(), 4);
        assert_eq!(report.trend_analysis.cost_trend.to_string(), "stable");
        assert_eq!(report.trend_analysis.top_stops.len(), 4);
    }

    #[test]
    fn test_custom_config_limits_top_stops() {
        let trips: Vec<Trip> = (0..4).map(|i| region_trip(i, "Utah")).collect();
        let config = InsightsConfig { top_stop_limit: 2, ..InsightsConfig::default() };
        let report = generate_insights_with_config(&trips, &config);
        assert_eq!(report.trend_analysis.top_stops.len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_report_json_field_names() {
        let trips: Vec<Trip> = (0..10).map(|i| region_trip(i, "Arizona")).collect();
        let json = generate_insights(&trips).to_json_pretty().unwrap();
        assert!(json.contains("\"personalPreferences\""));
        assert!(json.contains("\"costPerPark\""));
        assert!(json.contains("\"type\": \"exploration\""));
        assert!(json.contains("\"priority\": \"high\""));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_imported_history_with_huge_durations() {
        let json = r#"[
            {"id": "a", "estimatedCost": 1200, "totalDuration": 3000000000},
            {"id": "b", "estimatedCost": 800, "totalDuration": 3000000000}
        ]"#;
        let trips = crate::record::trips_from_json(json).unwrap();
        let report = generate_insights(&trips);

        assert_eq!(report.stats.travel.total_days, 6_000_000_000);
        assert_eq!(report.efficiency.cost_per_day, 0.0);
        assert_eq!(report.personal_preferences.average_duration_days, 3_000_000_000.0);
    }
}
