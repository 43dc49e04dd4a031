//! Rule-based travel recommendations.
//!
//! Each rule looks at the [`PersonalPreferences`] summary and yields at most
//! one [`Recommendation`]. Rules run in declaration order and the result is
//! stable-sorted by priority, so equal priorities keep rule order.

use log::debug;
use std::fmt;

use crate::preferences::PersonalPreferences;

/// Average trip cost above which cheaper alternatives are suggested.
pub const HIGH_BUDGET_USD: f64 = 3000.0;
/// Average trip length below which longer trips are suggested.
pub const SHORT_TRIP_DAYS: f64 = 5.0;
/// Share of trips in one region that prompts diversifying.
pub const REGION_CONCENTRATION: f64 = 0.7;
/// Share of trips in one season that prompts trying another.
pub const SEASON_CONCENTRATION: f64 = 0.6;
/// Share of driven trips that prompts considering flights.
pub const DRIVING_CONCENTRATION: f64 = 0.8;

/// Ordering is `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RecommendationKind {
    Budget,
    Experience,
    Exploration,
    Timing,
    Efficiency,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecommendationKind::Budget => "budget",
            RecommendationKind::Experience => "experience",
            RecommendationKind::Exploration => "exploration",
            RecommendationKind::Timing => "timing",
            RecommendationKind::Efficiency => "efficiency",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Recommendation {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub action_items: Vec<String>,
}

impl Recommendation {
    fn new(
        kind: RecommendationKind,
        priority: Priority,
        title: &str,
        description: String,
        impact: &str,
        action_items: &[&str],
    ) -> Self {
        Self {
            kind,
            priority,
            title: title.to_string(),
            description,
            impact: impact.to_string(),
            action_items: action_items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

type Rule = fn(&PersonalPreferences) -> Option<Recommendation>;

const RULES: &[Rule] = &[
    budget_rule,
    experience_rule,
    exploration_rule,
    timing_rule,
    efficiency_rule,
];

/// Run every rule against the summary and order the results by priority.
///
/// An empty history produces no recommendations.
pub fn recommend(prefs: &PersonalPreferences) -> Vec<Recommendation> {
    if prefs.trip_count == 0 {
        return Vec::new();
    }

    let mut recommendations: Vec<Recommendation> = RULES.iter().filter_map(|rule| rule(prefs)).collect();
    // stable: equal priorities keep rule order
    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));

    debug!(
        "[TripInsights] {} recommendations from {} trips",
        recommendations.len(),
        prefs.trip_count
    );
    recommendations
}

fn exceeds_share(count: usize, total: usize, share: f64) -> bool {
    count as f64 > total as f64 * share
}

fn budget_rule(prefs: &PersonalPreferences) -> Option<Recommendation> {
    if prefs.average_budget <= HIGH_BUDGET_USD {
        return None;
    }
    Some(Recommendation::new(
        RecommendationKind::Budget,
        Priority::Medium,
        "Explore budget-friendly options",
        format!(
            "Your trips average ${:.0}. Cheaper stays and off-peak dates could stretch that further.",
            prefs.average_budget
        ),
        "Could cut trip costs by 20-30%",
        &[
            "Camp or book cabins instead of hotels",
            "Travel in shoulder season for lower rates",
            "Buy an annual park pass",
            "Cook some meals instead of eating out",
        ],
    ))
}

fn experience_rule(prefs: &PersonalPreferences) -> Option<Recommendation> {
    if prefs.average_duration_days >= SHORT_TRIP_DAYS {
        return None;
    }
    Some(Recommendation::new(
        RecommendationKind::Experience,
        Priority::Low,
        "Plan longer trips",
        format!(
            "Your trips average {:.1} days. A few extra days leave room to slow down at each stop.",
            prefs.average_duration_days
        ),
        "Deeper experience at each destination",
        &[
            "Add a rest day between long drives",
            "Stay two or more nights at major stops",
            "Combine nearby stops into one longer trip",
        ],
    ))
}

fn exploration_rule(prefs: &PersonalPreferences) -> Option<Recommendation> {
    let top = prefs.top_regions.first()?;
    if !exceeds_share(top.trips, prefs.trip_count, REGION_CONCENTRATION) {
        return None;
    }
    Some(Recommendation::new(
        RecommendationKind::Exploration,
        Priority::High,
        "Diversify your destinations",
        format!(
            "{:.0}% of your trips include the {} region. Other regions offer very different landscapes.",
            top.percentage, top.region
        ),
        "New landscapes and experiences",
        &[
            "Pick one trip this year in a region you have not visited",
            "Try a coastal or mountain destination",
            "Look for lesser-known stops near your usual routes",
        ],
    ))
}

fn timing_rule(prefs: &PersonalPreferences) -> Option<Recommendation> {
    let top = prefs.top_seasons.first()?;
    if !exceeds_share(top.trips, prefs.trip_count, SEASON_CONCENTRATION) {
        return None;
    }
    Some(Recommendation::new(
        RecommendationKind::Timing,
        Priority::Medium,
        "Try a different season",
        format!(
            "{:.0}% of your trips start in {}. The same places look very different at other times of year.",
            top.percentage,
            top.season.to_string().to_lowercase()
        ),
        "Fewer crowds and seasonal scenery",
        &[
            "Visit a favourite stop in another season",
            "Check seasonal road and facility closures",
            "Plan around wildflower, foliage or wildlife seasons",
        ],
    ))
}

fn efficiency_rule(prefs: &PersonalPreferences) -> Option<Recommendation> {
    let driving = prefs.driving_trips();
    if !exceeds_share(driving, prefs.trip_count, DRIVING_CONCENTRATION) {
        return None;
    }
    Some(Recommendation::new(
        RecommendationKind::Efficiency,
        Priority::Low,
        "Consider flying to distant stops",
        format!(
            "You drove on {driving} of {} trips. Flying the longest legs can free up days on site.",
            prefs.trip_count
        ),
        "More time at destinations, less on the road",
        &[
            "Compare flight and driving costs for legs over 500 miles",
            "Fly in and rent a car for regional loops",
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Region, Season};
    use crate::preferences::{summarize_preferences, ModeShare, RegionShare, SeasonShare};
    use crate::{TransportationMode, Trip};

    fn prefs(trip_count: usize) -> PersonalPreferences {
        PersonalPreferences {
            trip_count,
            average_duration_days: 7.0,
            average_budget: 2000.0,
            ..PersonalPreferences::default()
        }
    }

    #[test]
    fn test_no_history_no_recommendations() {
        assert!(recommend(&PersonalPreferences::default()).is_empty());
    }

    #[test]
    fn test_balanced_history_triggers_nothing() {
        assert!(recommend(&prefs(4)).is_empty());
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut p = prefs(10);
        p.average_budget = 3000.0;
        p.average_duration_days = 5.0;
        p.top_regions = vec![RegionShare { region: Region::Southwest, trips: 7, percentage: 70.0 }];
        p.top_seasons = vec![SeasonShare { season: Season::Summer, trips: 6, percentage: 60.0 }];
        p.transportation = vec![ModeShare { mode: TransportationMode::Driving, trips: 8, percentage: 80.0 }];
        assert!(recommend(&p).is_empty());
    }

    #[test]
    fn test_all_rules_sorted_by_priority() {
        let mut p = prefs(10);
        p.average_budget = 4200.0;
        p.average_duration_days = 3.5;
        p.top_regions = vec![RegionShare { region: Region::Southwest, trips: 8, percentage: 80.0 }];
        p.top_seasons = vec![SeasonShare { season: Season::Summer, trips: 7, percentage: 70.0 }];
        p.transportation = vec![ModeShare { mode: TransportationMode::Driving, trips: 9, percentage: 90.0 }];

        let recs = recommend(&p);
        let kinds: Vec<RecommendationKind> = recs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::Exploration,
                RecommendationKind::Budget,
                RecommendationKind::Timing,
                RecommendationKind::Experience,
                RecommendationKind::Efficiency,
            ]
        );
        assert!(recs.windows(2).all(|w| w[0].priority >= w[1].priority));
        assert!(recs.iter().all(|r| (2..=4).contains(&r.action_items.len())));
        assert!(recs[2].description.contains("summer"));
    }

    #[test]
    fn test_budget_rule_uses_exact_average() {
        // Mean 3000.33 is over the threshold even though it displays as $3000
        let trips: Vec<Trip> = [3000.0, 3000.0, 3001.0]
            .iter()
            .enumerate()
            .map(|(i, cost)| Trip::new(format!("t{i}"), "t").with_totals(100.0, *cost, 7))
            .collect();
        let recs = recommend(&summarize_preferences(&trips));

        let budget = recs
            .iter()
            .find(|r| r.kind == RecommendationKind::Budget)
            .unwrap();
        assert!(budget.description.starts_with("Your trips average $3000."));
    }

    #[test]
    fn test_priority_display_and_order() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::High.to_string(), "high");
        assert_eq!(RecommendationKind::Exploration.to_string(), "exploration");
    }
}
