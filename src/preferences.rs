//! Personal preference summary over a trip history.
//!
//! Tallies regions, seasons, stop types and transportation modes, then keeps
//! the leaders of each. Rankings sort by count descending; equal counts keep
//! the order in which they were first seen, so results are deterministic.

use crate::classify::{
    classify_stop_type, region_for_state, season_for_date, Region, Season, StopType,
};
use crate::stats::{mean, median, percentage, round_to};
use crate::{TransportationMode, Trip};

const TOP_REGIONS: usize = 3;
const TOP_SEASONS: usize = 2;
const TOP_STOP_TYPES: usize = 3;

/// Share of trips that visited a region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionShare {
    pub region: Region,
    /// Trips with at least one stop in the region
    pub trips: usize,
    /// Percent of all trips
    pub percentage: f64,
}

/// Share of trips starting in a season.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonShare {
    pub season: Season,
    pub trips: usize,
    pub percentage: f64,
}

/// Stops of one landscape type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StopTypeCount {
    pub stop_type: StopType,
    pub stops: usize,
    /// Percent of all stops
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeShare {
    pub mode: TransportationMode,
    pub trips: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// What a traveller tends to do, distilled from their history.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PersonalPreferences {
    pub trip_count: usize,
    pub top_regions: Vec<RegionShare>,
    pub top_seasons: Vec<SeasonShare>,
    pub top_stop_types: Vec<StopTypeCount>,
    pub transportation: Vec<ModeShare>,
    /// Mean trip length, one decimal
    pub average_duration_days: f64,
    /// Mean estimated cost, unrounded
    pub average_budget: f64,
    pub budget_range: BudgetRange,
}

impl PersonalPreferences {
    /// Count of trips driven, 0 when there is no history.
    pub fn driving_trips(&self) -> usize {
        self.transportation
            .iter()
            .find(|m| m.mode == TransportationMode::Driving)
            .map_or(0, |m| m.trips)
    }
}

/// Count occurrences, then order by count descending with first-seen order
/// breaking ties.
pub(crate) fn rank_by_count<K, I>(items: I) -> Vec<(K, usize)>
where
    K: PartialEq,
    I: IntoIterator<Item = K>,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(key, _)| *key == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Build the preference summary for a history.
///
/// Regions count once per trip, however many stops fall in them. Stops
/// whose state is not in the region table are left out of the region tally.
/// Seasons come from each trip's start date; undated trips are skipped.
pub fn summarize_preferences(trips: &[Trip]) -> PersonalPreferences {
    let trip_count = trips.len();
    if trip_count == 0 {
        return PersonalPreferences::default();
    }

    let trip_regions = trips.iter().flat_map(|trip| {
        let mut seen: Vec<Region> = Vec::new();
        for stop in &trip.stops {
            let region = region_for_state(&stop.state_or_region);
            if region != Region::Other && !seen.contains(&region) {
                seen.push(region);
            }
        }
        seen
    });
    let top_regions = rank_by_count(trip_regions)
        .into_iter()
        .take(TOP_REGIONS)
        .map(|(region, count)| RegionShare {
            region,
            trips: count,
            percentage: percentage(count, trip_count),
        })
        .collect();

    let seasons = trips.iter().filter_map(|t| t.start_date).map(season_for_date);
    let top_seasons = rank_by_count(seasons)
        .into_iter()
        .take(TOP_SEASONS)
        .map(|(season, count)| SeasonShare {
            season,
            trips: count,
            percentage: percentage(count, trip_count),
        })
        .collect();

    let total_stops: usize = trips.iter().map(Trip::stop_count).sum();
    let stop_types = trips
        .iter()
        .flat_map(|t| t.stops.iter())
        .map(|s| classify_stop_type(&s.name));
    let top_stop_types = rank_by_count(stop_types)
        .into_iter()
        .take(TOP_STOP_TYPES)
        .map(|(stop_type, count)| StopTypeCount {
            stop_type,
            stops: count,
            percentage: percentage(count, total_stops),
        })
        .collect();

    let transportation = rank_by_count(trips.iter().map(|t| t.transportation_mode))
        .into_iter()
        .map(|(mode, count)| ModeShare {
            mode,
            trips: count,
            percentage: percentage(count, trip_count),
        })
        .collect();

    let durations: Vec<f64> = trips.iter().map(|t| t.total_duration_days as f64).collect();
    let costs: Vec<f64> = trips.iter().map(|t| t.estimated_cost_usd).collect();

    let budget_range = BudgetRange {
        min: costs.iter().copied().fold(f64::INFINITY, f64::min),
        max: costs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        median: median(&costs),
    };

    PersonalPreferences {
        trip_count,
        top_regions,
        top_seasons,
        top_stop_types,
        transportation,
        average_duration_days: round_to(mean(&durations), 1),
        average_budget: mean(&costs),
        budget_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, Stop};
    use chrono::NaiveDate;

    fn dated_trip(id: &str, month: u32, states: &[&str]) -> Trip {
        let start = NaiveDate::from_ymd_opt(2024, month, 1).unwrap();
        let stops = states
            .iter()
            .enumerate()
            .map(|(i, state)| {
                Stop::new(format!("{id}-{i}"), format!("Stop {i}"), Coordinate::new(37.0, -112.0))
                    .with_region(*state)
            })
            .collect();
        Trip::new(id, id).with_dates(start, start).with_stops(stops)
    }

    #[test]
    fn test_rank_by_count_ties_keep_first_seen() {
        let ranked = rank_by_count(["b", "a", "a", "c", "b", "c"]);
        assert_eq!(ranked, vec![("b", 2), ("a", 2), ("c", 2)]);

        let ranked = rank_by_count([1, 2, 2, 3]);
        assert_eq!(ranked[0], (2, 2));
        assert_eq!(ranked[1], (1, 1));
    }

    #[test]
    fn test_empty_history() {
        let prefs = summarize_preferences(&[]);
        assert_eq!(prefs, PersonalPreferences::default());
        assert_eq!(prefs.driving_trips(), 0);
    }

    #[test]
    fn test_regions_count_once_per_trip() {
        let trips = vec![
            dated_trip("a", 6, &["Utah", "Utah", "Arizona", "Colorado"]),
            dated_trip("b", 7, &["Wyoming"]),
            dated_trip("c", 7, &["Atlantis"]),
        ];
        let prefs = summarize_preferences(&trips);

        assert_eq!(prefs.top_regions.len(), 2);
        assert_eq!(prefs.top_regions[0].region, Region::RockyMountains);
        assert_eq!(prefs.top_regions[0].trips, 2);
        assert_eq!(prefs.top_regions[0].percentage, 66.7);
        assert_eq!(prefs.top_regions[1].region, Region::Southwest);
        assert_eq!(prefs.top_regions[1].trips, 1);
    }

    #[test]
    fn test_seasons_and_stop_types() {
        let mut trips = vec![
            dated_trip("a", 1, &["Utah"]),
            dated_trip("b", 7, &["Utah"]),
            dated_trip("c", 8, &["Utah"]),
            dated_trip("d", 10, &["Utah"]),
        ];
        trips[0].stops[0].name = "Bryce Canyon".to_string();
        trips[1].stops[0].name = "Grand Canyon".to_string();

        let prefs = summarize_preferences(&trips);
        assert_eq!(prefs.top_seasons.len(), 2);
        assert_eq!(prefs.top_seasons[0].season, Season::Summer);
        assert_eq!(prefs.top_seasons[0].trips, 2);
        assert_eq!(prefs.top_seasons[1].season, Season::Winter);

        assert_eq!(prefs.top_stop_types[0].stop_type, StopType::Canyon);
        assert_eq!(prefs.top_stop_types[0].percentage, 50.0);
    }

    #[test]
    fn test_averages_and_budget_range() {
        let trips = vec![
            Trip::new("a", "a").with_totals(0.0, 1000.0, 3),
            Trip::new("b", "b").with_totals(0.0, 4000.0, 4),
            Trip::new("c", "c").with_totals(0.0, 2000.0, 4),
            Trip::new("d", "d").with_mode(TransportationMode::Flying).with_totals(0.0, 3000.0, 4),
        ];
        let prefs = summarize_preferences(&trips);

        assert_eq!(prefs.trip_count, 4);
        assert_eq!(prefs.average_duration_days, 3.8);
        assert_eq!(prefs.average_budget, 2500.0);
        assert_eq!(prefs.budget_range.min, 1000.0);
        assert_eq!(prefs.budget_range.max, 4000.0);
        assert_eq!(prefs.budget_range.median, 2500.0);
        assert_eq!(prefs.driving_trips(), 3);
        assert_eq!(prefs.transportation[0].percentage, 75.0);
        // Undated trips contribute no season
        assert!(prefs.top_seasons.is_empty());
    }
}
