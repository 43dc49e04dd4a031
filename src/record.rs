//! Loosely-typed trip records, as stored by a host application.
//!
//! Every field is optional. Conversion into [`Trip`]/[`Stop`] applies one
//! coalescing policy so the analytics never see a missing value:
//!
//! | Field | Missing or invalid |
//! |-------|--------------------|
//! | numbers | `0` (negative and non-finite values too) |
//! | stay length | 2 days; anything below 1 becomes 1 |
//! | dates | `None`, with a warning for unparseable text |
//! | coordinates | [`Coordinate::missing`] |
//! | transportation mode | driving unless it reads "flying" |
//! | ids | name or title, then position in the list |
//!
//! Field names follow the stored camelCase form; the older `parks`,
//! `parkName`, `state`, `totalDistance`, `estimatedCost` and `totalDuration`
//! names are accepted as aliases.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use log::warn;

use crate::error::InsightsError;
use crate::{Coordinate, Stop, TransportationMode, Trip};

/// Stay assumed for a stop that does not record one.
pub const DEFAULT_STAY_DAYS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoordinateRecord {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StopRecord {
    #[cfg_attr(feature = "serde", serde(alias = "parkId"))]
    pub id: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "parkName"))]
    pub name: Option<String>,
    pub coordinates: Option<CoordinateRecord>,
    #[cfg_attr(feature = "serde", serde(alias = "state"))]
    pub state_or_region: Option<String>,
    pub visit_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "stayDuration"))]
    pub stay_duration_days: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TripRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "parks"))]
    pub stops: Vec<StopRecord>,
    pub transportation_mode: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "totalDistance"))]
    pub total_distance_miles: Option<f64>,
    #[cfg_attr(feature = "serde", serde(alias = "estimatedCost"))]
    pub estimated_cost_usd: Option<f64>,
    #[cfg_attr(feature = "serde", serde(alias = "totalDuration"))]
    pub total_duration_days: Option<f64>,
    pub created_at: Option<String>,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse a `YYYY-MM-DD` date or the date part of an RFC 3339 timestamp.
///
/// RFC 3339 values keep the calendar date of their own offset.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use trip_insights::record::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(parse_date("startDate", "2024-06-01").unwrap(), expected);
/// assert_eq!(parse_date("startDate", "2024-06-01T22:30:00-06:00").unwrap(), expected);
/// assert!(parse_date("startDate", "June 1st").is_err());
/// ```
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, InsightsError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| InsightsError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Parse an RFC 3339 timestamp, or a bare date as midnight UTC.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, InsightsError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = parse_date(field, trimmed)?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| InsightsError::InvalidDate {
        field,
        value: trimmed.to_string(),
    })?;
    Ok(Utc.from_utc_datetime(&midnight))
}

fn optional_date(field: &'static str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value.filter(|v| !v.trim().is_empty())?;
    match parse_date(field, value) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("[TripRecord] Ignoring {}", e);
            None
        }
    }
}

fn optional_timestamp(field: &'static str, value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value.filter(|v| !v.trim().is_empty())?;
    match parse_timestamp(field, value) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!("[TripRecord] Ignoring {}", e);
            None
        }
    }
}

/// Missing, negative and non-finite numbers all read as zero.
fn coalesce(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn coalesce_days(value: Option<f64>) -> u32 {
    coalesce(value).round().min(u32::MAX as f64) as u32
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Conversion
// =============================================================================

impl CoordinateRecord {
    pub fn into_coordinate(self) -> Coordinate {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
            _ => Coordinate::missing(),
        }
    }
}

impl StopRecord {
    /// Convert into a [`Stop`]; `position` names stops with no id or name.
    pub fn into_stop(self, position: usize) -> Stop {
        let name = non_empty(self.name);
        let id = non_empty(self.id)
            .or_else(|| name.clone())
            .unwrap_or_else(|| format!("stop-{position}"));

        let stay = match self.stay_duration_days {
            None => DEFAULT_STAY_DAYS,
            Some(days) => coalesce_days(Some(days)).max(1),
        };

        Stop {
            id,
            name: name.unwrap_or_default(),
            coordinates: self
                .coordinates
                .map_or_else(Coordinate::missing, CoordinateRecord::into_coordinate),
            state_or_region: self.state_or_region.unwrap_or_default(),
            visit_date: optional_date("visitDate", self.visit_date.as_deref()),
            stay_duration_days: stay,
        }
    }
}

impl TripRecord {
    /// Convert into a [`Trip`]; `position` names trips with no id or title.
    pub fn into_trip(self, position: usize) -> Trip {
        let title = non_empty(self.title);
        let id = non_empty(self.id)
            .or_else(|| title.clone())
            .unwrap_or_else(|| format!("trip-{position}"));

        let transportation_mode = match self.transportation_mode.as_deref().map(str::trim) {
            Some(mode) if mode.eq_ignore_ascii_case("flying") => TransportationMode::Flying,
            _ => TransportationMode::Driving,
        };

        Trip {
            start_date: optional_date("startDate", self.start_date.as_deref()),
            end_date: optional_date("endDate", self.end_date.as_deref()),
            created_at: optional_timestamp("createdAt", self.created_at.as_deref()),
            stops: self
                .stops
                .into_iter()
                .enumerate()
                .map(|(i, stop)| stop.into_stop(i))
                .collect(),
            transportation_mode,
            total_distance_miles: coalesce(self.total_distance_miles),
            estimated_cost_usd: coalesce(self.estimated_cost_usd),
            total_duration_days: coalesce_days(self.total_duration_days),
            title: title.unwrap_or_default(),
            id,
        }
    }

    /// Parse one record from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, InsightsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse a JSON array of trip records into typed trips.
///
/// Only structurally invalid JSON fails; bad field values are coalesced.
///
/// # Example
/// ```
/// # #[cfg(feature = "serde")]
/// # {
/// let json = r#"[{"title": "Utah loop", "parks": [{"parkName": "Zion", "state": "Utah"}], "estimatedCost": 1400}]"#;
/// let trips = trip_insights::trips_from_json(json).unwrap();
/// assert_eq!(trips[0].stops[0].name, "Zion");
/// assert_eq!(trips[0].estimated_cost_usd, 1400.0);
/// # }
/// ```
#[cfg(feature = "serde")]
pub fn trips_from_json(json: &str) -> Result<Vec<Trip>, InsightsError> {
    let records: Vec<TripRecord> = serde_json::from_str(json)?;
    log::debug!("[TripRecord] Parsed {} trip records", records.len());
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_trip(i))
        .collect())
}
