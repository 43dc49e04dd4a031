//! Fixed lookup tables used to classify stops and trips.
//!
//! All tables are `const` slices; nothing here is built or mutated at runtime.

use chrono::{Datelike, NaiveDate};
use std::fmt;

// =============================================================================
// Regions
// =============================================================================

/// Broad travel region a stop's state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    Northeast,
    Southeast,
    Midwest,
    Southwest,
    RockyMountains,
    PacificWest,
    Alaska,
    Territories,
    Other,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Northeast => "Northeast",
            Region::Southeast => "Southeast",
            Region::Midwest => "Midwest",
            Region::Southwest => "Southwest",
            Region::RockyMountains => "Rocky Mountains",
            Region::PacificWest => "Pacific West",
            Region::Alaska => "Alaska",
            Region::Territories => "Territories",
            Region::Other => "Other",
        };
        f.write_str(name)
    }
}

/// (full name, postal code, region)
const STATE_REGIONS: &[(&str, &str, Region)] = &[
    ("Connecticut", "CT", Region::Northeast),
    ("Delaware", "DE", Region::Northeast),
    ("District of Columbia", "DC", Region::Northeast),
    ("Maine", "ME", Region::Northeast),
    ("Maryland", "MD", Region::Northeast),
    ("Massachusetts", "MA", Region::Northeast),
    ("New Hampshire", "NH", Region::Northeast),
    ("New Jersey", "NJ", Region::Northeast),
    ("New York", "NY", Region::Northeast),
    ("Pennsylvania", "PA", Region::Northeast),
    ("Rhode Island", "RI", Region::Northeast),
    ("Vermont", "VT", Region::Northeast),
    ("Alabama", "AL", Region::Southeast),
    ("Arkansas", "AR", Region::Southeast),
    ("Florida", "FL", Region::Southeast),
    ("Georgia", "GA", Region::Southeast),
    ("Kentucky", "KY", Region::Southeast),
    ("Louisiana", "LA", Region::Southeast),
    ("Mississippi", "MS", Region::Southeast),
    ("North Carolina", "NC", Region::Southeast),
    ("South Carolina", "SC", Region::Southeast),
    ("Tennessee", "TN", Region::Southeast),
    ("Virginia", "VA", Region::Southeast),
    ("West Virginia", "WV", Region::Southeast),
    ("Illinois", "IL", Region::Midwest),
    ("Indiana", "IN", Region::Midwest),
    ("Iowa", "IA", Region::Midwest),
    ("Kansas", "KS", Region::Midwest),
    ("Michigan", "MI", Region::Midwest),
    ("Minnesota", "MN", Region::Midwest),
    ("Missouri", "MO", Region::Midwest),
    ("Nebraska", "NE", Region::Midwest),
    ("North Dakota", "ND", Region::Midwest),
    ("Ohio", "OH", Region::Midwest),
    ("South Dakota", "SD", Region::Midwest),
    ("Wisconsin", "WI", Region::Midwest),
    ("Arizona", "AZ", Region::Southwest),
    ("Nevada", "NV", Region::Southwest),
    ("New Mexico", "NM", Region::Southwest),
    ("Oklahoma", "OK", Region::Southwest),
    ("Texas", "TX", Region::Southwest),
    ("Utah", "UT", Region::Southwest),
    ("Colorado", "CO", Region::RockyMountains),
    ("Idaho", "ID", Region::RockyMountains),
    ("Montana", "MT", Region::RockyMountains),
    ("Wyoming", "WY", Region::RockyMountains),
    ("California", "CA", Region::PacificWest),
    ("Hawaii", "HI", Region::PacificWest),
    ("Oregon", "OR", Region::PacificWest),
    ("Washington", "WA", Region::PacificWest),
    ("Alaska", "AK", Region::Alaska),
    ("American Samoa", "AS", Region::Territories),
    ("Guam", "GU", Region::Territories),
    ("Northern Mariana Islands", "MP", Region::Territories),
    ("Puerto Rico", "PR", Region::Territories),
    ("Virgin Islands", "VI", Region::Territories),
];

/// Map a state (full name or postal code, any case) to its region.
///
/// Multi-state values such as `"Wyoming, Montana, Idaho"` resolve by the
/// first recognised state.
///
/// # Example
/// ```
/// use trip_insights::classify::region_for_state;
/// use trip_insights::Region;
///
/// assert_eq!(region_for_state("Utah"), Region::Southwest);
/// assert_eq!(region_for_state("wy"), Region::RockyMountains);
/// assert_eq!(region_for_state("Wyoming, Montana, Idaho"), Region::RockyMountains);
/// assert_eq!(region_for_state(""), Region::Other);
/// ```
pub fn region_for_state(state: &str) -> Region {
    state
        .split([',', '&', '/'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .find_map(lookup_state)
        .unwrap_or(Region::Other)
}

fn lookup_state(part: &str) -> Option<Region> {
    STATE_REGIONS
        .iter()
        .find(|(name, code, _)| name.eq_ignore_ascii_case(part) || code.eq_ignore_ascii_case(part))
        .map(|&(_, _, region)| region)
}

// =============================================================================
// Stop Types
// =============================================================================

/// Landscape type guessed from a stop's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopType {
    Canyon,
    Volcanic,
    Cave,
    Desert,
    Mountain,
    Coastal,
    Forest,
    Lake,
    Historic,
    General,
}

impl fmt::Display for StopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StopType::Canyon => "Canyon",
            StopType::Volcanic => "Volcanic",
            StopType::Cave => "Cave",
            StopType::Desert => "Desert",
            StopType::Mountain => "Mountain",
            StopType::Coastal => "Coastal",
            StopType::Forest => "Forest",
            StopType::Lake => "Lake",
            StopType::Historic => "Historic",
            StopType::General => "General",
        };
        f.write_str(name)
    }
}

/// Lowercase keywords checked in order; the first hit wins.
const STOP_TYPE_KEYWORDS: &[(&str, StopType)] = &[
    ("canyon", StopType::Canyon),
    ("gorge", StopType::Canyon),
    ("volcan", StopType::Volcanic),
    ("lava", StopType::Volcanic),
    ("crater", StopType::Volcanic),
    ("cave", StopType::Cave),
    ("cavern", StopType::Cave),
    ("desert", StopType::Desert),
    ("dune", StopType::Desert),
    ("death valley", StopType::Desert),
    ("joshua", StopType::Desert),
    ("saguaro", StopType::Desert),
    ("arches", StopType::Desert),
    ("mountain", StopType::Mountain),
    ("peak", StopType::Mountain),
    ("glacier", StopType::Mountain),
    ("rocky", StopType::Mountain),
    ("denali", StopType::Mountain),
    ("beach", StopType::Coastal),
    ("coast", StopType::Coastal),
    ("island", StopType::Coastal),
    ("shore", StopType::Coastal),
    ("bay", StopType::Coastal),
    ("keys", StopType::Coastal),
    ("forest", StopType::Forest),
    ("redwood", StopType::Forest),
    ("sequoia", StopType::Forest),
    ("lake", StopType::Lake),
    ("river", StopType::Lake),
    ("falls", StopType::Lake),
    ("historic", StopType::Historic),
    ("monument", StopType::Historic),
    ("memorial", StopType::Historic),
    ("battlefield", StopType::Historic),
];

/// Classify a stop by keywords in its name.
///
/// # Example
/// ```
/// use trip_insights::classify::classify_stop_type;
/// use trip_insights::StopType;
///
/// assert_eq!(classify_stop_type("Grand Canyon National Park"), StopType::Canyon);
/// assert_eq!(classify_stop_type("Yellowstone"), StopType::General);
/// ```
pub fn classify_stop_type(name: &str) -> StopType {
    let lower = name.to_lowercase();
    STOP_TYPE_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or(StopType::General, |&(_, stop_type)| stop_type)
}

// =============================================================================
// Seasons
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        };
        f.write_str(name)
    }
}

/// Season for a zero-based month (0 = January).
pub fn season_for_month0(month0: u32) -> Season {
    match month0 {
        2..=4 => Season::Spring,
        5..=7 => Season::Summer,
        8..=10 => Season::Fall,
        _ => Season::Winter,
    }
}

pub fn season_for_date(date: NaiveDate) -> Season {
    season_for_month0(date.month0())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup() {
        assert_eq!(region_for_state("Arizona"), Region::Southwest);
        assert_eq!(region_for_state("  california "), Region::PacificWest);
        assert_eq!(region_for_state("ME"), Region::Northeast);
        assert_eq!(region_for_state("Atlantis"), Region::Other);
        assert_eq!(region_for_state("Atlantis, Utah"), Region::Southwest);
        assert_eq!(region_for_state("Tennessee & North Carolina"), Region::Southeast);
    }

    #[test]
    fn test_stop_type_keywords() {
        assert_eq!(classify_stop_type("Black Canyon of the Gunnison"), StopType::Canyon);
        assert_eq!(classify_stop_type("Mammoth Cave"), StopType::Cave);
        assert_eq!(classify_stop_type("Great Sand Dunes"), StopType::Desert);
        assert_eq!(classify_stop_type("Glacier"), StopType::Mountain);
        assert_eq!(classify_stop_type("Acadia Island Loop"), StopType::Coastal);
        assert_eq!(classify_stop_type("Crater Lake"), StopType::Volcanic);
        assert_eq!(classify_stop_type("Zion"), StopType::General);
    }

    #[test]
    fn test_seasons_zero_based_months() {
        assert_eq!(season_for_month0(0), Season::Winter);
        assert_eq!(season_for_month0(1), Season::Winter);
        assert_eq!(season_for_month0(2), Season::Spring);
        assert_eq!(season_for_month0(4), Season::Spring);
        assert_eq!(season_for_month0(5), Season::Summer);
        assert_eq!(season_for_month0(7), Season::Summer);
        assert_eq!(season_for_month0(8), Season::Fall);
        assert_eq!(season_for_month0(10), Season::Fall);
        assert_eq!(season_for_month0(11), Season::Winter);

        let july = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(season_for_date(july), Season::Summer);
    }
}
