//! # Geographic Utilities
//!
//! Great-circle distance between stops, in statute miles.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`distance_miles`] | Haversine distance between two coordinates |
//! | [`segment_distances`] | Leg lengths of a stop sequence, skipping unknown endpoints |
//! | [`path_length_miles`] | Total length of a stop sequence |
//! | [`stop_bounds`] | Bounding box of the located stops |
//! | [`stop_center`] | Mean position of the located stops |
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! Distances come from `geo`'s Haversine metric, which works on a sphere of
//! mean radius 6,371,008.8 m. Haversine distance scales linearly with the
//! radius, so the result is rescaled onto a 3,959 mile sphere.
//!
//! ### Unknown Coordinates
//!
//! A coordinate that fails [`Coordinate::is_known`] yields a distance of
//! `0.0`. Callers must read that as "unknown", not "co-located".

use geo::{Distance, Haversine, Point};

use crate::{Coordinate, Stop};

/// Earth radius used for every distance in this crate.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Mean Earth radius `geo` uses for its Haversine metric.
const GEO_MEAN_EARTH_RADIUS_METERS: f64 = 6_371_008.8;

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two coordinates in miles.
///
/// Returns `0.0` if either coordinate is unknown.
///
/// # Example
///
/// ```rust
/// use trip_insights::{Coordinate, distance_miles};
///
/// let zion = Coordinate::new(37.2982, -113.0263);
/// let grand_canyon = Coordinate::new(36.1069, -112.1129);
///
/// let miles = distance_miles(&zion, &grand_canyon);
/// assert!((miles - 96.6).abs() < 1.0);
/// assert_eq!(distance_miles(&zion, &Coordinate::missing()), 0.0);
/// ```
#[inline]
pub fn distance_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    if !a.is_known() || !b.is_known() {
        return 0.0;
    }
    let point1 = Point::new(a.lng, a.lat);
    let point2 = Point::new(b.lng, b.lat);
    let meters = Haversine::distance(point1, point2);
    meters / GEO_MEAN_EARTH_RADIUS_METERS * EARTH_RADIUS_MILES
}

/// Leg lengths between consecutive stops whose coordinates are both known.
///
/// Legs touching a stop without coordinates are left out entirely rather
/// than reported as zero.
pub fn segment_distances(stops: &[Stop]) -> Vec<f64> {
    stops
        .windows(2)
        .filter(|w| w[0].has_coordinates() && w[1].has_coordinates())
        .map(|w| distance_miles(&w[0].coordinates, &w[1].coordinates))
        .collect()
}

/// Total length in miles of visiting `stops` in order.
///
/// Empty or single-stop sequences return 0.0. Unknown coordinates contribute
/// zero-length legs.
pub fn path_length_miles(stops: &[Stop]) -> f64 {
    if stops.len() < 2 {
        return 0.0;
    }

    stops
        .windows(2)
        .map(|w| distance_miles(&w[0].coordinates, &w[1].coordinates))
        .sum()
}

// =============================================================================
// Bounds / Center
// =============================================================================

/// Bounding box for a set of stops, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
            && coord.lng >= self.min_lng
            && coord.lng <= self.max_lng
    }
}

/// Bounding box of the stops with known coordinates.
///
/// Returns `None` when no stop is located.
///
/// # Example
///
/// ```rust
/// use trip_insights::{Coordinate, Stop, geo_utils};
///
/// let stops = vec![
///     Stop::new("zion", "Zion", Coordinate::new(37.2982, -113.0263)),
///     Stop::new("brca", "Bryce Canyon", Coordinate::new(37.5930, -112.1871)),
///     Stop::new("tbd", "Somewhere", Coordinate::missing()),
/// ];
///
/// let bounds = geo_utils::stop_bounds(&stops).unwrap();
/// assert_eq!(bounds.min_lat, 37.2982);
/// assert_eq!(bounds.max_lng, -112.1871);
/// ```
pub fn stop_bounds(stops: &[Stop]) -> Option<Bounds> {
    let mut located = stops.iter().filter(|s| s.has_coordinates()).map(|s| s.coordinates);
    let first = located.next()?;

    let bounds = located.fold(
        Bounds {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        },
        |b, c| Bounds {
            min_lat: b.min_lat.min(c.lat),
            max_lat: b.max_lat.max(c.lat),
            min_lng: b.min_lng.min(c.lng),
            max_lng: b.max_lng.max(c.lng),
        },
    );
    Some(bounds)
}

/// Arithmetic mean of the located stops' coordinates.
///
/// Fine for a regional itinerary; not meaningful across the antimeridian.
pub fn stop_center(stops: &[Stop]) -> Option<Coordinate> {
    let located: Vec<&Coordinate> = stops
        .iter()
        .filter(|s| s.has_coordinates())
        .map(|s| &s.coordinates)
        .collect();
    if located.is_empty() {
        return None;
    }

    let n = located.len() as f64;
    let lat = located.iter().map(|c| c.lat).sum::<f64>() / n;
    let lng = located.iter().map(|c| c.lng).sum::<f64>() / n;
    Some(Coordinate::new(lat, lng))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn stop(id: &str, lat: f64, lng: f64) -> Stop {
        Stop::new(id, id, Coordinate::new(lat, lng))
    }

    #[test]
    fn test_distance_same_point() {
        let p = Coordinate::new(44.4280, -110.5885);
        assert_eq!(distance_miles(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_known_value() {
        // Yellowstone to Zion is roughly 509 miles as the crow flies
        let yellowstone = Coordinate::new(44.4280, -110.5885);
        let zion = Coordinate::new(37.2982, -113.0263);
        assert!(approx_eq(distance_miles(&yellowstone, &zion), 508.8, 1.0));
    }

    #[test]
    fn test_distance_along_meridian_uses_3959_mile_radius() {
        let a = Coordinate::new(10.0, -100.0);
        let b = Coordinate::new(11.0, -100.0);
        let expected = EARTH_RADIUS_MILES * 1.0_f64.to_radians();
        assert!(approx_eq(distance_miles(&a, &b), expected, 1e-6));
    }

    #[test]
    fn test_distance_unknown_is_zero() {
        let a = Coordinate::new(44.4280, -110.5885);
        assert_eq!(distance_miles(&a, &Coordinate::missing()), 0.0);
        assert_eq!(distance_miles(&Coordinate::missing(), &a), 0.0);
        assert_eq!(distance_miles(&a, &Coordinate::new(f64::NAN, 1.0)), 0.0);
    }

    #[test]
    fn test_path_length_empty_and_single() {
        assert_eq!(path_length_miles(&[]), 0.0);
        assert_eq!(path_length_miles(&[stop("a", 40.0, -100.0)]), 0.0);
    }

    #[test]
    fn test_segment_distances_skip_unknown() {
        let stops = vec![
            stop("a", 40.0, -100.0),
            stop("b", 41.0, -100.0),
            stop("c", 0.0, 0.0),
            stop("d", 42.0, -100.0),
        ];
        let segments = segment_distances(&stops);
        assert_eq!(segments.len(), 1);
        assert!(approx_eq(segments[0], path_length_miles(&stops), 1e-9));
    }

    #[test]
    fn test_bounds_and_center_ignore_unknown() {
        let stops = vec![
            stop("a", 40.0, -110.0),
            stop("b", 0.0, 0.0),
            stop("c", 42.0, -106.0),
        ];
        let bounds = stop_bounds(&stops).unwrap();
        assert_eq!(bounds.min_lat, 40.0);
        assert_eq!(bounds.max_lat, 42.0);
        assert_eq!(bounds.min_lng, -110.0);
        assert!(!bounds.contains(&Coordinate::missing()));

        let center = stop_center(&stops).unwrap();
        assert!(approx_eq(center.lat, 41.0, 1e-12));
        assert!(approx_eq(center.lng, -108.0, 1e-12));
        assert!(bounds.contains(&center));

        assert!(stop_bounds(&[stop("x", 0.0, 0.0)]).is_none());
        assert!(stop_center(&[]).is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-89.0..=89.0, -179.0..=179.0)
                .prop_map(|(lat, lng)| Coordinate::new(lat, lng))
        }

        proptest! {
            #[test]
            fn prop_distance_symmetric(a in valid_coord(), b in valid_coord()) {
                let ab = distance_miles(&a, &b);
                let ba = distance_miles(&b, &a);
                prop_assert!((ab - ba).abs() < 1e-6);
            }

            #[test]
            fn prop_distance_non_negative(a in valid_coord(), b in valid_coord()) {
                prop_assert!(distance_miles(&a, &b) >= 0.0);
            }

            #[test]
            fn prop_distance_bounded_by_half_circumference(a in valid_coord(), b in valid_coord()) {
                let max_distance = std::f64::consts::PI * EARTH_RADIUS_MILES;
                prop_assert!(distance_miles(&a, &b) <= max_distance + 0.1);
            }
        }
    }
}
