//! Distance filtering for search results
//!
//! The dine-out search only loosely honours its own radius parameter, so
//! results are measured again here before one is suggested.

use crate::models::{Coordinates, Located};

/// Great-circle distance between two points, in meters
#[must_use]
pub fn distance_meters(from: &Coordinates, to: &Coordinates) -> f64 {
    let km = haversine::distance(
        haversine::Location {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        haversine::Location {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        haversine::Units::Kilometers,
    );
    km * 1000.0
}

/// Geographic search functionality
pub struct GeographicSearch;

impl GeographicSearch {
    /// Keep the candidates within `radius_m` of `center`, in their original order
    #[must_use]
    pub fn within_radius<T: Located>(candidates: Vec<T>, center: &Coordinates, radius_m: f64) -> Vec<T> {
        candidates
            .into_iter()
            .filter(|candidate| distance_meters(center, &candidate.coordinates()) <= radius_m)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CAPITOL: Coordinates = Coordinates {
        latitude: 43.072_864,
        longitude: -89.388_124,
    };

    #[test]
    fn test_distance_to_self_is_zero() {
        assert!(distance_meters(&CAPITOL, &CAPITOL).abs() < 1e-6);
    }

    #[test]
    fn test_distance_is_geodesic() {
        // One degree of latitude is roughly 111.2 km on the haversine sphere.
        let north = Coordinates::new(CAPITOL.latitude + 1.0, CAPITOL.longitude);
        let meters = distance_meters(&CAPITOL, &north);
        assert!((meters - 111_195.0).abs() < 500.0, "got {meters}");

        // A degree of longitude shrinks with latitude, which a planar metric would miss.
        let east = Coordinates::new(CAPITOL.latitude, CAPITOL.longitude + 1.0);
        let meters = distance_meters(&CAPITOL, &east);
        assert!(meters < 82_000.0 && meters > 80_000.0, "got {meters}");
    }

    #[rstest]
    #[case::same_spot(0.0, true)]
    #[case::few_blocks(0.005, true)]
    #[case::just_inside(0.0144, true)]
    #[case::just_outside(0.0146, false)]
    #[case::across_town(0.05, false)]
    fn test_within_radius_boundary(#[case] lat_offset: f64, #[case] kept: bool) {
        let candidate = Coordinates::new(CAPITOL.latitude + lat_offset, CAPITOL.longitude);
        let result = GeographicSearch::within_radius(vec![candidate], &CAPITOL, 1610.0);
        assert_eq!(result.len() == 1, kept);
    }

    #[test]
    fn test_within_radius_preserves_order() {
        let candidates = vec![
            Coordinates::new(43.0740, -89.3840),
            Coordinates::new(43.2000, -89.3881),
            Coordinates::new(43.0700, -89.3950),
            Coordinates::new(42.9000, -89.3881),
            Coordinates::new(43.0729, -89.3881),
        ];

        let result = GeographicSearch::within_radius(candidates.clone(), &CAPITOL, 1610.0);
        assert_eq!(result, vec![candidates[0], candidates[2], candidates[4]]);
    }
}
