//! Great-circle distance and bounding-box math for proximity search.
//!
//! [`bounding_box`] is what the search path actually filters on. It is a
//! rectangle in degree space, so its corners reach roughly `radius * sqrt(2)`
//! from the center: spots in those corners are returned as in range. Callers
//! that need a true circle must post-filter with [`distance_km`].

use serde::{Deserialize, Serialize};

use crate::constants::geo::{EARTH_RADIUS_KM, KM_PER_DEGREE, MAX_LONGITUDE, MIN_LONGITUDE};

/// Haversine distance in kilometers between two points given in degrees.
///
/// Symmetric, zero for identical points, and finite and non-negative for
/// finite inputs.
///
/// ```
/// use machipoke::geo::distance_km;
///
/// // Tokyo Station -> Shinjuku Station, roughly 6 km.
/// let d = distance_km(35.6812, 139.7671, 35.6896, 139.7006);
/// assert!(d > 5.5 && d < 7.5);
/// ```
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Axis-aligned latitude/longitude rectangle, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.min_lat == self.max_lat && self.min_lon == self.max_lon
    }
}

/// Rectangle around a center covering `radius_km`, using 111 km per degree of
/// latitude and `111 * cos(lat)` km per degree of longitude.
///
/// A zero radius yields a point box. Near the poles the longitude half-width
/// blows up; once it is non-finite or spans 180 degrees or more the box covers
/// the whole longitude range instead.
#[must_use]
pub fn bounding_box(center_lat: f64, center_lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;
    let lon_delta = radius_km / (KM_PER_DEGREE * center_lat.to_radians().cos());

    let (min_lon, max_lon) = if lon_delta.is_finite() && lon_delta.abs() < 180.0 {
        (center_lon - lon_delta, center_lon + lon_delta)
    } else if radius_km == 0.0 {
        (center_lon, center_lon)
    } else {
        (MIN_LONGITUDE, MAX_LONGITUDE)
    };

    BoundingBox {
        min_lat: center_lat - lat_delta,
        max_lat: center_lat + lat_delta,
        min_lon,
        max_lon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO_STATION: (f64, f64) = (35.6812, 139.7671);
    const SHINJUKU_STATION: (f64, f64) = (35.6896, 139.7006);
    const KYOTO_CAFE: (f64, f64) = (35.021, 135.759);
    const SHINJUKU_LANE: (f64, f64) = (35.689, 139.692);

    #[test]
    fn tokyo_to_shinjuku_is_about_six_km() {
        let d = distance_km(
            TOKYO_STATION.0,
            TOKYO_STATION.1,
            SHINJUKU_STATION.0,
            SHINJUKU_STATION.1,
        );
        assert!((5.5..=7.5).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (TOKYO_STATION, KYOTO_CAFE),
            (SHINJUKU_LANE, SHINJUKU_STATION),
            ((-33.8688, 151.2093), (51.5074, -0.1278)),
            ((89.9, 10.0), (-89.9, -170.0)),
        ];

        for (a, b) in pairs {
            let ab = distance_km(a.0, a.1, b.0, b.1);
            let ba = distance_km(b.0, b.1, a.0, a.1);
            assert!((ab - ba).abs() < 1e-9, "{ab} vs {ba}");
        }
    }

    #[test]
    fn same_point_is_zero() {
        for (lat, lon) in [TOKYO_STATION, (0.0, 0.0), (90.0, 0.0), (-45.5, -179.9)] {
            assert!(distance_km(lat, lon, lat, lon).abs() < 1e-9);
        }
    }

    #[test]
    fn shinjuku_lane_to_kyoto_is_several_hundred_km() {
        let d = distance_km(SHINJUKU_LANE.0, SHINJUKU_LANE.1, KYOTO_CAFE.0, KYOTO_CAFE.1);
        assert!((330.0..=400.0).contains(&d), "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 1e-6);
        assert!(d.is_finite());
    }

    #[test]
    fn bounding_box_contains_center() {
        let (lat, lon) = TOKYO_STATION;
        let bbox = bounding_box(lat, lon, 5.0);

        assert!(bbox.min_lat < lat && lat < bbox.max_lat);
        assert!(bbox.min_lon < lon && lon < bbox.max_lon);
        assert!(bbox.contains(lat, lon));
    }

    #[test]
    fn bounding_box_latitude_span_matches_radius() {
        let (lat, lon) = TOKYO_STATION;
        let radius = 5.0;
        let bbox = bounding_box(lat, lon, radius);

        let expected = radius / 111.0;
        assert!(((bbox.max_lat - lat) - expected).abs() <= expected * 0.1);
        assert!(((lat - bbox.min_lat) - expected).abs() <= expected * 0.1);
    }

    #[test]
    fn longitude_span_widens_away_from_equator() {
        let equator = bounding_box(0.0, 0.0, 10.0);
        let tokyo = bounding_box(35.68, 139.76, 10.0);

        assert!((tokyo.max_lon - tokyo.min_lon) > (equator.max_lon - equator.min_lon));
        assert!((equator.max_lon - equator.min_lon - 2.0 * 10.0 / 111.0).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_is_a_point() {
        let (lat, lon) = SHINJUKU_LANE;
        let bbox = bounding_box(lat, lon, 0.0);

        assert!(bbox.is_degenerate());
        assert_eq!(bbox.min_lat, lat);
        assert_eq!(bbox.max_lat, lat);
        assert_eq!(bbox.min_lon, lon);
        assert_eq!(bbox.max_lon, lon);
    }

    #[test]
    fn zero_radius_at_pole_is_still_a_point() {
        let bbox = bounding_box(90.0, 12.0, 0.0);
        assert_eq!(bbox.min_lon, 12.0);
        assert_eq!(bbox.max_lon, 12.0);
    }

    #[test]
    fn pole_spans_every_longitude() {
        for lat in [90.0, -90.0, 89.999_999] {
            let bbox = bounding_box(lat, 45.0, 10.0);
            assert_eq!(bbox.min_lon, -180.0);
            assert_eq!(bbox.max_lon, 180.0);
            assert!(bbox.min_lat.is_finite() && bbox.max_lat.is_finite());
        }
    }

    #[test]
    fn box_corners_reach_past_the_radius() {
        let (lat, lon) = SHINJUKU_LANE;
        let radius = 10.0;
        let bbox = bounding_box(lat, lon, radius);

        let corner = distance_km(lat, lon, bbox.max_lat, bbox.max_lon);
        assert!(bbox.contains(bbox.max_lat, bbox.max_lon));
        assert!(corner > radius * 1.3, "corner at {corner} km");
        assert!(corner < radius * 1.5, "corner at {corner} km");
    }

    #[test]
    fn ten_km_box_around_shinjuku_excludes_kyoto() {
        let bbox = bounding_box(SHINJUKU_LANE.0, SHINJUKU_LANE.1, 10.0);
        assert!(bbox.contains(SHINJUKU_LANE.0, SHINJUKU_LANE.1));
        assert!(!bbox.contains(KYOTO_CAFE.0, KYOTO_CAFE.1));
    }
}
