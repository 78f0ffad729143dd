//! Latitude/longitude coordinates on the sphere surface.
//!
//! All angles are in degrees. A [`Coordinate`] is always normalized on
//! construction: latitude is clamped to `[-90, 90]` and longitude is wrapped
//! into `[-180, 180)`.

use glam::DVec3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Cartesian points shorter than this have no meaningful direction.
const DEGENERATE_RADIUS: f64 = 1e-4;

/// Decimal places kept when a coordinate is persisted (about 11 m on Earth).
pub const SERIALIZED_DECIMALS: i32 = 4;

/// Clamps a latitude into `[-90, 90]`. NaN becomes `0`.
pub fn clamp_latitude(lat: f64) -> f64 {
    if lat.is_nan() {
        return 0.0;
    }
    lat.clamp(-90.0, 90.0)
}

/// Wraps a longitude into `[-180, 180)`. Non-finite values become `0`.
pub fn wrap_longitude(lon: f64) -> f64 {
    if !lon.is_finite() {
        return 0.0;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid rounds up to 360.0 for inputs just below a multiple of 360
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Rounds a value to the given number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// A point on the sphere surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// The `(0, 0)` coordinate, used as the fallback for degenerate input.
    pub const ORIGIN: Coordinate = Coordinate { lat: 0.0, lon: 0.0 };

    /// Creates a coordinate, clamping latitude and wrapping longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: clamp_latitude(lat),
            lon: wrap_longitude(lon),
        }
    }

    /// Latitude in degrees, `[-90, 90]`.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees, `[-180, 180)`.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Converts to a Cartesian point on a sphere of the given radius (z-up).
    pub fn to_cartesian(&self, radius: f64) -> DVec3 {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        DVec3::new(
            radius * lat.cos() * lon.cos(),
            radius * lat.cos() * lon.sin(),
            radius * lat.sin(),
        )
    }

    /// Converts a Cartesian point back to a coordinate.
    ///
    /// Points closer to the center than `1e-4` return [`Coordinate::ORIGIN`]
    /// instead of NaN.
    pub fn from_cartesian(point: DVec3) -> Self {
        let r = point.length();
        if !r.is_finite() || r < DEGENERATE_RADIUS {
            return Self::ORIGIN;
        }
        let lat = (point.z / r).clamp(-1.0, 1.0).asin().to_degrees();
        let lon = point.y.atan2(point.x).to_degrees();
        Self::new(lat, lon)
    }

    /// Great-circle distance in degrees, always within `[0, 180]`.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        if self == other {
            return 0.0;
        }
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlon = (other.lon - self.lon).to_radians();
        let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos();
        cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// Returns this coordinate translated by the given deltas.
    pub fn offset(&self, delta_lat: f64, delta_lon: f64) -> Self {
        Self::new(self.lat + delta_lat, self.lon + delta_lon)
    }

    /// Signed `(dLat, dLon)` from `self` to `other`, with the longitude delta
    /// taken the short way around.
    pub fn delta_to(&self, other: &Coordinate) -> (f64, f64) {
        (other.lat - self.lat, wrap_longitude(other.lon - self.lon))
    }

    /// Returns the coordinate rounded to the persisted precision.
    pub fn rounded(&self) -> Self {
        Self::new(
            round_to(self.lat, SERIALIZED_DECIMALS),
            round_to(self.lon, SERIALIZED_DECIMALS),
        )
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rounded = self.rounded();
        [rounded.lat, rounded.lon].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [lat, lon] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Self::new(lat, lon))
    }
}

/// Smallest great-circle distance from `target` to a polyline.
///
/// Each edge is measured against its 3D chord, projected back onto the
/// sphere. An empty polyline is infinitely far away.
pub fn distance_to_polyline(points: &[Coordinate], target: &Coordinate) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => single.distance(target),
        _ => {
            let p = target.to_cartesian(1.0);
            points
                .windows(2)
                .map(|edge| {
                    let a = edge[0].to_cartesian(1.0);
                    let b = edge[1].to_cartesian(1.0);
                    let ab = b - a;
                    let len_sq = ab.length_squared();
                    let t = if len_sq < f64::EPSILON {
                        0.0
                    } else {
                        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
                    };
                    Coordinate::from_cartesian(a + ab * t).distance(target)
                })
                .fold(f64::INFINITY, f64::min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_constructor_normalizes() {
        let c = Coordinate::new(120.0, 190.0);
        assert_eq!(c.lat(), 90.0);
        assert!((c.lon() - -170.0).abs() < EPS);

        let c = Coordinate::new(-95.0, -540.0);
        assert_eq!(c.lat(), -90.0);
        assert_eq!(c.lon(), -180.0);

        assert_eq!(Coordinate::new(0.0, 180.0).lon(), -180.0);
        assert_eq!(Coordinate::new(f64::NAN, f64::INFINITY), Coordinate::ORIGIN);
    }

    #[test]
    fn test_wrap_longitude_range() {
        for lon in [-720.0, -181.0, -180.0, -0.5, 0.0, 179.999, 180.0, 359.0, 1e6] {
            let w = wrap_longitude(lon);
            assert!((-180.0..180.0).contains(&w), "{lon} wrapped to {w}");
        }
        assert!((wrap_longitude(-1e-20) - 0.0).abs() < EPS);
    }

    #[test]
    fn test_cartesian_roundtrip() {
        let mut lat = -85.0;
        while lat <= 85.0 {
            let mut lon = -180.0;
            while lon < 180.0 {
                let c = Coordinate::new(lat, lon);
                let back = Coordinate::from_cartesian(c.to_cartesian(1.0));
                assert!((back.lat() - lat).abs() < 1e-9, "lat {lat} lon {lon}");
                let dlon = wrap_longitude(back.lon() - lon).abs();
                assert!(dlon < 1e-9, "lat {lat} lon {lon} -> {}", back.lon());
                lon += 17.5;
            }
            lat += 8.5;
        }
    }

    #[test]
    fn test_cartesian_roundtrip_at_poles() {
        for lon in [-180.0, -45.0, 0.0, 120.0] {
            let north = Coordinate::from_cartesian(Coordinate::new(90.0, lon).to_cartesian(2.0));
            assert!((north.lat() - 90.0).abs() < 1e-9);
            assert!((-180.0..180.0).contains(&north.lon()));

            let south = Coordinate::from_cartesian(Coordinate::new(-90.0, lon).to_cartesian(1.0));
            assert!((south.lat() + 90.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_from_cartesian_degenerate() {
        assert_eq!(Coordinate::from_cartesian(DVec3::ZERO), Coordinate::ORIGIN);
        assert_eq!(
            Coordinate::from_cartesian(DVec3::new(1e-5, 0.0, 0.0)),
            Coordinate::ORIGIN
        );
    }

    #[test]
    fn test_distance_properties() {
        let samples = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(45.0, 90.0),
            Coordinate::new(-33.9, 151.2),
            Coordinate::new(90.0, 0.0),
            Coordinate::new(-90.0, 0.0),
            Coordinate::new(10.0, -179.9),
        ];
        for a in &samples {
            assert_eq!(a.distance(a), 0.0);
            for b in &samples {
                let ab = a.distance(b);
                let ba = b.distance(a);
                assert!((ab - ba).abs() < EPS);
                assert!((0.0..=180.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_distance_known_values() {
        let a = Coordinate::new(0.0, 0.0);
        assert!((a.distance(&Coordinate::new(0.0, 90.0)) - 90.0).abs() < EPS);
        assert!((a.distance(&Coordinate::new(0.0, -180.0)) - 180.0).abs() < EPS);
        assert!((Coordinate::new(90.0, 0.0).distance(&Coordinate::new(-90.0, 0.0)) - 180.0).abs() < EPS);
        // Across the antimeridian
        let d = Coordinate::new(0.0, 179.0).distance(&Coordinate::new(0.0, -179.0));
        assert!((d - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_delta_to_takes_short_way() {
        let (dlat, dlon) = Coordinate::new(0.0, 170.0).delta_to(&Coordinate::new(5.0, -170.0));
        assert!((dlat - 5.0).abs() < EPS);
        assert!((dlon - 20.0).abs() < EPS);
    }

    #[test]
    fn test_serialize_as_rounded_pair() {
        let c = Coordinate::new(12.345_678, -98.765_432_1);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "[12.3457,-98.7654]");

        let back: Coordinate = serde_json::from_str("[95, 200]").unwrap();
        assert_eq!(back, Coordinate::new(90.0, -160.0));
    }

    #[test]
    fn test_distance_to_polyline() {
        let line = [Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 10.0)];
        // Mid-edge, not near either vertex
        let d = distance_to_polyline(&line, &Coordinate::new(1.0, 5.0));
        assert!((d - 1.0).abs() < 1e-2);
        // Beyond the end clamps to the endpoint
        let d = distance_to_polyline(&line, &Coordinate::new(0.0, 12.0));
        assert!((d - 2.0).abs() < 1e-9);
        assert_eq!(distance_to_polyline(&[], &Coordinate::ORIGIN), f64::INFINITY);
    }
}
