use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of interpolation steps when sampling a Bezier curve.
/// `n` steps produce `n + 1` points, endpoints included.
pub const BEZIER_STEPS: usize = 20;

/// A point on the map as (latitude, longitude) in degrees.
///
/// All geometry here is planar over raw degree values. That matches the
/// rendering target (a flat map canvas) where the curves only need to
/// look right, not measure distances on the globe.
///
/// Serialized as a `[lat, lon]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar Euclidean distance in degree space. Not great-circle.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let dlat = other.lat - self.lat;
        let dlon = other.lon - self.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }

    /// Midpoint of the straight segment to `other`.
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint::new((self.lat + other.lat) / 2.0, (self.lon + other.lon) / 2.0)
    }

    /// Unit vector perpendicular to the segment from `self` to `other`,
    /// as (dlat, dlon) components. Returns the zero vector when the two
    /// points coincide.
    pub fn perpendicular_unit(&self, other: &GeoPoint) -> (f64, f64) {
        let dlat = other.lat - self.lat;
        let dlon = other.lon - self.lon;
        let norm = (dlat * dlat + dlon * dlon).sqrt();
        if norm == 0.0 {
            (0.0, 0.0)
        } else {
            (-dlon / norm, dlat / norm)
        }
    }

    /// Translate by a (dlat, dlon) vector scaled by `magnitude`.
    pub fn offset_by(&self, direction: (f64, f64), magnitude: f64) -> GeoPoint {
        GeoPoint::new(
            self.lat + direction.0 * magnitude,
            self.lon + direction.1 * magnitude,
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lat, point.lon)
    }
}

/// Sample a quadratic Bezier curve through control points `p0`, `p1`, `p2`.
///
/// Returns `steps + 1` points. The first point is exactly `p0` and the
/// last exactly `p2`; the curve passes near (not through) `p1`.
///
/// # Examples
///
/// ```
/// use flowmap_engine::layout::geometry::{quadratic_bezier, GeoPoint};
///
/// let path = quadratic_bezier(
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(5.0, 1.0),
///     GeoPoint::new(10.0, 0.0),
///     20,
/// );
/// assert_eq!(path.len(), 21);
/// assert_eq!(path[0], GeoPoint::new(0.0, 0.0));
/// assert_eq!(path[20], GeoPoint::new(10.0, 0.0));
/// ```
pub fn quadratic_bezier(p0: GeoPoint, p1: GeoPoint, p2: GeoPoint, steps: usize) -> Vec<GeoPoint> {
    debug_assert!(steps > 0, "Bezier sampling needs at least one step");
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let a = (1.0 - t) * (1.0 - t);
            let b = 2.0 * (1.0 - t) * t;
            let c = t * t;
            GeoPoint::new(
                a * p0.lat + b * p1.lat + c * p2.lat,
                a * p0.lon + b * p1.lon + c * p2.lon,
            )
        })
        .collect()
}
