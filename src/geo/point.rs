//! Geographic points and coordinate-pair validation.
//!
//! Every coordinate that enters the crate goes through [`GeoPoint`]. Positional
//! pairs are only accepted together with an explicit [`AxisOrder`], so a call
//! site can never silently mix up `[lon, lat]` and `[lat, lon]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SeismapError};

/// A position on the Earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// Order of the two components in a positional coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// `[longitude, latitude]`
    LonLat,
    /// `[latitude, longitude]`
    LatLon,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite components and latitudes outside
    /// [-90, 90].
    ///
    /// Longitudes are not range-checked here: station longitudes may use a
    /// 0..360 convention and are averaged as given.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(SeismapError::Shape {
                message: format!(
                    "Coordinates must be finite numbers, got ({}, {})",
                    longitude, latitude
                ),
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SeismapError::Shape {
                message: format!("Latitude {} is outside [-90, 90]", latitude),
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Build a point from a positional pair whose order is stated by the caller.
    ///
    /// Fails with [`SeismapError::Shape`] unless `components` holds exactly two
    /// finite values.
    pub fn from_components(components: &[f64], order: AxisOrder) -> Result<Self> {
        let [a, b] = components else {
            return Err(SeismapError::Shape {
                message: format!(
                    "Coordinate pair must have exactly 2 components, got {}",
                    components.len()
                ),
            });
        };
        match order {
            AxisOrder::LonLat => Self::new(*a, *b),
            AxisOrder::LatLon => Self::new(*b, *a),
        }
    }

    /// Whether the longitude lies in [-180, 180].
    pub fn has_standard_longitude(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude)
    }

    /// Shift the point north (positive) or south, staying inside [-90, 90].
    pub fn offset_latitude(&self, delta: f64) -> Self {
        Self {
            longitude: self.longitude,
            latitude: (self.latitude + delta).clamp(-90.0, 90.0),
        }
    }

    /// Unit vector on the sphere (x towards 0°E, z towards the north pole).
    pub fn to_unit_vector(&self) -> [f64; 3] {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    fn from_unit_vector(v: [f64; 3]) -> Self {
        let [x, y, z] = v;
        Self {
            longitude: y.atan2(x).to_degrees(),
            latitude: z.clamp(-1.0, 1.0).asin().to_degrees(),
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.longitude, self.latitude)
    }
}

/// `"lon,lat"` parsing, used by the CLI.
impl FromStr for GeoPoint {
    type Err = SeismapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_point(s, AxisOrder::LonLat)
    }
}

/// Parse a comma separated coordinate pair in the given order.
pub fn parse_point(s: &str, order: AxisOrder) -> Result<GeoPoint> {
    let components = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| SeismapError::Shape {
                    message: format!("Invalid coordinate component '{}' in '{}'", part, s),
                })
        })
        .collect::<Result<Vec<f64>>>()?;
    GeoPoint::from_components(&components, order)
}

/// Normalize a longitude value to the range [-180, 180)
pub fn normalize_longitude(lon: f64) -> f64 {
    let normalized = ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0;
    if normalized >= 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Points along the great circle from `from` to `to`, both ends included.
///
/// Uses spherical linear interpolation. Antipodal pairs have no unique great
/// circle; they fall back to the endpoints only.
pub fn great_circle_points(from: GeoPoint, to: GeoPoint, segments: usize) -> Vec<GeoPoint> {
    let a = from.to_unit_vector();
    let b = to.to_unit_vector();
    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2]).clamp(-1.0, 1.0);
    let omega = dot.acos();
    let sin_omega = omega.sin();

    if segments == 0 || omega.abs() < 1e-12 || sin_omega.abs() < 1e-12 {
        return vec![from, to];
    }

    let mut points = Vec::with_capacity(segments + 1);
    points.push(from);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        let wa = ((1.0 - t) * omega).sin() / sin_omega;
        let wb = (t * omega).sin() / sin_omega;
        points.push(GeoPoint::from_unit_vector([
            wa * a[0] + wb * b[0],
            wa * a[1] + wb * b[1],
            wa * a[2] + wb * b[2],
        ]));
    }
    points.push(to);
    points
}
