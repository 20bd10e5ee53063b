//! Region fitting: projection parameters derived from input coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::point::GeoPoint;

/// Padding added on every side of a fitted region, in degrees.
pub const REGION_PADDING_DEG: f64 = 5.0;

/// Map width used for global (Mollweide) figures, in centimetres.
pub const GLOBAL_MAP_WIDTH_CM: f64 = 20.0;

/// Map width used for regional (Mercator) figures, in centimetres.
pub const REGIONAL_MAP_WIDTH_CM: f64 = 15.0;

/// A geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Region {
    /// The whole globe.
    pub const GLOBAL: Region = Region {
        lon_min: -180.0,
        lon_max: 180.0,
        lat_min: -90.0,
        lat_max: 90.0,
    };

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            longitude: (self.lon_min + self.lon_max) / 2.0,
            latitude: (self.lat_min + self.lat_max) / 2.0,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.lon_min..=self.lon_max).contains(&point.longitude)
            && (self.lat_min..=self.lat_max).contains(&point.latitude)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.lon_min, self.lon_max, self.lat_min, self.lat_max
        )
    }
}

/// Projection parameters handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionSpec {
    /// Equal-area whole-earth view
    GlobalMollweide { central_meridian: f64, width_cm: f64 },
    /// Conformal view of a fitted region
    RegionalMercator { region: Region, width_cm: f64 },
}

impl ProjectionSpec {
    pub fn global(central_meridian: f64) -> Self {
        ProjectionSpec::GlobalMollweide {
            central_meridian,
            width_cm: GLOBAL_MAP_WIDTH_CM,
        }
    }

    pub fn regional(region: Region) -> Self {
        ProjectionSpec::RegionalMercator {
            region,
            width_cm: REGIONAL_MAP_WIDTH_CM,
        }
    }

    /// Geographic extent covered by the map.
    pub fn region(&self) -> Region {
        match self {
            ProjectionSpec::GlobalMollweide { .. } => Region::GLOBAL,
            ProjectionSpec::RegionalMercator { region, .. } => *region,
        }
    }

    pub fn width_cm(&self) -> f64 {
        match self {
            ProjectionSpec::GlobalMollweide { width_cm, .. }
            | ProjectionSpec::RegionalMercator { width_cm, .. } => *width_cm,
        }
    }

    /// Longitude at the horizontal centre of the map.
    pub fn central_meridian(&self) -> f64 {
        match self {
            ProjectionSpec::GlobalMollweide {
                central_meridian, ..
            } => *central_meridian,
            ProjectionSpec::RegionalMercator { region, .. } => region.center().longitude,
        }
    }

    /// Region argument in `-R` form (`g` for the globe).
    pub fn region_code(&self) -> String {
        match self {
            ProjectionSpec::GlobalMollweide { .. } => "g".to_string(),
            ProjectionSpec::RegionalMercator { region, .. } => region.to_string(),
        }
    }
}

/// Projection argument in `-J` form, e.g. `W20.0/20c` or `M15c`.
impl fmt::Display for ProjectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionSpec::GlobalMollweide {
                central_meridian,
                width_cm,
            } => write!(f, "W{:.1}/{}c", central_meridian, width_cm),
            ProjectionSpec::RegionalMercator { width_cm, .. } => write!(f, "M{}c", width_cm),
        }
    }
}

/// Central meridian for a global map.
///
/// An explicit override always wins, including `0.0`. Otherwise this is the
/// arithmetic mean of the station longitudes, taken as-is: inputs must already
/// share one longitude convention. Returns `None` for an empty station set
/// without override.
pub fn central_meridian(stations: &[GeoPoint], override_lon: Option<f64>) -> Option<f64> {
    if override_lon.is_some() {
        return override_lon;
    }
    if stations.is_empty() {
        return None;
    }
    let sum: f64 = stations.iter().map(|p| p.longitude).sum();
    Some(sum / stations.len() as f64)
}

/// Bounding region covering two points.
///
/// Pads by [`REGION_PADDING_DEG`] first, then clamps to the valid geographic
/// range.
pub fn fit_region(p1: GeoPoint, p2: GeoPoint) -> Region {
    let pad = REGION_PADDING_DEG;
    let lon_min = p1.longitude.min(p2.longitude) - pad;
    let lon_max = p1.longitude.max(p2.longitude) + pad;
    let lat_min = p1.latitude.min(p2.latitude) - pad;
    let lat_max = p1.latitude.max(p2.latitude) + pad;

    Region {
        lon_min: lon_min.max(-180.0),
        lon_max: lon_max.min(180.0),
        lat_min: lat_min.max(-90.0),
        lat_max: lat_max.min(90.0),
    }
}
