//! The figure handed to a render backend.
//!
//! A [`Figure`] is a plain value built for one plotting call: the projection,
//! the basemap layers drawn underneath everything, the ordered primitives, an
//! optional legend, and where to save the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::geo::ProjectionSpec;
use crate::primitives::{Color, Length, MarkerStyle, Pen, Primitive};

/// Default output resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Shoreline database resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoastResolution {
    Crude,
    Low,
    Intermediate,
    High,
    Full,
}

impl CoastResolution {
    pub fn code(&self) -> char {
        match self {
            CoastResolution::Crude => 'c',
            CoastResolution::Low => 'l',
            CoastResolution::Intermediate => 'i',
            CoastResolution::High => 'h',
            CoastResolution::Full => 'f',
        }
    }
}

/// Pen for one shoreline hierarchy level (1 = coastline, 2 = lakes, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShorelineLevel {
    pub level: Option<u8>,
    pub pen: Pen,
}

impl fmt::Display for ShorelineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Some(level) => write!(f, "{}/{}", level, self.pen),
            None => write!(f, "{}", self.pen),
        }
    }
}

/// Coastline and border drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoastlineStyle {
    /// `None` lets the renderer choose from the map scale
    pub resolution: Option<CoastResolution>,
    pub shorelines: Vec<ShorelineLevel>,
    /// Political boundary level (1 = national)
    pub borders: Option<u8>,
    /// Features smaller than this many km² are skipped
    pub area_threshold_km2: Option<u32>,
}

/// Shaded topography underlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterLayer {
    /// Grid identifier or local file path
    pub source: String,
    pub colormap: String,
    pub shading: bool,
}

/// Layers drawn before any primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basemap {
    pub frame: bool,
    pub raster: Option<RasterLayer>,
    pub coastlines: CoastlineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub style: MarkerStyle,
    pub fill: Color,
    pub stroke: Pen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    /// Anchor in `-D` form, e.g. `JTR+jTR+o0.2c`
    pub position: String,
    pub boxed: bool,
    pub entries: Vec<LegendEntry>,
}

/// Everything a render backend needs to produce one saved figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub projection: ProjectionSpec,
    pub basemap: Basemap,
    pub primitives: Vec<Primitive>,
    pub legend: Option<Legend>,
    pub output: PathBuf,
    pub dpi: u32,
    /// Trim the saved image to its content
    pub crop: bool,
}

impl Figure {
    /// Number of primitives of each kind, as `(markers, paths, labels)`.
    pub fn primitive_counts(&self) -> (usize, usize, usize) {
        self.primitives
            .iter()
            .fold((0, 0, 0), |(m, p, t), primitive| match primitive {
                Primitive::Marker(_) => (m + 1, p, t),
                Primitive::Path(_) => (m, p + 1, t),
                Primitive::TextLabel(_) => (m, p, t + 1),
            })
    }
}

/// Coastlines for the global event map: full resolution, thin black
/// coastline, thinner gray lakes, national borders.
pub fn event_map_coastlines() -> CoastlineStyle {
    CoastlineStyle {
        resolution: Some(CoastResolution::Full),
        shorelines: vec![
            ShorelineLevel {
                level: Some(1),
                pen: Pen::new(Length::Points(0.2), Color::Black),
            },
            ShorelineLevel {
                level: Some(2),
                pen: Pen::new(Length::Points(0.05), Color::Gray),
            },
        ],
        borders: Some(1),
        area_threshold_km2: None,
    }
}

/// Coastlines for the regional geodetic map.
pub fn geodetic_map_coastlines() -> CoastlineStyle {
    CoastlineStyle {
        resolution: None,
        shorelines: vec![ShorelineLevel {
            level: None,
            pen: Pen::new(Length::Points(0.25), Color::Black),
        }],
        borders: Some(1),
        area_threshold_km2: Some(4000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::primitives::build_geodetic_primitives;

    #[test]
    fn test_shoreline_codes() {
        let style = event_map_coastlines();
        let codes: Vec<String> = style.shorelines.iter().map(|s| s.to_string()).collect();
        assert_eq!(codes, vec!["1/0.2p,black", "2/0.05p,gray"]);
        assert_eq!(style.resolution.map(|r| r.code()), Some('f'));

        let regional = geodetic_map_coastlines();
        assert_eq!(regional.shorelines[0].to_string(), "0.25p,black");
        assert_eq!(regional.area_threshold_km2, Some(4000));
    }

    #[test]
    fn test_primitive_counts() {
        let figure = Figure {
            projection: ProjectionSpec::global(0.0),
            basemap: Basemap {
                frame: true,
                raster: None,
                coastlines: geodetic_map_coastlines(),
            },
            primitives: build_geodetic_primitives(
                GeoPoint::new(0.0, 0.0).unwrap(),
                GeoPoint::new(1.0, 1.0).unwrap(),
            ),
            legend: None,
            output: PathBuf::from("out.png"),
            dpi: DEFAULT_DPI,
            crop: false,
        };
        assert_eq!(figure.primitive_counts(), (2, 1, 2));
    }
}
