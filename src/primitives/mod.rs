//! Drawable primitives and the builders that assemble them.
//!
//! The renderer paints primitives in sequence order, later ones on top, so
//! the builders emit them in the order they must appear.

pub mod builder;
pub mod style;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

pub use builder::{
    build_event_map_primitives, build_geodetic_primitives, legend_entries, LABEL_OFFSET_DEG,
};
pub use style::{ArrowDecoration, Color, Font, Length, MarkerShape, MarkerStyle, Pen};

/// What a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Station,
    Event,
    Endpoint,
}

/// How a path between two positions is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// Straight segment in projected map space
    ProjectedStraight,
    /// Curved geographic path along the great circle
    GreatCircleArc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: GeoPoint,
    pub role: Role,
    pub style: MarkerStyle,
    pub fill: Color,
    pub stroke: Pen,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub kind: PathKind,
    pub pen: Pen,
    pub decoration: Option<ArrowDecoration>,
    pub label: Option<String>,
}

impl PathPrimitive {
    pub fn is_great_circle(&self) -> bool {
        self.kind == PathKind::GreatCircleArc
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub position: GeoPoint,
    pub text: String,
    pub font: Font,
}

/// A single drawable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Marker(Marker),
    Path(PathPrimitive),
    TextLabel(TextLabel),
}

impl Primitive {
    pub fn as_marker(&self) -> Option<&Marker> {
        match self {
            Primitive::Marker(marker) => Some(marker),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathPrimitive> {
        match self {
            Primitive::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_text_label(&self) -> Option<&TextLabel> {
        match self {
            Primitive::TextLabel(label) => Some(label),
            _ => None,
        }
    }

    /// Short name used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Marker(_) => "marker",
            Primitive::Path(_) => "path",
            Primitive::TextLabel(_) => "text_label",
        }
    }
}
