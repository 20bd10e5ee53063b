//! Topographic colormaps.
//!
//! Low values are deep ocean, high values are mountain tops.

use colorgrad::{CustomGradient, Gradient};

use super::colormap::Colormap;
use crate::error::{Result, SeismapError};

/// A named palette backed by a `colorgrad` gradient.
pub struct GradientColormap {
    name: &'static str,
    gradient: Gradient,
}

impl Colormap for GradientColormap {
    fn map_normalized(&self, value: f64) -> [u8; 4] {
        self.gradient.at(value.clamp(0.0, 1.0)).to_rgba8()
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Palette definition: evenly spaced html colour stops.
pub struct PaletteSpec {
    pub name: &'static str,
    pub stops: &'static [&'static str],
}

impl PaletteSpec {
    pub fn build(&self) -> Result<GradientColormap> {
        let gradient = CustomGradient::new()
            .html_colors(self.stops)
            .build()
            .map_err(|e| SeismapError::InvalidParameter {
                param: "colormap".to_string(),
                message: format!("Invalid palette '{}': {}", self.name, e),
            })?;
        Ok(GradientColormap {
            name: self.name,
            gradient,
        })
    }
}

/// Ocean blues through lowland greens to brown highlands and snow.
pub const GEO: PaletteSpec = PaletteSpec {
    name: "geo",
    stops: &[
        "#0a0a78", "#1e50b4", "#78b4f0", "#c8e6ff", "#2e8b57", "#9acd32", "#f0e68c", "#cd853f",
        "#8b4513", "#ffffff",
    ],
};

/// Muted shaded-relief palette.
pub const RELIEF: PaletteSpec = PaletteSpec {
    name: "relief",
    stops: &[
        "#000000", "#000a80", "#2f5fb0", "#8ec3de", "#e6f0e6", "#86b36b", "#d9c58a", "#a0785a",
        "#ffffff",
    ],
};

pub fn relief() -> Result<GradientColormap> {
    RELIEF.build()
}

pub fn gray() -> Result<GradientColormap> {
    PaletteSpec {
        name: "gray",
        stops: &["#000000", "#ffffff"],
    }
    .build()
}

pub fn viridis() -> GradientColormap {
    GradientColormap {
        name: "viridis",
        gradient: colorgrad::viridis(),
    }
}
