//! Colormap trait and registry.
//!
//! This module defines the common interface for all colormaps and the lookup
//! by name used for configuration.

use crate::error::{Result, SeismapError};

/// Trait for color mapping implementations
pub trait Colormap {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f64) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f64, min: f64, max: f64) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Names accepted by [`get_colormap`].
pub const COLORMAP_NAMES: [&str; 4] = ["geo", "relief", "gray", "viridis"];

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    use super::relief::{gray, relief, viridis, GEO};

    match name.to_lowercase().as_str() {
        "geo" => Ok(Box::new(GEO.build()?)),
        "relief" => Ok(Box::new(relief()?)),
        "gray" | "grey" => Ok(Box::new(gray()?)),
        "viridis" => Ok(Box::new(viridis())),
        _ => Err(SeismapError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!(
                "Unknown colormap: {}. Must be one of: {}",
                name,
                COLORMAP_NAMES.join(", ")
            ),
        }),
    }
}

/// Whether `name` resolves to a known colormap.
pub fn is_known_colormap(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "grey" || COLORMAP_NAMES.contains(&lower.as_str())
}

/// Scale the RGB channels of a color by `factor`, leaving alpha untouched.
pub fn shade_color(color: [u8; 4], factor: f64) -> [u8; 4] {
    let scale = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
    [scale(color[0]), scale(color[1]), scale(color[2]), color[3]]
}
