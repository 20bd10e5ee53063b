//! Colormap implementations for topography underlays.

pub mod colormap;
pub mod relief;

pub use colormap::{get_colormap, is_known_colormap, shade_color, Colormap, COLORMAP_NAMES};
pub use relief::{GradientColormap, PaletteSpec};
