//! Render backends.
//!
//! The plotting core never touches pixels. It hands a [`Figure`] to
//! [`render_figure`], which drives a [`RenderGateway`] through a fixed call
//! order. Backend errors are returned as they are.

pub mod draw;
pub mod raster;
pub mod recording;

use std::path::Path;
use std::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::figure::{CoastlineStyle, Figure, Legend, RasterLayer};
use crate::geo::ProjectionSpec;
use crate::primitives::Primitive;

pub use raster::RasterGateway;
pub use recording::{DrawCall, RecordingGateway};

/// Drawing capability offered by a rendering library.
pub trait RenderGateway {
    /// Set up the map frame for the projection.
    fn draw_basemap(&mut self, projection: &ProjectionSpec, frame: bool) -> Result<()>;

    /// Draw a shaded raster underlay.
    fn draw_raster(&mut self, layer: &RasterLayer) -> Result<()>;

    /// Draw shorelines and borders.
    fn draw_coastlines(&mut self, style: &CoastlineStyle) -> Result<()>;

    /// Draw one primitive on top of everything drawn so far.
    fn draw_primitive(&mut self, primitive: &Primitive) -> Result<()>;

    fn draw_legend(&mut self, legend: &Legend) -> Result<()>;

    /// Write the figure to `path`.
    fn save(&mut self, path: &Path, dpi: u32, crop: bool) -> Result<()>;

    /// Display the figure interactively, where the backend supports it.
    fn show(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Draw `figure` through `gateway` and save it.
///
/// Call order: basemap, raster, coastlines, primitives in sequence order,
/// legend, save. The first failing call stops the sequence.
pub fn render_figure<G: RenderGateway + ?Sized>(figure: &Figure, gateway: &mut G) -> Result<()> {
    let start = Instant::now();

    gateway.draw_basemap(&figure.projection, figure.basemap.frame)?;
    if let Some(raster) = &figure.basemap.raster {
        gateway.draw_raster(raster)?;
    }
    gateway.draw_coastlines(&figure.basemap.coastlines)?;

    for primitive in &figure.primitives {
        gateway.draw_primitive(primitive)?;
    }

    if let Some(legend) = &figure.legend {
        gateway.draw_legend(legend)?;
    }

    gateway.save(&figure.output, figure.dpi, figure.crop)?;

    debug!(
        primitives = figure.primitives.len(),
        output = %figure.output.display(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Figure rendered"
    );
    Ok(())
}
