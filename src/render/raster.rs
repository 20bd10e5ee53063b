//! Raster backend built on `image` and `imageproc`.
//!
//! This is a quick-look renderer. Positions are placed with a plate carrée
//! layout sized from the projection width; it does not implement the
//! Mollweide or Mercator formulas. There is no bundled shoreline database or
//! font, so coastlines are skipped and text labels are drawn as anchor ticks.

use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use ndarray::Array2;
use std::path::Path;
use tracing::{debug, info, warn};

use super::draw::{
    arrow_head_vertices, content_bounds, draw_marker, draw_outlined_polygon, draw_thick_line,
    PixelMapper,
};
use super::RenderGateway;
use crate::colormaps::{get_colormap, shade_color};
use crate::error::{Result, SeismapError};
use crate::figure::{CoastlineStyle, Legend, RasterLayer};
use crate::geo::{great_circle_points, normalize_longitude, ProjectionSpec};
use crate::primitives::{Color, Length, PathPrimitive, Primitive};

/// Blank margin around the plot area.
const MARGIN: Length = Length::Centimetres(0.8);

/// Frame outline width.
const FRAME_PEN_WIDTH: Length = Length::Points(1.0);

/// Segments used to draw a great-circle arc.
const GREAT_CIRCLE_SEGMENTS: usize = 128;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GRATICULE: Rgba<u8> = Rgba([210, 210, 210, 255]);

/// Largest canvas side accepted, in pixels.
const MAX_CANVAS_SIDE: f64 = 20_000.0;

struct Canvas {
    image: RgbaImage,
    mapper: PixelMapper,
}

/// Renders figures into an in-memory RGBA image and saves it to disk.
pub struct RasterGateway {
    dpi: u32,
    canvas: Option<Canvas>,
}

impl RasterGateway {
    /// Create a backend drawing at `dpi` pixels per inch.
    pub fn new(dpi: u32) -> Self {
        Self { dpi, canvas: None }
    }

    /// The image drawn so far, once the basemap exists.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref().map(|canvas| &canvas.image)
    }

    fn px(&self, length: Length) -> f32 {
        length.to_pixels(self.dpi) as f32
    }

    fn canvas(&mut self) -> Result<&mut Canvas> {
        self.canvas.as_mut().ok_or_else(|| SeismapError::Render {
            message: "draw_basemap must be called before any other drawing".to_string(),
        })
    }

    fn draw_path(&mut self, path: &PathPrimitive) -> Result<()> {
        let width = self.px(path.pen.width).max(1.0);
        let color = Rgba(path.pen.color.rgba());
        let decoration = path
            .decoration
            .map(|d| (d, self.px(d.head_length), self.px(d.pen.width).max(1.0)));
        let canvas = self.canvas()?;
        let mapper = canvas.mapper;

        let pixels: Vec<(f32, f32)> = if path.is_great_circle() {
            great_circle_points(path.from, path.to, GREAT_CIRCLE_SEGMENTS)
                .into_iter()
                .map(|p| mapper.to_pixel(p))
                .collect()
        } else {
            vec![mapper.to_pixel(path.from), mapper.to_pixel(path.to)]
        };

        let wrap_jump = (mapper.size.0 / 2.0) as f32;
        for pair in pixels.windows(2) {
            // Arcs leaving one side of a global map re-enter on the other
            if path.is_great_circle() && mapper.wrap && (pair[1].0 - pair[0].0).abs() > wrap_jump
            {
                continue;
            }
            draw_thick_line(&mut canvas.image, pair[0], pair[1], width, color);
        }

        if let Some((decoration, head_length, pen_width)) = decoration {
            let n = pixels.len();
            let mut heads = Vec::new();
            if decoration.head_at_end && n >= 2 {
                heads.push((pixels[n - 1], pixels[n - 2]));
            }
            if decoration.head_at_begin && n >= 2 {
                heads.push((pixels[0], pixels[1]));
            }
            for (tip, from) in heads {
                let Some(vertices) = arrow_head_vertices(
                    tip,
                    from,
                    head_length,
                    decoration.apex_angle_deg as f32,
                ) else {
                    continue;
                };
                draw_outlined_polygon(
                    &mut canvas.image,
                    &vertices,
                    Rgba(decoration.fill.rgba()),
                    Rgba(decoration.pen.color.rgba()),
                    pen_width,
                );
            }
        }
        Ok(())
    }
}

/// Graticule spacing giving at most eight intervals across `span` degrees.
fn graticule_step(span: f64) -> f64 {
    const STEPS: [f64; 9] = [1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 45.0, 60.0, 90.0];
    STEPS
        .iter()
        .copied()
        .find(|step| span / step <= 8.0)
        .unwrap_or(90.0)
}

/// Load a grayscale image as a global grid: row 0 is 90°N, column 0 is 180°W.
fn load_global_grid(path: &Path) -> Result<Array2<f32>> {
    let luma = image::open(path)?.to_luma8();
    let (width, height) = luma.dimensions();
    Ok(Array2::from_shape_fn(
        (height as usize, width as usize),
        |(row, col)| luma.get_pixel(col as u32, row as u32)[0] as f32,
    ))
}

impl RenderGateway for RasterGateway {
    fn draw_basemap(&mut self, projection: &ProjectionSpec, frame: bool) -> Result<()> {
        let region = projection.region();
        let wrap = matches!(projection, ProjectionSpec::GlobalMollweide { .. });
        let lon_span = if wrap { 360.0 } else { region.lon_span() };

        let width = Length::Centimetres(projection.width_cm()).to_pixels(self.dpi);
        let height = width * region.lat_span() / lon_span.max(f64::EPSILON);
        let margin = MARGIN.to_pixels(self.dpi).round();

        let canvas_w = (width + 2.0 * margin).round();
        let canvas_h = (height + 2.0 * margin).round();
        if !(1.0..=MAX_CANVAS_SIDE).contains(&canvas_w)
            || !(1.0..=MAX_CANVAS_SIDE).contains(&canvas_h)
        {
            return Err(SeismapError::Render {
                message: format!(
                    "Canvas size {}x{} is out of range at {} dpi",
                    canvas_w, canvas_h, self.dpi
                ),
            });
        }

        let mut image = RgbaImage::from_pixel(canvas_w as u32, canvas_h as u32, BACKGROUND);
        let mapper = PixelMapper {
            region,
            central_meridian: projection.central_meridian(),
            wrap,
            origin: (margin, margin),
            size: (width, height),
        };

        if frame {
            let (lon_min, lon_max) = mapper.lon_bounds();
            let (x0, y0) = (mapper.origin.0 as f32, mapper.origin.1 as f32);
            let (x1, y1) = (x0 + width as f32, y0 + height as f32);

            let lon_step = graticule_step(lon_max - lon_min);
            let mut lon = (lon_min / lon_step).ceil() * lon_step;
            while lon <= lon_max {
                let x = x0 + ((lon - lon_min) / (lon_max - lon_min) * width) as f32;
                draw_thick_line(&mut image, (x, y0), (x, y1), 1.0, GRATICULE);
                lon += lon_step;
            }

            let lat_step = graticule_step(region.lat_span());
            let mut lat = (region.lat_min / lat_step).ceil() * lat_step;
            while lat <= region.lat_max {
                let y = y0 + ((region.lat_max - lat) / region.lat_span() * height) as f32;
                draw_thick_line(&mut image, (x0, y), (x1, y), 1.0, GRATICULE);
                lat += lat_step;
            }

            let pen = self.px(FRAME_PEN_WIDTH).max(1.0);
            let black = Rgba(Color::Black.rgba());
            draw_thick_line(&mut image, (x0, y0), (x1, y0), pen, black);
            draw_thick_line(&mut image, (x1, y0), (x1, y1), pen, black);
            draw_thick_line(&mut image, (x1, y1), (x0, y1), pen, black);
            draw_thick_line(&mut image, (x0, y1), (x0, y0), pen, black);
        }

        debug!(
            projection = %projection,
            region = %projection.region_code(),
            width = image.width(),
            height = image.height(),
            "Basemap drawn"
        );
        self.canvas = Some(Canvas { image, mapper });
        Ok(())
    }

    fn draw_raster(&mut self, layer: &RasterLayer) -> Result<()> {
        self.canvas()?;
        let colormap = get_colormap(&layer.colormap)?;
        let source = Path::new(&layer.source);
        if !source.is_file() {
            warn!(
                source = %layer.source,
                "Topography source is not a local image file; raster layer skipped"
            );
            return Ok(());
        }

        let grid = load_global_grid(source)?;
        let (rows, cols) = grid.dim();
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        let (min, max) = grid
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = (max - min).max(f32::EPSILON);

        let canvas = self.canvas()?;
        let (x0, y0, x1, y1) = canvas.mapper.bounds();
        let x1 = x1.min(canvas.image.width());
        let y1 = y1.min(canvas.image.height());

        for y in y0..y1 {
            for x in x0..x1 {
                let geo = canvas.mapper.to_geo(x, y);
                let lon = normalize_longitude(geo.longitude);
                let col = (((lon + 180.0) / 360.0 * cols as f64) as usize).min(cols - 1);
                let row =
                    (((90.0 - geo.latitude) / 180.0 * rows as f64).max(0.0) as usize).min(rows - 1);

                let value = grid[[row, col]];
                let mut color = colormap.map(value as f64, min as f64, max as f64);
                if layer.shading {
                    let east = grid[[row, (col + 1).min(cols - 1)]];
                    let west = grid[[row, col.saturating_sub(1)]];
                    let gradient = ((east - west) / range) as f64;
                    color = shade_color(color, (1.0 - 4.0 * gradient).clamp(0.6, 1.4));
                }
                canvas.image.put_pixel(x, y, Rgba(color));
            }
        }

        debug!(
            source = %layer.source,
            colormap = colormap.name(),
            grid_rows = rows,
            grid_cols = cols,
            shading = layer.shading,
            "Raster layer drawn"
        );
        Ok(())
    }

    fn draw_coastlines(&mut self, style: &CoastlineStyle) -> Result<()> {
        self.canvas()?;
        debug!(
            shorelines = style.shorelines.len(),
            borders = ?style.borders,
            "No shoreline database available; coastlines skipped"
        );
        Ok(())
    }

    fn draw_primitive(&mut self, primitive: &Primitive) -> Result<()> {
        match primitive {
            Primitive::Marker(marker) => {
                let size = self.px(marker.style.size);
                let stroke_width = self.px(marker.stroke.width).max(1.0);
                let canvas = self.canvas()?;
                let center = canvas.mapper.to_pixel(marker.position);
                draw_marker(
                    &mut canvas.image,
                    marker.style.shape,
                    center,
                    size,
                    Rgba(marker.fill.rgba()),
                    Rgba(marker.stroke.color.rgba()),
                    stroke_width,
                );
            }
            Primitive::Path(path) => self.draw_path(path)?,
            Primitive::TextLabel(label) => {
                let half = self.px(label.font.size) / 2.0;
                let canvas = self.canvas()?;
                let (x, y) = canvas.mapper.to_pixel(label.position);
                draw_thick_line(
                    &mut canvas.image,
                    (x - half, y),
                    (x + half, y),
                    1.0,
                    Rgba(label.font.color.rgba()),
                );
                debug!(text = %label.text, x = x, y = y, "Label anchor drawn");
            }
        }
        Ok(())
    }

    fn draw_legend(&mut self, legend: &Legend) -> Result<()> {
        if legend.entries.is_empty() {
            return Ok(());
        }
        let symbol = legend
            .entries
            .iter()
            .map(|entry| self.px(entry.style.size))
            .fold(0.0f32, f32::max)
            .max(4.0);
        let stroke_widths: Vec<f32> = legend
            .entries
            .iter()
            .map(|entry| self.px(entry.stroke.width).max(1.0))
            .collect();
        let pad = self.px(Length::Points(4.0)).max(2.0);
        let canvas = self.canvas()?;

        let row = symbol + pad;
        let box_w = symbol + 2.0 * pad;
        let box_h = row * legend.entries.len() as f32 + pad;
        let x = (canvas.mapper.origin.0 + canvas.mapper.size.0) as f32 - box_w - pad;
        let y = canvas.mapper.origin.1 as f32 + pad;

        let rect = Rect::at(x.round() as i32, y.round() as i32)
            .of_size(box_w.round().max(1.0) as u32, box_h.round().max(1.0) as u32);
        draw_filled_rect_mut(&mut canvas.image, rect, BACKGROUND);
        if legend.boxed {
            let black = Rgba(Color::Black.rgba());
            let (x1, y1) = (x + box_w, y + box_h);
            draw_thick_line(&mut canvas.image, (x, y), (x1, y), 1.0, black);
            draw_thick_line(&mut canvas.image, (x1, y), (x1, y1), 1.0, black);
            draw_thick_line(&mut canvas.image, (x1, y1), (x, y1), 1.0, black);
            draw_thick_line(&mut canvas.image, (x, y1), (x, y), 1.0, black);
        }

        for (i, (entry, stroke_width)) in legend.entries.iter().zip(stroke_widths).enumerate() {
            let center = (x + box_w / 2.0, y + pad + row * i as f32 + symbol / 2.0);
            draw_marker(
                &mut canvas.image,
                entry.style.shape,
                center,
                symbol,
                Rgba(entry.fill.rgba()),
                Rgba(entry.stroke.color.rgba()),
                stroke_width,
            );
        }
        Ok(())
    }

    fn save(&mut self, path: &Path, dpi: u32, crop: bool) -> Result<()> {
        let canvas_dpi = self.dpi;
        let canvas = self.canvas()?;

        let mut output = match (crop, content_bounds(&canvas.image, BACKGROUND)) {
            (true, Some((x, y, w, h))) => imageops::crop_imm(&canvas.image, x, y, w, h).to_image(),
            _ => canvas.image.clone(),
        };

        if dpi != canvas_dpi && dpi > 0 {
            let scale = dpi as f64 / canvas_dpi as f64;
            let w = ((output.width() as f64 * scale).round() as u32).max(1);
            let h = ((output.height() as f64 * scale).round() as u32).max(1);
            output = imageops::resize(&output, w, h, imageops::FilterType::Triangle);
        }

        output.save(path)?;
        info!(
            output = %path.display(),
            width = output.width(),
            height = output.height(),
            dpi = dpi,
            crop = crop,
            "Figure saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{fit_region, GeoPoint};
    use crate::primitives::build_geodetic_primitives;

    #[test]
    fn test_graticule_step() {
        assert_eq!(graticule_step(360.0), 45.0);
        assert_eq!(graticule_step(180.0), 30.0);
        assert_eq!(graticule_step(10.0), 2.0);
        assert_eq!(graticule_step(5.0), 1.0);
    }

    #[test]
    fn test_drawing_requires_basemap() {
        let mut gateway = RasterGateway::new(72);
        let primitives = build_geodetic_primitives(
            GeoPoint::new(0.0, 0.0).unwrap(),
            GeoPoint::new(1.0, 1.0).unwrap(),
        );
        assert!(matches!(
            gateway.draw_primitive(&primitives[0]),
            Err(SeismapError::Render { .. })
        ));
    }

    #[test]
    fn test_raster_requires_basemap() {
        let mut gateway = RasterGateway::new(72);
        let layer = RasterLayer {
            source: "@earth_relief_20m".to_string(),
            colormap: "geo".to_string(),
            shading: true,
        };
        assert!(matches!(
            gateway.draw_raster(&layer),
            Err(SeismapError::Render { .. })
        ));

        gateway
            .draw_basemap(&ProjectionSpec::global(0.0), true)
            .unwrap();
        assert!(gateway.draw_raster(&layer).is_ok());
    }

    #[test]
    fn test_basemap_size_follows_width_and_dpi() {
        let mut gateway = RasterGateway::new(72);
        gateway
            .draw_basemap(&ProjectionSpec::global(0.0), true)
            .unwrap();
        let image = gateway.image().unwrap();
        let margin = MARGIN.to_pixels(72).round() as u32;
        // 20 cm at 72 dpi is about 567 px wide, half as tall
        assert_eq!(image.width(), 567 + 2 * margin);
        assert_eq!(image.height(), 283 + 2 * margin);
    }

    #[test]
    fn test_markers_land_on_positions() {
        let p1 = GeoPoint::new(16.3738, 48.2082).unwrap();
        let p2 = GeoPoint::new(77.1025, 28.7041).unwrap();
        let mut gateway = RasterGateway::new(100);
        gateway
            .draw_basemap(&ProjectionSpec::regional(fit_region(p1, p2)), false)
            .unwrap();
        for primitive in build_geodetic_primitives(p1, p2) {
            gateway.draw_primitive(&primitive).unwrap();
        }

        let canvas = gateway.canvas.as_ref().unwrap();
        let (x, y) = canvas.mapper.to_pixel(p2);
        let pixel = canvas.image.get_pixel(x.round() as u32, y.round() as u32);
        assert_eq!(*pixel, Rgba(Color::Blue.rgba()));
    }
}
