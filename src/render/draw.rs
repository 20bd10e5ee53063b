//! Pixel-level drawing helpers for the raster backend.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;

use crate::geo::{normalize_longitude, GeoPoint, Region};
use crate::primitives::MarkerShape;

/// Maps geographic positions onto a rectangular plot area.
///
/// Placement is plate carrée. Global maps wrap longitudes around the central
/// meridian; regional maps use the region's bounds directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapper {
    pub region: Region,
    pub central_meridian: f64,
    pub wrap: bool,
    pub origin: (f64, f64),
    pub size: (f64, f64),
}

impl PixelMapper {
    /// Longitude range spanned by the plot area.
    pub fn lon_bounds(&self) -> (f64, f64) {
        if self.wrap {
            (self.central_meridian - 180.0, self.central_meridian + 180.0)
        } else {
            (self.region.lon_min, self.region.lon_max)
        }
    }

    pub fn to_pixel(&self, point: GeoPoint) -> (f32, f32) {
        let (lon_min, lon_max) = self.lon_bounds();
        let lon = if self.wrap {
            self.central_meridian + normalize_longitude(point.longitude - self.central_meridian)
        } else {
            point.longitude
        };
        let lon_span = (lon_max - lon_min).max(f64::EPSILON);
        let lat_span = self.region.lat_span().max(f64::EPSILON);

        let x = self.origin.0 + (lon - lon_min) / lon_span * self.size.0;
        let y = self.origin.1 + (self.region.lat_max - point.latitude) / lat_span * self.size.1;
        (x as f32, y as f32)
    }

    /// Geographic position at the centre of pixel `(x, y)`.
    pub fn to_geo(&self, x: u32, y: u32) -> GeoPoint {
        let (lon_min, lon_max) = self.lon_bounds();
        let fx = (x as f64 + 0.5 - self.origin.0) / self.size.0;
        let fy = (y as f64 + 0.5 - self.origin.1) / self.size.1;
        GeoPoint {
            longitude: lon_min + fx * (lon_max - lon_min),
            latitude: self.region.lat_max - fy * self.region.lat_span(),
        }
    }

    /// Pixel bounds of the plot area as `(x0, y0, x1, y1)`.
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        let x0 = self.origin.0.max(0.0) as u32;
        let y0 = self.origin.1.max(0.0) as u32;
        (
            x0,
            y0,
            (self.origin.0 + self.size.0).max(0.0) as u32,
            (self.origin.1 + self.size.1).max(0.0) as u32,
        )
    }
}

/// Line of the given pixel width, drawn as parallel one-pixel strokes.
pub fn draw_thick_line(
    image: &mut RgbaImage,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = (dx * dx + dy * dy).sqrt();
    if width <= 1.5 || length < f32::EPSILON {
        draw_line_segment_mut(image, from, to, color);
        return;
    }

    let (nx, ny) = (-dy / length, dx / length);
    let strokes = width.round() as i32;
    for i in 0..strokes {
        let offset = i as f32 - (strokes - 1) as f32 / 2.0;
        draw_line_segment_mut(
            image,
            (from.0 + nx * offset, from.1 + ny * offset),
            (to.0 + nx * offset, to.1 + ny * offset),
            color,
        );
    }
}

/// Filled polygon with an outline. Degenerate polygons collapse to a dot.
pub fn draw_outlined_polygon(
    image: &mut RgbaImage,
    vertices: &[(f32, f32)],
    fill: Rgba<u8>,
    stroke: Rgba<u8>,
    stroke_width: f32,
) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(vertices.len());
    for &(x, y) in vertices {
        let p = Point::new(x.round() as i32, y.round() as i32);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    if points.len() < 3 {
        if let Some(p) = points.first() {
            draw_filled_circle_mut(image, (p.x, p.y), 1, fill);
        }
        return;
    }

    draw_polygon_mut(image, &points, fill);
    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        draw_thick_line(image, a, b, stroke_width, stroke);
    }
}

/// Vertices of a marker symbol centred on `center` with the given size.
pub fn marker_vertices(shape: MarkerShape, center: (f32, f32), size: f32) -> Vec<(f32, f32)> {
    let r = size / 2.0;
    let (cx, cy) = center;
    match shape {
        MarkerShape::InvertedTriangle => {
            let h = r * 0.5;
            vec![
                (cx - r * 0.866, cy - h),
                (cx + r * 0.866, cy - h),
                (cx, cy + r),
            ]
        }
        MarkerShape::Star => (0..10)
            .map(|i| {
                let radius = if i % 2 == 0 { r } else { r * 0.4 };
                let angle = std::f32::consts::PI * (i as f32 / 5.0) - std::f32::consts::FRAC_PI_2;
                (cx + radius * angle.cos(), cy + radius * angle.sin())
            })
            .collect(),
        MarkerShape::Circle => (0..24)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / 24.0;
                (cx + r * angle.cos(), cy + r * angle.sin())
            })
            .collect(),
    }
}

/// Draw a marker symbol.
pub fn draw_marker(
    image: &mut RgbaImage,
    shape: MarkerShape,
    center: (f32, f32),
    size: f32,
    fill: Rgba<u8>,
    stroke: Rgba<u8>,
    stroke_width: f32,
) {
    if shape == MarkerShape::Circle {
        let c = (center.0.round() as i32, center.1.round() as i32);
        let radius = (size / 2.0).round().max(1.0) as i32;
        draw_filled_circle_mut(image, c, radius, fill);
        for ring in 0..stroke_width.round().max(1.0) as i32 {
            if radius - ring <= 0 {
                break;
            }
            draw_hollow_circle_mut(image, c, radius - ring, stroke);
        }
        return;
    }
    let vertices = marker_vertices(shape, center, size);
    draw_outlined_polygon(image, &vertices, fill, stroke, stroke_width);
}

/// Triangular arrow head with its tip at `tip`, pointing away from `from`.
pub fn arrow_head_vertices(
    tip: (f32, f32),
    from: (f32, f32),
    length: f32,
    apex_angle_deg: f32,
) -> Option<[(f32, f32); 3]> {
    let dx = tip.0 - from.0;
    let dy = tip.1 - from.1;
    let norm = (dx * dx + dy * dy).sqrt();
    if norm < f32::EPSILON {
        return None;
    }
    let (ux, uy) = (dx / norm, dy / norm);
    let half = (apex_angle_deg / 2.0).to_radians();
    let side = |sign: f32| {
        let (s, c) = (sign * half).sin_cos();
        let rx = ux * c - uy * s;
        let ry = ux * s + uy * c;
        (tip.0 - rx * length, tip.1 - ry * length)
    };
    Some([tip, side(1.0), side(-1.0)])
}

/// Bounding box `(x, y, width, height)` of pixels that differ from `background`.
pub fn content_bounds(image: &RgbaImage, background: Rgba<u8>) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel != background {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn global_mapper(central_meridian: f64) -> PixelMapper {
        PixelMapper {
            region: Region::GLOBAL,
            central_meridian,
            wrap: true,
            origin: (0.0, 0.0),
            size: (360.0, 180.0),
        }
    }

    #[test]
    fn test_global_mapping_wraps_around_central_meridian() {
        let mapper = global_mapper(20.0);
        let (x, y) = mapper.to_pixel(GeoPoint::new(20.0, 0.0).unwrap());
        assert_eq!((x, y), (180.0, 90.0));

        // 10 degrees west of the antimeridian seen from 20E
        let (x, _) = mapper.to_pixel(GeoPoint::new(-170.0, 0.0).unwrap());
        assert_eq!(x, 350.0);
    }

    #[test]
    fn test_regional_mapping_roundtrip() {
        let mapper = PixelMapper {
            region: Region {
                lon_min: 10.0,
                lon_max: 20.0,
                lat_min: 40.0,
                lat_max: 50.0,
            },
            central_meridian: 15.0,
            wrap: false,
            origin: (5.0, 5.0),
            size: (100.0, 100.0),
        };
        assert_eq!(mapper.to_pixel(GeoPoint::new(10.0, 50.0).unwrap()), (5.0, 5.0));
        assert_eq!(
            mapper.to_pixel(GeoPoint::new(20.0, 40.0).unwrap()),
            (105.0, 105.0)
        );
        let centre = mapper.to_geo(54, 54);
        assert!((centre.longitude - 14.95).abs() < 1e-9);
        assert!((centre.latitude - 45.05).abs() < 1e-9);
        assert_eq!(mapper.bounds(), (5, 5, 105, 105));
    }

    #[test]
    fn test_draw_marker_paints_fill() {
        let mut image = RgbaImage::from_pixel(40, 40, WHITE);
        for shape in [
            MarkerShape::Circle,
            MarkerShape::Star,
            MarkerShape::InvertedTriangle,
        ] {
            draw_marker(&mut image, shape, (20.0, 20.0), 20.0, BLUE, BLUE, 1.0);
            assert_eq!(*image.get_pixel(20, 20), BLUE);
        }
    }

    #[test]
    fn test_tiny_polygon_does_not_panic() {
        let mut image = RgbaImage::from_pixel(10, 10, WHITE);
        draw_outlined_polygon(&mut image, &[(5.0, 5.0), (5.1, 5.1), (5.2, 5.0)], BLUE, BLUE, 1.0);
        assert_eq!(*image.get_pixel(5, 5), BLUE);
    }

    #[test]
    fn test_arrow_head() {
        let [tip, left, right] = arrow_head_vertices((10.0, 0.0), (0.0, 0.0), 5.0, 30.0).unwrap();
        assert_eq!(tip, (10.0, 0.0));
        assert!(left.0 < 10.0 && right.0 < 10.0);
        assert!((left.1 + right.1).abs() < 1e-5);
        assert!(arrow_head_vertices((1.0, 1.0), (1.0, 1.0), 5.0, 30.0).is_none());
    }

    #[test]
    fn test_content_bounds() {
        let mut image = RgbaImage::from_pixel(20, 10, WHITE);
        assert_eq!(content_bounds(&image, WHITE), None);
        image.put_pixel(3, 2, BLUE);
        image.put_pixel(7, 8, BLUE);
        assert_eq!(content_bounds(&image, WHITE), Some((3, 2, 5, 7)));
    }
}
