//! Image inspection utilities for testing.
//!
//! This module provides helper functions for checking the figures the raster
//! backend writes.

#![allow(dead_code)]

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, Rgba};
use std::path::Path;

/// Load an image from a file
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageError> {
    image::open(path)
}

/// Detect the format of a file on disk from its leading bytes
pub fn detect_file_format(path: &Path) -> Option<ImageFormat> {
    let bytes = std::fs::read(path).ok()?;
    image::guess_format(&bytes).ok()
}

/// Check if an image has the expected dimensions
pub fn assert_image_dimensions(
    image: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), String> {
    let (actual_width, actual_height) = image.dimensions();

    if actual_width != expected_width || actual_height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            actual_width, actual_height, expected_width, expected_height
        ));
    }

    Ok(())
}

/// Number of pixels within `tolerance` of `color` on every RGB channel
pub fn count_pixels_near(image: &DynamicImage, color: Rgba<u8>, tolerance: u8) -> usize {
    image
        .pixels()
        .filter(|(_, _, pixel)| {
            pixel
                .0
                .iter()
                .zip(color.0.iter())
                .take(3)
                .all(|(a, e)| (*a as i16 - *e as i16).unsigned_abs() <= tolerance as u16)
        })
        .count()
}

/// Whether every border pixel differs from `background`
pub fn touches_all_edges(image: &DynamicImage, background: Rgba<u8>) -> bool {
    let (width, height) = image.dimensions();
    let differs = |x: u32, y: u32| image.get_pixel(x, y) != background;
    (0..width).any(|x| differs(x, 0))
        && (0..width).any(|x| differs(x, height - 1))
        && (0..height).any(|y| differs(0, y))
        && (0..height).any(|y| differs(width - 1, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    #[test]
    fn test_assert_image_dimensions() {
        let img = DynamicImage::new_rgb8(10, 20);

        // This should pass
        assert!(assert_image_dimensions(&img, 10, 20).is_ok());

        // These should fail
        assert!(assert_image_dimensions(&img, 11, 20).is_err());
        assert!(assert_image_dimensions(&img, 10, 21).is_err());
    }

    #[test]
    fn test_count_pixels_near() {
        let mut img = ImageBuffer::from_pixel(3, 3, Rgba([255u8, 255, 255, 255]));
        img.put_pixel(1, 1, Rgba([250, 0, 2, 255]));
        let img = DynamicImage::ImageRgba8(img);

        assert_eq!(count_pixels_near(&img, Rgba([255, 0, 0, 255]), 5), 1);
        assert_eq!(count_pixels_near(&img, Rgba([255, 0, 0, 255]), 0), 0);
        assert_eq!(count_pixels_near(&img, Rgba([255, 255, 255, 255]), 0), 8);
    }
}
