//! Drawing styles: lengths, colours, pens, marker symbols, fonts and vector
//! decorations.
//!
//! Each style renders to the compact code the mapping toolchain uses
//! (`1p,red`, `i2p`, `10p,Helvetica,blue`), which is what ends up in
//! dry-run plans and logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Points per inch.
const POINTS_PER_INCH: f64 = 72.0;
/// Centimetres per inch.
const CM_PER_INCH: f64 = 2.54;

/// A physical length on the printed figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    Points(f64),
    Centimetres(f64),
}

impl Length {
    pub fn to_points(&self) -> f64 {
        match self {
            Length::Points(p) => *p,
            Length::Centimetres(c) => c / CM_PER_INCH * POINTS_PER_INCH,
        }
    }

    /// Size in device pixels at the given resolution.
    pub fn to_pixels(&self, dpi: u32) -> f64 {
        self.to_points() * dpi as f64 / POINTS_PER_INCH
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Points(p) => write!(f, "{}p", p),
            Length::Centimetres(c) => write!(f, "{}c", c),
        }
    }
}

/// Named colours used by the figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Gray,
    White,
    Blue,
    Red,
}

impl Color {
    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Gray => "gray",
            Color::White => "white",
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }

    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Color::Black => [0, 0, 0, 255],
            Color::Gray => [190, 190, 190, 255],
            Color::White => [255, 255, 255, 255],
            Color::Blue => [0, 0, 255, 255],
            Color::Red => [255, 0, 0, 255],
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outline / line style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub width: Length,
    pub color: Color,
}

impl Pen {
    pub const fn new(width: Length, color: Color) -> Self {
        Self { width, color }
    }
}

impl fmt::Display for Pen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.color)
    }
}

/// Marker symbol shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Star,
    InvertedTriangle,
}

impl MarkerShape {
    fn code(&self) -> char {
        match self {
            MarkerShape::Circle => 'c',
            MarkerShape::Star => 'a',
            MarkerShape::InvertedTriangle => 'i',
        }
    }
}

/// Marker symbol plus its size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub size: Length,
}

impl fmt::Display for MarkerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.shape.code(), self.size)
    }
}

/// Text font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: Length,
    pub family: String,
    pub color: Color,
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.size, self.family, self.color)
    }
}

/// Arrow-head decoration for a geographic vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowDecoration {
    pub head_length: Length,
    /// The second position is an end point rather than an azimuth/length
    pub endpoint_coordinates: bool,
    pub head_at_begin: bool,
    pub head_at_end: bool,
    pub apex_angle_deg: f64,
    pub fill: Color,
    /// Head shape between 0 (triangular) and 1 (arrow-like)
    pub head_shape: f64,
    pub pen: Pen,
}

impl fmt::Display for ArrowDecoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "={}", self.head_length)?;
        if self.endpoint_coordinates {
            f.write_str("+s")?;
        }
        if self.head_at_begin {
            f.write_str("+b")?;
        }
        if self.head_at_end {
            f.write_str("+e")?;
        }
        write!(
            f,
            "+a{}+g{}+h{}+p{}",
            self.apex_angle_deg, self.fill, self.head_shape, self.pen
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        assert_eq!(Length::Points(72.0).to_pixels(300), 300.0);
        assert!((Length::Centimetres(2.54).to_points() - 72.0).abs() < 1e-9);
        assert_eq!(Length::Points(2.0).to_string(), "2p");
        assert_eq!(Length::Centimetres(0.3).to_string(), "0.3c");
    }

    #[test]
    fn test_style_codes() {
        let pen = Pen::new(Length::Points(1.0), Color::Red);
        assert_eq!(pen.to_string(), "1p,red");

        let star = MarkerStyle {
            shape: MarkerShape::Star,
            size: Length::Points(15.0),
        };
        assert_eq!(star.to_string(), "a15p");

        let font = Font {
            size: Length::Points(10.0),
            family: "Helvetica".to_string(),
            color: Color::Blue,
        };
        assert_eq!(font.to_string(), "10p,Helvetica,blue");
    }

    #[test]
    fn test_arrow_decoration_code() {
        let decoration = ArrowDecoration {
            head_length: Length::Centimetres(0.5),
            endpoint_coordinates: true,
            head_at_begin: false,
            head_at_end: true,
            apex_angle_deg: 30.0,
            fill: Color::Blue,
            head_shape: 0.5,
            pen: Pen::new(Length::Points(1.0), Color::Blue),
        };
        assert_eq!(decoration.to_string(), "=0.5c+s+e+a30+gblue+h0.5+p1p,blue");
    }
}
