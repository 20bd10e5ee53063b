//! Test data generation utilities.
//!
//! This module writes station tables with known contents for the
//! integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

/// Header used by the station tables written here.
pub const FULL_HEADER: &str = "net,sta,stlo,stla,evlo,evla,dist";

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_table(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// A table with one row per station longitude, all at latitude 10, with the
/// event at (142.37, 38.30) on every row.
pub fn stations_at_longitudes(lons: &[f64]) -> String {
    let mut table = String::from(FULL_HEADER);
    table.push('\n');
    for (i, lon) in lons.iter().enumerate() {
        table.push_str(&format!("XX,S{:02},{},10.0,142.37,38.30,{}\n", i, lon, 40 + i));
    }
    table
}

/// A header-only table.
pub fn header_only() -> String {
    format!("{}\n", FULL_HEADER)
}

/// A table whose header lacks `column`.
pub fn missing_column(column: &str) -> String {
    let header: Vec<&str> = FULL_HEADER.split(',').filter(|c| *c != column).collect();
    let row: Vec<&str> = header.iter().map(|_| "1.0").collect();
    format!("{}\n{}\n", header.join(","), row.join(","))
}

/// A small grayscale topography image: dark west, bright east.
pub fn write_topography_png(path: &Path, width: u32, height: u32) {
    let image = image::GrayImage::from_fn(width, height, |x, _| {
        image::Luma([(x * 255 / width.max(1)) as u8])
    });
    image.save(path).unwrap();
}
