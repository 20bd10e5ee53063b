//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for coordinate comparisons.

#![allow(dead_code)]

use seismap::geo::{GeoPoint, Region};

/// Default epsilon for coordinate comparisons, in degrees
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that two points are approximately equal, component-wise.
pub fn assert_point_approx_eq(actual: GeoPoint, expected: GeoPoint, epsilon: Option<f64>) {
    assert_approx_eq(actual.longitude, expected.longitude, epsilon);
    assert_approx_eq(actual.latitude, expected.latitude, epsilon);
}

/// Assert that a value is within expected bounds (inclusive).
pub fn assert_in_range(actual: f64, min: f64, max: f64) {
    assert!(
        actual >= min && actual <= max,
        "Value not in range: actual = {}, min = {}, max = {}",
        actual,
        min,
        max
    );
}

/// Assert that a region is ordered and lies within geographic bounds.
pub fn assert_region_valid(region: &Region) {
    assert!(region.lon_min <= region.lon_max, "unordered longitudes: {}", region);
    assert!(region.lat_min <= region.lat_max, "unordered latitudes: {}", region);
    assert_in_range(region.lon_min, -180.0, 180.0);
    assert_in_range(region.lon_max, -180.0, 180.0);
    assert_in_range(region.lat_min, -90.0, 90.0);
    assert_in_range(region.lat_max, -90.0, 90.0);
}
