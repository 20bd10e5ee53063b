//! Geographic types and region fitting.

pub mod point;
pub mod region;

pub use point::{great_circle_points, normalize_longitude, parse_point, AxisOrder, GeoPoint};
pub use region::{
    central_meridian, fit_region, ProjectionSpec, Region, GLOBAL_MAP_WIDTH_CM,
    REGIONAL_MAP_WIDTH_CM, REGION_PADDING_DEG,
};
