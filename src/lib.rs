//! # seismap
//!
//! Quick-look maps for seismology.
//!
//! This library turns station tables and coordinate pairs into figures:
//! a global Mollweide map of an event and the stations that recorded it, and
//! a regional Mercator map of the great-circle path between two points.
//!
//! ## Architecture
//!
//! - **Input**: reads and validates delimited station tables
//! - **Geometry**: central meridian derivation and padded, clamped region fitting
//! - **Primitives**: ordered markers, paths and labels for the renderer
//! - **Rendering**: a [`render::RenderGateway`] trait with a recording backend
//!   and a raster backend built on `image` and `imageproc`

pub mod colormaps;
pub mod config;
pub mod error;
pub mod figure;
pub mod geo;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod primitives;
pub mod render;

pub use config::{Command, Config};
pub use error::{Result, SeismapError};
pub use figure::Figure;
pub use geo::{fit_region, AxisOrder, GeoPoint, ProjectionSpec, Region};
pub use input::{read_station_table, StationTable};
pub use logging::{
    generate_figure_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_timed_operation,
};
pub use pipeline::{
    build_event_map, build_geodetic_map, plot_event_map, plot_event_map_file,
    plot_geodetic_curve, EventMapOptions, GeodeticOptions,
};
pub use render::{render_figure, RasterGateway, RecordingGateway, RenderGateway};
