//! Figure-producing entry points.
//!
//! Each call is a straight line: validate, fit the projection, build
//! primitives, render and save. Input problems are reported before the
//! gateway sees a single call.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::colormaps::is_known_colormap;
use crate::config::RenderConfig;
use crate::error::{Result, SeismapError};
use crate::figure::{
    event_map_coastlines, geodetic_map_coastlines, Basemap, Figure, Legend, RasterLayer,
    DEFAULT_DPI,
};
use crate::geo::{central_meridian, fit_region, GeoPoint, ProjectionSpec};
use crate::input::{read_station_table, StationTable};
use crate::logging::{
    generate_figure_id, log_error, log_figure_stats, log_operation_end, log_operation_start,
    log_timed_operation,
};
use crate::primitives::{build_event_map_primitives, build_geodetic_primitives, legend_entries};
use crate::render::{render_figure, RenderGateway};

/// Legend anchor for the event map: top right, inside the frame.
pub const EVENT_LEGEND_POSITION: &str = "JTR+jTR+o0.2c";

/// Options for the global event/station map.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMapOptions {
    pub output: PathBuf,
    /// Central meridian override; `Some(0.0)` is honored
    pub central_meridian: Option<f64>,
    /// Event location override; otherwise the table's first row is used
    pub event: Option<GeoPoint>,
    pub colormap: String,
    pub topo_source: String,
    pub shading: bool,
    pub dpi: u32,
    pub legend: bool,
}

impl EventMapOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        let render = RenderConfig::default();
        Self {
            output: output.into(),
            central_meridian: None,
            event: None,
            colormap: render.colormap,
            topo_source: render.topo_source,
            shading: render.shading,
            dpi: render.dpi,
            legend: false,
        }
    }

    /// Take colormap, topography, shading and dpi from `render`.
    pub fn with_render(mut self, render: &RenderConfig) -> Self {
        self.colormap = render.colormap.clone();
        self.topo_source = render.topo_source.clone();
        self.shading = render.shading;
        self.dpi = render.dpi;
        self
    }
}

/// Options for the two-point geodetic map.
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticOptions {
    pub output: PathBuf,
    pub dpi: u32,
}

impl GeodeticOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            dpi: DEFAULT_DPI,
        }
    }
}

fn check_output(output: &Path) -> Result<()> {
    if output.as_os_str().is_empty() {
        return Err(SeismapError::InvalidParameter {
            param: "output".to_string(),
            message: "Output path cannot be empty".to_string(),
        });
    }
    Ok(())
}

fn check_dpi(dpi: u32) -> Result<()> {
    if dpi == 0 {
        return Err(SeismapError::InvalidParameter {
            param: "dpi".to_string(),
            message: "dpi must be positive".to_string(),
        });
    }
    Ok(())
}

/// Geodetic endpoints must lie in [-180, 180] x [-90, 90] so the fitted
/// region stays ordered.
fn check_endpoint(param: &str, point: GeoPoint) -> Result<()> {
    if !point.has_standard_longitude() || !(-90.0..=90.0).contains(&point.latitude) {
        return Err(SeismapError::InvalidParameter {
            param: param.to_string(),
            message: format!("{} is outside [-180, 180] x [-90, 90]", point),
        });
    }
    Ok(())
}

/// Assemble the global Mollweide figure for `table`.
///
/// The central meridian is the override if given, else the mean station
/// longitude, else the event longitude for a table without stations.
pub fn build_event_map(table: &StationTable, options: &EventMapOptions) -> Result<Figure> {
    check_output(&options.output)?;
    check_dpi(options.dpi)?;
    if !is_known_colormap(&options.colormap) {
        return Err(SeismapError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", options.colormap),
        });
    }

    let event = table.resolve_event(options.event)?;
    let meridian = central_meridian(&table.stations, options.central_meridian)
        .unwrap_or(event.longitude);
    if table.is_empty() {
        warn!(
            central_meridian = meridian,
            "Station table is empty, plotting the event alone"
        );
    }

    let primitives = build_event_map_primitives(&table.stations, event);
    let legend = options.legend.then(|| Legend {
        position: EVENT_LEGEND_POSITION.to_string(),
        boxed: true,
        entries: legend_entries(&primitives),
    });

    Ok(Figure {
        projection: ProjectionSpec::global(meridian),
        basemap: Basemap {
            frame: true,
            raster: Some(RasterLayer {
                source: options.topo_source.clone(),
                colormap: options.colormap.clone(),
                shading: options.shading,
            }),
            coastlines: event_map_coastlines(),
        },
        primitives,
        legend,
        output: options.output.clone(),
        dpi: options.dpi,
        crop: true,
    })
}

/// Assemble the regional Mercator figure for the path from `point1` to `point2`.
pub fn build_geodetic_map(
    point1: GeoPoint,
    point2: GeoPoint,
    options: &GeodeticOptions,
) -> Result<Figure> {
    check_output(&options.output)?;
    check_dpi(options.dpi)?;
    check_endpoint("point1", point1)?;
    check_endpoint("point2", point2)?;

    let region = fit_region(point1, point2);
    debug!(%point1, %point2, %region, "Fitted region");

    Ok(Figure {
        projection: ProjectionSpec::regional(region),
        basemap: Basemap {
            frame: true,
            raster: None,
            coastlines: geodetic_map_coastlines(),
        },
        primitives: build_geodetic_primitives(point1, point2),
        legend: None,
        output: options.output.clone(),
        dpi: options.dpi,
        crop: false,
    })
}

/// Render `figure` through `gateway`, logging the run.
fn render_logged<G: RenderGateway + ?Sized>(
    operation: &str,
    figure: &Figure,
    gateway: &mut G,
) -> Result<()> {
    let figure_id = generate_figure_id();
    let start = Instant::now();
    log_figure_stats(&figure_id, figure);

    let result = render_figure(figure, gateway);
    log_operation_end(operation, start, result.is_ok());
    if let Err(e) = &result {
        log_error(e, operation);
    }
    result
}

/// Plot stations and event from an already parsed table.
pub fn plot_event_map<G: RenderGateway + ?Sized>(
    table: &StationTable,
    options: &EventMapOptions,
    gateway: &mut G,
) -> Result<Figure> {
    let output = options.output.display().to_string();
    log_operation_start("plot_event_map", Some(output.as_str()));
    let figure = log_timed_operation("build_event_map", || build_event_map(table, options))?;
    render_logged("plot_event_map", &figure, gateway)?;
    info!(
        stations = table.len(),
        output = %figure.output.display(),
        "Event map saved"
    );
    Ok(figure)
}

/// Read the station table at `path`, then plot it.
///
/// A missing file or column fails before any rendering.
pub fn plot_event_map_file<G: RenderGateway + ?Sized>(
    path: &Path,
    delimiter: u8,
    options: &EventMapOptions,
    gateway: &mut G,
) -> Result<Figure> {
    let table = read_station_table(path, delimiter)?;
    plot_event_map(&table, options, gateway)
}

/// Plot the great-circle path between two points on a fitted regional map.
pub fn plot_geodetic_curve<G: RenderGateway + ?Sized>(
    point1: GeoPoint,
    point2: GeoPoint,
    options: &GeodeticOptions,
    gateway: &mut G,
) -> Result<Figure> {
    let output = options.output.display().to_string();
    log_operation_start("plot_geodetic_curve", Some(output.as_str()));
    let figure = log_timed_operation("build_geodetic_map", || {
        build_geodetic_map(point1, point2, options)
    })?;
    render_logged("plot_geodetic_curve", &figure, gateway)?;
    info!(output = %figure.output.display(), "Geodetic map saved");
    Ok(figure)
}
