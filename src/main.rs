//! seismap - quick-look event/station and geodetic path maps
//!
//! This is the main entry point for the seismap command-line tool.

use anyhow::{bail, Context};
use tracing::{error, info};

use seismap::config::Command;
use seismap::geo::GeoPoint;
use seismap::pipeline::{plot_event_map_file, plot_geodetic_curve, EventMapOptions, GeodeticOptions};
use seismap::render::{RasterGateway, RecordingGateway, RenderGateway};
use seismap::{init_tracing, Config};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let (config, command) = Config::load().context("Failed to load configuration")?;

    init_tracing(&config.log_level);
    info!("Starting seismap v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut gateway: Box<dyn RenderGateway> = if config.dry_run {
        info!("Dry run: recording draw calls instead of rendering");
        Box::new(RecordingGateway::with_plan_output())
    } else {
        Box::new(RasterGateway::new(config.render.dpi))
    };

    let output = command.output_path();
    match &command {
        Command::EventMap {
            clon,
            event_lon,
            event_lat,
            delimiter,
            legend,
            ..
        } => {
            if !delimiter.is_ascii() {
                bail!("Delimiter must be a single ASCII character, got {:?}", delimiter);
            }
            let event = match (event_lon, event_lat) {
                (Some(lon), Some(lat)) => Some(GeoPoint::new(*lon, *lat)?),
                _ => None,
            };
            let mut options = EventMapOptions::new(&output).with_render(&config.render);
            options.central_meridian = *clon;
            options.event = event;
            options.legend = *legend;

            let table = command
                .table_path()
                .context("Event map needs a station table")?;
            plot_event_map_file(&table, *delimiter as u8, &options, gateway.as_mut())
                .with_context(|| format!("Failed to plot event map from {}", table.display()))?;
        }
        Command::Geodetic { point1, point2, .. } => {
            let options = GeodeticOptions {
                output: output.clone(),
                dpi: config.render.dpi,
            };
            plot_geodetic_curve(*point1, *point2, &options, gateway.as_mut())
                .context("Failed to plot geodetic curve")?;
        }
    }

    if config.dry_run {
        println!("Draw plan saved as {}", output.with_extension("json").display());
    } else {
        println!("Map saved as {}", output.display());
    }
    Ok(())
}
