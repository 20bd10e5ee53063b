//! Configuration management for seismap.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::{is_known_colormap, COLORMAP_NAMES};
use crate::error::{Result, SeismapError};
use crate::figure::DEFAULT_DPI;
use crate::geo::GeoPoint;

/// Highest accepted output resolution.
pub const MAX_DPI: u32 = 2400;

/// Command-line arguments for seismap
#[derive(Parser, Debug)]
#[command(name = "seismap")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to JSON configuration file
    #[arg(short, long, env = "SEISMAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output resolution in dots per inch
    #[arg(long, env = "SEISMAP_DPI", global = true)]
    pub dpi: Option<u32>,

    /// Colormap for the topography underlay (geo, relief, gray, viridis)
    #[arg(long, env = "SEISMAP_COLORMAP", global = true)]
    pub colormap: Option<String>,

    /// Topography grid identifier or local image file
    #[arg(long, env = "SEISMAP_TOPO", global = true)]
    pub topo: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SEISMAP_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Write the draw plan as JSON instead of rendering an image
    #[arg(long, global = true)]
    pub dry_run: bool,
}

/// Figure to produce
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Global Mollweide map of an event and the stations that recorded it
    EventMap {
        /// Station table (defaults to data_info_<EVENT>.txt)
        table: Option<PathBuf>,

        /// Event name, used for default file names
        #[arg(long, default_value = "test_event")]
        event: String,

        /// Output image (defaults to event_map_<EVENT>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Central longitude (defaults to the mean station longitude)
        #[arg(long, allow_hyphen_values = true)]
        clon: Option<f64>,

        /// Event longitude, overriding the table's first row
        #[arg(long, allow_hyphen_values = true, requires = "event_lat")]
        event_lon: Option<f64>,

        /// Event latitude, overriding the table's first row
        #[arg(long, allow_hyphen_values = true, requires = "event_lon")]
        event_lat: Option<f64>,

        /// Field delimiter of the station table
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Draw a legend for stations and event
        #[arg(long)]
        legend: bool,
    },

    /// Regional Mercator map of the great-circle path between two points
    Geodetic {
        /// First point as LON,LAT
        #[arg(long, allow_hyphen_values = true)]
        point1: GeoPoint,

        /// Second point as LON,LAT
        #[arg(long, allow_hyphen_values = true)]
        point2: GeoPoint,

        /// Output image
        #[arg(short, long, default_value = "geodetic_curve_map.png")]
        output: PathBuf,
    },
}

impl Command {
    /// Station table path for an event map, following the default naming.
    pub fn table_path(&self) -> Option<PathBuf> {
        match self {
            Command::EventMap { table, event, .. } => Some(
                table
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(format!("data_info_{}.txt", event))),
            ),
            Command::Geodetic { .. } => None,
        }
    }

    /// Output image path, following the default naming.
    pub fn output_path(&self) -> PathBuf {
        match self {
            Command::EventMap { output, event, .. } => output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("event_map_{}.png", event))),
            Command::Geodetic { output, .. } => output.clone(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output resolution in dots per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Colormap for the topography underlay
    #[serde(default = "default_colormap")]
    pub colormap: String,

    /// Topography grid identifier or local image file
    #[serde(default = "default_topo_source")]
    pub topo_source: String,

    /// Hill-shade the topography underlay
    #[serde(default = "default_shading")]
    pub shading: bool,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rendering configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Record draw calls instead of rendering
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, Command)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(dpi) = args.dpi {
            config.render.dpi = dpi;
        }
        if let Some(colormap) = args.colormap {
            config.render.colormap = colormap;
        }
        if let Some(topo) = args.topo {
            config.render.topo_source = topo;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }
        config.dry_run |= args.dry_run;

        Ok((config, args.command))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SeismapError::MissingInput {
                message: format!("Config file {} not found", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.render = other.render;
        self.log_level = other.log_level;
        self.dry_run |= other.dry_run;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.render.dpi == 0 || self.render.dpi > MAX_DPI {
            return Err(SeismapError::Config {
                message: format!(
                    "Invalid dpi: {}. Must be between 1 and {}",
                    self.render.dpi, MAX_DPI
                ),
            });
        }

        if !is_known_colormap(&self.render.colormap) {
            return Err(SeismapError::Config {
                message: format!(
                    "Invalid colormap: {}. Must be one of: {}",
                    self.render.colormap,
                    COLORMAP_NAMES.join(", ")
                ),
            });
        }

        if self.render.topo_source.trim().is_empty() {
            return Err(SeismapError::Config {
                message: "Topography source cannot be empty".to_string(),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SeismapError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            colormap: default_colormap(),
            topo_source: default_topo_source(),
            shading: default_shading(),
        }
    }
}

// Default value functions for serde
fn default_dpi() -> u32 {
    DEFAULT_DPI
}

fn default_colormap() -> String {
    "geo".to_string()
}

fn default_topo_source() -> String {
    "@earth_relief_20m".to_string()
}

fn default_shading() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
