//! A backend that records draw calls instead of rendering them.
//!
//! Used for dry runs, where the recorded plan is written out as JSON, and
//! in tests to check call order without producing images.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::RenderGateway;
use crate::error::{Result, SeismapError};
use crate::figure::{CoastlineStyle, Legend, RasterLayer};
use crate::geo::ProjectionSpec;
use crate::primitives::Primitive;

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum DrawCall {
    Basemap {
        projection: ProjectionSpec,
        /// `-J` style projection code
        projection_code: String,
        /// `-R` style region code
        region_code: String,
        frame: bool,
    },
    Raster(RasterLayer),
    Coastlines(CoastlineStyle),
    Primitive(Primitive),
    Legend(Legend),
    Save {
        path: PathBuf,
        dpi: u32,
        crop: bool,
    },
    Show,
}

impl DrawCall {
    pub fn name(&self) -> &'static str {
        match self {
            DrawCall::Basemap { .. } => "basemap",
            DrawCall::Raster(_) => "raster",
            DrawCall::Coastlines(_) => "coastlines",
            DrawCall::Primitive(_) => "primitive",
            DrawCall::Legend(_) => "legend",
            DrawCall::Save { .. } => "save",
            DrawCall::Show => "show",
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingGateway {
    calls: Vec<DrawCall>,
    write_plan: bool,
    fail_on: Option<&'static str>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// On `save`, write the recorded calls as JSON next to the requested
    /// output (same path, `.json` extension).
    pub fn with_plan_output() -> Self {
        Self {
            write_plan: true,
            ..Self::default()
        }
    }

    /// Fail with a render error when the named call is reached.
    pub fn failing_on(call: &'static str) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.iter().map(DrawCall::name).collect()
    }

    /// The primitives drawn so far, in order.
    pub fn primitives(&self) -> Vec<&Primitive> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Primitive(primitive) => Some(primitive),
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.calls)?)
    }

    fn record(&mut self, call: DrawCall) -> Result<()> {
        if self.fail_on == Some(call.name()) {
            return Err(SeismapError::Render {
                message: format!("{} call failed", call.name()),
            });
        }
        self.calls.push(call);
        Ok(())
    }
}

impl RenderGateway for RecordingGateway {
    fn draw_basemap(&mut self, projection: &ProjectionSpec, frame: bool) -> Result<()> {
        self.record(DrawCall::Basemap {
            projection: *projection,
            projection_code: projection.to_string(),
            region_code: projection.region_code(),
            frame,
        })
    }

    fn draw_raster(&mut self, layer: &RasterLayer) -> Result<()> {
        self.record(DrawCall::Raster(layer.clone()))
    }

    fn draw_coastlines(&mut self, style: &CoastlineStyle) -> Result<()> {
        self.record(DrawCall::Coastlines(style.clone()))
    }

    fn draw_primitive(&mut self, primitive: &Primitive) -> Result<()> {
        self.record(DrawCall::Primitive(primitive.clone()))
    }

    fn draw_legend(&mut self, legend: &Legend) -> Result<()> {
        self.record(DrawCall::Legend(legend.clone()))
    }

    fn save(&mut self, path: &Path, dpi: u32, crop: bool) -> Result<()> {
        self.record(DrawCall::Save {
            path: path.to_path_buf(),
            dpi,
            crop,
        })?;

        if self.write_plan {
            let plan_path = path.with_extension("json");
            std::fs::write(&plan_path, self.to_json()?)?;
            info!(plan = %plan_path.display(), calls = self.calls.len(), "Draw plan written");
        }
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.record(DrawCall::Show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{geodetic_map_coastlines, Basemap, Figure};
    use crate::geo::{fit_region, GeoPoint};
    use crate::primitives::build_geodetic_primitives;
    use crate::render::render_figure;

    fn geodetic_figure(output: PathBuf) -> Figure {
        let p1 = GeoPoint::new(16.3738, 48.2082).unwrap();
        let p2 = GeoPoint::new(77.1025, 28.7041).unwrap();
        Figure {
            projection: ProjectionSpec::regional(fit_region(p1, p2)),
            basemap: Basemap {
                frame: true,
                raster: None,
                coastlines: geodetic_map_coastlines(),
            },
            primitives: build_geodetic_primitives(p1, p2),
            legend: None,
            output,
            dpi: 300,
            crop: false,
        }
    }

    #[test]
    fn test_call_order() {
        let figure = geodetic_figure(PathBuf::from("vienna_delhi_map.png"));
        let mut gateway = RecordingGateway::new();
        render_figure(&figure, &mut gateway).unwrap();

        assert_eq!(
            gateway.call_names(),
            vec![
                "basemap",
                "coastlines",
                "primitive",
                "primitive",
                "primitive",
                "primitive",
                "primitive",
                "save"
            ]
        );
        assert_eq!(gateway.primitives().len(), 5);
        match &gateway.calls()[0] {
            DrawCall::Basemap {
                projection_code, ..
            } => assert_eq!(projection_code, "M15c"),
            other => panic!("unexpected first call {:?}", other),
        }
    }

    #[test]
    fn test_failure_stops_sequence() {
        let figure = geodetic_figure(PathBuf::from("out.png"));
        let mut gateway = RecordingGateway::failing_on("primitive");
        let err = render_figure(&figure, &mut gateway).unwrap_err();
        assert!(matches!(err, SeismapError::Render { .. }));
        assert_eq!(gateway.call_names(), vec!["basemap", "coastlines"]);
    }

    #[test]
    fn test_plan_output() {
        let dir = tempfile::tempdir().unwrap();
        let figure = geodetic_figure(dir.path().join("map.png"));
        let mut gateway = RecordingGateway::with_plan_output();
        render_figure(&figure, &mut gateway).unwrap();

        let plan = std::fs::read_to_string(dir.path().join("map.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&plan).unwrap();
        let calls = json.as_array().unwrap();
        assert_eq!(calls.len(), 8);
        assert_eq!(calls[0]["call"], "basemap");
        assert_eq!(calls[2]["type"], "path");
        assert_eq!(calls[2]["kind"], "great_circle_arc");
        assert!(!dir.path().join("map.png").exists());
    }
}
