//! Logging utilities for seismap.
//!
//! This module provides structured logging helpers so every plotting run
//! reports the same searchable fields.

use once_cell::sync::Lazy;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::figure::Figure;

/// Identifier shared by every figure produced in this process
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Identifier of the current process, stable across calls
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let run_id = Uuid::new_v4();

    debug!(
        operation = operation,
        run_id = %run_id,
        "Starting operation"
    );

    let result = f();

    debug!(
        operation = operation,
        run_id = %run_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log what is about to be drawn
pub fn log_figure_stats(figure_id: &str, figure: &Figure) {
    let (markers, paths, labels) = figure.primitive_counts();
    info!(
        session_id = session_id(),
        figure_id = figure_id,
        projection = %figure.projection,
        region = %figure.projection.region_code(),
        markers = markers,
        paths = paths,
        labels = labels,
        raster = figure.basemap.raster.is_some(),
        output = %figure.output.display(),
        dpi = figure.dpi,
        "Figure assembled"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::SeismapError, context: &str) {
    error!(
        error = %error,
        context = context,
        precondition = error.is_precondition(),
        "Error occurred"
    );
}

/// Generate a unique figure ID
pub fn generate_figure_id() -> String {
    Uuid::new_v4().to_string()
}
