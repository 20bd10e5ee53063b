//! Tabular station/event input.
//!
//! Reads delimited text with a header row. Only the presence of the
//! required columns is checked up front; extra columns are ignored.

use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SeismapError};
use crate::geo::GeoPoint;

/// Station longitude column
pub const STATION_LON: &str = "stlo";
/// Station latitude column
pub const STATION_LAT: &str = "stla";
/// Event longitude column
pub const EVENT_LON: &str = "evlo";
/// Event latitude column
pub const EVENT_LAT: &str = "evla";

/// Columns every station table must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [STATION_LON, STATION_LAT, EVENT_LON, EVENT_LAT];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub stlo: usize,
    pub stla: usize,
    pub evlo: usize,
    pub evla: usize,
}

/// Stations in input row order, plus the event coordinates found on the first row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationTable {
    pub stations: Vec<GeoPoint>,
    pub first_row_event: Option<GeoPoint>,
}

impl StationTable {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Pick the event location.
    ///
    /// An explicit location wins. Otherwise the first row's `evlo`/`evla` is
    /// used; later rows' event columns are never consulted.
    pub fn resolve_event(&self, explicit: Option<GeoPoint>) -> Result<GeoPoint> {
        explicit
            .or(self.first_row_event)
            .ok_or_else(|| SeismapError::MissingInput {
                message: "No event location: the table has no rows and none was given"
                    .to_string(),
            })
    }
}

/// Check that all required columns are present in `headers`.
pub fn validate_columns<'a, I>(headers: I) -> Result<ColumnIndex>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = headers.into_iter().map(str::trim).collect();
    let find = |column: &str| names.iter().position(|name| *name == column);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| find(*column).is_none())
        .collect();

    match (find(STATION_LON), find(STATION_LAT), find(EVENT_LON), find(EVENT_LAT)) {
        (Some(stlo), Some(stla), Some(evlo), Some(evla)) => Ok(ColumnIndex {
            stlo,
            stla,
            evlo,
            evla,
        }),
        _ => Err(SeismapError::Schema {
            message: format!(
                "Input must contain the columns {:?}; missing {:?}",
                REQUIRED_COLUMNS, missing
            ),
        }),
    }
}

/// Read a station table from a file.
///
/// Fails with [`SeismapError::MissingInput`] if the file does not exist.
pub fn read_station_table(path: &Path, delimiter: u8) -> Result<StationTable> {
    if !path.exists() {
        return Err(SeismapError::MissingInput {
            message: format!("Input file {} not found", path.display()),
        });
    }
    let file = std::fs::File::open(path)?;
    let table = parse_station_table(file, delimiter)?;
    debug!(
        path = %path.display(),
        stations = table.len(),
        "Station table loaded"
    );
    Ok(table)
}

/// Parse a station table from any reader.
pub fn parse_station_table<R: Read>(reader: R, delimiter: u8) -> Result<StationTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = validate_columns(reader.headers()?.iter())?;

    let mut table = StationTable::default();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let station = row_point(
            cell(&record, columns.stlo, STATION_LON, row)?,
            cell(&record, columns.stla, STATION_LAT, row)?,
            STATION_LAT,
            row,
        )?;
        if row == 0 {
            table.first_row_event = Some(row_point(
                cell(&record, columns.evlo, EVENT_LON, row)?,
                cell(&record, columns.evla, EVENT_LAT, row)?,
                EVENT_LAT,
                row,
            )?);
        }
        table.stations.push(station);
    }

    Ok(table)
}

fn cell(record: &StringRecord, index: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(index).ok_or_else(|| SeismapError::Schema {
        message: format!("Row {} has no value for column '{}'", row + 1, column),
    })?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SeismapError::Schema {
            message: format!(
                "Row {} column '{}' is not a finite number: '{}'",
                row + 1,
                column,
                raw
            ),
        }),
    }
}

/// Build a point from one row, reporting a bad latitude by row and column.
fn row_point(longitude: f64, latitude: f64, lat_column: &str, row: usize) -> Result<GeoPoint> {
    GeoPoint::new(longitude, latitude).map_err(|e| SeismapError::Schema {
        message: format!("Row {} column '{}': {}", row + 1, lat_column, e),
    })
}
