//! Converts a [`RawTable`] into [`NormalizedStation`] values.
//!
//! Columns are resolved once per table through a [`ColumnMapping`]; rows
//! are then read positionally. The combined coordinate cell is split into
//! latitude and longitude, and when the coordinate column is absent every
//! station gets missing coordinates.

use velib_map_station_models::{ColumnMapping, NormalizedStation, UNKNOWN_ZONE};

use crate::RawTable;
use crate::columns::ResolvedColumns;
use crate::parsing::{parse_capacity, parse_coordinates};

/// Normalizes every row of `table`. Zones are left as [`UNKNOWN_ZONE`].
#[must_use]
pub fn normalize_table(table: &RawTable, mapping: &ColumnMapping) -> Vec<NormalizedStation> {
    let columns = ResolvedColumns::resolve(&table.headers, mapping);

    let stations: Vec<NormalizedStation> = (0..table.rows.len())
        .map(|row| normalize_row(table, row, columns))
        .collect();

    let missing_coords = stations.iter().filter(|s| s.lon_lat().is_none()).count();
    let missing_capacity = stations.iter().filter(|s| s.capacity.is_none()).count();
    if missing_coords > 0 || missing_capacity > 0 {
        log::warn!(
            "{missing_coords} of {} stations have unusable coordinates, {missing_capacity} have unusable capacity",
            stations.len()
        );
    }

    stations
}

fn normalize_row(table: &RawTable, row: usize, columns: ResolvedColumns) -> NormalizedStation {
    let (latitude, longitude) = table
        .cell(row, columns.coordinates)
        .map_or((None, None), parse_coordinates);

    NormalizedStation {
        id: table.cell(row, columns.id).map(str::to_owned),
        name: table.cell(row, columns.name).map(str::to_owned),
        capacity: table.cell(row, columns.capacity).and_then(parse_capacity),
        latitude,
        longitude,
        zone: UNKNOWN_ZONE.to_string(),
    }
}
