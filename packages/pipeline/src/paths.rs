//! Default locations of the pipeline input files.
//!
//! Files live in the data directory, which is `$VELIB_MAP_DATA_DIR` when
//! set and the workspace `data/` directory otherwise.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "VELIB_MAP_DATA_DIR";

/// File name of the station export.
pub const STATIONS_FILE: &str = "velib-emplacement-des-stations.csv";

/// File name of the arrondissement polygons.
pub const ARRONDISSEMENTS_FILE: &str = "arrondissements.geojson";

/// File name of the commune polygons.
pub const COMMUNES_FILE: &str = "communes-version-simplifiee.geojson";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map_or_else(|| project_root().join("data"), PathBuf::from)
}

/// Returns the default station export path.
#[must_use]
pub fn stations_path() -> PathBuf {
    data_dir().join(STATIONS_FILE)
}

/// Returns the default arrondissement layer path.
#[must_use]
pub fn arrondissements_path() -> PathBuf {
    data_dir().join(ARRONDISSEMENTS_FILE)
}

/// Returns the default commune layer path.
#[must_use]
pub fn communes_path() -> PathBuf {
    data_dir().join(COMMUNES_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_root_holds_workspace_manifest() {
        assert!(project_root().join("Cargo.toml").exists());
        assert!(project_root().join("packages").is_dir());
    }

    #[test]
    fn default_files_live_in_data_dir() {
        assert_eq!(stations_path().file_name().unwrap(), STATIONS_FILE);
        assert_eq!(stations_path().parent(), Some(data_dir().as_path()));
        assert_eq!(communes_path().parent(), arrondissements_path().parent());
    }
}
