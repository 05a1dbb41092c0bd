#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory spatial index for zone attribution.
//!
//! Loads polygon layers from `GeoJSON`, reprojects them to WGS84, builds
//! R-tree spatial indexes, and provides point-in-polygon lookups that are
//! deterministic when polygons overlap.

pub mod crs;
pub mod layer;

use std::path::PathBuf;

use geo::{Contains, MultiPolygon};
use rstar::{AABB, RTree, RTreeObject};
use thiserror::Error;

pub use crs::Crs;
pub use layer::{PolygonFeature, PolygonLayer, load_layer, parse_layer};

/// Errors that can occur while loading or reprojecting polygon layers.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// A layer file could not be read.
    #[error("Failed to read polygon layer {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The layer is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The layer is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("Polygon layer must be a GeoJSON FeatureCollection")]
    NotFeatureCollection,

    /// The layer CRS has no available transformation to WGS84.
    #[error("Unsupported coordinate reference system: {crs}")]
    UnsupportedCrs {
        /// CRS name as declared by the layer.
        crs: String,
    },

    /// A coordinate could not be transformed.
    #[error("Reprojection error: {message}")]
    Reprojection {
        /// Description of what went wrong.
        message: String,
    },
}

/// A zone polygon stored in the R-tree with its label.
struct ZoneEntry {
    /// Position in the input sequence, used to break ties.
    order: usize,
    label: String,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree index over labeled WGS84 polygons.
///
/// Built once per pipeline run and queried for every station.
pub struct ZoneIndex {
    zones: RTree<ZoneEntry>,
}

impl ZoneIndex {
    /// Builds an index from `(label, polygon)` pairs. The iteration order
    /// defines which zone wins when several contain the same point.
    #[must_use]
    pub fn build(zones: impl IntoIterator<Item = (String, MultiPolygon<f64>)>) -> Self {
        let entries: Vec<ZoneEntry> = zones
            .into_iter()
            .enumerate()
            .map(|(order, (label, polygon))| ZoneEntry {
                order,
                label,
                envelope: compute_envelope(&polygon),
                polygon,
            })
            .collect();

        Self {
            zones: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.size()
    }

    /// Whether the index holds no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.size() == 0
    }

    /// Looks up the label of the zone containing a point.
    ///
    /// Containment excludes the polygon boundary. When several zones
    /// contain the point, the one added first wins.
    #[must_use]
    pub fn lookup(&self, lng: f64, lat: f64) -> Option<&str> {
        let point = geo::Point::new(lng, lat);
        let query_env = AABB::from_point([lng, lat]);

        let mut best: Option<&ZoneEntry> = None;

        for entry in self.zones.locate_in_envelope_intersecting(&query_env) {
            if entry.polygon.contains(&point) {
                match best {
                    Some(current) if current.order <= entry.order => {}
                    _ => best = Some(entry),
                }
            }
        }

        best.map(|e| e.label.as_str())
    }
}

/// Compute the bounding box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    use geo::BoundingRect;

    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(min_x: f64, min_y: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: min_x, y: min_y),
            (x: min_x + size, y: min_y),
            (x: min_x + size, y: min_y + size),
            (x: min_x, y: min_y + size),
        ]])
    }

    #[test]
    fn finds_containing_zone() {
        let index = ZoneIndex::build([
            ("west".to_string(), square(2.0, 48.0, 1.0)),
            ("east".to_string(), square(3.0, 48.0, 1.0)),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup(2.5, 48.5), Some("west"));
        assert_eq!(index.lookup(3.5, 48.5), Some("east"));
    }

    #[test]
    fn points_outside_every_zone_are_unmatched() {
        let index = ZoneIndex::build([("west".to_string(), square(2.0, 48.0, 1.0))]);
        assert_eq!(index.lookup(10.0, 10.0), None);
    }

    #[test]
    fn boundary_points_are_not_within() {
        let index = ZoneIndex::build([("west".to_string(), square(2.0, 48.0, 1.0))]);
        assert_eq!(index.lookup(2.0, 48.5), None);
    }

    #[test]
    fn overlapping_zones_resolve_to_first_added() {
        let index = ZoneIndex::build([
            ("small".to_string(), square(2.4, 48.4, 0.2)),
            ("large".to_string(), square(2.0, 48.0, 1.0)),
        ]);
        assert_eq!(index.lookup(2.5, 48.5), Some("small"));

        let reversed = ZoneIndex::build([
            ("large".to_string(), square(2.0, 48.0, 1.0)),
            ("small".to_string(), square(2.4, 48.4, 0.2)),
        ]);
        assert_eq!(reversed.lookup(2.5, 48.5), Some("large"));
    }

    #[test]
    fn empty_index_matches_nothing() {
        let index = ZoneIndex::build(std::iter::empty());
        assert!(index.is_empty());
        assert_eq!(index.lookup(2.5, 48.5), None);
    }
}
