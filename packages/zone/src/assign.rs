//! Two-layer point-in-polygon zone assignment.
//!
//! Both layers are reprojected to WGS84 and indexed once. Each station
//! point (x = longitude, y = latitude) is then looked up in the
//! arrondissement index and in the commune index, and the two results are
//! merged with [`resolve_zone`].

use velib_map_spatial::{PolygonLayer, ZoneIndex, load_layer};
use velib_map_station_models::{NormalizedStation, UNKNOWN_ZONE};

use crate::label::format_arrondissement_label;
use crate::{LayerSource, ZoneError, ZoneLayerKind};

/// Picks the final zone label: arrondissement first, then commune, then
/// [`UNKNOWN_ZONE`].
#[must_use]
pub fn resolve_zone(arrondissement: Option<&str>, commune: Option<&str>) -> String {
    arrondissement
        .or(commune)
        .map_or_else(|| UNKNOWN_ZONE.to_string(), ToString::to_string)
}

/// Counts of how stations were resolved during one assignment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentStats {
    /// Stations placed in an arrondissement.
    pub arrondissement: usize,
    /// Stations placed in a commune only.
    pub commune: usize,
    /// Stations with coordinates that matched no polygon.
    pub unmatched: usize,
    /// Stations without usable coordinates.
    pub no_coordinates: usize,
}

/// Spatial indexes for both zone layers.
pub struct ZoneAssigner {
    arrondissements: ZoneIndex,
    communes: ZoneIndex,
}

impl ZoneAssigner {
    /// Loads both layer files and builds the indexes.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError`] if a file is missing or invalid, cannot be
    /// reprojected, or lacks its label field.
    pub fn load(arrondissements: &LayerSource, communes: &LayerSource) -> Result<Self, ZoneError> {
        let arr_layer = load_layer(&arrondissements.path).map_err(|source| ZoneError::Layer {
            layer: ZoneLayerKind::Arrondissement,
            source,
        })?;
        let com_layer = load_layer(&communes.path).map_err(|source| ZoneError::Layer {
            layer: ZoneLayerKind::Commune,
            source,
        })?;

        Self::from_layers(
            arr_layer,
            &arrondissements.label_field,
            com_layer,
            &communes.label_field,
        )
    }

    /// Builds the indexes from already parsed layers.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError`] if a layer lacks its label field or cannot be
    /// reprojected.
    pub fn from_layers(
        arrondissements: PolygonLayer,
        arrondissement_field: &str,
        communes: PolygonLayer,
        commune_field: &str,
    ) -> Result<Self, ZoneError> {
        let arrondissements = build_index(
            arrondissements,
            ZoneLayerKind::Arrondissement,
            arrondissement_field,
        )?;
        log::info!(
            "Loaded {} arrondissements into spatial index",
            arrondissements.len()
        );

        let communes = build_index(communes, ZoneLayerKind::Commune, commune_field)?;
        log::info!("Loaded {} communes into spatial index", communes.len());

        Ok(Self {
            arrondissements,
            communes,
        })
    }

    /// Returns the zone label for a point.
    #[must_use]
    pub fn zone_for(&self, lng: f64, lat: f64) -> String {
        resolve_zone(
            self.arrondissements.lookup(lng, lat),
            self.communes.lookup(lng, lat),
        )
    }

    /// Assigns a zone to every station in place. Stations without
    /// coordinates get [`UNKNOWN_ZONE`].
    pub fn assign(&self, stations: &mut [NormalizedStation]) -> AssignmentStats {
        let mut stats = AssignmentStats::default();

        for station in stations.iter_mut() {
            let Some((lng, lat)) = station.lon_lat() else {
                station.zone = UNKNOWN_ZONE.to_string();
                stats.no_coordinates += 1;
                continue;
            };

            let arrondissement = self.arrondissements.lookup(lng, lat);
            let commune = self.communes.lookup(lng, lat);

            match (arrondissement, commune) {
                (Some(_), _) => stats.arrondissement += 1,
                (None, Some(_)) => stats.commune += 1,
                (None, None) => stats.unmatched += 1,
            }

            station.zone = resolve_zone(arrondissement, commune);
        }

        log::info!(
            "Zone assignment: {} in arrondissements, {} in communes, {} unmatched, {} without coordinates",
            stats.arrondissement,
            stats.commune,
            stats.unmatched,
            stats.no_coordinates
        );

        stats
    }
}

/// Validates, reprojects and indexes one layer.
fn build_index(
    layer: PolygonLayer,
    kind: ZoneLayerKind,
    label_field: &str,
) -> Result<ZoneIndex, ZoneError> {
    if !layer.has_field(label_field) {
        return Err(ZoneError::MissingLabelField {
            layer: kind,
            field: label_field.to_string(),
        });
    }

    let layer = layer
        .into_wgs84()
        .map_err(|source| ZoneError::Layer { layer: kind, source })?;

    let mut unlabeled = 0usize;
    let zones: Vec<_> = layer
        .features
        .into_iter()
        .filter_map(|feature| {
            let label = match kind {
                ZoneLayerKind::Arrondissement => feature
                    .property_str(label_field)
                    .and_then(format_arrondissement_label),
                ZoneLayerKind::Commune => feature.property_text(label_field),
            };
            if label.is_none() {
                unlabeled += 1;
            }
            label.map(|label| (label, feature.polygon))
        })
        .collect();

    if unlabeled > 0 {
        log::warn!("{unlabeled} {kind} polygons have no usable '{label_field}' label and were skipped");
    }

    Ok(ZoneIndex::build(zones))
}
