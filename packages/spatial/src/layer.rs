//! Polygon layers read from `GeoJSON` `FeatureCollection` files.
//!
//! A layer keeps each feature's properties next to its polygon so callers
//! can derive labels from whichever field their data uses. Features with
//! missing or non-areal geometry are skipped with a warning.

use std::collections::BTreeSet;
use std::path::Path;

use geo::MultiPolygon;
use geojson::{Feature, GeoJson, JsonObject};

use crate::SpatialError;
use crate::crs::{self, Crs};

/// A single areal feature.
#[derive(Debug, Clone)]
pub struct PolygonFeature {
    /// Feature properties as parsed from the file.
    pub properties: JsonObject,
    /// Polygon or multipolygon geometry.
    pub polygon: MultiPolygon<f64>,
}

impl PolygonFeature {
    /// Returns a property rendered as text. Strings are trimmed and numbers
    /// are formatted; other JSON types and empty strings yield `None`.
    #[must_use]
    pub fn property_text(&self, field: &str) -> Option<String> {
        match self.properties.get(field)? {
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns a property only when it is a JSON string.
    #[must_use]
    pub fn property_str(&self, field: &str) -> Option<&str> {
        self.properties.get(field)?.as_str()
    }
}

/// A collection of areal features in a single CRS.
#[derive(Debug, Clone)]
pub struct PolygonLayer {
    /// CRS of the feature coordinates.
    pub crs: Crs,
    /// Features in file order.
    pub features: Vec<PolygonFeature>,
    /// Every property name seen on any feature, including skipped ones.
    pub fields: BTreeSet<String>,
}

impl PolygonLayer {
    /// Whether any feature of the file carried `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Reprojects every feature to WGS84 longitude/latitude.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError`] if the layer CRS cannot be reprojected.
    pub fn into_wgs84(self) -> Result<Self, SpatialError> {
        if self.crs.is_wgs84() {
            return Ok(self);
        }

        log::info!(
            "Reprojecting {} features from {} to EPSG:4326",
            self.features.len(),
            self.crs
        );

        let features = self
            .features
            .into_iter()
            .map(|feature| {
                Ok(PolygonFeature {
                    polygon: crs::to_wgs84(&feature.polygon, &self.crs)?,
                    properties: feature.properties,
                })
            })
            .collect::<Result<Vec<_>, SpatialError>>()?;

        Ok(Self {
            crs: Crs::Wgs84,
            features,
            fields: self.fields,
        })
    }
}

/// Parses a `GeoJSON` `FeatureCollection` into a [`PolygonLayer`].
///
/// # Errors
///
/// Returns [`SpatialError`] if the text is not valid `GeoJSON` or is not a
/// `FeatureCollection`.
pub fn parse_layer(geojson_str: &str) -> Result<PolygonLayer, SpatialError> {
    let GeoJson::FeatureCollection(collection) = geojson_str.parse::<GeoJson>()? else {
        return Err(SpatialError::NotFeatureCollection);
    };

    let crs = Crs::from_geojson_member(
        collection
            .foreign_members
            .as_ref()
            .and_then(|members| members.get("crs")),
    );

    let mut fields = BTreeSet::new();
    let mut features = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for (i, feature) in collection.features.into_iter().enumerate() {
        if let Some(props) = &feature.properties {
            fields.extend(props.keys().cloned());
        }

        match feature_polygon(&feature) {
            Some(polygon) => features.push(PolygonFeature {
                properties: feature.properties.unwrap_or_default(),
                polygon,
            }),
            None => {
                log::warn!("Skipping feature {i}: missing or non-polygon geometry");
                skipped += 1;
            }
        }
    }

    log::debug!(
        "Parsed {} polygon features ({skipped} skipped) in {crs}",
        features.len()
    );

    Ok(PolygonLayer {
        crs,
        features,
        fields,
    })
}

/// Reads and parses a `GeoJSON` layer file.
///
/// # Errors
///
/// Returns [`SpatialError::Io`] if the file cannot be read, or any error
/// from [`parse_layer`].
pub fn load_layer(path: &Path) -> Result<PolygonLayer, SpatialError> {
    let text = std::fs::read_to_string(path).map_err(|source| SpatialError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layer(&text)
}

/// Converts a feature geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn feature_polygon(feature: &Feature) -> Option<MultiPolygon<f64>> {
    let geom = feature.geometry.clone()?;
    let geo_geom: geo::Geometry<f64> = geom.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYER: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "l_ar": "1er Ardt", "c_ar": 1 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[2.32, 48.85], [2.35, 48.85], [2.35, 48.87], [2.32, 48.87], [2.32, 48.85]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "l_ar": "Bois", "surface": 3.5 },
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": { "l_ar": "Point" },
                "geometry": { "type": "Point", "coordinates": [2.3, 48.8] }
            }
        ]
    }"#;

    #[test]
    fn keeps_polygon_features_and_all_field_names() {
        let layer = parse_layer(LAYER).unwrap();
        assert_eq!(layer.crs, Crs::Wgs84);
        assert_eq!(layer.features.len(), 1);
        assert!(layer.has_field("l_ar"));
        assert!(layer.has_field("surface"));
        assert!(!layer.has_field("nom"));
    }

    #[test]
    fn reads_property_text() {
        let layer = parse_layer(LAYER).unwrap();
        let feature = &layer.features[0];
        assert_eq!(feature.property_text("l_ar").as_deref(), Some("1er Ardt"));
        assert_eq!(feature.property_text("c_ar").as_deref(), Some("1"));
        assert_eq!(feature.property_str("c_ar"), None);
        assert_eq!(feature.property_text("missing"), None);
    }

    #[test]
    fn reads_legacy_crs_member() {
        let layer = parse_layer(
            r#"{
                "type": "FeatureCollection",
                "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::2154" } },
                "features": [{
                    "type": "Feature",
                    "properties": { "nom": "Centre" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[699000, 6599000], [701000, 6599000], [701000, 6601000], [699000, 6601000], [699000, 6599000]]]
                    }
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(layer.crs, Crs::Lambert93);

        let wgs84 = layer.into_wgs84().unwrap();
        assert_eq!(wgs84.crs, Crs::Wgs84);
        let ring = wgs84.features[0].polygon.0[0].exterior();
        for c in ring.coords() {
            assert!((c.x - 3.0).abs() < 0.05, "lon {}", c.x);
            assert!((c.y - 46.5).abs() < 0.05, "lat {}", c.y);
        }
    }

    #[test]
    fn rejects_non_collections() {
        let err = parse_layer(r#"{"type": "Point", "coordinates": [2.3, 48.8]}"#).unwrap_err();
        assert!(matches!(err, SpatialError::NotFeatureCollection));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_layer("not geojson"),
            Err(SpatialError::GeoJson(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_layer(Path::new("/nonexistent/arrondissements.geojson")).unwrap_err();
        assert!(matches!(err, SpatialError::Io { .. }));
    }
}
