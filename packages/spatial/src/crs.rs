//! Coordinate reference system detection and reprojection to WGS84.
//!
//! RFC 7946 `GeoJSON` is always WGS84, but older exports still carry a
//! named `crs` member such as `urn:ogc:def:crs:EPSG::2154`. The projections
//! found in French open data (Lambert-93 and Web Mercator) are inverted
//! here without native dependencies; anything else needs the
//! `proj-transforms` feature.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use geo::{Coord, MapCoords as _, MultiPolygon};

use crate::SpatialError;

/// Spherical Web Mercator radius in meters.
const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// GRS80 semi-major axis in meters.
const GRS80_A: f64 = 6_378_137.0;
/// GRS80 flattening.
const GRS80_F: f64 = 1.0 / 298.257_222_101;

/// Lambert-93 standard parallels, origin latitude and central meridian.
const LAMBERT93_LAT_1: f64 = 49.0;
const LAMBERT93_LAT_2: f64 = 44.0;
const LAMBERT93_LAT_0: f64 = 46.5;
const LAMBERT93_LON_0: f64 = 3.0;
/// Lambert-93 false easting and northing in meters.
const LAMBERT93_X0: f64 = 700_000.0;
const LAMBERT93_Y0: f64 = 6_600_000.0;

/// A coordinate reference system a polygon layer can be expressed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crs {
    /// Geographic WGS84 longitude/latitude (`EPSG:4326`, `CRS84`).
    Wgs84,
    /// Spherical Web Mercator (`EPSG:3857`).
    WebMercator,
    /// RGF93 / Lambert-93 (`EPSG:2154`).
    Lambert93,
    /// Any other named CRS, kept verbatim.
    Other(String),
}

impl Crs {
    /// Identifies a CRS from its name (`"EPSG:2154"`,
    /// `"urn:ogc:def:crs:OGC:1.3:CRS84"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let upper = name.trim().to_uppercase();
        let code = upper
            .rsplit(':')
            .next()
            .unwrap_or_default()
            .trim_start_matches("EPSG")
            .trim();

        if upper.ends_with("CRS84") {
            return Self::Wgs84;
        }

        match code {
            "4326" => Self::Wgs84,
            "3857" | "900913" | "102100" => Self::WebMercator,
            "2154" => Self::Lambert93,
            _ => Self::Other(name.trim().to_string()),
        }
    }

    /// Reads the legacy `crs` member of a `GeoJSON` object. Absent or
    /// unnamed members mean WGS84.
    #[must_use]
    pub fn from_geojson_member(member: Option<&serde_json::Value>) -> Self {
        member
            .and_then(|crs| crs.get("properties"))
            .and_then(|props| props.get("name"))
            .and_then(serde_json::Value::as_str)
            .map_or(Self::Wgs84, Self::from_name)
    }

    /// Whether coordinates in this CRS are already WGS84 longitude/latitude.
    #[must_use]
    pub const fn is_wgs84(&self) -> bool {
        matches!(self, Self::Wgs84)
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wgs84 => write!(f, "EPSG:4326"),
            Self::WebMercator => write!(f, "EPSG:3857"),
            Self::Lambert93 => write!(f, "EPSG:2154"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Reprojects a polygon from `crs` to WGS84 longitude/latitude.
///
/// # Errors
///
/// Returns [`SpatialError::UnsupportedCrs`] for a CRS that has no built-in
/// inverse, unless the `proj-transforms` feature is enabled.
pub fn to_wgs84(polygon: &MultiPolygon<f64>, crs: &Crs) -> Result<MultiPolygon<f64>, SpatialError> {
    match crs {
        Crs::Wgs84 => Ok(polygon.clone()),
        Crs::WebMercator => Ok(polygon.map_coords(web_mercator_to_wgs84)),
        Crs::Lambert93 => Ok(polygon.map_coords(lambert93_to_wgs84)),
        Crs::Other(name) => proj_to_wgs84(polygon, name),
    }
}

#[cfg(feature = "proj-transforms")]
fn proj_to_wgs84(polygon: &MultiPolygon<f64>, name: &str) -> Result<MultiPolygon<f64>, SpatialError> {
    let transformer = proj::Proj::new_known_crs(name, "EPSG:4326", None).map_err(|e| {
        SpatialError::UnsupportedCrs {
            crs: format!("{name} ({e})"),
        }
    })?;

    polygon.try_map_coords(|c| {
        transformer
            .convert((c.x, c.y))
            .map(|(x, y)| Coord { x, y })
            .map_err(|e| SpatialError::Reprojection {
                message: format!("{name}: {e}"),
            })
    })
}

#[cfg(not(feature = "proj-transforms"))]
fn proj_to_wgs84(_polygon: &MultiPolygon<f64>, name: &str) -> Result<MultiPolygon<f64>, SpatialError> {
    Err(SpatialError::UnsupportedCrs {
        crs: name.to_string(),
    })
}

/// Inverse spherical Web Mercator.
fn web_mercator_to_wgs84(c: Coord<f64>) -> Coord<f64> {
    let lon = (c.x / WEB_MERCATOR_RADIUS).to_degrees();
    let lat = (c.y / WEB_MERCATOR_RADIUS).sinh().atan().to_degrees();
    Coord { x: lon, y: lat }
}

/// Inverse Lambert conformal conic (two standard parallels) on GRS80 with
/// the Lambert-93 parameters. RGF93 and WGS84 differ by far less than the
/// precision of the boundary files, so no datum shift is applied.
fn lambert93_to_wgs84(c: Coord<f64>) -> Coord<f64> {
    let e = (GRS80_F * (2.0 - GRS80_F)).sqrt();
    let m = |phi: f64| phi.cos() / (1.0 - (e * phi.sin()).powi(2)).sqrt();
    let t = |phi: f64| {
        let es = e * phi.sin();
        (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
    };

    let phi_1 = LAMBERT93_LAT_1.to_radians();
    let phi_2 = LAMBERT93_LAT_2.to_radians();
    let phi_0 = LAMBERT93_LAT_0.to_radians();

    let n = (m(phi_1).ln() - m(phi_2).ln()) / (t(phi_1).ln() - t(phi_2).ln());
    let big_f = m(phi_1) / (n * t(phi_1).powf(n));
    let rho_0 = GRS80_A * big_f * t(phi_0).powf(n);

    let dx = c.x - LAMBERT93_X0;
    let dy = rho_0 - (c.y - LAMBERT93_Y0);
    let rho = n.signum() * dx.hypot(dy);
    let theta = (n.signum() * dx).atan2(n.signum() * dy);
    let t_point = (rho / (GRS80_A * big_f)).powf(1.0 / n);

    let lon = theta / n + LAMBERT93_LON_0.to_radians();

    let mut phi = FRAC_PI_2 - 2.0 * t_point.atan();
    for _ in 0..15 {
        let es = e * phi.sin();
        let next = FRAC_PI_2 - 2.0 * (t_point * ((1.0 - es) / (1.0 + es)).powf(e / 2.0)).atan();
        let converged = (next - phi).abs() < 1e-12;
        phi = next;
        if converged {
            break;
        }
    }

    Coord {
        x: lon.to_degrees(),
        y: phi.to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Polygon, polygon};

    fn assert_close(c: Coord<f64>, lon: f64, lat: f64, tolerance: f64) {
        assert!((c.x - lon).abs() < tolerance, "lon {} != {lon}", c.x);
        assert!((c.y - lat).abs() < tolerance, "lat {} != {lat}", c.y);
    }

    #[test]
    fn identifies_crs_names() {
        assert_eq!(Crs::from_name("EPSG:4326"), Crs::Wgs84);
        assert_eq!(Crs::from_name("urn:ogc:def:crs:OGC:1.3:CRS84"), Crs::Wgs84);
        assert_eq!(Crs::from_name("urn:ogc:def:crs:EPSG::2154"), Crs::Lambert93);
        assert_eq!(Crs::from_name("EPSG:3857"), Crs::WebMercator);
        assert_eq!(
            Crs::from_name("EPSG:27572"),
            Crs::Other("EPSG:27572".to_string())
        );
    }

    #[test]
    fn missing_crs_member_means_wgs84() {
        assert_eq!(Crs::from_geojson_member(None), Crs::Wgs84);
        let member = serde_json::json!({
            "type": "name",
            "properties": { "name": "urn:ogc:def:crs:EPSG::2154" }
        });
        assert_eq!(Crs::from_geojson_member(Some(&member)), Crs::Lambert93);
    }

    #[test]
    fn lambert93_origin_maps_to_projection_center() {
        let c = lambert93_to_wgs84(Coord {
            x: 700_000.0,
            y: 6_600_000.0,
        });
        assert_close(c, 3.0, 46.5, 1e-9);
    }

    #[test]
    fn lambert93_inverts_paris() {
        let c = lambert93_to_wgs84(Coord {
            x: 652_469.023,
            y: 6_862_035.259,
        });
        assert_close(c, 2.3522, 48.8566, 1e-6);
    }

    #[test]
    fn web_mercator_inverts_paris() {
        let c = web_mercator_to_wgs84(Coord {
            x: 261_845.706,
            y: 6_250_564.350,
        });
        assert_close(c, 2.3522, 48.8566, 1e-6);
    }

    #[test]
    fn wgs84_layers_are_unchanged() {
        let square: Polygon<f64> = polygon![
            (x: 2.0, y: 48.0),
            (x: 3.0, y: 48.0),
            (x: 3.0, y: 49.0),
            (x: 2.0, y: 49.0),
        ];
        let mp = MultiPolygon(vec![square]);
        assert_eq!(to_wgs84(&mp, &Crs::Wgs84).unwrap(), mp);
    }

    #[cfg(not(feature = "proj-transforms"))]
    #[test]
    fn unknown_crs_is_rejected() {
        let mp = MultiPolygon::<f64>(vec![]);
        let err = to_wgs84(&mp, &Crs::Other("EPSG:27572".to_string())).unwrap_err();
        assert!(matches!(err, SpatialError::UnsupportedCrs { .. }));
    }
}
