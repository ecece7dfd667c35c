//! GeoJSON plane-outline reader
//!
//! Loads mapped discontinuity planes from a GeoJSON FeatureCollection for the
//! map plot. Loading is best-effort: a missing or unreadable file logs and
//! yields `None`, never a fatal error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::plane_code::{plane_from_code, UNCLASSIFIED};
use crate::{LoadError, LoadResult};

/// Property keys that may carry the plane id, checked in order
const PLANE_PROPERTY_KEYS: [&str; 4] = ["plano", "plane", "layer", "tipo"];

/// One mapped plane: exterior ring vertices plus the plane id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneOutline {
    /// Plane identifier mapped through the shared letter table, 0 if absent
    pub plane: i8,
    /// Exterior ring as (x, y) pairs; z coordinates are dropped
    pub ring: Vec<(f64, f64)>,
}

/// Load plane outlines from a GeoJSON file, or `None` if anything goes wrong
pub fn load_plane_outlines(path: &str) -> Option<Vec<PlaneOutline>> {
    if !Path::new(path).exists() {
        warn!("Geo file '{path}' not found, skipping");
        return None;
    }
    match parse_feature_collection(path) {
        Ok(outlines) => Some(outlines),
        Err(e) => {
            error!("Failed to load plane outlines from '{path}': {e}");
            None
        }
    }
}

fn parse_feature_collection(path: &str) -> LoadResult<Vec<PlaneOutline>> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::OpenFailed(e.to_string()))?;
    let doc: Value =
        serde_json::from_str(&text).map_err(|e| LoadError::InvalidFormat(e.to_string()))?;

    let features = doc
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| LoadError::InvalidFormat("not a FeatureCollection".to_string()))?;

    let mut outlines = Vec::new();
    for feature in features {
        let plane = feature
            .get("properties")
            .map(plane_from_properties)
            .unwrap_or(UNCLASSIFIED);

        if let Some(ring) = feature.get("geometry").and_then(exterior_ring) {
            outlines.push(PlaneOutline { plane, ring });
        }
    }
    Ok(outlines)
}

fn plane_from_properties(properties: &Value) -> i8 {
    let Some(map) = properties.as_object() else {
        return UNCLASSIFIED;
    };
    for key in PLANE_PROPERTY_KEYS {
        let hit = map
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v);
        if let Some(value) = hit {
            return match value {
                Value::String(s) => plane_from_code(s),
                Value::Number(n) => plane_from_code(&n.to_string()),
                _ => UNCLASSIFIED,
            };
        }
    }
    UNCLASSIFIED
}

/// Extract the exterior ring of a Polygon (or first polygon of a
/// MultiPolygon), truncating 3D positions to 2D.
fn exterior_ring(geometry: &Value) -> Option<Vec<(f64, f64)>> {
    let coordinates = geometry.get("coordinates")?;
    let ring = match geometry.get("type")?.as_str()? {
        "Polygon" => coordinates.get(0)?,
        "MultiPolygon" => coordinates.get(0)?.get(0)?,
        _ => return None,
    };

    let positions = ring.as_array()?;
    let mut points = Vec::with_capacity(positions.len());
    for position in positions {
        let coords = position.as_array()?;
        let x = coords.first()?.as_f64()?;
        let y = coords.get(1)?.as_f64()?;
        points.push((x, y));
    }
    Some(points)
}
