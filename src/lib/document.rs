use super::decoder::decode_geometry;
use super::error::{Error, Result};
use super::geometry::{self, Geometry};
use super::value::{decode_properties, Properties};
use serde_json::Value;
use tracing::trace;

/// A geometry with its properties.
#[derive(PartialEq, Debug, Clone)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Feature {
            geometry,
            properties: Properties::new(),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Drop the properties and gather the geometries into one collection.
    pub fn into_geometry(self) -> Geometry {
        let geometries = self
            .features
            .into_iter()
            .map(|feature| feature.geometry)
            .collect();
        geometry::geometry_collection(geometries)
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

enum DocumentKind {
    Feature,
    FeatureCollection,
    Geometry,
}

fn document_kind(value: &Value) -> Result<DocumentKind> {
    if !value.is_object() {
        return Err(Error::document("Expected a JSON object"));
    }
    let kind = value
        .get("type")
        .ok_or_else(|| Error::document("Missing \"type\" member"))?
        .as_str()
        .ok_or_else(|| Error::document("Expected \"type\" to be a string"))?;
    let kind = match kind {
        "Feature" => DocumentKind::Feature,
        "FeatureCollection" => DocumentKind::FeatureCollection,
        _ => DocumentKind::Geometry,
    };
    Ok(kind)
}

fn features(value: &Value) -> Result<&[Value]> {
    value
        .get("features")
        .ok_or_else(|| Error::document("Missing \"features\" member"))?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::document("Expected \"features\" to be an array"))
}

fn read_feature_geometry(value: &Value) -> Result<Geometry> {
    let geometry = value.get("geometry").unwrap_or(&Value::Null);
    decode_geometry(geometry)
}

fn read_feature(value: &Value) -> Result<Feature> {
    let geometry = read_feature_geometry(value)?;
    let properties = decode_properties(value.get("properties"));
    trace!(
        kind = geometry.kind().as_str(),
        properties = properties.len(),
        "decoded feature"
    );
    Ok(Feature {
        geometry,
        properties,
    })
}

/// Decode a document into a single geometry.
///
/// A feature yields its geometry, a feature collection yields a geometry
/// collection of all feature geometries in document order, anything else is
/// decoded as a bare geometry. Properties are skipped.
pub fn decode_geometry_only(value: &Value) -> Result<Geometry> {
    match document_kind(value)? {
        DocumentKind::Feature => read_feature_geometry(value),
        DocumentKind::FeatureCollection => {
            let geometries = features(value)?
                .iter()
                .map(read_feature_geometry)
                .collect::<Result<_>>()?;
            Ok(geometry::geometry_collection(geometries))
        }
        DocumentKind::Geometry => decode_geometry(value),
    }
}

/// Decode a document into features, keeping their properties.
///
/// A single feature or a bare geometry yields a collection of one; a bare
/// geometry gets empty properties.
pub fn decode_features(value: &Value) -> Result<FeatureCollection> {
    let features = match document_kind(value)? {
        DocumentKind::Feature => vec![read_feature(value)?],
        DocumentKind::FeatureCollection => features(value)?
            .iter()
            .map(read_feature)
            .collect::<Result<_>>()?,
        DocumentKind::Geometry => vec![Feature::new(decode_geometry(value)?)],
    };
    Ok(FeatureCollection { features })
}
