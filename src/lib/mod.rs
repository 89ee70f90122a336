//! Decode GeoJSON text into typed geometries and feature properties.
//!
//! Text is parsed into a `serde_json` document tree first, which is then
//! translated into [`Geometry`] values built from `geo_types` parts, or into
//! a [`FeatureCollection`] that keeps every feature's properties as
//! [`PropertyValue`] trees.
//!
//! # Example
//!
//! ```
//! use geojson_reader::{read, read_features, Geometry};
//! use geo_types::Point;
//!
//! let text = r#"{
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
//!     "properties": {"name": "x"}
//! }"#;
//!
//! let geometry = read(text).unwrap();
//! assert_eq!(geometry, Geometry::Point(Some(Point::new(1.0, 2.0))));
//!
//! let features = read_features(text).unwrap();
//! assert_eq!(features.features[0].properties["name"].as_str(), Some("x"));
//! ```

use serde::Deserialize;
use serde_json::{Deserializer, Value};
use std::io::Read;
use tracing::debug;

pub mod decoder;
pub mod document;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod output;
pub mod value;

pub use document::{decode_features, decode_geometry_only, Feature, FeatureCollection};
pub use error::{Error, Result};
pub use geometry::{Geometry, GeometryKind};
pub use value::{PropertyValue, Properties};

const PARSE_ERROR: &str = "Error parsing JSON";

fn parse<'de, R: serde_json::de::Read<'de>>(mut deserializer: Deserializer<R>) -> Result<Value> {
    // nesting is bounded by the document only, the stack grows on demand
    deserializer.disable_recursion_limit();
    let stacker = serde_stacker::Deserializer::new(&mut deserializer);
    let parsed = Value::deserialize(stacker).and_then(|value| {
        deserializer.end()?;
        Ok(value)
    });
    parsed.map_err(|err| {
        debug!(error = %err, "failed to parse document");
        Error::document(PARSE_ERROR)
    })
}

/// Decode GeoJSON text into one geometry.
///
/// Feature collections collapse into a geometry collection.
pub fn read(text: &str) -> Result<Geometry> {
    let value = parse(Deserializer::from_str(text))?;
    decode_geometry_only(&value)
}

/// Decode GeoJSON text into features with their properties.
pub fn read_features(text: &str) -> Result<FeatureCollection> {
    let value = parse(Deserializer::from_str(text))?;
    decode_features(&value)
}

/// Like [`read`], consuming a reader.
pub fn read_from(reader: impl Read) -> Result<Geometry> {
    let value = parse(Deserializer::from_reader(reader))?;
    decode_geometry_only(&value)
}

/// Like [`read_features`], consuming a reader.
pub fn read_features_from(reader: impl Read) -> Result<FeatureCollection> {
    let value = parse(Deserializer::from_reader(reader))?;
    decode_features(&value)
}
