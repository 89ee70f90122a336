use super::geometry::Geometry;
use geo::{Area, BoundingRect, Centroid};
use geo_types::Point;
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq, Clone, Copy)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl From<Point<f64>> for Location {
    fn from(point: Point<f64>) -> Self {
        Location {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Clone, Copy)]
pub struct Bounds {
    pub e: f64,
    pub n: f64,
    pub s: f64,
    pub w: f64,
}

/// Centroid and bounding box. Both are `None` for an empty geometry.
pub fn get_geo_info(geometry: &Geometry) -> (Option<Location>, Option<Bounds>) {
    let geo = match geometry.to_geo() {
        Some(geo) => geo,
        None => return (None, None),
    };
    let centroid = geo.centroid().map(Location::from);
    let bounds = geo.bounding_rect().map(|rect| Bounds {
        e: rect.max().x,
        n: rect.max().y,
        s: rect.min().y,
        w: rect.min().x,
    });
    (centroid, bounds)
}

/// Unsigned planar area, zero for points and lines.
pub fn area(geometry: &Geometry) -> f64 {
    geometry
        .to_geo()
        .map_or(0., |geo| geo.unsigned_area())
}
