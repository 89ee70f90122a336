use super::error::{Error, Result};
use super::geometry::{self, Geometry, GeometryKind};
use geo_types::{coord, Coord, LineString, Polygon};
use serde_json::Value;
use std::slice;
use tracing::trace;

pub(crate) const UNKNOWN_GEOMETRY_TYPE: &str = "Unknown geometry type!";

fn member<'a>(value: &'a Value, key: &str) -> Result<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| Error::geometry(format!("Missing \"{}\" member", key)))
}

fn array<'a>(value: &'a Value, what: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::geometry(format!("Expected an array of {}", what)))
}

fn ordinates(value: &Value) -> Result<Vec<f64>> {
    array(value, "numbers")?
        .iter()
        .map(|ordinate| {
            ordinate
                .as_f64()
                .ok_or_else(|| Error::geometry("Expected a number as ordinate"))
        })
        .collect()
}

/// First two ordinates as (x, y), anything after is ignored.
fn coordinate(value: &Value) -> Result<Coord<f64>> {
    match ordinates(value)?.as_slice() {
        [x, y, ..] => Ok(coord! { x: *x, y: *y }),
        _ => Err(Error::geometry("Expected at least two coordinates")),
    }
}

fn coordinates(value: &Value) -> Result<Vec<Coord<f64>>> {
    array(value, "coordinates")?.iter().map(coordinate).collect()
}

fn rings(value: &Value) -> Result<Vec<LineString<f64>>> {
    array(value, "rings")?
        .iter()
        .map(|ring| Ok(geometry::linear_ring(coordinates(ring)?)))
        .collect()
}

fn read_point(value: &Value) -> Result<Geometry> {
    let coords = ordinates(member(value, "coordinates")?)?;
    match coords.as_slice() {
        [] => Ok(geometry::empty_point()),
        [_] => Err(Error::geometry("Expected two coordinates found one")),
        [x, y, ..] => Ok(geometry::point(coord! { x: *x, y: *y })),
    }
}

fn read_line_string(value: &Value) -> Result<Geometry> {
    let coords = coordinates(member(value, "coordinates")?)?;
    Ok(geometry::line_string(coords))
}

fn read_polygon_rings(value: &Value) -> Result<Polygon<f64>> {
    let rings = rings(value)?;
    Ok(geometry::polygon(rings))
}

fn read_polygon(value: &Value) -> Result<Geometry> {
    let polygon = read_polygon_rings(member(value, "coordinates")?)?;
    Ok(Geometry::Polygon(polygon))
}

fn read_multi_point(value: &Value) -> Result<Geometry> {
    let coords = coordinates(member(value, "coordinates")?)?;
    Ok(geometry::multi_point(coords))
}

fn read_multi_line_string(value: &Value) -> Result<Geometry> {
    let lines = array(member(value, "coordinates")?, "line strings")?
        .iter()
        .map(|line| Ok(LineString(coordinates(line)?)))
        .collect::<Result<_>>()?;
    Ok(geometry::multi_line_string(lines))
}

fn read_multi_polygon(value: &Value) -> Result<Geometry> {
    let polygons = array(member(value, "coordinates")?, "polygons")?
        .iter()
        .map(read_polygon_rings)
        .collect::<Result<_>>()?;
    Ok(geometry::multi_polygon(polygons))
}

/// A collection whose members are still being decoded.
struct Collection<'a> {
    members: slice::Iter<'a, Value>,
    done: Vec<Geometry>,
}

/// Decode a single-part or multi-part geometry directly, or open a frame for
/// a collection.
fn enter<'a>(value: &'a Value, stack: &mut Vec<Collection<'a>>) -> Result<Option<Geometry>> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .and_then(GeometryKind::parse)
        .ok_or_else(|| Error::geometry(UNKNOWN_GEOMETRY_TYPE))?;
    trace!(kind = kind.as_str(), "decoding geometry");

    let geometry = match kind {
        GeometryKind::Point => read_point(value)?,
        GeometryKind::LineString => read_line_string(value)?,
        GeometryKind::Polygon => read_polygon(value)?,
        GeometryKind::MultiPoint => read_multi_point(value)?,
        GeometryKind::MultiLineString => read_multi_line_string(value)?,
        GeometryKind::MultiPolygon => read_multi_polygon(value)?,
        GeometryKind::GeometryCollection => {
            let members = array(member(value, "geometries")?, "geometries")?;
            stack.push(Collection {
                members: members.iter(),
                done: Vec::with_capacity(members.len()),
            });
            return Ok(None);
        }
    };
    Ok(Some(geometry))
}

/// Decode a GeoJSON geometry object.
///
/// Dispatches on the `"type"` member, which has to name one of the seven
/// geometry kinds. Every kind requires its `"coordinates"` member (or
/// `"geometries"` for collections). The first error aborts the whole decode.
/// Nested collections are walked with a work stack, not recursion.
///
/// # Example
///
/// ```
/// use geojson_reader::decoder::decode_geometry;
/// use geojson_reader::geometry::GeometryKind;
/// use serde_json::json;
///
/// let value = json!({"type": "LineString", "coordinates": [[0, 0], [1, 1]]});
/// let geometry = decode_geometry(&value).unwrap();
/// assert_eq!(geometry.kind(), GeometryKind::LineString);
/// assert_eq!(geometry.coords_count(), 2);
/// ```
pub fn decode_geometry(value: &Value) -> Result<Geometry> {
    let mut stack = Vec::new();
    let mut finished = enter(value, &mut stack)?;
    loop {
        let collection = match stack.last_mut() {
            Some(collection) => collection,
            None => return finished.ok_or_else(|| Error::geometry(UNKNOWN_GEOMETRY_TYPE)),
        };
        if let Some(geometry) = finished.take() {
            collection.done.push(geometry);
        }
        finished = match collection.members.next() {
            Some(member) => enter(member, &mut stack)?,
            None => stack
                .pop()
                .map(|collection| geometry::geometry_collection(collection.done)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{MultiLineString, MultiPoint, MultiPolygon, Point};
    use serde_json::json;

    fn square(offset: f64, size: f64) -> Value {
        json!([
            [offset, offset],
            [offset + size, offset],
            [offset + size, offset + size],
            [offset, offset + size],
            [offset, offset]
        ])
    }

    fn ring(offset: f64, size: f64) -> LineString<f64> {
        vec![
            (offset, offset),
            (offset + size, offset),
            (offset + size, offset + size),
            (offset, offset + size),
            (offset, offset),
        ]
        .into()
    }

    fn malformed(result: Result<Geometry>) -> String {
        match result {
            Err(Error::MalformedGeometry(message)) => message,
            other => panic!("expected a malformed geometry, got {:?}", other),
        }
    }

    #[test]
    fn point() {
        let value = json!({"type": "Point", "coordinates": [1.0, 2.0]});
        let geometry = decode_geometry(&value).unwrap();
        assert_eq!(geometry, Geometry::Point(Some(Point::new(1., 2.))));
    }

    #[test]
    fn point_ignores_extra_ordinates() {
        let value = json!({"type": "Point", "coordinates": [1.0, 2.0, 300.0]});
        let geometry = decode_geometry(&value).unwrap();
        assert_eq!(geometry, Geometry::Point(Some(Point::new(1., 2.))));
    }

    #[test]
    fn empty_point() {
        let value = json!({"type": "Point", "coordinates": []});
        let geometry = decode_geometry(&value).unwrap();
        assert_eq!(geometry, Geometry::Point(None));
        assert!(geometry.is_empty());
    }

    #[test]
    fn point_with_one_ordinate() {
        let value = json!({"type": "Point", "coordinates": [1.0]});
        let message = malformed(decode_geometry(&value));
        assert_eq!(message, "Expected two coordinates found one");
    }

    #[test]
    fn line_string() {
        let value = json!({"type": "LineString", "coordinates": [[0, 0], [1, 2, 3], [2, 4]]});
        let geometry = decode_geometry(&value).unwrap();
        let expected: LineString<f64> = vec![(0., 0.), (1., 2.), (2., 4.)].into();
        assert_eq!(geometry, Geometry::LineString(expected));
    }

    #[test]
    fn empty_line_string() {
        let value = json!({"type": "LineString", "coordinates": []});
        let geometry = decode_geometry(&value).unwrap();
        assert_eq!(geometry, Geometry::LineString(LineString(vec![])));
    }

    #[test]
    fn short_coordinate_in_line_string() {
        let value = json!({"type": "LineString", "coordinates": [[0, 0], [1]]});
        malformed(decode_geometry(&value));
    }

    #[test]
    fn non_numeric_ordinate() {
        let value = json!({"type": "LineString", "coordinates": [[0, 0], [1, "2"]]});
        malformed(decode_geometry(&value));
    }

    #[test]
    fn polygon_with_holes() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [square(0., 10.), square(1., 1.), square(5., 2.)]
        });
        let geometry = decode_geometry(&value).unwrap();
        let polygon = match geometry {
            Geometry::Polygon(polygon) => polygon,
            other => panic!("expected a polygon, got {:?}", other),
        };
        assert_eq!(polygon.exterior(), &ring(0., 10.));
        assert_eq!(polygon.interiors(), &[ring(1., 1.), ring(5., 2.)]);
    }

    #[test]
    fn polygon_with_one_ring() {
        let value = json!({"type": "Polygon", "coordinates": [square(0., 1.)]});
        let geometry = decode_geometry(&value).unwrap();
        assert_eq!(geometry, Geometry::Polygon(Polygon::new(ring(0., 1.), vec![])));
    }

    #[test]
    fn polygon_with_unclosed_ring() {
        let value = json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]});
        let geometry = decode_geometry(&value).unwrap();
        assert_eq!(geometry.coords_count(), 4);
        let expected: LineString<f64> = vec![(0., 0.), (1., 0.), (1., 1.), (0., 0.)].into();
        assert_eq!(geometry, Geometry::Polygon(Polygon::new(expected, vec![])));
    }

    #[test]
    fn empty_polygon() {
        let value = json!({"type": "Polygon", "coordinates": []});
        let geometry = decode_geometry(&value).unwrap();
        assert_eq!(geometry.kind(), GeometryKind::Polygon);
        assert!(geometry.is_empty());
    }

    #[test]
    fn polygon_with_flat_coordinates() {
        let value = json!({"type": "Polygon", "coordinates": [[0, 0], [1, 1]]});
        malformed(decode_geometry(&value));
    }

    #[test]
    fn multi_point() {
        let value = json!({"type": "MultiPoint", "coordinates": [[0, 0], [1, 1]]});
        let geometry = decode_geometry(&value).unwrap();
        let expected = MultiPoint(vec![Point::new(0., 0.), Point::new(1., 1.)]);
        assert_eq!(geometry, Geometry::MultiPoint(expected));
    }

    #[test]
    fn multi_line_string() {
        let value = json!({
            "type": "MultiLineString",
            "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3], [4, 4]]]
        });
        let geometry = decode_geometry(&value).unwrap();
        let expected = MultiLineString(vec![
            vec![(0., 0.), (1., 1.)].into(),
            vec![(2., 2.), (3., 3.), (4., 4.)].into(),
        ]);
        assert_eq!(geometry, Geometry::MultiLineString(expected));
    }

    #[test]
    fn multi_polygon() {
        let value = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [square(0., 10.), square(1., 1.)],
                [square(20., 5.)],
                []
            ]
        });
        let geometry = decode_geometry(&value).unwrap();
        let expected = MultiPolygon(vec![
            Polygon::new(ring(0., 10.), vec![ring(1., 1.)]),
            Polygon::new(ring(20., 5.), vec![]),
            geometry::empty_polygon(),
        ]);
        assert_eq!(geometry, Geometry::MultiPolygon(expected));
    }

    #[test]
    fn geometry_collection() {
        let value = json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [1, 2]},
                {"type": "GeometryCollection", "geometries": [
                    {"type": "Point", "coordinates": []}
                ]},
                {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
            ]
        });
        let geometry = decode_geometry(&value).unwrap();
        let kinds: Vec<GeometryKind> = match &geometry {
            Geometry::GeometryCollection(members) => members.iter().map(Geometry::kind).collect(),
            other => panic!("expected a collection, got {:?}", other),
        };
        assert_eq!(
            kinds,
            vec![GeometryKind::Point, GeometryKind::GeometryCollection, GeometryKind::LineString]
        );
        assert_eq!(geometry.coords_count(), 3);
    }

    #[test]
    fn deeply_nested_geometry_collections() {
        let depth = 1000;
        let mut value = json!({"type": "Point", "coordinates": [1, 2]});
        for _ in 0..depth {
            value = json!({"type": "GeometryCollection", "geometries": [value]});
        }

        let mut geometry = &decode_geometry(&value).unwrap();
        let mut levels = 0;
        while let Geometry::GeometryCollection(members) = geometry {
            assert_eq!(members.len(), 1);
            geometry = &members[0];
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(geometry, &Geometry::Point(Some(Point::new(1., 2.))));
    }

    #[test]
    fn nested_collection_fails_on_bad_member() {
        let value = json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "GeometryCollection", "geometries": [
                    {"type": "Point", "coordinates": []},
                    {"type": "Point", "coordinates": [1]}
                ]}
            ]
        });
        assert_eq!(malformed(decode_geometry(&value)), "Expected two coordinates found one");
    }

    #[test]
    fn geometry_collection_fails_on_bad_member() {
        let value = json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [1, 2]},
                {"type": "Circle", "coordinates": [1, 2]}
            ]
        });
        assert_eq!(malformed(decode_geometry(&value)), UNKNOWN_GEOMETRY_TYPE);
    }

    #[test]
    fn unknown_type() {
        let value = json!({"type": "Circle", "coordinates": [1, 2]});
        assert_eq!(malformed(decode_geometry(&value)), UNKNOWN_GEOMETRY_TYPE);
        let value = json!({"type": "point", "coordinates": [1, 2]});
        assert_eq!(malformed(decode_geometry(&value)), UNKNOWN_GEOMETRY_TYPE);
    }

    #[test]
    fn missing_type() {
        let value = json!({"coordinates": [1, 2]});
        assert_eq!(malformed(decode_geometry(&value)), UNKNOWN_GEOMETRY_TYPE);
        assert_eq!(malformed(decode_geometry(&Value::Null)), UNKNOWN_GEOMETRY_TYPE);
    }

    #[test]
    fn missing_members() {
        for kind in &["Point", "LineString", "Polygon", "MultiPoint", "MultiLineString", "MultiPolygon"] {
            let value = json!({ "type": kind });
            assert_eq!(malformed(decode_geometry(&value)), "Missing \"coordinates\" member");
        }
        let value = json!({"type": "GeometryCollection"});
        assert_eq!(malformed(decode_geometry(&value)), "Missing \"geometries\" member");
    }
}
