use geo_types::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

/// The seven geometry type names a GeoJSON document may declare.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    /// Match a declared `"type"` value. Case-sensitive, no aliases.
    pub fn parse(name: &str) -> Option<Self> {
        let kind = match name {
            "Point" => GeometryKind::Point,
            "LineString" => GeometryKind::LineString,
            "Polygon" => GeometryKind::Polygon,
            "MultiPoint" => GeometryKind::MultiPoint,
            "MultiLineString" => GeometryKind::MultiLineString,
            "MultiPolygon" => GeometryKind::MultiPolygon,
            "GeometryCollection" => GeometryKind::GeometryCollection,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }
}

/// A decoded geometry.
///
/// The parts are plain `geo_types` values. Points are optional since GeoJSON
/// allows an empty coordinate array where geo-types has no empty point, and
/// collections hold this type so that such points survive inside them.
#[derive(PartialEq, Debug, Clone)]
pub enum Geometry {
    Point(Option<Point<f64>>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
    MultiPoint(MultiPoint<f64>),
    MultiLineString(MultiLineString<f64>),
    MultiPolygon(MultiPolygon<f64>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// True if the geometry has no coordinates at all.
    pub fn is_empty(&self) -> bool {
        self.coords_count() == 0
    }

    /// Number of coordinates, summed over all parts and rings.
    pub fn coords_count(&self) -> usize {
        match self {
            Geometry::Point(point) => usize::from(point.is_some()),
            Geometry::LineString(ls) => ls.0.len(),
            Geometry::Polygon(p) => polygon_coords_count(p),
            Geometry::MultiPoint(mp) => mp.0.len(),
            Geometry::MultiLineString(mls) => mls.0.iter().map(|ls| ls.0.len()).sum(),
            Geometry::MultiPolygon(mp) => mp.0.iter().map(polygon_coords_count).sum(),
            Geometry::GeometryCollection(gc) => gc.iter().map(Geometry::coords_count).sum(),
        }
    }

    /// Convert into a `geo_types` geometry for use with the `geo` algorithms.
    ///
    /// An empty point has no geo-types counterpart: it yields `None` on its
    /// own and is left out of collections.
    pub fn to_geo(&self) -> Option<geo_types::Geometry<f64>> {
        let geometry = match self {
            Geometry::Point(point) => geo_types::Geometry::Point((*point)?),
            Geometry::LineString(ls) => geo_types::Geometry::LineString(ls.clone()),
            Geometry::Polygon(p) => geo_types::Geometry::Polygon(p.clone()),
            Geometry::MultiPoint(mp) => geo_types::Geometry::MultiPoint(mp.clone()),
            Geometry::MultiLineString(mls) => geo_types::Geometry::MultiLineString(mls.clone()),
            Geometry::MultiPolygon(mp) => geo_types::Geometry::MultiPolygon(mp.clone()),
            Geometry::GeometryCollection(gc) => {
                let members = gc.iter().filter_map(Geometry::to_geo).collect();
                geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(members))
            }
        };
        Some(geometry)
    }
}

fn polygon_coords_count(polygon: &Polygon<f64>) -> usize {
    let interiors: usize = polygon.interiors().iter().map(|ring| ring.0.len()).sum();
    polygon.exterior().0.len() + interiors
}

// Construction interface used by the decoder. Every builder takes its parts
// by value, the returned geometry owns them from then on.

pub fn point(coord: Coord<f64>) -> Geometry {
    Geometry::Point(Some(coord.into()))
}

pub fn empty_point() -> Geometry {
    Geometry::Point(None)
}

pub fn line_string(coords: Vec<Coord<f64>>) -> Geometry {
    Geometry::LineString(LineString(coords))
}

/// A polygon boundary. Never returned as a geometry of its own.
pub fn linear_ring(coords: Vec<Coord<f64>>) -> LineString<f64> {
    LineString(coords)
}

/// Ring 0 becomes the exterior, the rest become holes in input order.
/// No orientation correction is done.
pub fn polygon(mut rings: Vec<LineString<f64>>) -> Polygon<f64> {
    if rings.is_empty() {
        return empty_polygon();
    }
    let interiors = rings.split_off(1);
    let exterior = rings.remove(0);
    Polygon::new(exterior, interiors)
}

pub fn empty_polygon() -> Polygon<f64> {
    Polygon::new(LineString(vec![]), vec![])
}

pub fn multi_point(coords: Vec<Coord<f64>>) -> Geometry {
    let points = coords.into_iter().map(Point::from).collect();
    Geometry::MultiPoint(MultiPoint(points))
}

pub fn multi_line_string(lines: Vec<LineString<f64>>) -> Geometry {
    Geometry::MultiLineString(MultiLineString(lines))
}

pub fn multi_polygon(polygons: Vec<Polygon<f64>>) -> Geometry {
    Geometry::MultiPolygon(MultiPolygon(polygons))
}

pub fn geometry_collection(geometries: Vec<Geometry>) -> Geometry {
    Geometry::GeometryCollection(geometries)
}
