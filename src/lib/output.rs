use super::document::{Feature, FeatureCollection};
use super::geo::{area, get_geo_info, Bounds, Location};
use super::geometry::Geometry;
use super::value::Properties;
use serde::Serialize;
use serde_json::to_string;
use std::error::Error;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// What to report for each decoded geometry.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Operation {
    Summary,
    Area,
    Centroid,
    Envelope,
    Count,
}

const OPERATIONS: &str = "summary, area, centroid, envelope, count";

#[derive(Debug)]
pub struct UnknownOperation(String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown operation '{}', expected one of: {}", self.0, OPERATIONS)
    }
}

impl Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(Operation::Summary),
            "area" => Ok(Operation::Area),
            "centroid" => Ok(Operation::Centroid),
            "envelope" => Ok(Operation::Envelope),
            "count" => Ok(Operation::Count),
            _ => Err(UnknownOperation(s.into())),
        }
    }
}

pub trait Output {
    fn write_json_lines(&self, op: Operation, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
}

#[derive(Serialize)]
struct JSONReport<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    centroid: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Properties>,
}

#[derive(Serialize)]
struct JSONCount {
    count: usize,
}

fn report<'a>(geometry: &Geometry, properties: Option<&'a Properties>, op: Operation) -> JSONReport<'a> {
    let mut report = JSONReport {
        kind: geometry.kind().as_str(),
        coordinates: None,
        area: None,
        centroid: None,
        bounds: None,
        properties: None,
    };
    match op {
        Operation::Summary => {
            let (centroid, bounds) = get_geo_info(geometry);
            report.coordinates = Some(geometry.coords_count());
            report.centroid = centroid;
            report.bounds = bounds;
            report.properties = properties;
        }
        Operation::Area => report.area = Some(area(geometry)),
        Operation::Centroid => report.centroid = get_geo_info(geometry).0,
        Operation::Envelope => report.bounds = get_geo_info(geometry).1,
        Operation::Count => (),
    }
    report
}

fn write_count(count: usize, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let json = to_string(&JSONCount { count })?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

impl Output for Geometry {
    fn write_json_lines(&self, op: Operation, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        if op == Operation::Count {
            return write_count(1, writer);
        }
        let json = to_string(&report(self, None, op))?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }
}

impl Output for FeatureCollection {
    fn write_json_lines(&self, op: Operation, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        if op == Operation::Count {
            return write_count(self.len(), writer);
        }
        for Feature {
            geometry,
            properties,
        } in self.iter()
        {
            let json = to_string(&report(geometry, Some(properties), op))?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }
}
