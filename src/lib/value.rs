use indexmap::IndexMap;
use serde::Serialize;
use serde_json::map;
use serde_json::Value;
use std::slice;

/// Feature properties, in the order they appear in the document.
pub type Properties = IndexMap<String, PropertyValue>;

/// A property value of arbitrary shape.
#[derive(Serialize, PartialEq, Debug, Clone)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Sequence(Vec<PropertyValue>),
    Mapping(Properties),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::Sequence(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Properties> {
        match self {
            PropertyValue::Mapping(properties) => Some(properties),
            _ => None,
        }
    }
}

/// A container whose children are still being decoded.
enum Frame<'a> {
    Sequence {
        items: slice::Iter<'a, Value>,
        done: Vec<PropertyValue>,
    },
    Mapping {
        entries: map::Iter<'a>,
        key: Option<&'a String>,
        done: Properties,
    },
}

impl<'a> Frame<'a> {
    fn next_child(&mut self) -> Option<&'a Value> {
        match self {
            Frame::Sequence { items, .. } => items.next(),
            Frame::Mapping { entries, key, .. } => {
                let (k, v) = entries.next()?;
                *key = Some(k);
                Some(v)
            }
        }
    }

    fn push(&mut self, value: PropertyValue) {
        match self {
            Frame::Sequence { done, .. } => done.push(value),
            Frame::Mapping { key, done, .. } => {
                if let Some(key) = key.take() {
                    done.insert(key.clone(), value);
                }
            }
        }
    }

    fn finish(self) -> PropertyValue {
        match self {
            Frame::Sequence { done, .. } => PropertyValue::Sequence(done),
            Frame::Mapping { done, .. } => PropertyValue::Mapping(done),
        }
    }
}

/// Decode a scalar directly, or open a frame for a container.
fn enter<'a>(value: &'a Value, stack: &mut Vec<Frame<'a>>) -> Option<PropertyValue> {
    let scalar = match value {
        Value::String(s) => PropertyValue::String(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(n) => PropertyValue::Number(n),
            // only arbitrary_precision numbers lack an f64 form
            None => PropertyValue::Null,
        },
        Value::Bool(b) => PropertyValue::Boolean(*b),
        Value::Array(items) => {
            stack.push(Frame::Sequence {
                items: items.iter(),
                done: Vec::with_capacity(items.len()),
            });
            return None;
        }
        Value::Object(entries) => {
            stack.push(Frame::Mapping {
                entries: entries.iter(),
                key: None,
                done: Properties::with_capacity(entries.len()),
            });
            return None;
        }
        Value::Null => PropertyValue::Null,
    };
    Some(scalar)
}

/// Decode any document node into a [`PropertyValue`].
///
/// Never fails. Numbers always become `f64`. Nested arrays and objects are
/// walked with a work stack rather than recursion, so the nesting depth is
/// only limited by memory.
///
/// # Example
///
/// ```
/// use geojson_reader::value::{decode_value, PropertyValue};
/// use serde_json::json;
///
/// let value = decode_value(&json!({"tags": ["a", "b"], "n": null}));
/// let mapping = value.as_mapping().unwrap();
/// assert_eq!(mapping["tags"].as_sequence().map(|s| s.len()), Some(2));
/// assert_eq!(mapping["n"], PropertyValue::Null);
/// ```
pub fn decode_value(value: &Value) -> PropertyValue {
    let mut stack = Vec::new();
    let mut finished = enter(value, &mut stack);
    loop {
        let frame = match stack.last_mut() {
            Some(frame) => frame,
            None => return finished.unwrap_or(PropertyValue::Null),
        };
        if let Some(value) = finished.take() {
            frame.push(value);
        }
        finished = match frame.next_child() {
            Some(child) => enter(child, &mut stack),
            None => stack.pop().map(Frame::finish),
        };
    }
}

/// Decode a feature's `"properties"` member.
///
/// Anything but an object, including a missing member, gives an empty mapping.
pub fn decode_properties(value: Option<&Value>) -> Properties {
    match value {
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(key, value)| (key.clone(), decode_value(value)))
            .collect(),
        _ => Properties::new(),
    }
}
