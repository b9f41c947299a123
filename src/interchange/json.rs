//! JSON interchange format.
//!
//! Documents are `{"objects": [...]}`; each object carries its points,
//! a `curveConfig` with styles and parallel-copy settings, and a transform.
//! Deserialization is lenient: numbers may be given as numeric strings, and
//! unusable values are treated as missing so they can be repaired rather
//! than failing the whole object.

use serde::de::DeserializeOwned;
use serde::Deserializer;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::model::{ControlPoint, PathObject, Style, Transform};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonDocument {
    pub objects: Vec<JsonObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonObject {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub points: Vec<JsonPoint>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub curve_config: Option<JsonCurveConfig>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub transform: Option<JsonTransform>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonPoint {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub y: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub handle_in: Option<JsonXY>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub handle_out: Option<JsonXY>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonXY {
    #[serde(deserialize_with = "lenient_f64")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonCurveConfig {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<JsonStyle>>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub parallel_count: Option<f64>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonStyle {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub line_cap: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub line_join: Option<String>,
    #[serde(deserialize_with = "lenient_dash_array", skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonTransform {
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
}

fn raw_value<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Value, D::Error> {
    serde::Deserialize::deserialize(de)
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<f64>, D::Error> {
    Ok(value_to_f64(&raw_value(de)?))
}

fn lenient_string<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match raw_value(de)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(raw_value(de)?).ok())
}

fn lenient_list<'de, D, T>(de: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match raw_value(de)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => vec![],
    })
}

/// Dash arrays may be a list of numbers or an SVG-style string, e.g. "5, 3"
fn lenient_dash_array<'de, D: Deserializer<'de>>(
    de: D,
) -> std::result::Result<Option<Vec<f64>>, D::Error> {
    Ok(match raw_value(de)? {
        Value::Array(items) => Some(items.iter().filter_map(value_to_f64).collect()),
        Value::String(s) => Some(
            crate::types::attr_split(&s)
                .filter_map(|v| v.parse().ok())
                .collect(),
        ),
        _ => None,
    })
}

impl From<&ControlPoint> for JsonPoint {
    fn from(cp: &ControlPoint) -> Self {
        Self {
            id: Some(cp.id.clone()),
            x: Some(cp.anchor.x),
            y: Some(cp.anchor.y),
            handle_in: Some(JsonXY {
                x: Some(cp.handle_in.x),
                y: Some(cp.handle_in.y),
            }),
            handle_out: Some(JsonXY {
                x: Some(cp.handle_out.x),
                y: Some(cp.handle_out.y),
            }),
        }
    }
}

impl From<&Style> for JsonStyle {
    fn from(style: &Style) -> Self {
        Self {
            color: Some(style.color.clone()),
            width: Some(style.width),
            fill: Some(style.fill.clone()),
            opacity: Some(style.opacity),
            line_cap: Some(style.line_cap.as_str().to_string()),
            line_join: Some(style.line_join.as_str().to_string()),
            dash_array: Some(style.dash_pattern.clone()),
        }
    }
}

impl From<&Transform> for JsonTransform {
    fn from(t: &Transform) -> Self {
        Self {
            rotation: Some(t.rotation),
            scale_x: Some(t.scale_x),
            scale_y: Some(t.scale_y),
        }
    }
}

impl From<&PathObject> for JsonObject {
    fn from(obj: &PathObject) -> Self {
        Self {
            id: Some(obj.id.clone()),
            name: Some(obj.name.clone()),
            points: obj.points.iter().map(JsonPoint::from).collect(),
            curve_config: Some(JsonCurveConfig {
                styles: Some(obj.styles.iter().map(JsonStyle::from).collect()),
                parallel_count: Some(obj.parallel_count as f64),
                spacing: Some(obj.spacing),
            }),
            transform: Some(JsonTransform::from(&obj.transform)),
        }
    }
}

/// Serialize objects as a pretty-printed JSON document
pub fn export_json<'a>(objects: impl IntoIterator<Item = &'a PathObject>) -> Result<String> {
    let doc = JsonDocument {
        objects: objects.into_iter().map(JsonObject::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
