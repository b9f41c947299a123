use std::fmt::{self, Display};

use serde_json::Value;

use crate::errors::{Error, Result};
use crate::interchange::{extract_svg_paths, is_path_data, SvgPath};
use crate::model::PathObject;

/// Raw input to the import pipeline
#[derive(Debug, Clone)]
pub enum Payload {
    /// Objects already in model form, e.g. from another document
    Objects(Vec<PathObject>),
    /// JSON or SVG text, detected on import
    Text(String),
}

impl From<Vec<PathObject>> for Payload {
    fn from(objects: Vec<PathObject>) -> Self {
        Self::Objects(objects)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Objects,
    Json,
    /// A single `{"points": [...]}` object
    LegacyJson,
    Svg,
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Objects => "objects",
            Self::Json => "json",
            Self::LegacyJson => "legacy-json",
            Self::Svg => "svg",
        })
    }
}

/// One shape awaiting conversion to a `PathObject`
#[derive(Debug, Clone)]
pub enum RawShape {
    Model(PathObject),
    Json(Value),
    Svg(SvgPath),
}

#[derive(Debug)]
pub struct Detected {
    pub format: SourceFormat,
    pub shapes: Vec<RawShape>,
}

fn detect_json(text: &str) -> Option<Detected> {
    let value: Value = serde_json::from_str(text).ok()?;
    let (format, items) = match value {
        Value::Array(items) => (SourceFormat::Json, items),
        Value::Object(mut map) => match map.remove("objects") {
            Some(Value::Array(items)) => (SourceFormat::Json, items),
            Some(_) => return None,
            None if matches!(map.get("points"), Some(Value::Array(_))) => {
                (SourceFormat::LegacyJson, vec![Value::Object(map)])
            }
            None => return None,
        },
        _ => return None,
    };
    Some(Detected {
        format,
        shapes: items.into_iter().map(RawShape::Json).collect(),
    })
}

/// Work out what `payload` holds and split it into shapes.
///
/// Object lists pass straight through; text is tried as JSON, then as an
/// SVG document or bare path data.
pub fn detect(payload: Payload) -> Result<Detected> {
    let text = match payload {
        Payload::Objects(objects) => {
            return Ok(Detected {
                format: SourceFormat::Objects,
                shapes: objects.into_iter().map(RawShape::Model).collect(),
            })
        }
        Payload::Text(text) => text,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::Format("empty input".to_string()));
    }
    if let Some(detected) = detect_json(trimmed) {
        return Ok(detected);
    }
    if trimmed.starts_with('<') || is_path_data(trimmed) {
        let paths = extract_svg_paths(trimmed)
            .map_err(|e| Error::Format(format!("not valid SVG: {e}")))?;
        return Ok(Detected {
            format: SourceFormat::Svg,
            shapes: paths.into_iter().map(RawShape::Svg).collect(),
        });
    }
    Err(Error::Format(
        "expected a JSON object list or SVG content".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_of(text: &str) -> Result<SourceFormat> {
        detect(Payload::from(text)).map(|d| d.format)
    }

    #[test]
    fn test_detect_formats() {
        assert_eq!(format_of("[]").unwrap(), SourceFormat::Json);
        assert_eq!(format_of(r#"{"objects": [{}]}"#).unwrap(), SourceFormat::Json);
        assert_eq!(
            format_of(r#"{"points": [{"x": 1, "y": 2}]}"#).unwrap(),
            SourceFormat::LegacyJson
        );
        assert_eq!(format_of("<svg></svg>").unwrap(), SourceFormat::Svg);
        assert_eq!(format_of("M 0 0 L 1 1").unwrap(), SourceFormat::Svg);
        assert_eq!(
            detect(Payload::Objects(vec![])).unwrap().format,
            SourceFormat::Objects
        );
    }

    #[test]
    fn test_legacy_wrapped_as_one_shape() {
        let detected = detect(r#"{"points": [{"x": 1, "y": 2}], "name": "old"}"#.into())
            .expect("legacy");
        assert_eq!(detected.shapes.len(), 1);
    }

    #[test]
    fn test_unrecognized() {
        assert!(matches!(format_of(""), Err(Error::Format(_))));
        assert!(matches!(format_of("hello world"), Err(Error::Format(_))));
        assert!(matches!(format_of("42"), Err(Error::Format(_))));
        assert!(matches!(format_of(r#"{"objects": 3}"#), Err(Error::Format(_))));
        assert!(matches!(format_of("<svg><g></svg>"), Err(Error::Format(_))));
    }
}
