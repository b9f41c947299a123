use std::io::Write;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::{Error, Result};
use crate::geometry::BoundingBox;
use crate::model::{LineCap, LineJoin, PathObject, Style};
use crate::path::{generate_path_data, parallel_offsets};
use crate::types::{attr_split, fstr, strp};

/// A `<path>` element found in an SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub id: Option<String>,
    pub data: String,
    pub style: Style,
}

impl SvgPath {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            id: None,
            data: data.into(),
            style: Style::default(),
        }
    }

    /// Apply a presentation attribute; unknown names and unusable values are
    /// ignored.
    fn set_attr(&mut self, key: &str, value: &str) {
        let value = value.trim();
        match key {
            "d" => self.data = value.to_string(),
            "id" => self.id = Some(value.to_string()),
            "stroke" => self.style.color = value.to_string(),
            "fill" => self.style.fill = value.to_string(),
            "stroke-width" => {
                if let Ok(w) = strp(value.trim_end_matches("px")) {
                    self.style.width = w;
                }
            }
            "opacity" | "stroke-opacity" => {
                if let Ok(o) = strp(value) {
                    self.style.opacity = o.clamp(0., 1.);
                }
            }
            "stroke-linecap" => {
                if let Some(cap) = LineCap::parse(value) {
                    self.style.line_cap = cap;
                }
            }
            "stroke-linejoin" => {
                if let Some(join) = LineJoin::parse(value) {
                    self.style.line_join = join;
                }
            }
            "stroke-dasharray" => {
                self.style.dash_pattern = attr_split(value).filter_map(|v| strp(&v).ok()).collect();
            }
            "style" => {
                for decl in value.split(';') {
                    if let Some((k, v)) = decl.split_once(':') {
                        self.set_attr(k.trim(), v);
                    }
                }
            }
            _ => (),
        }
    }

    fn from_element(e: &BytesStart) -> Result<Self> {
        let mut path = Self::new("");
        let mut style_attr = None;
        for a in e.attributes() {
            let aa = a.map_err(Error::from_err)?;
            let key = String::from_utf8(aa.key.local_name().as_ref().to_vec())
                .map_err(Error::from_err)?;
            let value = aa.unescape_value().map_err(Error::from_err)?.into_owned();
            // the style attribute takes precedence over presentation attributes
            if key == "style" {
                style_attr = Some(value);
            } else {
                path.set_attr(&key, &value);
            }
        }
        if let Some(style) = style_attr {
            path.set_attr("style", &style);
        }
        Ok(path)
    }
}

/// True if `text` looks like bare path data rather than a document: a
/// moveto followed by a number.
pub fn is_path_data(text: &str) -> bool {
    let Some(rest) = text.trim_start().strip_prefix(['M', 'm']) else {
        return false;
    };
    rest.trim_start()
        .starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
}

/// Every `<path>` element in an SVG document, in document order.
///
/// Bare path data is accepted as a single path.
pub fn extract_svg_paths(text: &str) -> Result<Vec<SvgPath>> {
    if is_path_data(text) {
        return Ok(vec![SvgPath::new(text.trim())]);
    }

    let mut reader = Reader::from_str(text);
    let mut paths = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"path" => {
                paths.push(SvgPath::from_element(&e)?);
            }
            Event::Eof => break,
            _ => (),
        }
    }
    Ok(paths)
}

fn start_tag<'a>(name: &'a str, attrs: &[(&str, String)]) -> BytesStart<'a> {
    let mut bs = BytesStart::new(name);
    for (k, v) in attrs {
        bs.push_attribute(Attribute::from((k.as_bytes(), v.as_bytes())));
    }
    bs
}

fn path_attrs(obj: &PathObject, style: &Style, data: String) -> Vec<(&'static str, String)> {
    let mut attrs = vec![
        ("d", data),
        ("stroke", style.color.clone()),
        ("stroke-width", fstr(style.width)),
        ("fill", style.fill.clone()),
    ];
    if style.opacity != 1. {
        attrs.push(("opacity", fstr(style.opacity)));
    }
    attrs.push(("stroke-linecap", style.line_cap.as_str().to_string()));
    attrs.push(("stroke-linejoin", style.line_join.as_str().to_string()));
    if !style.dash_pattern.is_empty() {
        let dashes: Vec<String> = style.dash_pattern.iter().map(|d| fstr(*d)).collect();
        attrs.push(("stroke-dasharray", dashes.join(" ")));
    }
    if let (false, Some(pivot)) = (obj.transform.is_identity(), obj.pivot()) {
        let t = &obj.transform;
        let (cx, cy) = (fstr(pivot.x), fstr(pivot.y));
        attrs.push((
            "transform",
            format!(
                "translate({cx} {cy}) rotate({}) scale({} {}) translate({} {})",
                fstr(t.rotation),
                fstr(t.scale_x),
                fstr(t.scale_y),
                fstr(-pivot.x),
                fstr(-pivot.y)
            ),
        ));
    }
    attrs
}

/// Write objects as a standalone SVG document.
///
/// Each object becomes a `<g>` holding one `<path>` per style for every
/// parallel copy. Objects with fewer than two points are left out.
pub fn write_svg(objects: &[PathObject], border: f64, writer: &mut dyn Write) -> Result<()> {
    let renderable: Vec<&PathObject> = objects.iter().filter(|o| o.is_renderable()).collect();
    let bounds = BoundingBox::union(renderable.iter().filter_map(|obj| {
        (*obj).clone().with_points(obj.transformed_points()).bounds()
    }))
    .map(|mut bb| *bb.expand(border, border))
    .unwrap_or(BoundingBox::new(0., 0., 100., 100.));

    let mut writer = Writer::new(writer);
    let svg = start_tag(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ("version", "1.1".to_string()),
            ("width", fstr(bounds.width())),
            ("height", fstr(bounds.height())),
            (
                "viewBox",
                format!(
                    "{} {} {} {}",
                    fstr(bounds.x1),
                    fstr(bounds.y1),
                    fstr(bounds.width()),
                    fstr(bounds.height())
                ),
            ),
        ],
    );
    writer.write_event(Event::Start(svg)).map_err(Error::from_err)?;

    for obj in renderable {
        writer
            .write_event(Event::Text(BytesText::new("\n  ")))
            .map_err(Error::from_err)?;
        let group = start_tag("g", &[("id", obj.id.clone())]);
        writer.write_event(Event::Start(group)).map_err(Error::from_err)?;
        for offset in parallel_offsets(obj.parallel_count, obj.spacing) {
            let data = generate_path_data(&obj.points, offset);
            for style in &obj.styles {
                writer
                    .write_event(Event::Text(BytesText::new("\n    ")))
                    .map_err(Error::from_err)?;
                let path = start_tag("path", &path_attrs(obj, style, data.clone()));
                writer.write_event(Event::Empty(path)).map_err(Error::from_err)?;
            }
        }
        writer
            .write_event(Event::Text(BytesText::new("\n  ")))
            .map_err(Error::from_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("g")))
            .map_err(Error::from_err)?;
    }
    writer
        .write_event(Event::Text(BytesText::new("\n")))
        .map_err(Error::from_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(Error::from_err)?;
    writer.into_inner().write_all(b"\n")?;
    Ok(())
}

pub fn export_svg(objects: &[PathObject], border: f64) -> Result<String> {
    let mut out = Vec::new();
    write_svg(objects, border, &mut out)?;
    String::from_utf8(out).map_err(Error::from_err)
}
