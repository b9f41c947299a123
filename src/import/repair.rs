use std::collections::HashSet;
use std::fmt::{self, Display};

use tracing::debug;

use crate::config::{ImportConfig, ParseConfig};
use crate::errors::{Error, Result};
use crate::geometry::Point;
use crate::interchange::{JsonObject, JsonPoint, JsonStyle, JsonTransform, JsonXY, SvgPath};
use crate::model::{
    ControlPoint, IdGenerator, LineCap, LineJoin, PathObject, Style, Transform, DEFAULT_COLOR,
    DEFAULT_FILL,
};
use crate::path::parse_path_data;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairKind {
    NonFiniteCoordinate,
    MissingId,
    DuplicateId,
    MissingHandle,
    MissingName,
    MissingStyle,
    MissingTransform,
    /// More parallel copies were requested than `max_parallel_count`
    ParallelCountClamped,
}

/// A value which was missing or unusable and has been replaced by a default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// Index of the object in the input
    pub object: usize,
    pub point: Option<usize>,
    pub kind: RepairKind,
}

impl Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object {}", self.object)?;
        if let Some(point) = self.point {
            write!(f, " point {point}")?;
        }
        write!(f, ": {:?}", self.kind)
    }
}

/// Anchors for a horizontal 100-unit line at the origin, used in place of a
/// path which produced too little geometry.
pub fn placeholder_points(config: &ParseConfig) -> Vec<ControlPoint> {
    let end = Point::new(100., 0.);
    let h = Point::new((end.x / 3.).min(config.line_handle_cap), 0.);
    vec![
        ControlPoint::new(
            "pt-0",
            Point::ZERO,
            Point::new(-config.default_handle_offset, 0.),
            h,
        ),
        ControlPoint::new("pt-1", end, end - h, end + h),
    ]
}

/// Converts incoming shapes to `PathObject`s, replacing missing or invalid
/// values with defaults and recording each replacement.
pub struct Repairer<'a> {
    config: &'a ImportConfig,
    ids: IdGenerator,
    seen_ids: HashSet<String>,
    repairs: Vec<Repair>,
}

impl<'a> Repairer<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self {
            config,
            ids: IdGenerator::new(config.seed),
            seen_ids: HashSet::new(),
            repairs: Vec::new(),
        }
    }

    pub fn repairs(&self) -> &[Repair] {
        &self.repairs
    }

    pub fn into_repairs(self) -> Vec<Repair> {
        self.repairs
    }

    fn record(&mut self, object: usize, point: Option<usize>, kind: RepairKind) {
        debug!("repaired object {object} point {point:?}: {kind:?}");
        self.repairs.push(Repair {
            object,
            point,
            kind,
        });
    }

    /// An id unique across the import. `record_missing` controls whether a
    /// generated id counts as a repair.
    fn object_id(&mut self, index: usize, id: Option<String>, record_missing: bool) -> String {
        let id = match id.filter(|id| !id.trim().is_empty()) {
            Some(id) if !self.seen_ids.contains(&id) => id,
            Some(_) => {
                self.record(index, None, RepairKind::DuplicateId);
                self.ids.next_id("path")
            }
            None => {
                if record_missing {
                    self.record(index, None, RepairKind::MissingId);
                }
                self.ids.next_id("path")
            }
        };
        self.seen_ids.insert(id.clone());
        id
    }

    fn object_name(&mut self, index: usize, name: Option<String>) -> String {
        match name.filter(|n| !n.trim().is_empty()) {
            Some(name) => name,
            None => {
                self.record(index, None, RepairKind::MissingName);
                format!("Path {}", index + 1)
            }
        }
    }

    fn finite(&mut self, value: f64, object: usize, point: usize, flagged: &mut bool) -> f64 {
        if value.is_finite() {
            value
        } else {
            if !*flagged {
                self.record(object, Some(point), RepairKind::NonFiniteCoordinate);
                *flagged = true;
            }
            0.
        }
    }

    /// Give every point an id unique within its object
    fn point_ids(&mut self, object: usize, points: &mut [ControlPoint]) {
        let taken: HashSet<String> = points.iter().map(|p| p.id.clone()).collect();
        let mut seen = HashSet::new();
        let mut next_free = 0;
        for (idx, point) in points.iter_mut().enumerate() {
            let id = point.id.trim().to_string();
            if !id.is_empty() && !seen.contains(&id) {
                seen.insert(id);
                continue;
            }
            let kind = if id.is_empty() {
                RepairKind::MissingId
            } else {
                RepairKind::DuplicateId
            };
            self.record(object, Some(idx), kind);
            // generated ids only ever increase, so each candidate is tried once
            let mut n = idx.max(next_free);
            let fresh = loop {
                let candidate = format!("pt-{n}");
                if !seen.contains(&candidate) && !taken.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            next_free = n + 1;
            seen.insert(fresh.clone());
            point.id = fresh;
        }
    }

    fn parallel_count(&mut self, index: usize, count: u32) -> u32 {
        let max = self.config.max_parallel_count.max(1);
        if count > max {
            self.record(index, None, RepairKind::ParallelCountClamped);
            max
        } else {
            count
        }
    }

    pub fn from_model(&mut self, index: usize, mut obj: PathObject) -> PathObject {
        obj.id = self.object_id(index, Some(obj.id), true);
        obj.name = self.object_name(index, Some(obj.name));
        if obj.styles.is_empty() {
            self.record(index, None, RepairKind::MissingStyle);
            obj.styles.push(Style::default());
        }
        let mut points = std::mem::take(&mut obj.points);
        for (idx, cp) in points.iter_mut().enumerate() {
            let mut flagged = false;
            for p in [&mut cp.anchor, &mut cp.handle_in, &mut cp.handle_out] {
                p.x = self.finite(p.x, index, idx, &mut flagged);
                p.y = self.finite(p.y, index, idx, &mut flagged);
            }
        }
        self.point_ids(index, &mut points);
        obj.points = points;
        obj.parallel_count = self.parallel_count(index, obj.parallel_count);
        obj
    }

    fn json_handle(
        &mut self,
        handle: Option<JsonXY>,
        fallback: Point,
        object: usize,
        idx: usize,
        flagged: &mut bool,
    ) -> Point {
        match handle {
            Some(xy) => Point::new(
                self.finite(xy.x.unwrap_or(f64::NAN), object, idx, flagged),
                self.finite(xy.y.unwrap_or(f64::NAN), object, idx, flagged),
            ),
            None => {
                self.record(object, Some(idx), RepairKind::MissingHandle);
                fallback
            }
        }
    }

    fn json_point(&mut self, object: usize, idx: usize, pt: JsonPoint) -> ControlPoint {
        let mut flagged = false;
        let x = self.finite(pt.x.unwrap_or(f64::NAN), object, idx, &mut flagged);
        let y = self.finite(pt.y.unwrap_or(f64::NAN), object, idx, &mut flagged);
        let anchor = Point::new(x, y);
        let offset = Point::new(self.config.parse.default_handle_offset, 0.);

        let handle_in = self.json_handle(pt.handle_in, anchor - offset, object, idx, &mut flagged);
        let handle_out = self.json_handle(pt.handle_out, anchor + offset, object, idx, &mut flagged);

        ControlPoint::new(pt.id.unwrap_or_default(), anchor, handle_in, handle_out)
    }

    pub fn from_json(&mut self, index: usize, raw: JsonObject) -> Result<PathObject> {
        if raw.points.is_empty() {
            return Err(Error::InsufficientGeometry(0));
        }
        let mut obj = PathObject::new(
            self.object_id(index, raw.id, true),
            self.object_name(index, raw.name),
        );

        let mut points: Vec<ControlPoint> = raw
            .points
            .into_iter()
            .enumerate()
            .map(|(idx, pt)| self.json_point(index, idx, pt))
            .collect();
        self.point_ids(index, &mut points);
        obj.points = points;

        let config = raw.curve_config.unwrap_or_default();
        match config.styles {
            Some(styles) if !styles.is_empty() => {
                obj.styles = styles.iter().map(style_from_json).collect();
            }
            _ => self.record(index, None, RepairKind::MissingStyle),
        }
        if let Some(count) = config.parallel_count.filter(|c| c.is_finite()) {
            // saturating cast; the ceiling below brings it into range
            obj.parallel_count = self.parallel_count(index, count.round().max(1.) as u32);
        }
        if let Some(spacing) = config.spacing.filter(|s| s.is_finite()) {
            obj.spacing = spacing;
        }

        match raw.transform {
            Some(t) => obj.transform = transform_from_json(&t),
            None => self.record(index, None, RepairKind::MissingTransform),
        }
        Ok(obj)
    }

    /// Parse an SVG path into an object. Returns whether the placeholder was
    /// substituted for insufficient geometry.
    pub fn from_svg(&mut self, index: usize, path: SvgPath) -> Result<(PathObject, bool)> {
        let (points, placeholder) = match parse_path_data(&path.data, &self.config.parse) {
            Ok(parsed) => {
                for err in &parsed.rejected {
                    debug!("path {index}: {err}");
                }
                (parsed.points, false)
            }
            Err(Error::InsufficientGeometry(_)) if self.config.placeholder_on_insufficient => {
                (placeholder_points(&self.config.parse), true)
            }
            Err(err) => return Err(err),
        };
        let name = path
            .id
            .clone()
            .unwrap_or_else(|| format!("Path {}", index + 1));
        let mut obj = PathObject::new(self.object_id(index, path.id, false), name);
        obj.points = points;
        obj.styles = vec![path.style];
        Ok((obj, placeholder))
    }
}

fn style_from_json(s: &JsonStyle) -> Style {
    let text = |v: &Option<String>, default: &str| {
        v.as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    };
    let defaults = Style::default();
    Style {
        color: text(&s.color, DEFAULT_COLOR),
        width: s
            .width
            .filter(|w| w.is_finite() && *w >= 0.)
            .unwrap_or(defaults.width),
        fill: text(&s.fill, DEFAULT_FILL),
        opacity: s
            .opacity
            .filter(|o| o.is_finite())
            .map_or(defaults.opacity, |o| o.clamp(0., 1.)),
        line_cap: s
            .line_cap
            .as_deref()
            .and_then(LineCap::parse)
            .unwrap_or_default(),
        line_join: s
            .line_join
            .as_deref()
            .and_then(LineJoin::parse)
            .unwrap_or_default(),
        dash_pattern: s
            .dash_array
            .iter()
            .flatten()
            .copied()
            .filter(|d| d.is_finite() && *d >= 0.)
            .collect(),
    }
}

fn transform_from_json(t: &JsonTransform) -> Transform {
    let scale = |v: Option<f64>| v.filter(|s| s.is_finite() && *s != 0.).unwrap_or(1.);
    Transform {
        rotation: t.rotation.filter(|r| r.is_finite()).unwrap_or(0.),
        scale_x: scale(t.scale_x),
        scale_y: scale(t.scale_y),
    }
}
