use super::point::{ControlPoint, HandleSide};
use crate::geometry::{cubic_bbox, split_cubic, BoundingBox, Point};

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_FILL: &str = "none";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

impl LineCap {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "butt" => Some(Self::Butt),
            "round" => Some(Self::Round),
            "square" => Some(Self::Square),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl LineJoin {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "miter" => Some(Self::Miter),
            "round" => Some(Self::Round),
            "bevel" => Some(Self::Bevel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// One stroke pass over an object's curve; objects paint their styles in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub color: String,
    pub width: f64,
    pub fill: String,
    pub opacity: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub dash_pattern: Vec<f64>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            width: 2.,
            fill: DEFAULT_FILL.to_string(),
            opacity: 1.,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            dash_pattern: vec![],
        }
    }
}

/// Rotation (degrees) and scale, applied about the centre of the anchors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            rotation: 0.,
            scale_x: 1.,
            scale_y: 1.,
        }
    }
}

impl Transform {
    pub fn is_identity(&self) -> bool {
        self.rotation == 0. && self.scale_x == 1. && self.scale_y == 1.
    }

    pub fn apply(&self, p: Point, center: Point) -> Point {
        let scaled = Point::new(
            center.x + (p.x - center.x) * self.scale_x,
            center.y + (p.y - center.y) * self.scale_y,
        );
        scaled.rotate_about(center, self.rotation.to_radians())
    }
}

/// A drawable curve with its styling.
///
/// Only objects with at least two points are renderable; fewer is a
/// legitimate transient state while a curve is being created.
#[derive(Debug, Clone, PartialEq)]
pub struct PathObject {
    pub id: String,
    pub name: String,
    pub points: Vec<ControlPoint>,
    /// Never empty
    pub styles: Vec<Style>,
    pub parallel_count: u32,
    pub spacing: f64,
    pub transform: Transform,
    pub selected: bool,
}

impl PathObject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points: vec![],
            styles: vec![Style::default()],
            parallel_count: 1,
            spacing: 10.,
            transform: Transform::default(),
            selected: false,
        }
    }

    pub fn with_points(mut self, points: Vec<ControlPoint>) -> Self {
        self.points = points;
        self
    }

    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }

    /// An id of the form `pt-N` not used by any current point
    pub fn next_point_id(&self) -> String {
        let mut n = self.points.len();
        loop {
            let candidate = format!("pt-{n}");
            if !self.points.iter().any(|p| p.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Append an anchor with default horizontal handles, returning its index
    pub fn push_anchor(&mut self, anchor: Point, handle_offset: f64) -> usize {
        let id = self.next_point_id();
        self.points
            .push(ControlPoint::with_default_handles(id, anchor, handle_offset));
        self.points.len() - 1
    }

    /// Move an anchor, carrying its handles with it
    pub fn move_anchor(&mut self, index: usize, to: Point) -> bool {
        if let Some(cp) = self.points.get_mut(index) {
            let delta = to - cp.anchor;
            cp.translate(delta);
            true
        } else {
            false
        }
    }

    /// Move one handle; with `mirror` the opposite handle is set to its
    /// reflection through the anchor.
    pub fn move_handle(&mut self, index: usize, side: HandleSide, to: Point, mirror: bool) -> bool {
        if let Some(cp) = self.points.get_mut(index) {
            *cp.handle_mut(side) = to;
            if mirror {
                *cp.handle_mut(side.opposite()) = to.reflect_about(cp.anchor);
            }
            true
        } else {
            false
        }
    }

    pub fn remove_point(&mut self, index: usize) -> Option<ControlPoint> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    /// Insert a new point on segment `segment` at parameter `t` without
    /// changing the shape of the curve. Returns the new point's index.
    pub fn insert_point_on_segment(&mut self, segment: usize, t: f64) -> Option<usize> {
        if segment + 1 >= self.points.len() {
            return None;
        }
        let (a, b) = (&self.points[segment], &self.points[segment + 1]);
        let (left, right) = split_cubic(a.anchor, a.handle_out, b.handle_in, b.anchor, t);
        let id = self.next_point_id();
        self.points[segment].handle_out = left[1];
        self.points[segment + 1].handle_in = right[2];
        self.points
            .insert(segment + 1, ControlPoint::new(id, left[3], left[2], right[1]));
        Some(segment + 1)
    }

    /// Bounds of the rendered curve (untransformed)
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self.points.as_slice() {
            [] => None,
            [single] => BoundingBox::from_points([single.anchor]),
            points => BoundingBox::union(points.windows(2).map(|pair| {
                cubic_bbox(
                    pair[0].anchor,
                    pair[0].handle_out,
                    pair[1].handle_in,
                    pair[1].anchor,
                )
            })),
        }
    }

    /// Centre of the anchors, the pivot for `transform`
    pub fn pivot(&self) -> Option<Point> {
        BoundingBox::from_points(self.points.iter().map(|p| p.anchor)).map(|bb| bb.center())
    }

    /// Points with `transform` applied to anchors and handles
    pub fn transformed_points(&self) -> Vec<ControlPoint> {
        let Some(center) = self.pivot() else {
            return vec![];
        };
        if self.transform.is_identity() {
            return self.points.clone();
        }
        self.points
            .iter()
            .map(|cp| ControlPoint {
                id: cp.id.clone(),
                anchor: self.transform.apply(cp.anchor, center),
                handle_in: self.transform.apply(cp.handle_in, center),
                handle_out: self.transform.apply(cp.handle_out, center),
            })
            .collect()
    }
}
