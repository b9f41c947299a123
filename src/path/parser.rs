use tracing::{debug, warn};

use super::arc::{arc_to_cubics, ArcApproximation};
use super::command::{tokenize, PathCommand, Segment};
use super::simplify::{merge_close_points, simplify_to};
use crate::config::ParseConfig;
use crate::errors::{Error, Result};
use crate::geometry::{quadratic_to_cubic, Point};
use crate::model::ControlPoint;

/// Control points built from path data, with any argument groups which
/// had to be skipped along the way.
#[derive(Debug)]
pub struct ParsedPath {
    pub points: Vec<ControlPoint>,
    pub rejected: Vec<Error>,
    /// True if commands beyond `ParseConfig::max_commands` were ignored
    pub truncated: bool,
}

/// Accumulates control points from a sequence of path commands.
///
/// Points are only ever appended; the previous anchor's outgoing handle is
/// adjusted through `patch_last` once the following segment is known.
struct PathBuilder<'a> {
    config: &'a ParseConfig,
    points: Vec<ControlPoint>,
    // SVG current point, used to resolve relative coordinates
    current: Point,
    subpath_start: Point,
    subpath_index: usize,
    // last explicit control points, for S/s and T/t reflection
    cubic_cp2: Option<Point>,
    quadratic_cp: Option<Point>,
}

impl<'a> PathBuilder<'a> {
    fn new(config: &'a ParseConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            current: Point::ZERO,
            subpath_start: Point::ZERO,
            subpath_index: 0,
            cubic_cp2: None,
            quadratic_cp: None,
        }
    }

    fn resolve(&self, p: Point, relative: bool) -> Point {
        if relative {
            self.current + p
        } else {
            p
        }
    }

    fn push(&mut self, anchor: Point, handle_in: Point, handle_out: Point) {
        let id = format!("pt-{}", self.points.len());
        self.points
            .push(ControlPoint::new(id, anchor, handle_in, handle_out));
    }

    fn patch_last(&mut self, patch: impl FnOnce(&mut ControlPoint)) {
        if let Some(last) = self.points.last_mut() {
            patch(last);
        }
    }

    /// Anchor a drawing command's geometry starts from
    fn segment_start(&self) -> Point {
        self.points.last().map_or(self.current, |cp| cp.anchor)
    }

    /// Drawing commands need a previous anchor; data which doesn't start
    /// with a moveto draws from the current point.
    fn ensure_start(&mut self) {
        if self.points.is_empty() {
            self.move_to(self.current);
        }
    }

    fn handle_length(&self, distance: f64) -> f64 {
        (distance / 3.).min(self.config.line_handle_cap)
    }

    fn move_to(&mut self, to: Point) {
        let cp = ControlPoint::with_default_handles(
            format!("pt-{}", self.points.len()),
            to,
            self.config.default_handle_offset,
        );
        self.points.push(cp);
        self.subpath_start = to;
        self.subpath_index = self.points.len() - 1;
        self.current = to;
    }

    fn line_to(&mut self, to: Point) {
        self.ensure_start();
        let from = self.segment_start();
        let delta = to - from;
        if let Some(dir) = delta.normalized() {
            let offset = dir * self.handle_length(delta.length());
            self.patch_last(|cp| cp.handle_out = from + offset);
            self.push(to, to - offset, to + offset);
        } else {
            self.push(to, to, to);
        }
        self.current = to;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.ensure_start();
        self.patch_last(|cp| cp.handle_out = c1);
        self.push(to, c2, c2.reflect_about(to));
        self.current = to;
    }

    fn close(&mut self) {
        let first = self.subpath_index;
        if self.points.len() >= first + 2 {
            let start = self.points[first].anchor;
            let end = self.segment_start();
            let delta = start - end;
            if let Some(dir) = delta.normalized() {
                let offset = dir * self.handle_length(delta.length());
                self.patch_last(|cp| cp.handle_out = end + offset);
                self.points[first].handle_in = start - offset;
            }
        }
        self.current = self.subpath_start;
    }

    fn apply(&mut self, cmd: PathCommand) {
        let rel = cmd.relative;
        let mut cubic_cp2 = None;
        let mut quadratic_cp = None;

        match cmd.segment {
            Segment::MoveTo(p) => self.move_to(self.resolve(p, rel)),
            Segment::LineTo(p) => self.line_to(self.resolve(p, rel)),
            Segment::Horizontal(x) => {
                let x = if rel { self.current.x + x } else { x };
                self.line_to(Point::new(x, self.current.y));
            }
            Segment::Vertical(y) => {
                let y = if rel { self.current.y + y } else { y };
                self.line_to(Point::new(self.current.x, y));
            }
            Segment::CubicTo { c1, c2, to } => {
                let (c1, c2, to) = (
                    self.resolve(c1, rel),
                    self.resolve(c2, rel),
                    self.resolve(to, rel),
                );
                self.cubic_to(c1, c2, to);
                cubic_cp2 = Some(c2);
            }
            Segment::SmoothCubicTo { c2, to } => {
                self.ensure_start();
                let start = self.segment_start();
                let c1 = self
                    .cubic_cp2
                    .map_or(start, |prev| prev.reflect_about(start));
                let (c2, to) = (self.resolve(c2, rel), self.resolve(to, rel));
                self.cubic_to(c1, c2, to);
                cubic_cp2 = Some(c2);
            }
            Segment::QuadTo { c, to } => {
                self.ensure_start();
                let start = self.segment_start();
                let (c, to) = (self.resolve(c, rel), self.resolve(to, rel));
                let (c1, c2) = quadratic_to_cubic(start, c, to);
                self.cubic_to(c1, c2, to);
                quadratic_cp = Some(c);
            }
            Segment::SmoothQuadTo(to) => {
                self.ensure_start();
                let start = self.segment_start();
                let c = self
                    .quadratic_cp
                    .map_or(start, |prev| prev.reflect_about(start));
                let to = self.resolve(to, rel);
                let (c1, c2) = quadratic_to_cubic(start, c, to);
                self.cubic_to(c1, c2, to);
                quadratic_cp = Some(c);
            }
            Segment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
            } => {
                self.ensure_start();
                let to = self.resolve(to, rel);
                let start = self.segment_start();
                match arc_to_cubics(start, rx, ry, rotation, large_arc, sweep, to) {
                    ArcApproximation::Line => self.line_to(to),
                    ArcApproximation::Omitted => self.current = to,
                    ArcApproximation::Curves(segments) => {
                        for seg in segments {
                            self.cubic_to(seg.c1, seg.c2, seg.to);
                        }
                    }
                }
            }
            Segment::Close => self.close(),
        }

        self.cubic_cp2 = cubic_cp2;
        self.quadratic_cp = quadratic_cp;
    }
}

/// Parse SVG path data into control points.
///
/// Malformed argument groups are skipped and reported in `rejected`; the
/// parse fails if the data cannot be tokenized at all, or if fewer than two
/// anchors remain once `config` limits have been applied.
pub fn parse_path_data(data: &str, config: &ParseConfig) -> Result<ParsedPath> {
    let list = tokenize(data)?;
    for err in &list.rejected {
        debug!("skipping path arguments: {err}");
    }

    let total = list.commands.len();
    let truncated = total > config.max_commands;
    if truncated {
        warn!(
            "path has {total} commands; only the first {} are used",
            config.max_commands
        );
    }

    let mut builder = PathBuilder::new(config);
    for cmd in list.commands.into_iter().take(config.max_commands) {
        builder.apply(cmd);
    }

    let mut points = merge_close_points(builder.points, config.min_point_spacing);
    if let Some(target) = config.target_points {
        points = simplify_to(points, target);
    }
    for (idx, cp) in points.iter_mut().enumerate() {
        cp.id = format!("pt-{idx}");
    }

    if points.len() < 2 {
        return Err(Error::InsufficientGeometry(points.len()));
    }
    Ok(ParsedPath {
        points,
        rejected: list.rejected,
        truncated,
    })
}

/// Parse SVG path data into control points, discarding diagnostics
pub fn parse_path(data: &str, config: &ParseConfig) -> Result<Vec<ControlPoint>> {
    parse_path_data(data, config).map(|parsed| parsed.points)
}
