use super::bbox::BoundingBox;
use super::bezier::bezier_point;
use super::types::{Point, Rect};
use crate::model::ControlPoint;

/// Which part of a control point a hit landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPart {
    Anchor,
    HandleIn,
    HandleOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPointMatch {
    pub index: usize,
    pub part: PointPart,
    pub distance: f64,
}

/// Closest on-curve sample found by `nearest_segment_point`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentMatch {
    /// Index of the segment, i.e. of its starting control point
    pub segment: usize,
    pub t: f64,
    pub point: Point,
    pub distance: f64,
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).length()
}

/// Bounds over every anchor and handle
pub fn bounding_box(points: &[ControlPoint]) -> Option<BoundingBox> {
    BoundingBox::from_points(
        points
            .iter()
            .flat_map(|cp| [cp.anchor, cp.handle_in, cp.handle_out]),
    )
}

/// `rect` may have negative width or height
pub fn point_in_rect(p: Point, rect: Rect) -> bool {
    rect.contains(p)
}

/// Closest anchor (and optionally handle) within `radius` of `query`.
///
/// Equal distances resolve to the lowest index, and within one control
/// point to the anchor before its handles.
pub fn nearest_control_point(
    points: &[ControlPoint],
    query: Point,
    radius: f64,
    include_handles: bool,
) -> Option<ControlPointMatch> {
    let mut best: Option<ControlPointMatch> = None;
    for (index, cp) in points.iter().enumerate() {
        let mut candidates = vec![(PointPart::Anchor, cp.anchor)];
        if include_handles {
            candidates.push((PointPart::HandleIn, cp.handle_in));
            candidates.push((PointPart::HandleOut, cp.handle_out));
        }
        for (part, p) in candidates {
            let d = distance(p, query);
            if d > radius {
                continue;
            }
            if best.is_none_or(|b| d < b.distance) {
                best = Some(ControlPointMatch {
                    index,
                    part,
                    distance: d,
                });
            }
        }
    }
    best
}

/// Closest sampled point on the curve through `points`.
///
/// Each segment is sampled `samples` times; returns `None` when there are
/// fewer than two points.
pub fn nearest_segment_point(
    points: &[ControlPoint],
    query: Point,
    samples: usize,
) -> Option<SegmentMatch> {
    let samples = samples.max(1);
    let mut best: Option<SegmentMatch> = None;
    for (segment, pair) in points.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        for i in 0..=samples {
            let t = i as f64 / samples as f64;
            let p = bezier_point(a.anchor, a.handle_out, b.handle_in, b.anchor, t);
            let d = distance(p, query);
            if best.is_none_or(|m| d < m.distance) {
                best = Some(SegmentMatch {
                    segment,
                    t,
                    point: p,
                    distance: d,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(x: f64, y: f64) -> ControlPoint {
        ControlPoint::with_default_handles(format!("pt-{x}-{y}"), Point::new(x, y), 10.)
    }

    #[test]
    fn test_bounding_box_includes_handles() {
        let points = vec![cp(0., 0.), cp(100., 50.)];
        assert_eq!(
            bounding_box(&points),
            Some(BoundingBox::new(-10., 0., 110., 50.))
        );
        assert_eq!(bounding_box(&[]), None);
    }

    #[test]
    fn test_point_in_negative_rect() {
        let rect = Rect::new(50., 50., -50., -50.);
        assert!(point_in_rect(Point::new(25., 25.), rect));
        assert!(point_in_rect(Point::new(0., 50.), rect));
        assert!(!point_in_rect(Point::new(51., 25.), rect));
    }

    #[test]
    fn test_nearest_anchor() {
        let points = vec![cp(0., 0.), cp(20., 0.), cp(40., 0.)];
        let m = nearest_control_point(&points, Point::new(21., 1.), 5., false).expect("hit");
        assert_eq!(m.index, 1);
        assert_eq!(m.part, PointPart::Anchor);
        assert!(nearest_control_point(&points, Point::new(21., 30.), 5., false).is_none());
    }

    #[test]
    fn test_nearest_tie_lowest_index() {
        let points = vec![cp(0., 0.), cp(10., 0.)];
        let m = nearest_control_point(&points, Point::new(5., 0.), 5., false).expect("hit");
        assert_eq!(m.index, 0);
    }

    #[test]
    fn test_nearest_handle() {
        let points = vec![cp(0., 0.), cp(100., 0.)];
        // handle_out of the first point is at (10, 0)
        let m = nearest_control_point(&points, Point::new(11., 0.), 3., true).expect("hit");
        assert_eq!(m.index, 0);
        assert_eq!(m.part, PointPart::HandleOut);
        assert!(nearest_control_point(&points, Point::new(11., 0.), 3., false).is_none());
    }

    #[test]
    fn test_nearest_segment_point() {
        let mut a = cp(0., 0.);
        let mut b = cp(30., 0.);
        a.handle_out = Point::new(10., 0.);
        b.handle_in = Point::new(20., 0.);
        let m = nearest_segment_point(&[a, b], Point::new(15., 5.), 10).expect("segment");
        assert_eq!(m.segment, 0);
        assert!((m.t - 0.5).abs() < 1e-9);
        assert!((m.distance - 5.).abs() < 1e-9);
        assert!(nearest_segment_point(&[cp(0., 0.)], Point::ZERO, 10).is_none());
    }
}
