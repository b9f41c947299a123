use assertables::assert_in_delta;
use itertools::iproduct;
use splinekit::geometry::{
    bezier_point, cubic_bbox, nearest_control_point, parallel_offset_point, point_in_rect,
    split_cubic, Point, PointPart, Rect,
};
use splinekit::ControlPoint;

const P0: Point = Point::new(0., 0.);
const P1: Point = Point::new(20., 40.);
const P2: Point = Point::new(70., -15.);
const P3: Point = Point::new(100., 10.);

#[test]
fn test_bezier_endpoints_exact() {
    assert_eq!(bezier_point(P0, P1, P2, P3, 0.), P0);
    assert_eq!(bezier_point(P0, P1, P2, P3, 1.), P3);

    let (a, b) = (Point::new(-3.7, 1e-7), Point::new(1e6, -0.1));
    assert_eq!(bezier_point(a, P1, P2, b, 0.), a);
    assert_eq!(bezier_point(a, P1, P2, b, 1.), b);
}

#[test]
fn test_coincident_controls_collapse_to_chord() {
    let mid = bezier_point(
        Point::new(0., 0.),
        Point::new(0., 0.),
        Point::new(10., 10.),
        Point::new(10., 10.),
        0.5,
    );
    assert_eq!(mid, Point::new(5., 5.));
}

#[test]
fn test_zero_offset_is_curve_point() {
    for t in [0., 0.1, 0.25, 0.5, 0.9, 1.] {
        assert_eq!(
            parallel_offset_point(P0, P1, P2, P3, t, 0.),
            bezier_point(P0, P1, P2, P3, t)
        );
    }
}

#[test]
fn test_offset_distance_from_curve() {
    for (t, d) in iproduct!([0.2, 0.5, 0.8], [-7.5, 3., 12.]) {
        let on_curve = bezier_point(P0, P1, P2, P3, t);
        let offset = parallel_offset_point(P0, P1, P2, P3, t, d);
        assert_in_delta!(
            ((offset.x - on_curve.x).powi(2) + (offset.y - on_curve.y).powi(2)).sqrt(),
            d.abs(),
            1e-9
        );
    }
}

#[test]
fn test_degenerate_offset_returns_curve_point() {
    let p = Point::new(4., 4.);
    assert_eq!(parallel_offset_point(p, p, p, p, 0.5, 10.), p);
}

#[test]
fn test_split_preserves_curve() {
    let (left, right) = split_cubic(P0, P1, P2, P3, 0.4);
    let at = bezier_point(P0, P1, P2, P3, 0.4);
    assert_eq!(left[3], right[0]);
    assert_in_delta!(left[3].x, at.x, 1e-9);
    assert_in_delta!(left[3].y, at.y, 1e-9);

    let inside_right = bezier_point(right[0], right[1], right[2], right[3], 0.5);
    let original = bezier_point(P0, P1, P2, P3, 0.7);
    assert_in_delta!(inside_right.x, original.x, 1e-9);
    assert_in_delta!(inside_right.y, original.y, 1e-9);
}

#[test]
fn test_cubic_bbox_contains_samples() {
    let bb = cubic_bbox(P0, P1, P2, P3);
    for i in 0..=100 {
        let p = bezier_point(P0, P1, P2, P3, i as f64 / 100.);
        assert!(p.x >= bb.x1 - 1e-9 && p.x <= bb.x2 + 1e-9);
        assert!(p.y >= bb.y1 - 1e-9 && p.y <= bb.y2 + 1e-9);
    }
    // tighter than the control polygon
    assert!(bb.y2 < P1.y);
    assert!(bb.y1 > P2.y);
}

#[test]
fn test_point_in_negative_rect() {
    let rect = Rect {
        x: 10.,
        y: 10.,
        width: -10.,
        height: -5.,
    };
    assert!(point_in_rect(Point::new(5., 7.), rect));
    assert!(!point_in_rect(Point::new(5., 3.), rect));
}

#[test]
fn test_nearest_control_point_ties() {
    let points = vec![
        ControlPoint::with_default_handles("a", Point::new(0., 0.), 30.),
        ControlPoint::with_default_handles("b", Point::new(10., 0.), 30.),
    ];
    let hit = nearest_control_point(&points, Point::new(5., 0.), 6., false).expect("hit");
    assert_eq!(hit.index, 0);
    assert_eq!(hit.part, PointPart::Anchor);

    assert!(nearest_control_point(&points, Point::new(5., 50.), 6., true).is_none());

    let hit = nearest_control_point(&points, Point::new(41., 1.), 5., true).expect("handle");
    assert_eq!(hit.index, 1);
    assert_eq!(hit.part, PointPart::HandleOut);
}
