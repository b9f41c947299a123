use assertables::assert_starts_with;
use splinekit::geometry::Point;
use splinekit::path::{generate_path_data, parse_path, parse_path_data};
use splinekit::{fstr, Error, ParseConfig};

use super::utils::{anchors, assert_points_close, curve_count};

const SAMPLE_PATHS: &[&str] = &[
    "M0 0 L100 0 L100 100 Z",
    "M 10 20 C 20 0 40 0 50 20 S 80 40 90 20",
    "m 5 5 h 20 v 20 h -20 z",
    "M 0 0 Q 50 50 100 0 T 200 0",
    "M 0 50 A 50 50 0 0 1 100 50",
    "M 0 0 A 30 20 45 1 0 60 10 L 80 80",
    "M1e1,2e1 L3.5e1-1e1",
];

#[test]
fn test_triangle() {
    let points = parse_path("M0 0 L100 0 L100 100 Z", &ParseConfig::default()).expect("triangle");
    assert_points_close(
        &anchors(&points),
        &[
            Point::new(0., 0.),
            Point::new(100., 0.),
            Point::new(100., 100.),
        ],
    );

    let data = generate_path_data(&points, 0.);
    assert_starts_with!(data, "M 0 0 C");
    assert_eq!(curve_count(&data), 2);
}

#[test]
fn test_serialized_shape() {
    for path in SAMPLE_PATHS {
        let points = parse_path(path, &ParseConfig::default()).expect("valid path");
        let data = generate_path_data(&points, 0.);
        let first = points[0].anchor;
        let prefix = format!("M {} {} ", fstr(first.x), fstr(first.y));
        assert_starts_with!(data, prefix.as_str());
        assert_eq!(curve_count(&data), points.len() - 1, "{path} -> {data}");
    }
}

#[test]
fn test_parse_serialize_preserves_anchors() {
    for path in SAMPLE_PATHS {
        let points = parse_path(path, &ParseConfig::default()).expect("valid path");
        let reparsed =
            parse_path(&generate_path_data(&points, 0.), &ParseConfig::default()).expect("reparse");
        assert_points_close(&anchors(&reparsed), &anchors(&points));
    }
}

#[test]
fn test_zero_radius_arc_is_line() {
    for path in ["M 10 10 A 0 5 0 0 1 50 10", "M 10 10 A 5 0 30 1 0 50 10"] {
        let points = parse_path(path, &ParseConfig::default()).expect("arc as line");
        assert_points_close(
            &anchors(&points),
            &[Point::new(10., 10.), Point::new(50., 10.)],
        );
    }
}

#[test]
fn test_insufficient_geometry() {
    for path in ["", "M 5 5", "M 5 5 A 10 10 0 0 1 5 5", "M 5 5 L 1 ?"] {
        assert!(
            matches!(
                parse_path(path, &ParseConfig::default()),
                Err(Error::InsufficientGeometry(n)) if n < 2
            ),
            "{path}"
        );
    }
}

#[test]
fn test_bad_groups_skipped() {
    let parsed =
        parse_path_data("M 0 0 L 10 ?? L 20 20 L 30 0", &ParseConfig::default()).expect("path");
    assert_eq!(parsed.points.len(), 3);
    assert_eq!(parsed.rejected.len(), 1);
}

#[test]
fn test_parallel_offset_displaces() {
    let points = parse_path("M 0 0 L 30 0", &ParseConfig::default()).expect("line");
    assert_eq!(generate_path_data(&points, 0.), "M 0 0 C 10 0 20 0 30 0");
    assert_eq!(generate_path_data(&points, 5.), "M 0 5 C 10 5 20 5 30 5");
    assert_eq!(generate_path_data(&points[..1], 5.), "");
}
