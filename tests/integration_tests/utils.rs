use splinekit::geometry::Point;
use splinekit::ControlPoint;

pub const EPSILON: f64 = 1e-9;

pub fn anchors(points: &[ControlPoint]) -> Vec<Point> {
    points.iter().map(|cp| cp.anchor).collect()
}

pub fn assert_points_close(actual: &[Point], expected: &[Point]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "\n {actual:?}\nhas a different length to\n {expected:?}"
    );
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a.x - e.x).abs() < 1e-6 && (a.y - e.y).abs() < 1e-6,
            "\n {a:?}\n!=\n {e:?}"
        );
    }
}

/// Number of cubic segments in serialized path data
pub fn curve_count(data: &str) -> usize {
    data.split_whitespace().filter(|tok| *tok == "C").count()
}
