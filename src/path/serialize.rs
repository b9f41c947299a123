use crate::geometry::{interpolate_cubic, parallel_offset_point, Point};
use crate::model::ControlPoint;
use crate::types::fstr;

fn coord(p: Point) -> String {
    format!("{} {}", fstr(p.x), fstr(p.y))
}

/// SVG path data for the curve through `points`, displaced sideways by
/// `offset`.
///
/// Returns an empty string for fewer than two points. The result is always
/// one `M` followed by one `C` per consecutive pair of points. A non-zero
/// offset samples each segment's parallel curve at t = 0, 1/3, 2/3 and 1 and
/// emits the cubic through those samples.
pub fn generate_path_data(points: &[ControlPoint], offset: f64) -> String {
    if points.len() < 2 {
        return String::new();
    }

    let mut parts = Vec::with_capacity(points.len());
    for (idx, pair) in points.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        let (start, c1, c2, end) = if offset == 0. {
            (a.anchor, a.handle_out, b.handle_in, b.anchor)
        } else {
            let sample =
                |t: f64| parallel_offset_point(a.anchor, a.handle_out, b.handle_in, b.anchor, t, offset);
            let (s0, s1, s2, s3) = (sample(0.), sample(1. / 3.), sample(2. / 3.), sample(1.));
            let (c1, c2) = interpolate_cubic(s0, s1, s2, s3);
            (s0, c1, c2, s3)
        };
        if idx == 0 {
            parts.push(format!("M {}", coord(start)));
        }
        parts.push(format!("C {} {} {}", coord(c1), coord(c2), coord(end)));
    }
    parts.join(" ")
}

/// Offsets for `count` parallel copies `spacing` apart, centred on the
/// original curve.
pub fn parallel_offsets(count: u32, spacing: f64) -> Vec<f64> {
    let mid = (count.max(1) - 1) as f64 / 2.;
    (0..count.max(1))
        .map(|i| (i as f64 - mid) * spacing)
        .collect()
}
