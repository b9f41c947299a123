use super::bbox::BoundingBox;
use super::types::Point;

/// Evaluate a cubic Bezier at `t` using the Bernstein form.
///
/// `t` is not clamped; `t = 0` yields `p0` and `t = 1` yields `p3` exactly.
pub fn bezier_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1. - t;
    let a = mt * mt * mt;
    let b = 3. * mt * mt * t;
    let c = 3. * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// First derivative of the cubic Bezier at `t` (not normalized)
pub fn bezier_tangent(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    // B'(t) = 3(1-t)^2 (p1-p0) + 6(1-t)t (p2-p1) + 3t^2 (p3-p2)
    let mt = 1. - t;
    let a = 3. * mt * mt;
    let b = 6. * mt * t;
    let c = 3. * t * t;
    (p1 - p0) * a + (p2 - p1) * b + (p3 - p2) * c
}

/// Point at `t` displaced by `distance` along the unit normal.
///
/// The normal is the tangent rotated by +90 degrees. Where the tangent
/// vanishes (coincident control points) the on-curve point is returned
/// unchanged.
pub fn parallel_offset_point(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    t: f64,
    distance: f64,
) -> Point {
    let point = bezier_point(p0, p1, p2, p3, t);
    if distance == 0. {
        return point;
    }
    let tangent = bezier_tangent(p0, p1, p2, p3, t);
    match tangent.normalized() {
        Some(unit) => point + Point::new(-unit.y, unit.x) * distance,
        None => point,
    }
}

/// Split a cubic at `t` with de Casteljau's algorithm, returning the control
/// polygons of the two halves.
pub fn split_cubic(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    t: f64,
) -> ([Point; 4], [Point; 4]) {
    let p01 = p0.lerp(p1, t);
    let p12 = p1.lerp(p2, t);
    let p23 = p2.lerp(p3, t);
    let p012 = p01.lerp(p12, t);
    let p123 = p12.lerp(p23, t);
    let mid = p012.lerp(p123, t);
    ([p0, p01, p012, mid], [mid, p123, p23, p3])
}

/// Control points of the cubic equivalent to the quadratic `p0, q, p1`
pub fn quadratic_to_cubic(p0: Point, q: Point, p1: Point) -> (Point, Point) {
    let cp1 = p0 + (q - p0) * (2. / 3.);
    let cp2 = p1 + (q - p1) * (2. / 3.);
    (cp1, cp2)
}

/// Inner control points of the cubic passing through `p0` (t=0), `q1` (t=1/3),
/// `q2` (t=2/3) and `p3` (t=1).
pub fn interpolate_cubic(p0: Point, q1: Point, q2: Point, p3: Point) -> (Point, Point) {
    let c1 = (p0 * -5. + q1 * 18. - q2 * 9. + p3 * 2.) * (1. / 6.);
    let c2 = (p0 * 2. - q1 * 9. + q2 * 18. - p3 * 5.) * (1. / 6.);
    (c1, c2)
}

/// Tight bounding box of a cubic, including interior extrema
pub fn cubic_bbox(p0: Point, p1: Point, p2: Point, p3: Point) -> BoundingBox {
    fn stationary_ts(p0: f64, p1: f64, p2: f64, p3: f64) -> Vec<f64> {
        // B'(t) rearranged to standard form: at^2 + bt + c = 0
        let a = 3.0 * (p3 - 3.0 * p2 + 3.0 * p1 - p0);
        let b = 6.0 * (p2 - 2.0 * p1 + p0);
        let c = 3.0 * (p1 - p0);

        let mut ts = vec![];
        if a.abs() < 1e-12 {
            // Linear case: bt + c = 0
            if b.abs() >= 1e-12 {
                ts.push(-c / b);
            }
        } else {
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sqrt_disc = disc.sqrt();
                let inv_2a = 1.0 / (2.0 * a);
                ts.push((-b + sqrt_disc) * inv_2a);
                ts.push((-b - sqrt_disc) * inv_2a);
            }
        }
        ts.retain(|t| *t > 0.0 && *t < 1.0);
        ts
    }

    let mut all_t = stationary_ts(p0.x, p1.x, p2.x, p3.x);
    all_t.extend(stationary_ts(p0.y, p1.y, p2.y, p3.y));

    let extrema = all_t.into_iter().map(|t| bezier_point(p0, p1, p2, p3, t));
    BoundingBox::from_points([p0, p3].into_iter().chain(extrema))
        .unwrap_or_else(|| BoundingBox::new(p0.x, p0.y, p0.x, p0.y))
}
