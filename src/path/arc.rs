use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::Point;

const EPSILON: f64 = 1e-9;

/// One cubic Bezier segment continuing from the previous end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

/// Result of approximating an elliptical arc with cubics
#[derive(Debug, Clone, PartialEq)]
pub enum ArcApproximation {
    /// A zero radius; the arc is drawn as a straight line to the end point
    Line,
    /// Start and end coincide, so the arc is omitted entirely
    Omitted,
    Curves(Vec<CubicSegment>),
}

/// Centre parameterization of an SVG arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCenter {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub phi: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl ArcCenter {
    pub fn point_at(&self, angle: f64) -> Point {
        let (sin_t, cos_t) = angle.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Point::new(
            self.center.x + self.rx * cos_t * cos_phi - self.ry * sin_t * sin_phi,
            self.center.y + self.rx * cos_t * sin_phi + self.ry * sin_t * cos_phi,
        )
    }

    /// Derivative of `point_at` with respect to the angle
    pub fn derivative_at(&self, angle: f64) -> Point {
        let (sin_t, cos_t) = angle.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Point::new(
            -self.rx * sin_t * cos_phi - self.ry * cos_t * sin_phi,
            -self.rx * sin_t * sin_phi + self.ry * cos_t * cos_phi,
        )
    }
}

// Implements https://www.w3.org/TR/SVG2/implnote.html#ArcConversionEndpointToCenter
// including the out-of-range radii correction.
pub fn endpoint_to_center(
    start: Point,
    end: Point,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc_flag: bool,
    sweep_flag: bool,
) -> ArcCenter {
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    let phi = x_axis_rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: Compute (x1', y1')
    let dx2 = (start.x - end.x) / 2.0;
    let dy2 = (start.y - end.y) / 2.0;
    let x1_prime = cos_phi * dx2 + sin_phi * dy2;
    let y1_prime = -sin_phi * dx2 + cos_phi * dy2;

    // Scale radii if required to reach the endpoint
    // https://www.w3.org/TR/SVG2/implnote.html#ArcCorrectionOutOfRangeRadii
    let lambda = (x1_prime * x1_prime) / (rx * rx) + (y1_prime * y1_prime) / (ry * ry);
    if lambda > 1.0 {
        rx *= lambda.sqrt();
        ry *= lambda.sqrt();
    }

    // Step 2: Compute (cx', cy')
    let sign = if large_arc_flag != sweep_flag {
        1.0
    } else {
        -1.0
    };
    let denom = (rx * y1_prime).powi(2) + (ry * x1_prime).powi(2);
    let coeff_sq = if denom > 0. {
        ((rx * ry).powi(2) - denom) / denom
    } else {
        0.
    };
    let coeff = sign * coeff_sq.max(0.0).sqrt();
    let cx_prime = coeff * (rx * y1_prime) / ry;
    let cy_prime = coeff * -(ry * x1_prime) / rx;

    // Step 3: Compute (cx, cy) from (cx', cy')
    let cx = cos_phi * cx_prime - sin_phi * cy_prime + (start.x + end.x) / 2.0;
    let cy = sin_phi * cx_prime + cos_phi * cy_prime + (start.y + end.y) / 2.0;

    // Step 4: Compute theta1 and delta_theta angles
    fn angle_between(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
        let dot = ux * vx + uy * vy;
        let det = ux * vy - uy * vx;
        // atan2 rather than arccos; no clamping needed near +-1
        det.atan2(dot)
    }

    let ux = (x1_prime - cx_prime) / rx;
    let uy = (y1_prime - cy_prime) / ry;
    let vx = (-x1_prime - cx_prime) / rx;
    let vy = (-y1_prime - cy_prime) / ry;

    let theta1 = angle_between(1.0, 0.0, ux, uy);
    let mut delta_theta = angle_between(ux, uy, vx, vy);

    // Adjust delta_theta according to sweep flag
    if sweep_flag && delta_theta < 0.0 {
        delta_theta += 2.0 * PI;
    } else if !sweep_flag && delta_theta > 0.0 {
        delta_theta -= 2.0 * PI;
    }

    ArcCenter {
        center: Point::new(cx, cy),
        rx,
        ry,
        phi,
        start_angle: theta1,
        sweep_angle: delta_theta,
    }
}

/// Approximate an SVG elliptical arc with cubic Beziers of at most 90 degrees each.
pub fn arc_to_cubics(
    start: Point,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc_flag: bool,
    sweep_flag: bool,
    end: Point,
) -> ArcApproximation {
    if rx.abs() < EPSILON || ry.abs() < EPSILON {
        return ArcApproximation::Line;
    }
    if (end - start).length() < EPSILON {
        return ArcApproximation::Omitted;
    }

    let arc = endpoint_to_center(
        start,
        end,
        rx,
        ry,
        x_axis_rotation,
        large_arc_flag,
        sweep_flag,
    );

    let count = ((arc.sweep_angle.abs() / FRAC_PI_2) - EPSILON).ceil().max(1.) as usize;
    let delta = arc.sweep_angle / count as f64;
    let alpha = delta.sin() * ((4. + 3. * (delta / 2.).tan().powi(2)).sqrt() - 1.) / 3.;

    let mut segments = Vec::with_capacity(count);
    let mut from = start;
    for i in 0..count {
        let theta1 = arc.start_angle + delta * i as f64;
        let theta2 = theta1 + delta;
        let to = if i + 1 == count {
            end
        } else {
            arc.point_at(theta2)
        };
        segments.push(CubicSegment {
            c1: from + arc.derivative_at(theta1) * alpha,
            c2: to - arc.derivative_at(theta2) * alpha,
            to,
        });
        from = to;
    }
    ArcApproximation::Curves(segments)
}
