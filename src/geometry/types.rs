use std::ops::{Add, Mul, Neg, Sub};

/// A position or vector in model space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0., y: 0. };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector
    pub fn normalized(&self) -> Option<Self> {
        let len = self.length();
        if len > 0. && len.is_finite() {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    pub fn lerp(&self, other: Point, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Point reflection of `self` through `center`
    pub fn reflect_about(&self, center: Point) -> Self {
        Self::new(2. * center.x - self.x, 2. * center.y - self.y)
    }

    /// Rotate by `angle` radians about `center`
    pub fn rotate_about(&self, center: Point, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let d = *self - center;
        Self::new(
            center.x + d.x * cos - d.y * sin,
            center.y + d.x * sin + d.y * cos,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// A rectangle given by origin and size, as produced by a drag gesture.
///
/// Width and height may be negative when the drag went up or left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Equivalent rect with non-negative width and height
    pub fn normalized(&self) -> Self {
        let (x, width) = if self.width < 0. {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0. {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    pub fn contains(&self, p: Point) -> bool {
        let r = self.normalized();
        p.x >= r.x && p.x <= r.x + r.width && p.y >= r.y && p.y <= r.y + r.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ops() {
        let a = Point::new(1., 2.);
        let b = Point::new(4., 6.);
        assert_eq!(a + b, Point::new(5., 8.));
        assert_eq!(b - a, Point::new(3., 4.));
        assert_eq!((b - a).length(), 5.);
        assert_eq!(a * 2., Point::new(2., 4.));
        assert_eq!(a.lerp(b, 0.5), Point::new(2.5, 4.));
        assert_eq!(a.reflect_about(b), Point::new(7., 10.));
        assert_eq!(Point::ZERO.normalized(), None);
    }

    #[test]
    fn test_rotate_about() {
        let p = Point::new(10., 0.).rotate_about(Point::ZERO, std::f64::consts::FRAC_PI_2);
        assert!((p.x - 0.).abs() < 1e-9);
        assert!((p.y - 10.).abs() < 1e-9);
    }

    #[test]
    fn test_rect_normalized() {
        let r = Rect::new(10., 10., -5., -20.).normalized();
        assert_eq!(r, Rect::new(5., -10., 5., 20.));
        assert!(Rect::new(10., 10., -5., -20.).contains(Point::new(7., 0.)));
        assert!(!Rect::new(10., 10., -5., -20.).contains(Point::new(11., 0.)));
    }
}
