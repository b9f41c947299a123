use crate::geometry::Point;

/// An anchor on the curve with its two handles.
///
/// Handles are free points; nothing ties them to the anchor geometrically.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    pub id: String,
    pub anchor: Point,
    pub handle_in: Point,
    pub handle_out: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    In,
    Out,
}

impl ControlPoint {
    pub fn new(id: impl Into<String>, anchor: Point, handle_in: Point, handle_out: Point) -> Self {
        Self {
            id: id.into(),
            anchor,
            handle_in,
            handle_out,
        }
    }

    /// Control point with handles `offset` either side of the anchor horizontally
    pub fn with_default_handles(id: impl Into<String>, anchor: Point, offset: f64) -> Self {
        Self::new(
            id,
            anchor,
            anchor - Point::new(offset, 0.),
            anchor + Point::new(offset, 0.),
        )
    }

    pub fn handle(&self, side: HandleSide) -> Point {
        match side {
            HandleSide::In => self.handle_in,
            HandleSide::Out => self.handle_out,
        }
    }

    pub fn handle_mut(&mut self, side: HandleSide) -> &mut Point {
        match side {
            HandleSide::In => &mut self.handle_in,
            HandleSide::Out => &mut self.handle_out,
        }
    }

    /// Move anchor and both handles by the same offset
    pub fn translate(&mut self, delta: Point) {
        self.anchor = self.anchor + delta;
        self.handle_in = self.handle_in + delta;
        self.handle_out = self.handle_out + delta;
    }

    pub fn is_finite(&self) -> bool {
        self.anchor.is_finite() && self.handle_in.is_finite() && self.handle_out.is_finite()
    }
}

impl HandleSide {
    pub fn opposite(&self) -> Self {
        match self {
            HandleSide::In => HandleSide::Out,
            HandleSide::Out => HandleSide::In,
        }
    }
}
