mod bbox;
mod bezier;
mod hit;
mod types;

pub use bbox::{BoundingBox, BoundingBoxBuilder};
pub use bezier::{
    bezier_point, bezier_tangent, cubic_bbox, interpolate_cubic, parallel_offset_point,
    quadratic_to_cubic, split_cubic,
};
pub use hit::{
    bounding_box, distance, nearest_control_point, nearest_segment_point, point_in_rect,
    ControlPointMatch, PointPart, SegmentMatch,
};
pub use types::{Point, Rect};
