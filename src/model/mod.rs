mod collection;
mod ids;
mod object;
mod point;

pub use collection::Collection;
pub use ids::IdGenerator;
pub use object::{
    LineCap, LineJoin, PathObject, Style, Transform, DEFAULT_COLOR, DEFAULT_FILL,
};
pub use point::{ControlPoint, HandleSide};
