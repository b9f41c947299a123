mod arc;
mod command;
mod parser;
mod serialize;
mod simplify;
mod syntax;

pub use arc::{arc_to_cubics, endpoint_to_center, ArcApproximation, ArcCenter, CubicSegment};
pub use command::{tokenize, CommandKind, CommandList, PathCommand, Segment};
pub use parser::{parse_path, parse_path_data, ParsedPath};
pub use serialize::{generate_path_data, parallel_offsets};
pub use simplify::{merge_close_points, simplify_to};
