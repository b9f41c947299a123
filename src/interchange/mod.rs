mod json;
mod svg;

pub use json::{
    export_json, JsonCurveConfig, JsonDocument, JsonObject, JsonPoint, JsonStyle, JsonTransform,
    JsonXY,
};
pub use svg::{export_svg, extract_svg_paths, is_path_data, write_svg, SvgPath};
