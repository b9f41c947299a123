//! ## splinekit - smooth vector curves and SVG paths
//!
//! `splinekit` models curves as anchor points with directional handles, and
//! converts between that model and the SVG path format.
//!
//! ## Library use
//!
//! The geometry kernel (`geometry`), the path model (`model`) and the SVG path
//! parser and serializer (`path`) can be used directly. Bulk input, whether a
//! JSON document, an SVG document or bare path data, goes through the import
//! pipeline (`import`), which validates and repairs every object and delivers
//! results in batches.
//!
//! A `ConvertConfig` wraps the import settings together with an output format
//! for front-ends which just want text in and text out.
//!
//! ## Example
//!
//! ```
//! let cfg = splinekit::ConvertConfig::default();
//!
//! let input = "M 0 0 L 100 0 L 100 100 Z";
//! let output = splinekit::convert_str(input, &cfg).unwrap();
//!
//! println!("{output}");
//! ```

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use serde_derive::Deserialize;
use std::io::{BufRead, Cursor, Write};

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod import;
pub mod interchange;
pub mod model;
pub mod path;
#[cfg(feature = "server")]
pub mod server;
mod types;

pub use config::{ImportConfig, ParseConfig};
pub use errors::{Error, Result};
pub use import::{import, import_blocking, CancellationToken, ImportReport, Payload};
pub use model::{Collection, ControlPoint, PathObject};
pub use types::fstr;

use interchange::{export_json, write_svg};
use path::generate_path_data;

// Allow users of this as a library to easily retrieve the version of splinekit being used
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output produced by a conversion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(any(feature = "cli", feature = "server"), derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON object list
    #[default]
    Json,
    /// Standalone SVG document
    Svg,
    /// Bare path data, one line per object
    Path,
}

/// Settings to configure a single conversion.
///
/// Front-ends such as the command line program wrap this with their own
/// settings (input and output paths etc).
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertConfig {
    pub format: OutputFormat,
    /// Border around the content in SVG output (user-units, default 5)
    pub border: f64,
    pub import: ImportConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            border: 5.,
            import: ImportConfig::default(),
        }
    }
}

/// Write `objects` in the given format.
pub fn write_objects(
    objects: &[PathObject],
    format: OutputFormat,
    border: f64,
    writer: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = export_json(objects)?;
            writeln!(writer, "{json}")?;
        }
        OutputFormat::Svg => write_svg(objects, border, writer)?,
        OutputFormat::Path => {
            for obj in objects.iter().filter(|o| o.is_renderable()) {
                writeln!(writer, "{}", generate_path_data(&obj.points, 0.))?;
            }
        }
    }
    Ok(())
}

/// Reads from the `reader` stream, imports its content, and writes the result
/// to `writer`.
///
/// The entire stream is read before any converted data is written.
pub fn convert_stream(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    config: &ConvertConfig,
) -> Result<ImportReport> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    let report = import_blocking(
        Payload::Text(input),
        &config.import,
        &CancellationToken::new(),
        &mut (),
    )?;
    write_objects(&report.objects, config.format, config.border, writer)?;
    Ok(report)
}

/// Convert `input` provided as a string, returning the result as a string.
pub fn convert_str<T: Into<String>>(input: T, cfg: &ConvertConfig) -> Result<String> {
    let mut input = Cursor::new(input.into());
    let mut output: Vec<u8> = vec![];

    convert_stream(&mut input, &mut output, cfg)?;

    String::from_utf8(output).map_err(Error::from_err)
}

/// Import any supported payload, returning the objects as JSON.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn import_to_json(payload: String) -> core::result::Result<String, String> {
    convert_str(payload, &ConvertConfig::default()).map_err(|e| e.to_string())
}

/// Render a JSON object list as an SVG document.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn export_to_svg(json: String, border: f64) -> core::result::Result<String, String> {
    let cfg = ConvertConfig {
        format: OutputFormat::Svg,
        border,
        ..Default::default()
    };
    convert_str(json, &cfg).map_err(|e| e.to_string())
}
