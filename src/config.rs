use serde_derive::Deserialize;

/// Controls how faithfully SVG path data is turned into control points.
///
/// A single parser serves every importer; the limits here decide how much
/// of a path is processed and how densely it is sampled into anchors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Maximum number of path commands applied per path; the remainder is ignored
    pub max_commands: usize,
    /// Anchors closer than this to the previous anchor are merged into it
    /// (0 disables merging)
    pub min_point_spacing: f64,
    /// If set, simplify each parsed path to at most this many anchors
    pub target_points: Option<usize>,
    /// Upper bound on handle length synthesized for straight segments
    pub line_handle_cap: f64,
    /// Distance of default handles from their anchor where no handle is implied
    pub default_handle_offset: f64,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_commands: 10_000,
            min_point_spacing: 0.,
            target_points: None,
            line_handle_cap: 50.,
            default_handle_offset: 30.,
        }
    }
}

/// Settings for a single run of the import pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Ceiling on objects delivered; any beyond this are dropped with a warning
    pub max_objects: usize,
    /// Ceiling on points kept per object
    pub max_points_per_object: usize,
    /// Number of objects processed between cooperative yields
    pub batch_size: usize,
    /// Seed for generated ids
    pub seed: u64,
    /// Substitute a placeholder line for SVG paths with fewer than two anchors
    /// rather than skipping them
    pub placeholder_on_insufficient: bool,
    /// Ceiling on parallel copies per object; larger requests are clamped
    pub max_parallel_count: u32,
    pub parse: ParseConfig,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_objects: 500,
            max_points_per_object: 5_000,
            batch_size: 16,
            seed: 0,
            placeholder_on_insufficient: false,
            max_parallel_count: 32,
            parse: ParseConfig::default(),
        }
    }
}

impl ImportConfig {
    /// Batch size as used by the pipeline; never zero.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
