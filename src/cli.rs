use clap::Parser;

use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, Cursor, IsTerminal, Read},
    path::Path,
    sync::mpsc::channel,
    time::Duration,
};
use tempfile::NamedTempFile;
use tracing::{error, info, warn};

use crate::errors::{Error, Result};
use crate::{convert_stream, ConvertConfig, ImportConfig, ImportReport, OutputFormat, ParseConfig};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about=None)] // Read from Cargo.toml
struct Arguments {
    /// File to import ('-' for stdin)
    #[arg(default_value = "-")]
    file: String,

    /// Target output file ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Watch file for changes; update output on change. (FILE must be given)
    #[arg(short, long, requires = "file")]
    watch: bool,

    /// Output format
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Border around the content in SVG output (user-units)
    #[arg(long, default_value = "5")]
    border: f64,

    /// Maximum number of objects imported; the rest are dropped
    #[arg(long, default_value = "500")]
    max_objects: usize,

    /// Maximum number of points kept per object
    #[arg(long, default_value = "5000")]
    max_points: usize,

    /// Objects converted per batch
    #[arg(long, default_value = "16")]
    batch_size: usize,

    /// Seed for generated ids, default 0
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Replace SVG paths with too little geometry by a placeholder line
    #[arg(long)]
    placeholder: bool,

    /// Maximum number of parallel copies drawn per object
    #[arg(long, default_value = "32")]
    max_parallel: u32,

    /// Maximum number of commands applied per path
    #[arg(long, default_value = "10000")]
    max_commands: usize,

    /// Merge anchors closer than this to the previous anchor
    #[arg(long, default_value = "0")]
    min_spacing: f64,

    /// Simplify each parsed path to at most this many anchors
    #[arg(long)]
    target_points: Option<usize>,
}

/// Top-level configuration used by the `splinekit` command-line process.
///
/// This is typically derived from command line arguments and passed to `run()`.
///
/// 'front-end' program settings (e.g. input/output filenames, whether to continually
/// process input on change, etc) are stored directly in this struct. Per-conversion
/// ('back-end') settings are stored in the embedded `ConvertConfig` struct.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path to input file, or '-' for stdin
    pub input_path: String,
    /// Path to output file, or '-' for stdout
    pub output_path: String,
    /// Stay monitoring `input_path` for changes (Requires input_path is not stdin)
    pub watch: bool,
    /// conversion config options
    pub convert: ConvertConfig,
}

impl Config {
    fn from_args(args: Arguments) -> Result<Self> {
        if args.watch && args.file == "-" {
            // Should already be enforced by clap validation
            return Err(Error::Cli(
                "A non-stdin file must be provided with -w/--watch argument".into(),
            ));
        }
        if args.file != "-" && args.output != "-" {
            let in_path = Path::new(&args.file);
            let out_path = Path::new(&args.output);
            if out_path.exists()
                && out_path.canonicalize().map_err(Error::from_err)?
                    == in_path.canonicalize().map_err(Error::from_err)?
            {
                return Err(Error::Cli(
                    "Output path must not refer to the same file as the input file.".into(),
                ));
            }
        }
        Ok(Self {
            input_path: args.file,
            output_path: args.output,
            watch: args.watch,
            convert: ConvertConfig {
                format: args.format,
                border: args.border,
                import: ImportConfig {
                    max_objects: args.max_objects,
                    max_points_per_object: args.max_points,
                    batch_size: args.batch_size,
                    seed: args.seed,
                    placeholder_on_insufficient: args.placeholder,
                    max_parallel_count: args.max_parallel,
                    parse: ParseConfig {
                        max_commands: args.max_commands,
                        min_point_spacing: args.min_spacing,
                        target_points: args.target_points,
                        ..Default::default()
                    },
                },
            },
        })
    }

    /// Create a `Config` object set up given a command line string.
    ///
    /// The string is parsed using `shlex::split()`, so values containing
    /// spaces or quotes should be quoted or escaped appropriately.
    pub fn from_cmdline(args: &str) -> Result<Self> {
        let args = shlex::split(args).unwrap_or_default();
        let args = Arguments::try_parse_from(args.iter()).map_err(Error::from_err)?;
        Self::from_args(args)
    }
}

/// Create a `Config` object from process arguments.
pub fn get_config() -> Result<Config> {
    let args = Arguments::parse();
    Config::from_args(args)
}

/// Import `input` and write the converted result to `output`; '-' stands
/// for stdin and stdout respectively.
pub fn convert_file(input: &str, output: &str, cfg: &ConvertConfig) -> Result<ImportReport> {
    let mut in_reader = if input == "-" {
        let mut stdin = std::io::stdin().lock();
        if stdin.is_terminal() {
            // Ctrl-D on a terminal isn't reliably seen as end-of-input by a
            // buffered reader; read it all up front instead.
            let mut buf = Vec::new();
            stdin.read_to_end(&mut buf)?;
            Box::new(BufReader::new(Cursor::new(buf))) as Box<dyn BufRead>
        } else {
            Box::new(stdin) as Box<dyn BufRead>
        }
    } else {
        Box::new(BufReader::new(File::open(input)?)) as Box<dyn BufRead>
    };

    let report = if output == "-" {
        convert_stream(&mut in_reader, &mut std::io::stdout(), cfg)?
    } else {
        let mut out_temp = NamedTempFile::new()?;
        let report = convert_stream(&mut in_reader, &mut out_temp, cfg)?;
        // Copy rather than rename; the temp file may be on another filesystem.
        fs::copy(out_temp.path(), output)?;
        report
    };

    for warning in &report.warnings {
        warn!("{warning}");
    }
    for repair in &report.repairs {
        info!("repaired {repair}");
    }
    Ok(report)
}

/// Run the `splinekit` program with a given `Config`.
pub fn run(config: Config) -> Result<()> {
    if !config.watch {
        convert_file(&config.input_path, &config.output_path, &config.convert)?;
    } else if config.input_path != "-" {
        let watch = config.input_path;
        let (tx, rx) = channel();
        let mut watcher = new_debouncer(Duration::from_millis(250), tx).map_err(Error::from_err)?;
        let watch_path = Path::new(&watch);
        watcher
            .watcher()
            .watch(watch_path, RecursiveMode::NonRecursive)
            .map_err(Error::from_err)?;
        if let Err(e) = convert_file(&watch, &config.output_path, &config.convert) {
            error!("conversion failed: {e}");
        }
        info!("Watching {watch} for changes");
        loop {
            match rx.recv() {
                Ok(Ok(events)) => {
                    for event in events {
                        if event.path.canonicalize()? == watch_path.canonicalize()? {
                            info!("{} changed", event.path.to_string_lossy());
                            if let Err(e) =
                                convert_file(&watch, &config.output_path, &config.convert)
                            {
                                error!("conversion failed: {e}");
                            }
                        }
                    }
                }
                Ok(Err(e)) => warn!("Watch error {e:?}"),
                Err(e) => {
                    // The debouncer has gone away; nothing more will arrive.
                    return Err(Error::from_err(e));
                }
            }
        }
    }

    Ok(())
}
