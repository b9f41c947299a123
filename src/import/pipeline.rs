use std::fmt::{self, Display};
use std::vec;

use tracing::{debug, info, warn};

use super::cancel::CancellationToken;
use super::detect::{detect, Payload, RawShape, SourceFormat};
use super::repair::{Repair, Repairer};
use crate::config::ImportConfig;
use crate::errors::{Error, Result};
use crate::interchange::JsonObject;
use crate::model::PathObject;

#[derive(Debug, Clone, PartialEq)]
pub enum WarningKind {
    /// More objects than `max_objects`; the excess was dropped
    ObjectsTruncated { from: usize, to: usize },
    PointsTruncated { from: usize, to: usize },
    /// The shape failed to convert and was left out
    ShapeSkipped { reason: String },
    /// The shape had too little geometry and a placeholder line stands in
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportWarning {
    /// Index of the object in the input, if the warning concerns one object
    pub object: Option<usize>,
    pub kind: WarningKind,
}

impl Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(object) = self.object {
            write!(f, "object {object}: ")?;
        }
        match &self.kind {
            WarningKind::ObjectsTruncated { from, to } => {
                write!(f, "{from} objects found, only the first {to} imported")
            }
            WarningKind::PointsTruncated { from, to } => {
                write!(f, "{from} points found, only the first {to} kept")
            }
            WarningKind::ShapeSkipped { reason } => write!(f, "skipped: {reason}"),
            WarningKind::Placeholder => write!(f, "too little geometry, placeholder used"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub objects: Vec<PathObject>,
    pub warnings: Vec<ImportWarning>,
    pub repairs: Vec<Repair>,
    /// Number of shapes which could not be converted
    pub skipped: usize,
    pub format: SourceFormat,
}

/// Receives import events as they happen.
///
/// Progress is reported after every batch and never decreases. `complete`
/// follows the final progress report, and `failed` is called for a terminal
/// error; after cancellation neither is called.
pub trait ImportObserver {
    fn progress(&mut self, _done: usize, _total: usize) {}
    fn batch(&mut self, _objects: &[PathObject]) {}
    fn warning(&mut self, _warning: &ImportWarning) {}
    fn complete(&mut self, _report: &ImportReport) {}
    fn failed(&mut self, _error: &Error) {}
}

impl ImportObserver for () {}

/// Records every event, mostly useful for tests and simple callers
#[derive(Debug, Default)]
pub struct CollectingObserver {
    pub progress: Vec<(usize, usize)>,
    pub objects: Vec<PathObject>,
    pub batches: usize,
    pub warnings: Vec<ImportWarning>,
    pub completed: bool,
    pub failure: Option<String>,
}

impl ImportObserver for CollectingObserver {
    fn progress(&mut self, done: usize, total: usize) {
        self.progress.push((done, total));
    }

    fn batch(&mut self, objects: &[PathObject]) {
        self.batches += 1;
        self.objects.extend_from_slice(objects);
    }

    fn warning(&mut self, warning: &ImportWarning) {
        self.warnings.push(warning.clone());
    }

    fn complete(&mut self, _report: &ImportReport) {
        self.completed = true;
    }

    fn failed(&mut self, error: &Error) {
        self.failure = Some(error.to_string());
    }
}

/// Objects and warnings produced by one call to `ImportJob::next_batch`
#[derive(Debug)]
pub struct Batch<'a> {
    pub objects: &'a [PathObject],
    pub warnings: &'a [ImportWarning],
}

/// The import work split into batches, independent of how they are scheduled.
pub struct ImportJob<'a> {
    config: &'a ImportConfig,
    shapes: vec::IntoIter<(usize, RawShape)>,
    total: usize,
    done: usize,
    repairer: Repairer<'a>,
    objects: Vec<PathObject>,
    warnings: Vec<ImportWarning>,
    warnings_sent: usize,
    skipped: usize,
    format: SourceFormat,
}

impl<'a> ImportJob<'a> {
    /// Detect the payload format and apply the object ceiling.
    pub fn new(payload: Payload, config: &'a ImportConfig) -> Result<Self> {
        let detected = detect(payload)?;
        let mut shapes = detected.shapes;
        let mut warnings = Vec::new();
        if shapes.len() > config.max_objects {
            warn!(
                "{} objects in input; importing the first {}",
                shapes.len(),
                config.max_objects
            );
            warnings.push(ImportWarning {
                object: None,
                kind: WarningKind::ObjectsTruncated {
                    from: shapes.len(),
                    to: config.max_objects,
                },
            });
            shapes.truncate(config.max_objects);
        }
        debug!(
            "importing {} {} shape(s)",
            shapes.len(),
            detected.format
        );
        Ok(Self {
            config,
            total: shapes.len(),
            shapes: shapes.into_iter().enumerate().collect::<Vec<_>>().into_iter(),
            done: 0,
            repairer: Repairer::new(config),
            objects: Vec::new(),
            warnings,
            warnings_sent: 0,
            skipped: 0,
            format: detected.format,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn done(&self) -> usize {
        self.done
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn is_finished(&self) -> bool {
        self.done == self.total && self.warnings_sent == self.warnings.len()
    }

    /// Apply the per-object point ceiling ahead of any per-point work
    fn cap_points<T>(&mut self, index: usize, points: &mut Vec<T>) {
        let max_points = self.config.max_points_per_object.max(2);
        if points.len() > max_points {
            warn!(
                "shape {index}: {} points; keeping the first {max_points}",
                points.len()
            );
            self.warnings.push(ImportWarning {
                object: Some(index),
                kind: WarningKind::PointsTruncated {
                    from: points.len(),
                    to: max_points,
                },
            });
            points.truncate(max_points);
        }
    }

    fn convert(&mut self, index: usize, shape: RawShape) -> Result<PathObject> {
        match shape {
            RawShape::Model(mut obj) => {
                self.cap_points(index, &mut obj.points);
                Ok(self.repairer.from_model(index, obj))
            }
            RawShape::Json(value) => {
                let mut raw: JsonObject = serde_json::from_value(value)?;
                self.cap_points(index, &mut raw.points);
                self.repairer.from_json(index, raw)
            }
            RawShape::Svg(path) => {
                // parsing is already bounded by `max_commands`
                let (mut obj, placeholder) = self.repairer.from_svg(index, path)?;
                if placeholder {
                    warn!("shape {index}: too little geometry, using placeholder");
                    self.warnings.push(ImportWarning {
                        object: Some(index),
                        kind: WarningKind::Placeholder,
                    });
                }
                self.cap_points(index, &mut obj.points);
                Ok(obj)
            }
        }
    }

    /// Convert the next batch of shapes.
    ///
    /// Shape-level errors skip that shape with a warning; any other error
    /// is returned and ends the import.
    pub fn next_batch(&mut self) -> Result<Batch<'_>> {
        let first_object = self.objects.len();
        for _ in 0..self.config.effective_batch_size() {
            let Some((index, shape)) = self.shapes.next() else {
                break;
            };
            self.done += 1;
            match self.convert(index, shape) {
                Ok(obj) => self.objects.push(obj),
                Err(err) if err.is_shape_error() => {
                    warn!("skipping shape {index}: {err}");
                    self.skipped += 1;
                    self.warnings.push(ImportWarning {
                        object: Some(index),
                        kind: WarningKind::ShapeSkipped {
                            reason: err.to_string(),
                        },
                    });
                }
                Err(err) => return Err(err),
            }
        }
        debug!("import progress {}/{}", self.done, self.total);

        let first_warning = self.warnings_sent;
        self.warnings_sent = self.warnings.len();
        Ok(Batch {
            objects: &self.objects[first_object..],
            warnings: &self.warnings[first_warning..],
        })
    }

    pub fn finish(self) -> ImportReport {
        info!(
            "imported {} object(s) from {}, {} skipped, {} repair(s)",
            self.objects.len(),
            self.format,
            self.skipped,
            self.repairer.repairs().len()
        );
        ImportReport {
            objects: self.objects,
            warnings: self.warnings,
            repairs: self.repairer.into_repairs(),
            skipped: self.skipped,
            format: self.format,
        }
    }
}

/// Run one batch and report it.
///
/// The token is checked before every notification, since either the
/// observer or another task may cancel while the batch is being delivered.
fn step<O: ImportObserver>(
    job: &mut ImportJob<'_>,
    token: &CancellationToken,
    observer: &mut O,
) -> Result<()> {
    token.check()?;
    {
        let batch = job.next_batch()?;
        for warning in batch.warnings {
            token.check()?;
            observer.warning(warning);
        }
        if !batch.objects.is_empty() {
            token.check()?;
            observer.batch(batch.objects);
        }
    }
    token.check()?;
    observer.progress(job.done(), job.total());
    Ok(())
}

fn conclude<O: ImportObserver>(
    result: Result<ImportReport>,
    observer: &mut O,
) -> Result<ImportReport> {
    match &result {
        Ok(report) => observer.complete(report),
        Err(Error::Cancelled) => debug!("import cancelled"),
        Err(err) => observer.failed(err),
    }
    result
}

async fn run_import<O: ImportObserver>(
    payload: Payload,
    config: &ImportConfig,
    token: &CancellationToken,
    observer: &mut O,
) -> Result<ImportReport> {
    token.check()?;
    let mut job = ImportJob::new(payload, config)?;
    loop {
        step(&mut job, token, observer)?;
        if job.is_finished() {
            break;
        }
        tokio::task::yield_now().await;
    }
    token.check()?;
    Ok(job.finish())
}

fn run_blocking<O: ImportObserver>(
    payload: Payload,
    config: &ImportConfig,
    token: &CancellationToken,
    observer: &mut O,
) -> Result<ImportReport> {
    token.check()?;
    let mut job = ImportJob::new(payload, config)?;
    // always at least one step, so an empty input still reports progress
    loop {
        step(&mut job, token, observer)?;
        if job.is_finished() {
            break;
        }
    }
    token.check()?;
    Ok(job.finish())
}

/// Import `payload`, yielding to the runtime between batches.
///
/// Objects already passed to `observer` remain delivered if the import is
/// later cancelled or fails.
pub async fn import<O: ImportObserver>(
    payload: Payload,
    config: &ImportConfig,
    token: &CancellationToken,
    observer: &mut O,
) -> Result<ImportReport> {
    let result = run_import(payload, config, token, observer).await;
    conclude(result, observer)
}

/// Import `payload` on the current thread without yielding; for callers
/// with no async runtime.
pub fn import_blocking<O: ImportObserver>(
    payload: Payload,
    config: &ImportConfig,
    token: &CancellationToken,
    observer: &mut O,
) -> Result<ImportReport> {
    let result = run_blocking(payload, config, token, observer);
    conclude(result, observer)
}
