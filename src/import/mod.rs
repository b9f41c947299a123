mod cancel;
mod detect;
mod pipeline;
mod repair;

pub use cancel::CancellationToken;
pub use detect::{detect, Detected, Payload, RawShape, SourceFormat};
pub use pipeline::{
    import, import_blocking, Batch, CollectingObserver, ImportJob, ImportObserver, ImportReport,
    ImportWarning, WarningKind,
};
pub use repair::{placeholder_points, Repair, RepairKind, Repairer};
