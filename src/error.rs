//! Errors for objects missing from a dataset file and unusable merge destinations.
use std::path::PathBuf;

/// Failure to locate an expected object in a dataset file, or a destination that
/// cannot be used.
///
/// These are returned wrapped in an `anyhow::Error`, use `downcast_ref::<LookupError>()`
/// to tell them apart from errors raised by the HDF5 library.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("{}: group '{group}' not found", path.display())]
    GroupNotFound { path: PathBuf, group: String },

    #[error("{object}: attribute '{attr}' not found")]
    AttributeNotFound { object: String, attr: String },

    #[error("{}: destination already exists", .0.display())]
    DestinationExists(PathBuf),

    #[error("{}: destination is also a source", .0.display())]
    DestinationIsSource(PathBuf),
}
