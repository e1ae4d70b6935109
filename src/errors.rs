use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::SubmissionId;

/// Error type for identifier validation, lookup, and parse failures.
///
/// This is a fail-fast layer: nothing is retried or recovered locally, and
/// every variant propagates to the immediate caller.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Task id outside the benchmark's `1..=4` enumeration.
    #[error("invalid task id: {task}")]
    InvalidTask {
        /// The rejected value.
        task: u8,
    },
    /// Subset name outside the benchmark's subset enumeration.
    #[error("invalid subset name: {subset}")]
    InvalidSubset {
        /// The rejected name.
        subset: String,
    },
    /// A display or filter parameter outside its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A referenced file is absent from the dataset tree.
    #[error("file not found: {path}")]
    NotFound {
        /// The resolved path that was checked.
        path: PathBuf,
    },
    /// A submission id absent from the metadata table.
    #[error("submission '{submission_id}' is not present in the metadata table")]
    UnknownSubmission {
        /// The id that was looked up.
        submission_id: SubmissionId,
    },
    /// A file exists but its content does not parse as expected.
    #[error("malformed file '{path}': {message}")]
    Malformed {
        /// The file that failed to parse.
        path: PathBuf,
        /// Parser-reported reason.
        message: String,
    },
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}
