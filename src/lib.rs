#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Read-through catalog over one dataset tree.
pub mod catalog;
/// Centralized constants for layout, columns, and titles.
pub mod constants;
/// Task and subset identifier enumerations.
pub mod dataset;
/// Directory layout convention and path resolution.
pub mod layout;
/// Submission metadata, display titles, and the valid-submission list.
pub mod metadata;
/// Typed evaluation and ground-truth records.
pub mod records;
/// Flattened evaluation tables.
pub mod tables;
/// Shared type aliases.
pub mod types;

mod errors;

pub use catalog::DatasetCatalog;
pub use dataset::{Subset, TaskId};
pub use errors::DatasetError;
pub use layout::DataLayout;
pub use metadata::{
    SubmissionDirectory, SubmissionRecord, ValidSubmission, filter_valid_submission_ids,
    load_valid_submissions, shorten_title,
};
pub use records::{EvaluationDocument, GroundTruthEntry, MetricSet};
pub use tables::{EvaluationTables, GlobalKey, GlobalRow, ImageKey, ImageRow};
pub use types::{ImageId, SubmissionId, TeamName, UserId};
