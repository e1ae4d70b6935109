use serde::{Deserialize, Serialize};

use crate::constants::metrics::{BASE_COLUMNS, CHAR_COLUMNS};
use crate::dataset::{Subset, TaskId};
use crate::records::{EvaluationDocument, MetricSet};
use crate::types::{ImageId, SubmissionId};

/// Composite key of one row in the submission-level table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalKey {
    /// Task the submission was scored on.
    pub task: TaskId,
    /// Subset the submission was scored on.
    pub subset: Subset,
    /// The scored submission.
    pub submission_id: SubmissionId,
}

/// Composite key of one row in the image-level table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageKey {
    /// Task the submission was scored on.
    pub task: TaskId,
    /// Subset the submission was scored on.
    pub subset: Subset,
    /// The scored submission.
    pub submission_id: SubmissionId,
    /// The scored image.
    pub image_id: ImageId,
}

/// One submission's aggregate metrics, tagged with its identifying context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GlobalRow {
    /// Unique `(task, subset, submission)` key.
    pub key: GlobalKey,
    /// Aggregate metric values (sparse).
    pub metrics: MetricSet,
}

/// One image's metrics under one submission, tagged with its context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageRow {
    /// Unique `(task, subset, submission, image)` key.
    pub key: ImageKey,
    /// Per-image metric values (sparse).
    pub metrics: MetricSet,
}

/// The two flattened tables built from a `(task, subset)` slice of
/// evaluation documents: one row per submission, and one row per image
/// per submission.
///
/// Row order follows the lister's sorted submission order; within a
/// submission, image rows follow the evaluation document's own key order.
#[derive(Clone, Debug, Serialize)]
pub struct EvaluationTables {
    /// Task this slice was built for.
    pub task: TaskId,
    /// Subset this slice was built for.
    pub subset: Subset,
    /// Submission-level rows, keyed by `(task, subset, submission_id)`.
    pub global: Vec<GlobalRow>,
    /// Image-level rows, keyed by `(task, subset, submission_id, image_id)`.
    pub images: Vec<ImageRow>,
}

impl EvaluationTables {
    /// Create empty tables for one `(task, subset)` slice.
    pub fn new(task: TaskId, subset: Subset) -> Self {
        Self {
            task,
            subset,
            global: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Flatten one evaluation document into the tables: the aggregate
    /// record becomes a global row and each per-image record an image
    /// row, all tagged with this slice's context.
    pub fn push_document(&mut self, submission_id: &str, document: EvaluationDocument) {
        self.global.push(GlobalRow {
            key: GlobalKey {
                task: self.task,
                subset: self.subset,
                submission_id: submission_id.to_string(),
            },
            metrics: document.results,
        });
        for (image_id, metrics) in document.images {
            self.images.push(ImageRow {
                key: ImageKey {
                    task: self.task,
                    subset: self.subset,
                    submission_id: submission_id.to_string(),
                    image_id,
                },
                metrics,
            });
        }
    }

    /// The active metric column set: the character pair first for tasks
    /// that score character predictions, then the base five.
    pub fn metric_columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(CHAR_COLUMNS.len() + BASE_COLUMNS.len());
        if self.task.has_char_metrics() {
            columns.extend(CHAR_COLUMNS);
        }
        columns.extend(BASE_COLUMNS);
        columns
    }

    /// Find a submission's global row.
    pub fn global_row(&self, submission_id: &str) -> Option<&GlobalRow> {
        self.global
            .iter()
            .find(|row| row.key.submission_id == submission_id)
    }

    /// Find one image's row under one submission.
    pub fn image_row(&self, submission_id: &str, image_id: &str) -> Option<&ImageRow> {
        self.images.iter().find(|row| {
            row.key.submission_id == submission_id && row.key.image_id == image_id
        })
    }
}
