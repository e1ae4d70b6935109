use std::path::{Path, PathBuf};

use crate::constants::layout::{
    DEFAULT_EVALUATIONS_DIR, DEFAULT_GROUND_TRUTH_DIR, DEFAULT_IMAGES_DIR,
    DEFAULT_SUBMISSIONS_DIR, DEFAULT_SUBMISSIONS_METADATA_FILE, DEFAULT_VALID_SUBMISSIONS_FILE,
    GROUND_TRUTH_FILENAME, RESULT_EXTENSION, SUBSET_DIR_PREFIX, TASK_DIR_PREFIX, TEST_SPLIT_DIR,
};
use crate::dataset::{Subset, TaskId};

/// Directory-naming convention of a dataset tree.
///
/// All path computation is pure: nothing here touches the filesystem, and
/// identifiers are already validated by construction ([`TaskId`]/[`Subset`]),
/// so resolution cannot fail.
///
/// Each location defaults to the conventional spot under the dataset root
/// and can be overridden individually; an absolute override replaces the
/// root entirely.
#[derive(Clone, Debug)]
pub struct DataLayout {
    root: PathBuf,
    images: PathBuf,
    evaluations: PathBuf,
    submissions: PathBuf,
    ground_truth: PathBuf,
    submissions_metadata: PathBuf,
    valid_submissions: PathBuf,
}

impl DataLayout {
    /// Create a layout with conventional locations under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: PathBuf::from(DEFAULT_IMAGES_DIR),
            evaluations: PathBuf::from(DEFAULT_EVALUATIONS_DIR),
            submissions: PathBuf::from(DEFAULT_SUBMISSIONS_DIR),
            ground_truth: PathBuf::from(DEFAULT_GROUND_TRUTH_DIR),
            submissions_metadata: PathBuf::from(DEFAULT_SUBMISSIONS_METADATA_FILE),
            valid_submissions: PathBuf::from(DEFAULT_VALID_SUBMISSIONS_FILE),
        }
    }

    /// Override the image root.
    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images = dir.into();
        self
    }

    /// Override the evaluation-result root.
    pub fn with_evaluations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.evaluations = dir.into();
        self
    }

    /// Override the participant-submission root.
    pub fn with_submissions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.submissions = dir.into();
        self
    }

    /// Override the ground-truth root.
    pub fn with_ground_truth_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ground_truth = dir.into();
        self
    }

    /// Override the submission-metadata CSV location.
    pub fn with_submissions_metadata(mut self, file: impl Into<PathBuf>) -> Self {
        self.submissions_metadata = file.into();
        self
    }

    /// Override the valid-submission CSV location.
    pub fn with_valid_submissions(mut self, file: impl Into<PathBuf>) -> Self {
        self.valid_submissions = file.into();
        self
    }

    /// The dataset root every relative location is joined under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root directory of all subset image trees.
    pub fn images_root(&self) -> PathBuf {
        self.root.join(&self.images)
    }

    /// Directory holding one subset's test-split images.
    pub fn images_dir(&self, subset: Subset) -> PathBuf {
        self.images_root()
            .join(subset.image_subdir())
            .join(TEST_SPLIT_DIR)
    }

    /// Resolve an image reference (as produced by the lister) to a path.
    pub fn image_path(&self, image_id: &str) -> PathBuf {
        self.images_root().join(image_id)
    }

    /// Directory holding one `(task, subset)` slice of evaluation results.
    pub fn evaluations_dir(&self, task: TaskId, subset: Subset) -> PathBuf {
        task_subset_dir(&self.root.join(&self.evaluations), task, subset)
    }

    /// Evaluation document for one submission.
    pub fn evaluation_path(&self, task: TaskId, subset: Subset, submission_id: &str) -> PathBuf {
        self.evaluations_dir(task, subset)
            .join(format!("{submission_id}.{RESULT_EXTENSION}"))
    }

    /// Directory holding one `(task, subset)` slice of raw submissions.
    pub fn submissions_dir(&self, task: TaskId, subset: Subset) -> PathBuf {
        task_subset_dir(&self.root.join(&self.submissions), task, subset)
    }

    /// Raw submission document for one submission.
    pub fn submission_path(&self, task: TaskId, subset: Subset, submission_id: &str) -> PathBuf {
        self.submissions_dir(task, subset)
            .join(format!("{submission_id}.{RESULT_EXTENSION}"))
    }

    /// Ground-truth document for one subset.
    pub fn ground_truth_path(&self, subset: Subset) -> PathBuf {
        self.root
            .join(&self.ground_truth)
            .join(subset.name())
            .join(GROUND_TRUTH_FILENAME)
    }

    /// The submission-metadata CSV.
    pub fn submissions_metadata_path(&self) -> PathBuf {
        self.root.join(&self.submissions_metadata)
    }

    /// The valid-submission CSV.
    pub fn valid_submissions_path(&self) -> PathBuf {
        self.root.join(&self.valid_submissions)
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

fn task_subset_dir(base: &Path, task: TaskId, subset: Subset) -> PathBuf {
    base.join(format!("{TASK_DIR_PREFIX}{}", task.index()))
        .join(format!("{SUBSET_DIR_PREFIX}{}", subset.index()))
}
