use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use tracing::debug;
use walkdir::WalkDir;

use crate::constants::layout::RESULT_EXTENSION;
use crate::dataset::{Subset, TaskId};
use crate::errors::DatasetError;
use crate::layout::DataLayout;
use crate::metadata::{
    SubmissionDirectory, ValidSubmission, filter_valid_submission_ids, load_valid_submissions,
};
use crate::records::{EvaluationDocument, GroundTruthEntry};
use crate::tables::EvaluationTables;
use crate::types::{ImageId, SubmissionId, TeamName, UserId};

/// Cache key for one memoized directory listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum ListingKey {
    Images(Subset),
    Evaluations(TaskId, Subset),
    Submissions(TaskId, Subset),
}

/// Read-only session over one dataset tree.
///
/// The catalog owns the [`DataLayout`] plus all memoization: directory
/// listings, ground-truth parses, and the two metadata CSVs are each
/// computed at most once per argument tuple and shared via `Arc`. Nothing
/// is ever invalidated, because the backing files are immutable for the
/// life of an analysis session. Everything else is read fresh from disk
/// on every call.
pub struct DatasetCatalog {
    layout: DataLayout,
    team_names: Vec<(UserId, TeamName)>,
    listings: RwLock<HashMap<ListingKey, Arc<Vec<String>>>>,
    ground_truth: RwLock<HashMap<Subset, Arc<Vec<GroundTruthEntry>>>>,
    submissions_meta: RwLock<Option<Arc<SubmissionDirectory>>>,
    valid_submissions: RwLock<Option<Arc<Vec<ValidSubmission>>>>,
}

impl DatasetCatalog {
    /// Create a catalog over `layout` with empty caches.
    pub fn new(layout: DataLayout) -> Self {
        Self {
            layout,
            team_names: Vec::new(),
            listings: RwLock::new(HashMap::new()),
            ground_truth: RwLock::new(HashMap::new()),
            submissions_meta: RwLock::new(None),
            valid_submissions: RwLock::new(None),
        }
    }

    /// Add a team name applied when the metadata table is first loaded.
    pub fn with_team_name(mut self, user: impl Into<UserId>, team: impl Into<TeamName>) -> Self {
        self.team_names.push((user.into(), team.into()));
        self
    }

    /// The layout this catalog resolves paths with.
    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// List one subset's available images as sorted image references
    /// (paths relative to the image root). Memoized per subset.
    pub fn list_images(&self, subset: Subset) -> Result<Arc<Vec<ImageId>>, DatasetError> {
        self.cached_listing(ListingKey::Images(subset), || {
            let images_root = self.layout.images_root();
            let dir = self.layout.images_dir(subset);
            sorted_files(&dir, subset.image_extension())
                .iter()
                .map(|path| relative_id(&images_root, path))
                .collect()
        })
    }

    /// List the submission ids with an evaluation result for one
    /// `(task, subset)` slice, sorted. Memoized per argument pair.
    pub fn list_evaluations(
        &self,
        task: TaskId,
        subset: Subset,
    ) -> Result<Arc<Vec<SubmissionId>>, DatasetError> {
        self.cached_listing(ListingKey::Evaluations(task, subset), || {
            file_stems(&self.layout.evaluations_dir(task, subset))
        })
    }

    /// List the submission ids with a raw submission for one
    /// `(task, subset)` slice, sorted. Memoized per argument pair.
    pub fn list_submissions(
        &self,
        task: TaskId,
        subset: Subset,
    ) -> Result<Arc<Vec<SubmissionId>>, DatasetError> {
        self.cached_listing(ListingKey::Submissions(task, subset), || {
            file_stems(&self.layout.submissions_dir(task, subset))
        })
    }

    /// Load one submission's evaluation document, fresh from disk.
    pub fn load_evaluation(
        &self,
        task: TaskId,
        subset: Subset,
        submission_id: &str,
    ) -> Result<EvaluationDocument, DatasetError> {
        read_json(&self.layout.evaluation_path(task, subset, submission_id))
    }

    /// Load one raw submission document, fresh from disk. Submission
    /// payloads are participant predictions with no fixed schema, so the
    /// parsed JSON is returned as-is.
    pub fn load_submission(
        &self,
        task: TaskId,
        subset: Subset,
        submission_id: &str,
    ) -> Result<serde_json::Value, DatasetError> {
        read_json(&self.layout.submission_path(task, subset, submission_id))
    }

    /// One subset's ground-truth annotations. Parsed once per subset and
    /// shared; ground truth is immutable input.
    pub fn ground_truth(
        &self,
        subset: Subset,
    ) -> Result<Arc<Vec<GroundTruthEntry>>, DatasetError> {
        if let Some(cached) = self
            .ground_truth
            .read()
            .expect("ground truth cache poisoned")
            .get(&subset)
        {
            return Ok(Arc::clone(cached));
        }
        let path = self.layout.ground_truth_path(subset);
        let entries: Vec<GroundTruthEntry> = read_json(&path)?;
        debug!(subset = %subset, entries = entries.len(), "loaded ground truth");
        let entries = Arc::new(entries);
        let mut cache = self
            .ground_truth
            .write()
            .expect("ground truth cache poisoned");
        Ok(Arc::clone(cache.entry(subset).or_insert(entries)))
    }

    /// Sorted image references annotated in one subset's ground truth.
    pub fn ground_truth_image_ids(&self, subset: Subset) -> Result<Vec<ImageId>, DatasetError> {
        let mut ids: Vec<ImageId> = self
            .ground_truth(subset)?
            .iter()
            .map(|entry| entry.image.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Images present on disk but absent from the ground truth, in
    /// listing order.
    pub fn missing_images(&self, subset: Subset) -> Result<Vec<ImageId>, DatasetError> {
        let ground_truth = self.ground_truth(subset)?;
        let annotated: HashSet<&str> = ground_truth
            .iter()
            .map(|entry| entry.image.as_str())
            .collect();
        Ok(self
            .list_images(subset)?
            .iter()
            .filter(|image_id| !annotated.contains(image_id.as_str()))
            .cloned()
            .collect())
    }

    /// Open an image file by its reference. No decoding happens here;
    /// callers hand the file to whatever image stack they use.
    pub fn open_image(&self, image_id: &str) -> Result<fs::File, DatasetError> {
        let path = self.layout.image_path(image_id);
        if !path.is_file() {
            return Err(DatasetError::NotFound { path });
        }
        Ok(fs::File::open(path)?)
    }

    /// Build the two flattened tables from every evaluation in one
    /// `(task, subset)` slice.
    pub fn evaluation_tables(
        &self,
        task: TaskId,
        subset: Subset,
    ) -> Result<EvaluationTables, DatasetError> {
        self.evaluation_tables_filtered(task, subset, |_| true)
    }

    /// Build the two flattened tables from the evaluations whose
    /// submission id passes `keep`, preserving the lister's sort order.
    ///
    /// Any per-document failure aborts the whole build; callers wanting
    /// resilience should pre-filter the id list.
    pub fn evaluation_tables_filtered<F>(
        &self,
        task: TaskId,
        subset: Subset,
        mut keep: F,
    ) -> Result<EvaluationTables, DatasetError>
    where
        F: FnMut(&str) -> bool,
    {
        let submission_ids = self.list_evaluations(task, subset)?;
        let mut tables = EvaluationTables::new(task, subset);
        for submission_id in submission_ids.iter().filter(|id| keep(id)) {
            let document = self.load_evaluation(task, subset, submission_id)?;
            tables.push_document(submission_id, document);
        }
        Ok(tables)
    }

    /// Build the two flattened tables restricted to the valid-submission
    /// list for this `(task, subset)` slice.
    pub fn valid_evaluation_tables(
        &self,
        task: TaskId,
        subset: Subset,
    ) -> Result<EvaluationTables, DatasetError> {
        let valid = self.list_valid_submission_ids(Some(task.index()), Some(subset.name()))?;
        self.evaluation_tables_filtered(task, subset, |id| valid.iter().any(|v| v == id))
    }

    /// The submission-metadata table, loaded once per catalog with any
    /// [`with_team_name`](Self::with_team_name) overrides applied.
    pub fn submissions_metadata(&self) -> Result<Arc<SubmissionDirectory>, DatasetError> {
        if let Some(cached) = self
            .submissions_meta
            .read()
            .expect("metadata cache poisoned")
            .as_ref()
        {
            return Ok(Arc::clone(cached));
        }
        let mut directory = SubmissionDirectory::load(&self.layout.submissions_metadata_path())?;
        for (user, team) in &self.team_names {
            directory = directory.with_team_name(user.clone(), team.clone());
        }
        let directory = Arc::new(directory);
        let mut cache = self
            .submissions_meta
            .write()
            .expect("metadata cache poisoned");
        Ok(Arc::clone(cache.get_or_insert(directory)))
    }

    /// Display title for a submission, team-prefixed when its account
    /// maps to a team name.
    pub fn submission_title(&self, submission_id: &str) -> Result<String, DatasetError> {
        self.submissions_metadata()?.generate_title(submission_id)
    }

    /// Submission ids from the valid-submission list matching the given
    /// filters (an absent filter places no restriction), in file order.
    /// An empty match warns and returns an empty list.
    ///
    /// Filters are raw CSV values on purpose: asking for task `99` is an
    /// expected no-match, not an invalid argument.
    pub fn list_valid_submission_ids(
        &self,
        task: Option<u8>,
        subset: Option<&str>,
    ) -> Result<Vec<SubmissionId>, DatasetError> {
        let rows = self.valid_submissions()?;
        Ok(filter_valid_submission_ids(&rows, task, subset))
    }

    fn valid_submissions(&self) -> Result<Arc<Vec<ValidSubmission>>, DatasetError> {
        if let Some(cached) = self
            .valid_submissions
            .read()
            .expect("valid submission cache poisoned")
            .as_ref()
        {
            return Ok(Arc::clone(cached));
        }
        let rows = Arc::new(load_valid_submissions(
            &self.layout.valid_submissions_path(),
        )?);
        let mut cache = self
            .valid_submissions
            .write()
            .expect("valid submission cache poisoned");
        Ok(Arc::clone(cache.get_or_insert(rows)))
    }

    fn cached_listing<F>(
        &self,
        key: ListingKey,
        list: F,
    ) -> Result<Arc<Vec<String>>, DatasetError>
    where
        F: FnOnce() -> Vec<String>,
    {
        if let Some(cached) = self
            .listings
            .read()
            .expect("listing cache poisoned")
            .get(&key)
        {
            return Ok(Arc::clone(cached));
        }
        let listed = Arc::new(list());
        debug!(key = ?key, entries = listed.len(), "listed dataset directory");
        let mut cache = self.listings.write().expect("listing cache poisoned");
        Ok(Arc::clone(cache.entry(key).or_insert(listed)))
    }
}

/// Lexicographically sorted files with `extension` directly under `dir`.
/// A missing directory lists as empty, matching glob semantics.
fn sorted_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extension))
        .collect();
    files.sort();
    files
}

/// Sorted file stems of the result documents directly under `dir`.
fn file_stems(dir: &Path) -> Vec<String> {
    sorted_files(dir, RESULT_EXTENSION)
        .iter()
        .filter_map(|path| path.file_stem())
        .filter_map(|stem| stem.to_str())
        .map(str::to_string)
        .collect()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Forward-slashed path of `path` relative to `root`, used as the stable
/// image reference across platforms.
fn relative_id(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|component| component.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let body = fs::read_to_string(path)?;
    serde_json::from_str(&body).map_err(|err| DatasetError::Malformed {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
