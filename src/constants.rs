/// Constants for the on-disk dataset layout convention.
pub mod layout {
    /// Default image root, relative to the dataset root.
    pub const DEFAULT_IMAGES_DIR: &str = "data/00-input/images";
    /// Default evaluation-result root, relative to the dataset root.
    pub const DEFAULT_EVALUATIONS_DIR: &str = "data/00-input/evaluations";
    /// Default participant-submission root, relative to the dataset root.
    pub const DEFAULT_SUBMISSIONS_DIR: &str = "data/00-input/submissions";
    /// Default ground-truth root, relative to the dataset root.
    pub const DEFAULT_GROUND_TRUTH_DIR: &str = "data/00-input/gt";
    /// Default submission-metadata CSV location, relative to the dataset root.
    pub const DEFAULT_SUBMISSIONS_METADATA_FILE: &str = "data/00-input/submissions.csv";
    /// Default valid-submission CSV location, relative to the dataset root.
    pub const DEFAULT_VALID_SUBMISSIONS_FILE: &str = "valid_submissions.csv";

    /// Split directory under each subset's image subdirectory.
    pub const TEST_SPLIT_DIR: &str = "test";
    /// Fixed file name of each subset's ground-truth document.
    pub const GROUND_TRUTH_FILENAME: &str = "test.json";
    /// Extension shared by evaluation and submission documents.
    pub const RESULT_EXTENSION: &str = "json";
    /// Prefix of task-numbered subdirectories (`t1` .. `t4`).
    pub const TASK_DIR_PREFIX: &str = "t";
    /// Prefix of subset-numbered subdirectories (`f1` .. `f3`).
    pub const SUBSET_DIR_PREFIX: &str = "f";
}

/// Metric column names used by the flattened evaluation tables.
pub mod metrics {
    /// Panoptic quality column.
    pub const COL_QUALITY: &str = "quality";
    /// Detection tightness column.
    pub const COL_TIGHTNESS: &str = "tightness";
    /// F-score column.
    pub const COL_FSCORE: &str = "fscore";
    /// Precision column.
    pub const COL_PRECISION: &str = "precision";
    /// Recall column.
    pub const COL_RECALL: &str = "recall";
    /// Character-level quality column (task 4 only).
    pub const COL_CHAR_QUALITY: &str = "char_quality";
    /// Character-level accuracy column (task 4 only).
    pub const COL_CHAR_ACCURACY: &str = "char_accuracy";

    /// Metric columns reported for every task, in table order.
    pub const BASE_COLUMNS: [&str; 5] = [
        COL_QUALITY,
        COL_TIGHTNESS,
        COL_FSCORE,
        COL_PRECISION,
        COL_RECALL,
    ];
    /// Extra columns prepended for tasks that score character predictions.
    pub const CHAR_COLUMNS: [&str; 2] = [COL_CHAR_QUALITY, COL_CHAR_ACCURACY];
}

/// Constants for display-title formatting.
pub mod titles {
    /// Marker inserted between the kept prefix and suffix of a long title.
    pub const ELLIPSIS: &str = "...";
    /// Characters of the original title kept after the ellipsis.
    pub const SUFFIX_LEN: usize = 15;
    /// Smallest `max_length` that leaves room for prefix, ellipsis, and suffix.
    pub const MIN_SHORTENED_LEN: usize = 20;
    /// Default display length used by reports.
    pub const DEFAULT_MAX_LEN: usize = 30;
}

/// Constants for the two metadata CSV schemas.
pub mod metadata {
    /// Primary-key column of the submission metadata CSV.
    pub const COL_ID: &str = "ID";
    /// Title column of the submission metadata CSV.
    pub const COL_TITLE: &str = "Title";
    /// Owning-account column of the submission metadata CSV.
    pub const COL_USER: &str = "User";

    /// Accounts with a fixed display team name. Organizer accounts map to an
    /// empty name so their reference runs keep a bare title.
    pub const DEFAULT_TEAM_NAMES: &[(&str, &str)] = &[
        ("user_9", ""), // MapText organizers
    ];

    /// Log message emitted when a valid-submission filter matches nothing.
    pub const NO_VALID_SUBMISSIONS_MSG: &str = "no valid submissions match the requested filters";
}
