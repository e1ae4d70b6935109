use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::metadata::{DEFAULT_TEAM_NAMES, NO_VALID_SUBMISSIONS_MSG};
use crate::constants::titles::{ELLIPSIS, MIN_SHORTENED_LEN, SUFFIX_LEN};
use crate::errors::DatasetError;
use crate::types::{SubmissionId, TeamName, UserId};

/// One row of the submission-metadata CSV.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Submission id (the CSV's primary key).
    #[serde(rename = "ID")]
    pub id: SubmissionId,
    /// Raw title entered on the competition platform.
    #[serde(rename = "Title")]
    pub title: String,
    /// Platform account that uploaded the submission.
    #[serde(rename = "User")]
    pub user: UserId,
}

/// CSV-backed table of submission metadata, plus the static user-to-team
/// allow-list used to prefix display titles.
///
/// Accounts absent from the allow-list render with an empty team name,
/// which leaves the bare title.
#[derive(Clone, Debug)]
pub struct SubmissionDirectory {
    records: IndexMap<SubmissionId, SubmissionRecord>,
    team_names: HashMap<UserId, TeamName>,
}

impl SubmissionDirectory {
    /// Load the metadata table from a CSV with `ID`, `Title`, and `User`
    /// columns (extra columns are ignored).
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.is_file() {
            return Err(DatasetError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let mut reader = csv::Reader::from_path(path).map_err(|err| DatasetError::Malformed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let mut records = IndexMap::new();
        for row in reader.deserialize::<SubmissionRecord>() {
            let record = row.map_err(|err| DatasetError::Malformed {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
            records.insert(record.id.clone(), record);
        }
        let team_names = DEFAULT_TEAM_NAMES
            .iter()
            .map(|(user, team)| ((*user).to_string(), (*team).to_string()))
            .collect();
        Ok(Self {
            records,
            team_names,
        })
    }

    /// Add or override a team name for one account.
    pub fn with_team_name(mut self, user: impl Into<UserId>, team: impl Into<TeamName>) -> Self {
        self.team_names.insert(user.into(), team.into());
        self
    }

    /// Look up one submission's metadata row.
    pub fn get(&self, submission_id: &str) -> Option<&SubmissionRecord> {
        self.records.get(submission_id)
    }

    /// Number of submissions in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no submissions.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Team name for an account, empty when unmapped.
    pub fn team_name(&self, user: &str) -> &str {
        self.team_names.get(user).map(String::as_str).unwrap_or("")
    }

    /// Build the display title for a submission: `"{team} {title}"` when
    /// the owning account maps to a non-empty team name, the bare title
    /// otherwise. Shortening for narrow displays is [`shorten_title`]'s job.
    pub fn generate_title(&self, submission_id: &str) -> Result<String, DatasetError> {
        let record = self
            .get(submission_id)
            .ok_or_else(|| DatasetError::UnknownSubmission {
                submission_id: submission_id.to_string(),
            })?;
        let team = self.team_name(&record.user);
        if team.is_empty() {
            Ok(record.title.clone())
        } else {
            Ok(format!("{team} {}", record.title))
        }
    }
}

/// Truncate a title to at most `max_length` characters for display.
///
/// A trimmed title longer than `max_length` is rewritten as its first
/// `max_length - 18` characters, an ellipsis, and its last 15 characters.
/// Fails with `InvalidArgument` when `max_length` is below 20, the
/// smallest length that meaningfully fits prefix, marker, and suffix.
pub fn shorten_title(title: &str, max_length: usize) -> Result<String, DatasetError> {
    if max_length < MIN_SHORTENED_LEN {
        return Err(DatasetError::InvalidArgument(format!(
            "max_length must be at least {MIN_SHORTENED_LEN}, got {max_length}"
        )));
    }
    let trimmed = title.trim();
    let length = trimmed.chars().count();
    if length <= max_length {
        return Ok(trimmed.to_string());
    }
    let prefix_len = max_length - SUFFIX_LEN - ELLIPSIS.len();
    let prefix: String = trimmed.chars().take(prefix_len).collect();
    let suffix: String = trimmed.chars().skip(length - SUFFIX_LEN).collect();
    Ok(format!("{prefix}{ELLIPSIS}{suffix}"))
}

/// One row of the valid-submission CSV.
///
/// Task and subset are kept as raw CSV values so filtering with an
/// out-of-enumeration value matches nothing instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidSubmission {
    /// Task number the submission is valid for.
    pub task: u8,
    /// Subset name the submission is valid for.
    pub subset: String,
    /// The valid submission.
    pub submission_id: SubmissionId,
}

/// Load the valid-submission CSV (`task,subset,submission_id`), keeping
/// file order.
pub fn load_valid_submissions(path: &Path) -> Result<Vec<ValidSubmission>, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::Reader::from_path(path).map_err(|err| DatasetError::Malformed {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<ValidSubmission>() {
        rows.push(row.map_err(|err| DatasetError::Malformed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?);
    }
    Ok(rows)
}

/// Filter valid-submission rows by task and/or subset (an absent filter
/// places no restriction on that field), preserving file order.
///
/// An empty match is an expected outcome, not an error: it logs a warning
/// and returns an empty list.
pub fn filter_valid_submission_ids(
    rows: &[ValidSubmission],
    task: Option<u8>,
    subset: Option<&str>,
) -> Vec<SubmissionId> {
    let ids: Vec<SubmissionId> = rows
        .iter()
        .filter(|row| task.is_none_or(|wanted| row.task == wanted))
        .filter(|row| subset.is_none_or(|wanted| row.subset == wanted))
        .map(|row| row.submission_id.clone())
        .collect();
    if ids.is_empty() {
        warn!(task = ?task, subset = ?subset, NO_VALID_SUBMISSIONS_MSG);
    }
    ids
}
