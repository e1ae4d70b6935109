use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DatasetError;

/// Named slice of the benchmark dataset.
///
/// Each subset maps bidirectionally to the small integer used in
/// subset-numbered directory names, and carries its own image
/// subdirectory and image file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    /// David Rumsey historical map collection.
    Rumsey,
    /// IGN French national mapping agency imagery.
    Ign,
    /// Taiwan historical map imagery.
    Twh,
}

impl Subset {
    /// Canonical iteration order over all subsets.
    pub const ALL: [Subset; 3] = [Subset::Rumsey, Subset::Ign, Subset::Twh];

    /// Parse a subset name, rejecting anything outside the enumeration.
    pub fn from_name(name: &str) -> Result<Self, DatasetError> {
        match name {
            "rumsey" => Ok(Subset::Rumsey),
            "ign" => Ok(Subset::Ign),
            "twh" => Ok(Subset::Twh),
            other => Err(DatasetError::InvalidSubset {
                subset: other.to_string(),
            }),
        }
    }

    /// Resolve a directory index (`1..=3`) back to its subset.
    pub fn from_index(index: u8) -> Result<Self, DatasetError> {
        match index {
            1 => Ok(Subset::Rumsey),
            2 => Ok(Subset::Ign),
            3 => Ok(Subset::Twh),
            other => Err(DatasetError::InvalidSubset {
                subset: other.to_string(),
            }),
        }
    }

    /// Canonical subset name as used in ground-truth paths and CSV rows.
    pub const fn name(self) -> &'static str {
        match self {
            Subset::Rumsey => "rumsey",
            Subset::Ign => "ign",
            Subset::Twh => "twh",
        }
    }

    /// Small integer used in `f{index}` directory names.
    pub const fn index(self) -> u8 {
        match self {
            Subset::Rumsey => 1,
            Subset::Ign => 2,
            Subset::Twh => 3,
        }
    }

    /// Subdirectory of the image root holding this subset's images.
    pub const fn image_subdir(self) -> &'static str {
        match self {
            Subset::Rumsey => "rumsey",
            Subset::Ign => "ign25",
            Subset::Twh => "tw25",
        }
    }

    /// The one file extension this subset's images use.
    pub const fn image_extension(self) -> &'static str {
        match self {
            Subset::Rumsey => "png",
            Subset::Ign | Subset::Twh => "jpg",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subset {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subset::from_name(s)
    }
}

/// One of the benchmark's four evaluation problems, validated at
/// construction so an out-of-range id can never reach a path lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TaskId(u8);

impl TaskId {
    /// Canonical iteration order over all tasks.
    pub const ALL: [TaskId; 4] = [TaskId(1), TaskId(2), TaskId(3), TaskId(4)];

    /// Validate a task id, rejecting anything outside `1..=4`.
    pub fn new(index: u8) -> Result<Self, DatasetError> {
        if (1..=4).contains(&index) {
            Ok(TaskId(index))
        } else {
            Err(DatasetError::InvalidTask { task: index })
        }
    }

    /// The raw task number used in `t{index}` directory names.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Whether this task's evaluations carry the character-level metric
    /// pair. Only task 4 does; task 3 scores detection conditioned on
    /// perfect text prediction and reports no character metrics.
    pub const fn has_char_metrics(self) -> bool {
        self.0 == 4
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for TaskId {
    type Error = DatasetError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TaskId::new(value)
    }
}

impl From<TaskId> for u8 {
    fn from(task: TaskId) -> Self {
        task.0
    }
}
