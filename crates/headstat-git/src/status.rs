use serde::{Deserialize, Serialize};

use crate::GitError;

/// The queries a status report is assembled from
pub trait Reporter {
    /// Short branch name, or an empty string when HEAD is detached
    fn branch(&self) -> String;

    /// Sorted, de-duplicated paths touched by the HEAD commit
    fn files(&self) -> Result<Vec<String>, GitError>;

    /// The HEAD commit message, untrimmed
    fn message(&self) -> Result<String, GitError>;

    /// Sorted, de-duplicated tag names pointing at HEAD
    fn tags(&self) -> Result<Vec<String>, GitError>;
}

/// Status of the HEAD commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub branch: String,
    pub files: Vec<String>,
    pub message: String,
    pub tags: Vec<String>,
}

impl Status {
    pub fn is_detached(&self) -> bool {
        self.branch.is_empty()
    }

    /// First line of the commit message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Build a [`Status`] by asking `reporter` for each field in turn.
pub fn report<R: Reporter + ?Sized>(reporter: &R) -> Result<Status, GitError> {
    Ok(Status {
        branch: reporter.branch(),
        files: reporter.files()?,
        message: reporter.message()?,
        tags: reporter.tags()?,
    })
}
