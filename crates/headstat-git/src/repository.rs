use std::collections::BTreeSet;
use std::path::Path;

use git2::{Commit, ErrorCode, Oid};
use tracing::debug;

use crate::diff::touched_paths;
use crate::{GitError, Reporter};

/// An opened repository together with its resolved HEAD.
///
/// HEAD is resolved once, when the repository is opened. Later changes to
/// the on-disk HEAD are not observed by an existing handle.
pub struct Repository {
    repo: git2::Repository,
    /// Short branch name, `None` when HEAD is detached
    branch: Option<String>,
    /// Commit HEAD peels to
    head: Oid,
}

impl Repository {
    /// Open the repository rooted exactly at `path`.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open(path).map_err(|e| open_error(e, path))?;
        Self::from_git2(repo)
    }

    /// Open the repository containing `path`, searching parent directories.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|e| open_error(e, path))?;
        Self::from_git2(repo)
    }

    fn from_git2(repo: git2::Repository) -> Result<Self, GitError> {
        let (branch, head) = {
            let head = match repo.head() {
                Ok(head) => head,
                Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                    return Err(GitError::NoCommits);
                }
                Err(e) => return Err(GitError::GitOperationFailed(e)),
            };

            let branch = if head.is_branch() {
                Some(String::from_utf8_lossy(head.shorthand_bytes()).into_owned())
            } else {
                None
            };

            (branch, head.peel_to_commit()?.id())
        };

        debug!(
            path = %repo.path().display(),
            branch = branch.as_deref().unwrap_or("(detached)"),
            head = %head,
            "Opened repository"
        );

        Ok(Self { repo, branch, head })
    }

    /// Commit id HEAD resolved to when the repository was opened.
    pub fn head_id(&self) -> Oid {
        self.head
    }

    /// Whether HEAD points directly at a commit rather than a branch.
    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }

    fn head_commit(&self) -> Result<Commit<'_>, GitError> {
        Ok(self.repo.find_commit(self.head)?)
    }
}

impl Reporter for Repository {
    fn branch(&self) -> String {
        self.branch.clone().unwrap_or_default()
    }

    fn files(&self) -> Result<Vec<String>, GitError> {
        let commit = self.head_commit()?;
        let tree = commit.tree()?;

        // Merge commits are compared against their first parent only
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        touched_paths(&self.repo, parent_tree.as_ref(), &tree)
    }

    fn message(&self) -> Result<String, GitError> {
        let commit = self.head_commit()?;
        Ok(String::from_utf8_lossy(commit.message_raw_bytes()).into_owned())
    }

    fn tags(&self) -> Result<Vec<String>, GitError> {
        let mut tags = BTreeSet::new();

        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;

            // Annotated tags peel through the tag object; tags of trees or
            // blobs never match HEAD
            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };
            if commit.id() != self.head {
                continue;
            }

            tags.insert(String::from_utf8_lossy(reference.shorthand_bytes()).into_owned());
        }

        debug!(count = tags.len(), head = %self.head, "Collected tags at HEAD");

        Ok(tags.into_iter().collect())
    }
}

fn open_error(e: git2::Error, path: &Path) -> GitError {
    if e.code() == ErrorCode::NotFound {
        GitError::NotARepo(path.display().to_string())
    } else {
        GitError::GitOperationFailed(e)
    }
}
