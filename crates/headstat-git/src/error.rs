use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepo(String),

    #[error("No commits in repository: HEAD reference not found")]
    NoCommits,

    #[error("Git operation failed: {0}")]
    GitOperationFailed(#[from] git2::Error),
}
