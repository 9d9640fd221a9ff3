use std::collections::BTreeSet;

use git2::{Diff, DiffOptions, Tree};
use tracing::debug;

use crate::GitError;

/// Paths touched going from `parent` to `child`.
///
/// A `None` parent stands for the empty tree, so every file in `child`
/// counts as touched. Both sides of each delta are collected, which makes a
/// rename show up as its old and new path.
pub(crate) fn touched_paths(
    repo: &git2::Repository,
    parent: Option<&Tree<'_>>,
    child: &Tree<'_>,
) -> Result<Vec<String>, GitError> {
    let mut opts = DiffOptions::new();
    let diff = repo.diff_tree_to_tree(parent, Some(child), Some(&mut opts))?;

    let paths = collect_paths(&diff);

    debug!(
        deltas = diff.deltas().count(),
        paths = paths.len(),
        root = parent.is_none(),
        "Collected touched paths"
    );

    Ok(paths)
}

fn collect_paths(diff: &Diff<'_>) -> Vec<String> {
    let mut paths = BTreeSet::new();

    for delta in diff.deltas() {
        for file in [delta.old_file(), delta.new_file()] {
            if let Some(path) = file.path_bytes() {
                paths.insert(String::from_utf8_lossy(path).into_owned());
            }
        }
    }

    paths.into_iter().collect()
}
