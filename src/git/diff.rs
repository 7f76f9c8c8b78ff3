//! Staged diff collection using git2.

use git2::{DiffFormat, ErrorCode, Repository, Tree};

use crate::error::GitError;

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// `Ok(Some(tree))` for repos with a valid HEAD, or `Err(GitError::Diff)` for
/// real errors (corrupt HEAD, permission issues, missing objects).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::Diff(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::Diff)?;
    Ok(Some(tree))
}

/// Collect the unified diff of the index against the last commit.
///
/// Only staged content is included. Returns an empty string when nothing
/// is staged.
pub fn staged_diff(repo: &Repository) -> Result<String, GitError> {
    let head_tree = resolve_head_tree(repo)?;

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::Diff)?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let content = std::str::from_utf8(line.content()).unwrap_or("");

        // Include the origin character so hunk lines keep their +/- markers
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(content);

        true
    })
    .map_err(GitError::Diff)?;

    Ok(text)
}
