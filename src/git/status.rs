//! Working tree status inspection: the unstaged-changes gate.

use git2::{Repository, Status, StatusOptions};

use crate::error::GitError;

/// Index-side state of a file, as git's short status would report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// Staged new file (`A`).
    Added,
    /// Staged modification (`M`).
    Modified,
    /// Staged deletion (`D`).
    Deleted,
    /// Staged rename (`R`).
    Renamed,
    /// Staged type change (`T`).
    TypeChange,
    /// Untracked file (`?`): nothing in the index at all.
    Untracked,
    /// Tracked file with working-tree changes and a clean index (` `).
    Unstaged,
}

impl IndexState {
    /// Whether this state counts as cleanly staged.
    ///
    /// Only added and modified index entries pass the gate. Anything else
    /// (untracked, unstaged edits, staged deletions/renames) blocks a
    /// suggestion run. This is deliberately conservative: a file that is
    /// not fully staged as a plain add or edit means the index does not
    /// reflect what the user intends to commit.
    pub fn is_cleanly_staged(self) -> bool {
        matches!(self, IndexState::Added | IndexState::Modified)
    }
}

/// Derive the index-side state from a git2 status bitfield.
pub(crate) fn index_state(status: Status) -> IndexState {
    if status.contains(Status::INDEX_NEW) {
        IndexState::Added
    } else if status.contains(Status::INDEX_MODIFIED) {
        IndexState::Modified
    } else if status.contains(Status::INDEX_DELETED) {
        IndexState::Deleted
    } else if status.contains(Status::INDEX_RENAMED) {
        IndexState::Renamed
    } else if status.contains(Status::INDEX_TYPECHANGE) {
        IndexState::TypeChange
    } else if status.contains(Status::WT_NEW) {
        IndexState::Untracked
    } else {
        IndexState::Unstaged
    }
}

/// Check whether any file in the working tree is not cleanly staged.
///
/// Returns true if at least one status entry has an index state outside
/// {added, modified}. Untracked files count.
pub fn has_unstaged_changes(repo: &Repository) -> Result<bool, GitError> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true).recurse_untracked_dirs(true);

    let statuses = repo.statuses(Some(&mut opts)).map_err(GitError::Status)?;

    Ok(statuses
        .iter()
        .any(|entry| !index_state(entry.status()).is_cleanly_staged()))
}
