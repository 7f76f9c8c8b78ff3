//! Git operations using git2-rs.

pub mod diff;
pub mod status;

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

pub use status::{IndexState, has_unstaged_changes};

/// Check that the git binary is reachable on PATH.
///
/// The suggestion workflow shells out for `git status` and `git commit`,
/// so a missing binary is caught up front instead of mid-flow.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)?;
    Ok(())
}

/// Read-only view of the working tree's staged changes.
///
/// Holds `None` when no repository is found, in which case both queries
/// fail soft: no unstaged changes, empty diff.
pub struct WorkTree {
    repo: Option<Repository>,
}

impl WorkTree {
    /// Discover the repository containing `path`, walking up parent
    /// directories the way git itself does.
    pub fn discover(path: &Path) -> Self {
        let repo = Repository::discover(path).ok();
        if repo.is_none() {
            debug!("no git repository found at {}", path.display());
        }
        Self { repo }
    }

    /// Path to the `.git` directory, if a repository was found.
    pub fn git_dir(&self) -> Option<PathBuf> {
        self.repo.as_ref().map(|r| r.path().to_path_buf())
    }

    /// Whether any file in the working tree is not cleanly staged.
    ///
    /// Returns false when no repository is available.
    pub fn has_unstaged_changes(&self) -> Result<bool, GitError> {
        match &self.repo {
            Some(repo) => status::has_unstaged_changes(repo),
            None => Ok(false),
        }
    }

    /// The unified diff of staged changes against the last commit.
    ///
    /// Returns an empty string when no repository is available.
    pub fn staged_diff(&self) -> Result<String, GitError> {
        match &self.repo {
            Some(repo) => diff::staged_diff(repo),
            None => Ok(String::new()),
        }
    }
}
