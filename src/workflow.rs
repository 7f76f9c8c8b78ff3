//! The suggestion workflow: a strictly linear sequence from staged changes
//! to a dispatched commit message.
//!
//! Every gate is a one-way abort surfaced as an [`Outcome`]; there are no
//! back-transitions. Validation aborts are clean terminations, not errors.

use tracing::debug;

use crate::config::{ConfigStore, CredentialStore};
use crate::error::WorkflowError;
use crate::git::WorkTree;
use crate::host::{Host, Notice, commit_command};
use crate::openai::CompletionBackend;
use crate::suggest::{SuggestionEngine, strip_rank};

/// How the chosen message is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowMode {
    /// Write the message as the pending commit message without committing.
    Suggest,
    /// Create the commit directly.
    Commit,
    /// Ask which action to take after a message is chosen.
    Interactive,
}

/// Terminal outcome of one workflow invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Chosen message written as the pending commit message.
    Applied,
    /// Commit created with the chosen message.
    Committed,
    /// Commit command handed to the user without executing.
    PlacedInShell,
    /// Aborted: the working tree has files that are not cleanly staged.
    UnstagedChanges,
    /// Aborted: no API credential was available.
    NoCredential,
    /// Aborted: nothing staged to describe.
    EmptyDiff,
    /// Aborted: the engine produced no candidates.
    NoSuggestions,
    /// Aborted: the user dismissed a selection.
    NoSelection,
}

pub struct Workflow<'a, C: ConfigStore, B: CompletionBackend + ?Sized> {
    worktree: &'a WorkTree,
    credentials: &'a mut CredentialStore<C>,
    engine: SuggestionEngine<'a, B>,
    host: &'a dyn Host,
    mode: WorkflowMode,
    count: u32,
}

impl<'a, C: ConfigStore, B: CompletionBackend + ?Sized> Workflow<'a, C, B> {
    pub fn new(
        worktree: &'a WorkTree,
        credentials: &'a mut CredentialStore<C>,
        backend: &'a B,
        host: &'a dyn Host,
        mode: WorkflowMode,
        count: u32,
    ) -> Self {
        Self {
            worktree,
            credentials,
            engine: SuggestionEngine::new(backend),
            host,
            mode,
            count,
        }
    }

    /// Run the workflow to a terminal outcome.
    pub async fn run(&mut self) -> Result<Outcome, WorkflowError> {
        // Gate 1: everything must be staged before a request goes out.
        if self.worktree.has_unstaged_changes()? {
            self.host.run_command("git status")?;
            self.host.notify(
                Notice::Info,
                "Stage your changes with `git add` before requesting suggestions.",
            );
            return Ok(Outcome::UnstagedChanges);
        }

        // Gate 2: an API credential must be available.
        let Some(credential) = self.credentials.get_credential(self.host, false)? else {
            self.host.notify(
                Notice::Error,
                "An OpenAI API key is required to generate suggestions.",
            );
            return Ok(Outcome::NoCredential);
        };

        // Gate 3: there must be staged content to describe.
        let diff = self.worktree.staged_diff()?;
        if diff.trim().is_empty() {
            self.host
                .notify(Notice::Info, "No staged changes found. Nothing to suggest.");
            return Ok(Outcome::EmptyDiff);
        }

        let Some(candidates) = self
            .engine
            .generate(self.credentials, self.host, credential, &diff, self.count)
            .await?
        else {
            return Ok(Outcome::NoSuggestions);
        };

        if candidates.is_empty() {
            return Ok(Outcome::NoSuggestions);
        }

        let labels: Vec<String> = candidates.iter().map(|c| c.label()).collect();
        let Some(choice) = self.host.pick_one("Select a commit message", &labels)? else {
            return Ok(Outcome::NoSelection);
        };

        let message = strip_rank(&labels[choice]);
        debug!(%message, mode = ?self.mode, "dispatching chosen message");
        self.dispatch(&message)
    }

    fn dispatch(&self, message: &str) -> Result<Outcome, WorkflowError> {
        match self.mode {
            WorkflowMode::Suggest => {
                self.host.set_pending_message(message)?;
                Ok(Outcome::Applied)
            }
            WorkflowMode::Commit => {
                self.host.run_command(&commit_command(message)?)?;
                Ok(Outcome::Committed)
            }
            WorkflowMode::Interactive => {
                let actions = vec![
                    "Save as pending commit message".to_string(),
                    "Commit now".to_string(),
                    "Print the git commit command".to_string(),
                ];

                match self
                    .host
                    .pick_one("What should happen with this message?", &actions)?
                {
                    Some(0) => {
                        self.host.set_pending_message(message)?;
                        Ok(Outcome::Applied)
                    }
                    Some(1) => {
                        self.host.run_command(&commit_command(message)?)?;
                        Ok(Outcome::Committed)
                    }
                    Some(2) => {
                        self.host.stage_command(&commit_command(message)?)?;
                        Ok(Outcome::PlacedInShell)
                    }
                    _ => Ok(Outcome::NoSelection),
                }
            }
        }
    }
}
