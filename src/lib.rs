//! mantis - A CLI tool that suggests commit messages for staged changes
//! using OpenAI completions.
//!
//! # Overview
//!
//! mantis reads the staged diff, asks the completions API for a handful of
//! candidate messages, deduplicates and ranks them, presents them for
//! selection, and dispatches the choice: pending commit message, direct
//! commit, or a printed `git commit` command.

pub mod config;
pub mod error;
pub mod git;
pub mod host;
pub mod openai;
pub mod suggest;
pub mod workflow;

// Re-export commonly used types
pub use config::{ConfigStore, Credential, CredentialStore, FileConfig};
pub use error::{
    CompletionError, ConfigError, CredentialError, GitError, HostError, SuggestionError,
    WorkflowError,
};
pub use git::WorkTree;
pub use host::{Host, Notice, TerminalHost};
pub use openai::{CompletionBackend, CompletionClient};
pub use suggest::{SuggestionCandidate, SuggestionEngine};
pub use workflow::{Outcome, Workflow, WorkflowMode};
