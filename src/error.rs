//! Error types for mantis modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error(
        "git binary not found on PATH. Install git or make sure it is reachable from your shell."
    )]
    NotInstalled,

    #[error("Failed to read repository status: {0}")]
    Status(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    Diff(#[source] git2::Error),
}

/// Errors from reading or writing the user config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine a config directory for this platform")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml_edit::TomlError,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from obtaining or persisting the API credential.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors from the completions API client.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// HTTP 429: the request quota or credential validity was exceeded.
    /// Distinguished from other failures so the caller can refresh the
    /// credential and retry.
    #[error("Completions API rate limited the request (HTTP 429)")]
    RateLimited,

    #[error("Completions API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Completions request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Completions API returned an unexpected response: {0}")]
    InvalidResponse(String),
}

/// Errors from the suggestion engine.
#[derive(Error, Debug)]
pub enum SuggestionError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Errors from the host capability surface (prompts, notifications, shell).
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Failed to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: String },

    #[error("No git repository available to hold the pending commit message")]
    NoRepository,

    #[error("Failed to write pending commit message: {0}")]
    PendingMessage(#[source] std::io::Error),

    #[error("Commit message contains characters that cannot be shell-quoted")]
    UnquotableMessage,
}

/// Errors that abort a workflow invocation.
///
/// Validation gates (unstaged changes, empty diff, missing credential,
/// cancelled selection) are not errors; they surface as
/// [`crate::workflow::Outcome`] values instead.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Suggestion(#[from] SuggestionError),

    #[error(transparent)]
    Host(#[from] HostError),
}
