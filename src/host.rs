//! Host capability surface: prompts, notifications, shell access, and the
//! pending commit message.
//!
//! The workflow state machine only talks to this trait, so it can run
//! against a terminal in production and a scripted fake in tests.

use std::path::PathBuf;
use std::process::Command;

use dialoguer::{Password, Select};
use tracing::debug;

use crate::error::HostError;

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Error,
}

/// Capabilities the workflow needs from its host.
pub trait Host {
    /// Prompt for a masked secret value. `None` means the user cancelled.
    fn prompt_secret(&self, prompt: &str) -> Result<Option<String>, HostError>;

    /// Present `items` for single selection, returning the chosen index.
    /// `None` means the user dismissed the picker.
    fn pick_one(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, HostError>;

    /// Show a one-line notification.
    fn notify(&self, level: Notice, message: &str);

    /// Execute a command string in the user's shell.
    fn run_command(&self, command: &str) -> Result<(), HostError>;

    /// Hand a command string to the user for manual review, without
    /// executing it.
    fn stage_command(&self, command: &str) -> Result<(), HostError>;

    /// Store a commit message as the pending message for the next commit,
    /// without committing.
    fn set_pending_message(&self, message: &str) -> Result<(), HostError>;
}

/// Build a `git commit` invocation carrying `message`, shell-quoted.
pub fn commit_command(message: &str) -> Result<String, HostError> {
    let quoted = shlex::try_quote(message).map_err(|_| HostError::UnquotableMessage)?;
    Ok(format!("git commit -m {quoted}"))
}

/// Terminal-backed host implementation.
pub struct TerminalHost {
    git_dir: Option<PathBuf>,
}

impl TerminalHost {
    /// `git_dir` is where the pending commit message lives; `None` when no
    /// repository is available.
    pub fn new(git_dir: Option<PathBuf>) -> Self {
        Self { git_dir }
    }
}

impl Host for TerminalHost {
    fn prompt_secret(&self, prompt: &str) -> Result<Option<String>, HostError> {
        // Prompt errors (ctrl-c, closed tty) read as cancellation.
        let entered = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .ok();
        Ok(entered)
    }

    fn pick_one(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, HostError> {
        if items.is_empty() {
            return Ok(None);
        }

        let choice = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .ok()
            .flatten();
        Ok(choice)
    }

    fn notify(&self, level: Notice, message: &str) {
        match level {
            Notice::Info => println!("{message}"),
            Notice::Error => eprintln!("{message}"),
        }
    }

    fn run_command(&self, command: &str) -> Result<(), HostError> {
        debug!(%command, "running shell command");

        let status = shell(command)
            .status()
            .map_err(|e| HostError::CommandSpawn {
                command: command.to_string(),
                source: e,
            })?;

        if !status.success() {
            return Err(HostError::CommandFailed {
                command: command.to_string(),
                status: status.to_string(),
            });
        }

        Ok(())
    }

    fn stage_command(&self, command: &str) -> Result<(), HostError> {
        println!("{command}");
        Ok(())
    }

    fn set_pending_message(&self, message: &str) -> Result<(), HostError> {
        let git_dir = self.git_dir.as_ref().ok_or(HostError::NoRepository)?;
        let path = git_dir.join("COMMIT_EDITMSG");

        std::fs::write(&path, format!("{message}\n")).map_err(HostError::PendingMessage)?;

        println!("Saved commit message to {}", path.display());
        println!("Commit with: git commit -eF {}", path.display());
        Ok(())
    }
}

/// Build a shell invocation for a literal command string.
fn shell(command: &str) -> Command {
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    }
}
