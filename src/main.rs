//! mantis - CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mantis::config::{CredentialStore, FileConfig};
use mantis::git::{WorkTree, check_git_installed};
use mantis::host::TerminalHost;
use mantis::openai::{CompletionClient, DEFAULT_MODEL};
use mantis::workflow::{Workflow, WorkflowMode};

/// Default number of completions to request.
const DEFAULT_COUNT: u32 = 5;

/// Suggest commit messages for staged changes using OpenAI completions.
#[derive(Parser, Debug)]
#[command(name = "mantis")]
#[command(about = "Suggest commit messages for staged changes using OpenAI completions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Number of candidate messages to request
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
    count: u32,

    /// Completions model (overrides the config file)
    #[arg(long)]
    model: Option<String>,

    /// Completions API base URL (proxies, self-hosted gateways)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save the chosen message as the pending commit message without committing
    Suggest,
    /// Create the commit directly with the chosen message
    Commit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Step 1: Check prerequisites
    check_git_installed().context("git is required to run mantis")?;

    // Step 2: Load configuration
    let config = match cli.config {
        Some(path) => FileConfig::load(path),
        None => FileConfig::load_default(),
    }
    .context("Failed to load configuration")?;

    let model = cli
        .model
        .or_else(|| config.model())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    debug!(%model, "using completions model");

    // Step 3: Wire up collaborators
    let worktree = WorkTree::discover(Path::new("."));
    let host = TerminalHost::new(worktree.git_dir());

    let mut client = CompletionClient::new(model);
    if let Some(url) = cli.api_url {
        client = client.with_base_url(url);
    }

    let mut credentials = CredentialStore::new(config);

    let mode = match cli.command {
        Some(Command::Suggest) => WorkflowMode::Suggest,
        Some(Command::Commit) => WorkflowMode::Commit,
        None => WorkflowMode::Interactive,
    };

    // Step 4: Run the workflow to a terminal outcome
    let mut workflow = Workflow::new(&worktree, &mut credentials, &client, &host, mode, cli.count);

    let outcome = workflow
        .run()
        .await
        .context("Commit suggestion workflow failed")?;
    debug!(?outcome, "workflow finished");

    Ok(())
}
