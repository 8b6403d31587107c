//! grapho - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grapho::form::ConsoleInteraction;
use grapho::git::GitRepository;
use grapho::session::{SessionConfig, SessionOutcome, run_session};

/// Compose a conventional commit message and commit the staged changes.
#[derive(Parser, Debug)]
#[command(name = "grapho")]
#[command(about = "Compose a conventional commit message and commit the staged changes")]
#[command(version)]
struct Cli {
    /// Don't commit, just print the commit message
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Initial short description (cut to 60 characters)
    #[arg(short = 'm', long, default_value = "")]
    message: String,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Open git repository
    let repo = GitRepository::open(".")
        .context("Not a git repository. Run grapho from within a git repository.")?;

    // Step 2: Prepare the terminal (checked on first use, after the preconditions)
    let mut io = ConsoleInteraction::new();

    // Step 3: Run the session
    let config = SessionConfig {
        dry_run: cli.dry_run,
        message: Some(cli.message).filter(|m| !m.is_empty()),
    };

    match run_session(&config, &repo, &mut io)? {
        SessionOutcome::Cancelled => eprintln!("Cancelled. Nothing was committed."),
        SessionOutcome::Declined => eprintln!("Commit cancelled. Nothing was committed."),
        SessionOutcome::Committed(_) | SessionOutcome::DryRun(_) => {}
    }

    Ok(())
}

/// Log to stderr, honouring `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
