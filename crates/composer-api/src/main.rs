//! Composer CLI entry point.
//!
//! Binary name: `composer`
//!
//! Parses CLI arguments, sets up tracing, loads the workspace and config,
//! then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,composer_core=debug,composer_infra=debug",
        _ => "trace",
    };
    if let Err(e) = composer_observe::tracing_setup::init_tracing(filter, cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = dispatch(cli).await;
    composer_observe::tracing_setup::shutdown_tracing();
    result
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "composer", &mut std::io::stdout());
            Ok(())
        }

        // Body files only; no workspace needed.
        Commands::Lg { action } => cli::lg::run(action, cli.json).await,

        command => {
            let state = AppState::init().await?;
            tracing::debug!(data_dir = %state.data_dir.display(), "workspace opened");

            match command {
                Commands::Response { action } => cli::response::run(&state, action, cli.json).await,
                Commands::Field(args) => cli::field::run(&state, args, cli.json).await,
                Commands::Build { project } => {
                    cli::build::build(&state, &project, cli.json, cli.quiet).await
                }
                Commands::Status { project } => cli::build::status(&state, &project, cli.json).await,
                Commands::Skill { action } => cli::skill::run(&state, action, cli.json).await,
                Commands::Completions { .. } | Commands::Lg { .. } => unreachable!("handled above"),
            }
        }
    }
}
