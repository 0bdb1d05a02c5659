//! CLI command definitions for the `composer` binary.
//!
//! Uses clap derive macros for argument parsing. Commands are grouped by
//! noun (`composer lg parse`, `composer response text`, `composer build`).

pub mod build;
pub mod field;
pub mod lg;
pub mod response;
pub mod skill;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Author bot responses and build bot language models.
#[derive(Parser)]
#[command(name = "composer", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work with structured template bodies on disk.
    Lg {
        #[command(subcommand)]
        action: lg::LgCommand,
    },

    /// Edit a structured response template in a workspace project.
    Response {
        #[command(subcommand)]
        action: response::ResponseCommand,
    },

    /// Show or edit the template behind a dialog response field.
    Field(field::FieldArgs),

    /// Validate, build and publish a project's LU and QnA files.
    Build {
        /// Project id.
        project: String,
    },

    /// Show the last build status of a project.
    Status {
        /// Project id.
        project: String,
    },

    /// Wire skills into root bots.
    Skill {
        #[command(subcommand)]
        action: skill::SkillCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
