//! CLI command definitions for the `concierge` binary.
//!
//! Uses clap derive macros for argument parsing. Operational commands
//! (`serve`, `init`, `status`) sit at the top level; FAQ management is
//! grouped under `concierge faq`.

pub mod faq;
pub mod init;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Website chat concierge: chat API, FAQ and admin tools.
#[derive(Parser)]
#[command(name = "concierge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (defaults to `server.port` in config.toml).
        #[arg(short, long, env = "CONCIERGE_PORT")]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` in config.toml).
        #[arg(long, env = "CONCIERGE_HOST")]
        host: Option<String>,
    },

    /// Create the data directory, database and a default config.toml.
    Init,

    /// Show session, message and FAQ counts.
    Status,

    /// Manage FAQ entries.
    Faq {
        #[command(subcommand)]
        action: FaqCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum FaqCommand {
    /// List active FAQ entries.
    #[command(alias = "ls")]
    List {
        /// Only show entries in this category.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add an FAQ entry.
    Add {
        /// Question text.
        #[arg(long)]
        question: String,

        /// Answer text.
        #[arg(long)]
        answer: String,

        /// Category (e.g. "pricing").
        #[arg(short, long)]
        category: Option<String>,

        /// Display order; lower comes first.
        #[arg(short, long, default_value_t = 0)]
        priority: i32,
    },
}

impl Cli {
    /// Default log filter for this invocation when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        let serving = matches!(self.command, Commands::Serve { .. });
        match self.verbose {
            0 if self.quiet => "error",
            0 if serving => "info",
            0 => "warn",
            1 => "info,concierge=debug",
            _ => "trace",
        }
    }
}
