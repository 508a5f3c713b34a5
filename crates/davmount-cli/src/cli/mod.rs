//! CLI for davmount.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use davmount_core::config;
use std::process::ExitCode;

use commands::{run_completions, run_man, run_mount, run_resolve};

/// Top-level CLI for davmount.
#[derive(Debug, Parser)]
#[command(name = "davmount")]
#[command(about = "davmount: mount the WebDAV share described by a dav mount manifest", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Mount the share a manifest describes and open the resource it names.
    Mount {
        /// Path of a local manifest, or its URL with --remote.
        location: String,

        /// Fetch LOCATION over HTTP instead of reading a local file.
        #[arg(long)]
        remote: bool,

        /// Do not open the resource in a file manager after mounting.
        #[arg(long)]
        no_open: bool,
    },

    /// Print the WebDAV URI a manifest resolves to, without mounting.
    Resolve {
        /// Path of a local manifest, or its URL with --remote.
        location: String,

        /// Fetch LOCATION over HTTP instead of reading a local file.
        #[arg(long)]
        remote: bool,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Mount {
                location,
                remote,
                no_open,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_mount(&cfg, &location, remote, no_open).await
            }
            CliCommand::Resolve { location, remote } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_resolve(&cfg, &location, remote).await
            }
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(ExitCode::SUCCESS)
            }
            CliCommand::Man => {
                run_man()?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

#[cfg(test)]
mod tests;
