//! CLI for QDL.

mod clipboard;
mod commands;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use qdl_core::config::{self, QdlConfig};
use std::path::{Path, PathBuf};

use commands::{run_completions, run_get, run_interactive, run_name, GetArgs};

/// Top-level CLI for QDL.
#[derive(Debug, Parser)]
#[command(name = "qdl")]
#[command(about = "QDL: confirm a URL and start a background download", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/qdl/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL into the downloads directory after confirmation.
    Get {
        /// HTTP/HTTPS URL to download.
        url: String,

        /// File name to save as (default: derived from the URL).
        #[arg(long, short = 'o', value_name = "FILE")]
        name: Option<String>,

        /// Do not derive the file name from the URL.
        #[arg(long)]
        manual: bool,

        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,

        /// Save into this directory instead of the configured/OS downloads directory.
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
    },

    /// Fill in URL and file name interactively.
    Interactive {
        /// Save into this directory instead of the configured/OS downloads directory.
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,

        /// Do not pre-fill the URL from the clipboard this time.
        #[arg(long)]
        no_clipboard: bool,
    },

    /// Print the file name derived from a URL.
    Name {
        /// URL (or any `/`-separated text).
        url: String,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Get {
                url,
                name,
                manual,
                yes,
                download_dir,
            } => {
                let cfg = load_config(cli.config.as_deref(), download_dir)?;
                run_get(
                    &cfg,
                    GetArgs {
                        url,
                        name,
                        manual,
                        yes,
                    },
                )?;
            }
            CliCommand::Interactive {
                download_dir,
                no_clipboard,
            } => {
                let cfg = load_config(cli.config.as_deref(), download_dir)?;
                run_interactive(&cfg, !no_clipboard)?;
            }
            CliCommand::Name { url } => run_name(&url)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>, download_dir: Option<PathBuf>) -> Result<QdlConfig> {
    let mut cfg = match path {
        Some(p) => config::load_from(p)?,
        None => config::load_or_init()?,
    };
    if download_dir.is_some() {
        cfg.download_dir = download_dir;
    }
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
