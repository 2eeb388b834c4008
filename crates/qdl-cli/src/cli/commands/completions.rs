//! `qdl completions <shell>` – shell completion scripts.

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::Shell;

pub fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "qdl", &mut std::io::stdout());
}
