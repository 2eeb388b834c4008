//! CLI command handlers. Each command is in its own file.

mod completions;
mod get;
mod interactive;
mod name;

pub use completions::run_completions;
pub use get::{run_get, GetArgs};
pub use interactive::run_interactive;
pub use name::run_name;

use anyhow::Result;
use dialoguer::Confirm;
use qdl_core::gate::ConfirmationPrompt;
use qdl_core::transfer::{CurlDownloadManager, JobEvent, JobOutcome};
use std::sync::mpsc::Receiver;

/// Render the confirmation surface and return the user's choice.
fn ask_confirmation(prompt: &ConfirmationPrompt) -> Result<bool> {
    eprintln!("{}", prompt.title);
    let accepted = Confirm::new()
        .with_prompt(prompt.message.as_str())
        .default(false)
        .interact()?;
    Ok(accepted)
}

/// Keep the process alive until every dispatched job finished, then report
/// the completion notifications. Fails if any job failed.
fn wait_for_jobs(manager: &CurlDownloadManager, events: &Receiver<JobEvent>) -> Result<()> {
    manager.wait_all();
    let mut failed = 0usize;
    for event in events.try_iter() {
        match event.outcome {
            JobOutcome::Completed { path, bytes } => {
                println!("Downloaded {} ({} bytes) to {}", event.title, bytes, path.display());
            }
            JobOutcome::Failed(reason) => {
                failed += 1;
                eprintln!("Download {} {} failed: {}", event.handle, event.title, reason);
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} download(s) failed");
    }
    Ok(())
}
