//! `qdl get <url>` – confirm and download one URL.

use super::{ask_confirmation, wait_for_jobs};
use crate::cli::terminal::TerminalToaster;
use anyhow::Result;
use qdl_core::config::QdlConfig;
use qdl_core::prefs::Preferences;
use qdl_core::session::{FormEvent, Session, SessionOutcome};
use qdl_core::transfer::CurlDownloadManager;

#[derive(Debug, Clone)]
pub struct GetArgs {
    pub url: String,
    pub name: Option<String>,
    pub manual: bool,
    pub yes: bool,
}

pub fn run_get(cfg: &QdlConfig, args: GetArgs) -> Result<()> {
    let mut manager = CurlDownloadManager::from_config(cfg);
    let events = manager.subscribe();
    tracing::info!(dir = %manager.downloads_dir().display(), "get url={}", args.url);

    // An explicit name means the field is typed, not derived.
    let prefs = Preferences {
        auto_detect: args.name.is_none() && !args.manual,
        auto_extract: false,
    };
    let mut session = Session::new(cfg, prefs, &manager, TerminalToaster);

    session.handle(FormEvent::UrlEdited(args.url))?;
    if let Some(name) = args.name {
        session.handle(FormEvent::FileNameEdited(name))?;
    }

    let prompt = match session.handle(FormEvent::Submit)? {
        SessionOutcome::AwaitingConfirmation(prompt) => prompt,
        SessionOutcome::Rejected(err) => anyhow::bail!("download not started: {err}"),
        other => anyhow::bail!("unexpected submit outcome: {other:?}"),
    };

    let accepted = args.yes || ask_confirmation(&prompt)?;
    if !accepted {
        session.handle(FormEvent::Cancel)?;
        session.handle(FormEvent::Close)?;
        println!("Cancelled.");
        return Ok(());
    }

    if let SessionOutcome::Dispatched(handle) = session.handle(FormEvent::Confirm)? {
        tracing::debug!(job = %handle, "dispatched");
    }
    drop(session);
    wait_for_jobs(&manager, &events)
}
