//! `qdl interactive` – edit URL, file name and autodetect until confirmed.
//! With auto-extract on, the URL starts out as the clipboard text.

use super::{ask_confirmation, wait_for_jobs};
use crate::cli::clipboard::SystemClipboard;
use crate::cli::terminal::TerminalToaster;
use anyhow::Result;
use dialoguer::{Confirm, Input};
use qdl_core::config::QdlConfig;
use qdl_core::prefs::PrefsStore;
use qdl_core::session::{FormEvent, Session, SessionOutcome};
use qdl_core::transfer::CurlDownloadManager;

pub fn run_interactive(cfg: &QdlConfig, use_clipboard: bool) -> Result<()> {
    let mut manager = CurlDownloadManager::from_config(cfg);
    let events = manager.subscribe();

    let store = PrefsStore::open_default()?;
    let prefs = store.load().unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable preferences: {:#}", e);
        Default::default()
    });
    let mut session = Session::new(cfg, prefs, &manager, TerminalToaster).with_prefs_store(store);
    if use_clipboard {
        session = session.with_clipboard(Box::new(SystemClipboard));
        if session.resume() == SessionOutcome::Updated {
            eprintln!("URL taken from clipboard: {}", session.form().url());
        }
    }

    while session.is_open() {
        let auto_detect = Confirm::new()
            .with_prompt("Detect file name from URL?")
            .default(session.form().auto_detect())
            .interact()?;
        if auto_detect != session.form().auto_detect() {
            session.handle(FormEvent::AutoDetectToggled(auto_detect))?;
        }

        let url: String = Input::new()
            .with_prompt("URL")
            .with_initial_text(session.form().url())
            .allow_empty(true)
            .interact_text()?;
        session.handle(FormEvent::UrlEdited(url))?;

        if session.form().file_name_editable() {
            let name: String = Input::new()
                .with_prompt("File name")
                .with_initial_text(session.form().file_name())
                .allow_empty(true)
                .interact_text()?;
            session.handle(FormEvent::FileNameEdited(name))?;
        } else {
            eprintln!("File name: {}", session.form().file_name());
        }

        let prompt = match session.handle(FormEvent::Submit)? {
            SessionOutcome::AwaitingConfirmation(prompt) => prompt,
            _ => continue,
        };

        if ask_confirmation(&prompt)? {
            session.handle(FormEvent::Confirm)?;
            continue;
        }

        session.handle(FormEvent::Cancel)?;
        let again = Confirm::new()
            .with_prompt("Edit and try again?")
            .default(true)
            .interact()?;
        if !again {
            session.handle(FormEvent::Close)?;
            println!("Cancelled.");
        }
    }

    drop(session);
    wait_for_jobs(&manager, &events)
}
