//! One download dialog session, driven by explicit input events.
//!
//! The session owns the form, the confirmation gate, the status slot and the
//! dispatcher. It is single-threaded; the only asynchronous boundary is the
//! download manager behind the dispatcher.

use crate::clipboard::{url_from_clipboard, Clipboard};
use crate::config::QdlConfig;
use crate::dispatch::{Dispatcher, DownloadManager, EnqueueError, JobHandle};
use crate::form::FormState;
use crate::gate::{ConfirmationGate, ConfirmationPrompt, ValidationError};
use crate::prefs::{Preferences, PrefsStore};
use crate::status::{StatusReporter, Toaster};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    UrlEdited(String),
    FileNameEdited(String),
    AutoDetectToggled(bool),
    /// Turning it on pulls a URL from the clipboard right away.
    AutoExtractToggled(bool),
    Submit,
    Confirm,
    Cancel,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Form state changed.
    Updated,
    /// Event had no effect (edit to a locked field, confirm with nothing pending, closed session).
    Ignored,
    Rejected(ValidationError),
    AwaitingConfirmation(ConfirmationPrompt),
    Cancelled,
    Dispatched(JobHandle),
    Closed,
}

pub struct Session<M, T: Toaster> {
    form: FormState,
    gate: ConfirmationGate,
    reporter: StatusReporter<T>,
    dispatcher: Dispatcher<M>,
    prefs: Preferences,
    store: Option<PrefsStore>,
    clipboard: Option<Box<dyn Clipboard>>,
    open: bool,
}

impl<M: DownloadManager, T: Toaster> Session<M, T> {
    pub fn new(config: &QdlConfig, prefs: Preferences, manager: M, toaster: T) -> Self {
        Self {
            form: FormState::new(prefs.auto_detect),
            gate: ConfirmationGate::new(config.messages.clone(), config.require_http_scheme),
            reporter: StatusReporter::new(toaster),
            dispatcher: Dispatcher::new(manager, config.messages.clone()),
            prefs,
            store: None,
            clipboard: None,
            open: true,
        }
    }

    /// Persist preference toggles to `store`.
    pub fn with_prefs_store(mut self, store: PrefsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Source for URL auto-extraction.
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    /// Called when the input surface (re)appears: with auto-extract on, a
    /// non-blank clipboard string goes through the URL edit path.
    pub fn resume(&mut self) -> SessionOutcome {
        if !self.open || !self.prefs.auto_extract {
            return SessionOutcome::Ignored;
        }
        self.extract_url_from_clipboard()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn reporter(&self) -> &StatusReporter<T> {
        &self.reporter
    }

    pub fn dispatcher(&self) -> &Dispatcher<M> {
        &self.dispatcher
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn handle(&mut self, event: FormEvent) -> Result<SessionOutcome, EnqueueError> {
        if !self.open {
            tracing::debug!(?event, "event after session closed");
            return Ok(SessionOutcome::Ignored);
        }

        let outcome = match event {
            FormEvent::UrlEdited(text) => {
                self.form.set_url(text);
                SessionOutcome::Updated
            }
            FormEvent::FileNameEdited(text) => {
                if self.form.set_file_name(text) {
                    SessionOutcome::Updated
                } else {
                    SessionOutcome::Ignored
                }
            }
            FormEvent::AutoDetectToggled(flag) => {
                self.form.set_auto_detect(flag);
                self.prefs.auto_detect = flag;
                self.persist_prefs();
                SessionOutcome::Updated
            }
            FormEvent::AutoExtractToggled(flag) => {
                self.prefs.auto_extract = flag;
                self.persist_prefs();
                if flag {
                    self.extract_url_from_clipboard();
                }
                SessionOutcome::Updated
            }
            FormEvent::Submit => match self.gate.submit(&self.form, &mut self.reporter) {
                Ok(prompt) => SessionOutcome::AwaitingConfirmation(prompt),
                Err(err) => SessionOutcome::Rejected(err),
            },
            FormEvent::Cancel => {
                if self.gate.cancel() {
                    SessionOutcome::Cancelled
                } else {
                    SessionOutcome::Ignored
                }
            }
            FormEvent::Confirm => match self.gate.confirm(&self.dispatcher, &mut self.reporter)? {
                Some(handle) => {
                    self.open = false;
                    SessionOutcome::Dispatched(handle)
                }
                None => SessionOutcome::Ignored,
            },
            FormEvent::Close => {
                self.gate.cancel();
                self.open = false;
                SessionOutcome::Closed
            }
        };
        Ok(outcome)
    }

    fn extract_url_from_clipboard(&mut self) -> SessionOutcome {
        let Some(clipboard) = self.clipboard.as_deref_mut() else {
            return SessionOutcome::Ignored;
        };
        match url_from_clipboard(clipboard) {
            Some(url) => {
                tracing::debug!(%url, "url taken from clipboard");
                self.form.set_url(url);
                SessionOutcome::Updated
            }
            None => SessionOutcome::Ignored,
        }
    }

    fn persist_prefs(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(&self.prefs) {
            tracing::warn!("failed to persist preferences: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::FixedClipboard;
    use crate::dispatch::testing::FakeManager;
    use crate::status::testing::RecordingToaster;

    fn session(auto_detect: bool) -> Session<FakeManager, RecordingToaster> {
        Session::new(
            &QdlConfig::default(),
            Preferences {
                auto_detect,
                auto_extract: true,
            },
            FakeManager::default(),
            RecordingToaster::default(),
        )
    }

    #[test]
    fn auto_detect_flow_dispatches_derived_name() {
        let mut s = session(true);
        s.handle(FormEvent::UrlEdited(
            "https://example.com/images/new/random_image.png".into(),
        ))
        .unwrap();
        assert_eq!(s.form().file_name(), "random_image.png");

        match s.handle(FormEvent::Submit).unwrap() {
            SessionOutcome::AwaitingConfirmation(p) => {
                assert_eq!(p.url, "https://example.com/images/new/random_image.png")
            }
            other => panic!("expected confirmation, got {other:?}"),
        }
        assert_eq!(
            s.handle(FormEvent::Confirm).unwrap(),
            SessionOutcome::Dispatched(JobHandle(1))
        );
        assert!(!s.is_open());
        assert_eq!(
            s.reporter().current().unwrap().text,
            "started download: random_image.png"
        );
        assert_eq!(s.handle(FormEvent::Confirm).unwrap(), SessionOutcome::Ignored);
        assert_eq!(s.dispatcher().manager().enqueued.borrow().len(), 1);
    }

    #[test]
    fn file_name_edit_ignored_in_auto_detect() {
        let mut s = session(true);
        assert_eq!(
            s.handle(FormEvent::FileNameEdited("x.bin".into())).unwrap(),
            SessionOutcome::Ignored
        );
        s.handle(FormEvent::AutoDetectToggled(false)).unwrap();
        assert_eq!(
            s.handle(FormEvent::FileNameEdited("x.bin".into())).unwrap(),
            SessionOutcome::Updated
        );
        assert_eq!(s.form().file_name(), "x.bin");
    }

    #[test]
    fn rejected_submit_keeps_session_open() {
        let mut s = session(false);
        assert_eq!(
            s.handle(FormEvent::Submit).unwrap(),
            SessionOutcome::Rejected(ValidationError::EmptyUrl)
        );
        s.handle(FormEvent::UrlEdited("https://a.com/b.png".into()))
            .unwrap();
        assert_eq!(
            s.handle(FormEvent::Submit).unwrap(),
            SessionOutcome::Rejected(ValidationError::EmptyFileName)
        );
        assert!(s.is_open());
        assert_eq!(s.reporter().toaster().visible().len(), 1);
        assert_eq!(
            s.reporter().current().unwrap().text,
            "filename must not be empty"
        );
    }

    #[test]
    fn cancel_then_resubmit() {
        let mut s = session(true);
        s.handle(FormEvent::UrlEdited("https://a.com/b.png".into()))
            .unwrap();
        s.handle(FormEvent::Submit).unwrap();
        assert_eq!(s.handle(FormEvent::Cancel).unwrap(), SessionOutcome::Cancelled);
        assert_eq!(s.handle(FormEvent::Confirm).unwrap(), SessionOutcome::Ignored);
        assert!(s.is_open());
        s.handle(FormEvent::Submit).unwrap();
        assert!(matches!(
            s.handle(FormEvent::Confirm).unwrap(),
            SessionOutcome::Dispatched(_)
        ));
    }

    #[test]
    fn close_discards_pending_confirmation() {
        let mut s = session(true);
        s.handle(FormEvent::UrlEdited("https://a.com/b.png".into()))
            .unwrap();
        s.handle(FormEvent::Submit).unwrap();
        assert_eq!(s.handle(FormEvent::Close).unwrap(), SessionOutcome::Closed);
        assert_eq!(s.handle(FormEvent::Confirm).unwrap(), SessionOutcome::Ignored);
        assert!(s.dispatcher().manager().enqueued.borrow().is_empty());
    }

    #[test]
    fn enqueue_failure_surfaces_to_caller() {
        let mut s = session(true);
        *s.dispatcher().manager().fail_with.borrow_mut() = Some("no service".into());
        s.handle(FormEvent::UrlEdited("https://a.com/b.png".into()))
            .unwrap();
        s.handle(FormEvent::Submit).unwrap();
        assert!(s.handle(FormEvent::Confirm).is_err());
        assert!(s.reporter().toaster().shown.is_empty());
        assert!(s.is_open());
        assert_eq!(s.handle(FormEvent::Confirm).unwrap(), SessionOutcome::Ignored);

        *s.dispatcher().manager().fail_with.borrow_mut() = None;
        assert!(matches!(
            s.handle(FormEvent::Submit).unwrap(),
            SessionOutcome::AwaitingConfirmation(_)
        ));
        assert_eq!(
            s.handle(FormEvent::Confirm).unwrap(),
            SessionOutcome::Dispatched(JobHandle(1))
        );
        assert!(!s.is_open());
        assert_eq!(s.dispatcher().manager().enqueued.borrow().len(), 1);
    }

    #[test]
    fn resume_fills_url_from_clipboard_and_derives_name() {
        let mut s = session(true).with_clipboard(Box::new(FixedClipboard(Some(
            "https://example.com/images/new/random_image.png".into(),
        ))));
        assert_eq!(s.resume(), SessionOutcome::Updated);
        assert_eq!(
            s.form().url(),
            "https://example.com/images/new/random_image.png"
        );
        assert_eq!(s.form().file_name(), "random_image.png");
    }

    #[test]
    fn resume_skips_blank_clipboard_and_disabled_pref() {
        let mut s = session(true).with_clipboard(Box::new(FixedClipboard(Some("  ".into()))));
        assert_eq!(s.resume(), SessionOutcome::Ignored);
        assert_eq!(s.form().url(), "");

        let mut off = Session::new(
            &QdlConfig::default(),
            Preferences {
                auto_detect: true,
                auto_extract: false,
            },
            FakeManager::default(),
            RecordingToaster::default(),
        )
        .with_clipboard(Box::new(FixedClipboard(Some("https://a.com/b.png".into()))));
        assert_eq!(off.resume(), SessionOutcome::Ignored);
        assert_eq!(off.form().url(), "");

        off.handle(FormEvent::AutoExtractToggled(true)).unwrap();
        assert_eq!(off.form().url(), "https://a.com/b.png");
        assert_eq!(off.form().file_name(), "b.png");
    }

    #[test]
    fn toggle_persists_preference() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::at(dir.path().join("prefs.toml"));
        let mut s = session(true).with_prefs_store(store.clone());
        s.handle(FormEvent::AutoDetectToggled(false)).unwrap();
        s.handle(FormEvent::AutoExtractToggled(false)).unwrap();
        let saved = store.load().unwrap();
        assert!(!saved.auto_detect);
        assert!(!saved.auto_extract);
        assert_eq!(s.preferences(), saved);
    }
}
