//! Confirmation gate: validate -> confirm or cancel -> dispatch.
//!
//! `Idle --submit--> Validated --confirm|cancel--> Idle`. The request captured
//! at submit time is an immutable value; later form edits do not reach it.

use crate::config::Messages;
use crate::dispatch::{DispatchOutcome, Dispatcher, DownloadManager, DownloadRequest};
use crate::form::FormState;
use crate::status::{DurationClass, StatusReporter, Toaster};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("url is empty")]
    EmptyUrl,
    #[error("file name is empty")]
    EmptyFileName,
    #[error("url scheme is not http or https")]
    UnsupportedScheme,
}

/// Values captured at validation time and dispatched unchanged on confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub url: String,
    pub file_name: String,
}

/// What the confirmation surface must render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    Validated(Confirmation),
}

pub struct ConfirmationGate {
    state: GateState,
    messages: Messages,
    require_http_scheme: bool,
}

impl ConfirmationGate {
    pub fn new(messages: Messages, require_http_scheme: bool) -> Self {
        Self {
            state: GateState::Idle,
            messages,
            require_http_scheme,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Validate the form. On success capture a [`Confirmation`] and return the
    /// prompt to show; on failure show exactly one short message and stay put.
    pub fn submit<T: Toaster>(
        &mut self,
        form: &FormState,
        reporter: &mut StatusReporter<T>,
    ) -> Result<ConfirmationPrompt, ValidationError> {
        let url = form.url().trim();
        let file_name = form.file_name().trim();

        let rejected = if url.is_empty() {
            Some((ValidationError::EmptyUrl, &self.messages.please_enter_url))
        } else if file_name.is_empty() {
            Some((
                ValidationError::EmptyFileName,
                &self.messages.filename_must_not_be_empty,
            ))
        } else if self.require_http_scheme && !has_http_scheme(url) {
            Some((
                ValidationError::UnsupportedScheme,
                &self.messages.url_must_start_with_http,
            ))
        } else {
            None
        };

        if let Some((err, text)) = rejected {
            tracing::debug!(error = %err, "submit rejected");
            reporter.show(text.clone(), DurationClass::Short);
            return Err(err);
        }

        let confirmation = Confirmation {
            url: url.to_string(),
            file_name: file_name.to_string(),
        };
        let prompt = ConfirmationPrompt {
            title: self.messages.confirm_title.clone(),
            message: self.messages.confirm_message_for(&confirmation.url),
            url: confirmation.url.clone(),
        };
        self.state = GateState::Validated(confirmation);
        Ok(prompt)
    }

    /// User declined. Drops the captured request; no side effects.
    pub fn cancel(&mut self) -> bool {
        let was_validated = matches!(self.state, GateState::Validated(_));
        self.state = GateState::Idle;
        was_validated
    }

    /// User accepted. Dispatches the captured request once and returns to
    /// `Idle`; confirming while `Idle` dispatches nothing.
    pub fn confirm<M: DownloadManager, T: Toaster>(
        &mut self,
        dispatcher: &Dispatcher<M>,
        reporter: &mut StatusReporter<T>,
    ) -> DispatchOutcome {
        let confirmation = match std::mem::take(&mut self.state) {
            GateState::Validated(c) => c,
            GateState::Idle => return Ok(None),
        };
        let request = DownloadRequest {
            url: confirmation.url,
            file_name: confirmation.file_name.replace(' ', "_"),
        };
        dispatcher.dispatch(request, reporter).map(Some)
    }
}

fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
