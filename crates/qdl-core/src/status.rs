//! Single-slot transient status messages.
//!
//! At most one message is visible at a time. Showing a new message cancels
//! the previous one first (latest wins, no queueing).

use std::time::{Duration, Instant};

/// How long a transient message stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationClass {
    Short,
    Long,
}

impl DurationClass {
    pub fn as_duration(self) -> Duration {
        match self {
            DurationClass::Short => Duration::from_millis(2000),
            DurationClass::Long => Duration::from_millis(3500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub text: String,
    pub duration: DurationClass,
}

/// Rendering seam for transient messages (terminal, test recorder, ...).
pub trait Toaster {
    fn show(&mut self, message: &TransientMessage);
    fn cancel(&mut self, message: &TransientMessage);
}

struct Slot {
    message: TransientMessage,
    shown_at: Instant,
}

/// Owns the one "current message" slot for a session.
pub struct StatusReporter<T: Toaster> {
    toaster: T,
    current: Option<Slot>,
}

impl<T: Toaster> StatusReporter<T> {
    pub fn new(toaster: T) -> Self {
        Self {
            toaster,
            current: None,
        }
    }

    /// Show `text`, cancelling any message still in the slot.
    pub fn show(&mut self, text: impl Into<String>, duration: DurationClass) {
        if let Some(prev) = self.current.take() {
            self.toaster.cancel(&prev.message);
        }
        let message = TransientMessage {
            text: text.into(),
            duration,
        };
        tracing::debug!(text = %message.text, ?duration, "status message");
        self.toaster.show(&message);
        self.current = Some(Slot {
            message,
            shown_at: Instant::now(),
        });
    }

    /// The message currently visible, if its display window has not elapsed.
    pub fn current(&self) -> Option<&TransientMessage> {
        self.current
            .as_ref()
            .filter(|slot| slot.shown_at.elapsed() < slot.message.duration.as_duration())
            .map(|slot| &slot.message)
    }

    /// Dismiss the current message, if any.
    pub fn dismiss(&mut self) {
        if let Some(prev) = self.current.take() {
            self.toaster.cancel(&prev.message);
        }
    }

    pub fn toaster(&self) -> &T {
        &self.toaster
    }
}
