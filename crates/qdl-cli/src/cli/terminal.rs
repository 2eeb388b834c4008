//! Terminal rendering of transient status messages.

use qdl_core::status::{DurationClass, Toaster, TransientMessage};

/// Prints each status message on its own stderr line. A printed line cannot
/// be taken back, so cancelling only drops it from the status slot.
#[derive(Debug, Default)]
pub struct TerminalToaster;

impl Toaster for TerminalToaster {
    fn show(&mut self, message: &TransientMessage) {
        match message.duration {
            DurationClass::Short => eprintln!("{}", message.text),
            DurationClass::Long => eprintln!("==> {}", message.text),
        }
    }

    fn cancel(&mut self, message: &TransientMessage) {
        tracing::trace!(text = %message.text, "status message replaced");
    }
}
