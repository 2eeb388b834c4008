//! Toaster that records status messages instead of rendering them.

use qdl_core::status::{Toaster, TransientMessage};

#[derive(Debug, Default)]
pub struct RecordingToaster {
    pub shown: Vec<TransientMessage>,
    pub cancelled: Vec<TransientMessage>,
}

impl Toaster for RecordingToaster {
    fn show(&mut self, message: &TransientMessage) {
        self.shown.push(message.clone());
    }

    fn cancel(&mut self, message: &TransientMessage) {
        self.cancelled.push(message.clone());
    }
}
