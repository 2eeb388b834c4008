//! System clipboard access for URL auto-extract.

use qdl_core::clipboard::Clipboard;

/// Reads the desktop clipboard through `arboard`. Headless sessions and
/// non-text contents read as empty.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new().and_then(|mut cb| cb.get_text()) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("clipboard unavailable: {}", e);
                None
            }
        }
    }
}
