//! Clipboard seam used to pre-fill the URL field.

/// Source of clipboard text (system clipboard, test double, ...).
pub trait Clipboard {
    /// Current clipboard text, or None when empty, non-text or unavailable.
    fn read_text(&mut self) -> Option<String>;
}

/// Clipboard text usable as a URL: present and not blank.
pub fn url_from_clipboard(clipboard: &mut dyn Clipboard) -> Option<String> {
    clipboard.read_text().filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clipboard;

    /// Clipboard holding a fixed value.
    pub struct FixedClipboard(pub Option<String>);

    impl Clipboard for FixedClipboard {
        fn read_text(&mut self) -> Option<String> {
            self.0.clone()
        }
    }
}
