//! Input form state: URL text, filename text and the autodetect flag.

use crate::url_model::extract_filename;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    url: String,
    file_name: String,
    auto_detect: bool,
}

impl FormState {
    pub fn new(auto_detect: bool) -> Self {
        Self {
            auto_detect,
            ..Self::default()
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn auto_detect(&self) -> bool {
        self.auto_detect
    }

    /// The filename field accepts edits only while autodetect is off.
    pub fn file_name_editable(&self) -> bool {
        !self.auto_detect
    }

    /// Store the URL text. With autodetect on, a derivable name overwrites the
    /// filename; an underivable one leaves the previous filename in place.
    pub fn set_url(&mut self, text: impl Into<String>) {
        self.url = text.into();
        if !self.auto_detect {
            return;
        }
        if let Some(name) = extract_filename(&self.url) {
            tracing::trace!(file_name = %name, "derived file name from url");
            self.file_name = name;
        }
    }

    /// Store the filename text. Returns false (and changes nothing) while autodetect is on.
    pub fn set_file_name(&mut self, text: impl Into<String>) -> bool {
        if !self.file_name_editable() {
            return false;
        }
        self.file_name = text.into();
        true
    }

    /// Toggle autodetect. Does not recompute the filename until the next `set_url`.
    pub fn set_auto_detect(&mut self, flag: bool) {
        self.auto_detect = flag;
    }
}
