//! Shared two-part description region (title + body) under the piano.

/// What the description region currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRegion {
    pub title: String,
    pub text: String,
}

impl DisplayRegion {
    pub fn show(&mut self, title: &str, text: &str) {
        self.title.clear();
        self.title.push_str(title);
        self.text.clear();
        self.text.push_str(text);
    }

    /// Blank title with the placeholder body
    pub fn reset(&mut self, placeholder: &str) {
        self.show("", placeholder);
    }

    /// One-line rendering used for the window title
    pub fn summary(&self) -> String {
        if self.title.is_empty() {
            self.text.clone()
        } else {
            format!("{} | {}", self.title, self.text)
        }
    }
}
