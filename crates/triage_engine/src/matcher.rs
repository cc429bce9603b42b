//! Lexical feature matching.
//!
//! The description is lowercased exactly once. All keyword tests are plain
//! substring containment on that text: no tokenization, no stemming and no
//! word boundaries, so "lighting" hits "light" and "cloud" hits "loud".

/// Lowercased complaint description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }

    /// First keyword (in slice order) present in the text
    pub fn first_hit<'k, S: AsRef<str>>(&self, keywords: &'k [S]) -> Option<&'k str> {
        keywords
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|kw| self.contains(kw))
    }
}
