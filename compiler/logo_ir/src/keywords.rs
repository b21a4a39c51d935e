//! Keyword spellings for procedure definitions.
//!
//! The default spellings `to` / `end` are always recognized. A localization
//! table may add one extra spelling for each; export then prefers the
//! localized spelling.

/// Accepted spellings of the `to` and `end` keywords.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keywords {
    localized_to: Option<String>,
    localized_end: Option<String>,
}

const DEFAULT_TO: &str = "to";
const DEFAULT_END: &str = "end";

impl Keywords {
    /// Keywords with an optional localized spelling for each keyword.
    ///
    /// Spellings are lower-cased since the tokenizer compares lower-cased
    /// text.
    pub fn localized(to: Option<&str>, end: Option<&str>) -> Self {
        Keywords {
            localized_to: to.map(str::to_lowercase),
            localized_end: end.map(str::to_lowercase),
        }
    }

    #[inline]
    pub fn is_to(&self, word: &str) -> bool {
        word == DEFAULT_TO || self.localized_to.as_deref() == Some(word)
    }

    #[inline]
    pub fn is_end(&self, word: &str) -> bool {
        word == DEFAULT_END || self.localized_end.as_deref() == Some(word)
    }

    /// Spelling of `to` used when exporting.
    pub fn to_word(&self) -> &str {
        self.localized_to.as_deref().unwrap_or(DEFAULT_TO)
    }

    /// Spelling of `end` used when exporting.
    pub fn end_word(&self) -> &str {
        self.localized_end.as_deref().unwrap_or(DEFAULT_END)
    }
}
