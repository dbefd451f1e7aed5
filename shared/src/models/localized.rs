//! Bilingual text

use serde::{Deserialize, Serialize};

/// English/Arabic text pair. Either side may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub ar: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// First non-empty of en, ar; `fallback` when both are blank.
    pub fn display(&self, fallback: &str) -> String {
        if !self.en.is_empty() {
            self.en.clone()
        } else if !self.ar.is_empty() {
            self.ar.clone()
        } else {
            fallback.to_string()
        }
    }

    /// Bilingual "en / ar" display, degrading to whichever side exists.
    pub fn full_display(&self, fallback: &str) -> String {
        match (self.en.is_empty(), self.ar.is_empty()) {
            (false, false) => format!("{} / {}", self.en, self.ar),
            (false, true) => self.en.clone(),
            (true, false) => self.ar.clone(),
            (true, true) => fallback.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.ar.is_empty()
    }
}
