use log::warn;
use serde::{Deserialize, Serialize};

/// Language of data-level texts (game titles, chapter labels, genres).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pl,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
        }
    }

    /// Accepts plain codes as well as locale strings such as `pl_PL.UTF-8`.
    pub fn from_code(code: &str) -> Option<Language> {
        let lower = code.trim().to_lowercase();
        if lower.starts_with("pl") {
            Some(Language::Pl)
        } else if lower.starts_with("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    /// Makes `t!` messages on this thread use this language.
    pub fn apply_locale(&self) {
        if let Err(err) = fluent_i18n::set_locale(Some(self.code())) {
            warn!(target: "settings", "Could not switch locale to {}: {}", self.code(), err);
        }
    }

    pub fn chapter_title(&self, chapter_index: usize) -> String {
        match self {
            Language::En => format!("Chapter {}", chapter_index + 1),
            Language::Pl => format!("Rozdział {}", chapter_index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_accepts_locale_strings() {
        assert_eq!(Language::from_code("pl_PL.UTF-8"), Some(Language::Pl));
        assert_eq!(Language::from_code(" EN "), Some(Language::En));
        assert_eq!(Language::from_code("de"), None);
    }
}
