use fluent_i18n::t;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Language;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    FillGaps,
    Spellcheck,
    Crossout,
    Anagram,
    Switch,
    Choice,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::FillGaps,
        GameKind::Spellcheck,
        GameKind::Crossout,
        GameKind::Anagram,
        GameKind::Switch,
        GameKind::Choice,
    ];

    pub fn all() -> Vec<GameKind> {
        Self::ALL.to_vec()
    }

    pub fn id(&self) -> u32 {
        match self {
            GameKind::FillGaps => 1,
            GameKind::Spellcheck => 2,
            GameKind::Crossout => 3,
            GameKind::Anagram => 4,
            GameKind::Switch => 5,
            GameKind::Choice => 6,
        }
    }

    /// Path segment and answer payload tag, e.g. `fill-gaps`.
    pub fn slug(&self) -> &'static str {
        match self {
            GameKind::FillGaps => "fill-gaps",
            GameKind::Spellcheck => "spellcheck",
            GameKind::Crossout => "crossout",
            GameKind::Anagram => "anagram",
            GameKind::Switch => "switch",
            GameKind::Choice => "choice",
        }
    }

    pub fn from_slug(slug: &str) -> Option<GameKind> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// The "random game" entry of the game picker.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> GameKind {
        *Self::ALL.choose(rng).unwrap_or(&GameKind::FillGaps)
    }

    pub fn title(&self, language: Language) -> &'static str {
        match (self, language) {
            (GameKind::FillGaps, Language::En) => "Fill the gaps",
            (GameKind::FillGaps, Language::Pl) => "Uzupełnij luki",
            (GameKind::Spellcheck, Language::En) => "Spellcheck",
            (GameKind::Spellcheck, Language::Pl) => "Literówki",
            (GameKind::Crossout, Language::En) => "Crossout",
            (GameKind::Crossout, Language::Pl) => "Skreśl linijkę",
            (GameKind::Anagram, Language::En) => "Anagram",
            (GameKind::Anagram, Language::Pl) => "Anagramy",
            (GameKind::Switch, Language::En) => "Swapped words",
            (GameKind::Switch, Language::Pl) => "Zamienione słowa",
            (GameKind::Choice, Language::En) => "Multiple choice gaps",
            (GameKind::Choice, Language::Pl) => "Wybierz słowo",
        }
    }

    pub fn description(&self, language: Language) -> &'static str {
        match (self, language) {
            (GameKind::FillGaps, Language::En) => {
                "Insert missing words into classical Polish literary works."
            }
            (GameKind::FillGaps, Language::Pl) => {
                "Wstaw brakujące słowa w klasycznych polskich tekstach literackich."
            }
            (GameKind::Spellcheck, Language::En) => {
                "Select words that contain spelling mistakes in the text."
            }
            (GameKind::Spellcheck, Language::Pl) => {
                "Zaznacz słowa, które zawierają błędy w tekście."
            }
            (GameKind::Crossout, Language::En) => {
                "Find and cross out the line that does not belong to the poem."
            }
            (GameKind::Crossout, Language::Pl) => {
                "Znajdź i skreśl linijkę, która nie pasuje do reszty wiersza."
            }
            (GameKind::Anagram, Language::En) => {
                "Select words that are anagrams of correct words in the poem."
            }
            (GameKind::Anagram, Language::Pl) => {
                "Zaznacz słowa, które są anagramami poprawnych wyrazów w wierszu."
            }
            (GameKind::Switch, Language::En) => {
                "Find pairs of neighbouring words that have been swapped."
            }
            (GameKind::Switch, Language::Pl) => {
                "Znajdź pary sąsiadujących słów, które zostały zamienione miejscami."
            }
            (GameKind::Choice, Language::En) => {
                "Click each gap and choose the correct word from three options."
            }
            (GameKind::Choice, Language::Pl) => {
                "Kliknij każdą lukę i wybierz poprawne słowo z trzech możliwości."
            }
        }
    }

    /// Inline warning shown when advancing past an unanswered puzzle.
    pub fn need_selection_message(&self) -> String {
        match self {
            GameKind::FillGaps => t!("need-all-gaps"),
            GameKind::Spellcheck | GameKind::Anagram => t!("need-word-selection"),
            GameKind::Crossout => t!("need-line-selection"),
            GameKind::Switch => t!("need-pair-selection"),
            GameKind::Choice => t!("need-choice-selection"),
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
