use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub type WordId = String;
pub type OptionId = String;
pub type GapId = String;
pub type LineId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiddleOption {
    pub id: OptionId,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiddleWord {
    pub id: WordId,
    pub value: String,
}

/// Excerpt split into addressable words.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GameText {
    pub words: Vec<RiddleWord>,
}

impl GameText {
    pub fn position(&self, word_id: &str) -> Option<usize> {
        self.words.iter().position(|w| w.id == word_id)
    }

    pub fn contains(&self, word_id: &str) -> bool {
        self.position(word_id).is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FillGapsPart {
    Text { value: String },
    Gap { id: GapId },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FillGapsPrompt {
    pub parts: Vec<FillGapsPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FillGapsRiddle {
    #[serde(default)]
    pub id: u32,
    pub prompt: FillGapsPrompt,
    pub options: Vec<RiddleOption>,
    /// gap id -> correct option id
    #[serde(default)]
    pub answer_key: BTreeMap<GapId, OptionId>,
}

impl FillGapsRiddle {
    /// Gap ids in prompt order.
    pub fn gap_ids(&self) -> Vec<&str> {
        self.prompt
            .parts
            .iter()
            .filter_map(|part| match part {
                FillGapsPart::Gap { id } => Some(id.as_str()),
                FillGapsPart::Text { .. } => None,
            })
            .collect()
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    pub fn option_label(&self, option_id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.id == option_id)
            .map(|o| o.label.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpellcheckRiddle {
    pub prompt: GameText,
    #[serde(default)]
    pub misspelled_word_ids: BTreeSet<WordId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrossoutLine {
    pub id: LineId,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CrossoutRiddle {
    pub lines: Vec<CrossoutLine>,
    /// The line that does not belong to the excerpt.
    #[serde(default)]
    pub extra_line_id: Option<LineId>,
}

impl CrossoutRiddle {
    pub fn has_line(&self, line_id: &str) -> bool {
        self.lines.iter().any(|l| l.id == line_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnagramRiddle {
    pub prompt: GameText,
    #[serde(default)]
    pub anagram_word_ids: BTreeSet<WordId>,
}

/// Two neighbouring words, in the order the player marked them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPair {
    pub first_word_id: WordId,
    pub second_word_id: WordId,
}

impl SwitchPair {
    pub fn new(first: impl Into<WordId>, second: impl Into<WordId>) -> Self {
        Self {
            first_word_id: first.into(),
            second_word_id: second.into(),
        }
    }

    /// Order-insensitive key: the two ids sorted.
    pub fn normalized(&self) -> (&str, &str) {
        let (a, b) = (self.first_word_id.as_str(), self.second_word_id.as_str());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn contains(&self, word_id: &str) -> bool {
        self.first_word_id == word_id || self.second_word_id == word_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwitchRiddle {
    pub prompt: GameText,
    #[serde(default)]
    pub switches: Vec<SwitchPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceGap {
    pub id: GapId,
    pub correct_option_id: OptionId,
    pub options: Vec<RiddleOption>,
}

impl ChoiceGap {
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChoicePart {
    Text {
        value: String,
    },
    Gap {
        #[serde(rename = "gapId")]
        gap_id: GapId,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceRiddle {
    pub id: String,
    pub parts: Vec<ChoicePart>,
    pub gaps: Vec<ChoiceGap>,
}

impl ChoiceRiddle {
    pub fn gap(&self, gap_id: &str) -> Option<&ChoiceGap> {
        self.gaps.iter().find(|g| g.id == gap_id)
    }
}
