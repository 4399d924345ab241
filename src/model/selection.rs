use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::riddle::{GapId, LineId, OptionId, SwitchPair, WordId};

/// gap id -> chosen option id, used by fill-gaps and choice puzzles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapAnswers(BTreeMap<GapId, OptionId>);

impl GapAnswers {
    pub fn get(&self, gap_id: &str) -> Option<&str> {
        self.0.get(gap_id).map(String::as_str)
    }

    pub fn set(&mut self, gap_id: impl Into<GapId>, option_id: impl Into<OptionId>) {
        self.0.insert(gap_id.into(), option_id.into());
    }

    pub fn clear_gap(&mut self, gap_id: &str) -> Option<OptionId> {
        self.0.remove(gap_id)
    }

    /// Gap currently holding `option_id`, if any.
    pub fn gap_holding(&self, option_id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, option)| option.as_str() == option_id)
            .map(|(gap, _)| gap.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(g, o)| (g.as_str(), o.as_str()))
    }
}

/// Words the player clicked, used by spellcheck and anagram puzzles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSelection(BTreeSet<WordId>);

impl WordSelection {
    /// Returns true when the word is selected after the toggle.
    pub fn toggle(&mut self, word_id: &str) -> bool {
        if self.0.remove(word_id) {
            false
        } else {
            self.0.insert(word_id.to_string());
            true
        }
    }

    pub fn contains(&self, word_id: &str) -> bool {
        self.0.contains(word_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<WordId>> FromIterator<S> for WordSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The single crossed-out line of a crossout puzzle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSelection(Option<LineId>);

impl LineSelection {
    pub fn of(line_id: impl Into<LineId>) -> Self {
        Self(Some(line_id.into()))
    }

    /// Clicking the selected line clears it, any other line replaces it.
    pub fn toggle(&mut self, line_id: &str) {
        if self.0.as_deref() == Some(line_id) {
            self.0 = None;
        } else {
            self.0 = Some(line_id.to_string());
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// First half of a pair being marked in a switch puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWord {
    pub word_id: WordId,
    pub position: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSelection {
    pub pairs: Vec<SwitchPair>,
    pub open: Option<OpenWord>,
}

impl SwitchSelection {
    pub fn with_pairs(pairs: Vec<SwitchPair>) -> Self {
        Self { pairs, open: None }
    }

    pub fn is_paired(&self, word_id: &str) -> bool {
        self.pairs.iter().any(|p| p.contains(word_id))
    }
}
