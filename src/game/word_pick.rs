//! Scoring shared by the word-selection games (spellcheck, anagram): the
//! player clicks words and each puzzle has a fixed set of wrong words.

use std::collections::BTreeSet;

use crate::model::riddle::{GameText, WordId};
use crate::model::{ScoreTally, WordSelection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordInput {
    ToggleWord(WordId),
}

pub fn apply_toggle(prompt: &GameText, selection: &mut WordSelection, input: &WordInput) -> bool {
    match input {
        WordInput::ToggleWord(word_id) => {
            if !prompt.contains(word_id) {
                return false;
            }
            selection.toggle(word_id);
            true
        }
    }
}

/// `hits = |selected ∩ key|`, `mistakes = |selected| - hits`, accuracy over
/// the summed key sizes of all puzzles.
pub fn score_picks<'a, I>(puzzles: I) -> ScoreTally
where
    I: IntoIterator<Item = (&'a BTreeSet<WordId>, Option<&'a WordSelection>)>,
{
    let mut tally = ScoreTally::default();
    for (key, selection) in puzzles {
        tally.total_puzzles += 1;
        tally.possible += key.len() as u32;

        let Some(selection) = selection else {
            continue;
        };
        if selection.is_empty() {
            continue;
        }
        tally.completed_puzzles += 1;

        let hits = selection.iter().filter(|id| key.contains(*id)).count() as u32;
        tally.correct += hits;
        tally.mistakes += (selection.len() as u32).saturating_sub(hits);
    }
    tally
}

pub fn flatten_selected(selections: &[WordSelection]) -> Vec<String> {
    selections
        .iter()
        .flat_map(|s| s.iter().map(str::to_string))
        .collect()
}
