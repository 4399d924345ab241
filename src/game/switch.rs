use std::collections::BTreeSet;

use log::trace;

use crate::game::rules::GameRules;
use crate::model::riddle::{SwitchPair, SwitchRiddle, WordId};
use crate::model::wire::{GameAnswerRequest, GameId};
use crate::model::{GameKind, OpenWord, ScoreTally, SwitchSelection};

pub const MAX_PAIRS_PER_PUZZLE: usize = 3;

/// Pairs of neighbouring words were swapped; the player marks them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchRules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchInput {
    ClickWord(WordId),
    ClearPairs,
}

impl GameRules for SwitchRules {
    type Riddle = SwitchRiddle;
    type Selection = SwitchSelection;
    type Input = SwitchInput;

    const KIND: GameKind = GameKind::Switch;

    fn apply_input(riddle: &SwitchRiddle, selection: &mut SwitchSelection, input: &SwitchInput) -> bool {
        let word_id = match input {
            SwitchInput::ClearPairs => {
                *selection = SwitchSelection::default();
                return true;
            }
            SwitchInput::ClickWord(word_id) => word_id,
        };

        let Some(position) = riddle.prompt.position(word_id) else {
            return false;
        };
        if selection.is_paired(word_id) {
            return false;
        }

        match selection.open.take() {
            None if selection.pairs.len() >= MAX_PAIRS_PER_PUZZLE => false,
            None => {
                selection.open = Some(OpenWord {
                    word_id: word_id.clone(),
                    position,
                });
                true
            }
            Some(open) if open.word_id == *word_id => true,
            Some(open) if open.position.abs_diff(position) != 1 => {
                trace!(target: "switch", "{} is not next to {}", word_id, open.word_id);
                selection.open = Some(open);
                false
            }
            Some(open) => {
                selection.pairs.push(SwitchPair::new(open.word_id, word_id.clone()));
                true
            }
        }
    }

    fn is_answered(_riddle: &SwitchRiddle, selection: &SwitchSelection) -> bool {
        !selection.pairs.is_empty()
    }

    fn on_leave(selection: &mut SwitchSelection) {
        selection.open = None;
    }

    fn score(riddles: &[SwitchRiddle], selections: &[SwitchSelection]) -> ScoreTally {
        let mut tally = ScoreTally::default();
        for (index, riddle) in riddles.iter().enumerate() {
            let key: BTreeSet<(&str, &str)> = riddle.switches.iter().map(SwitchPair::normalized).collect();
            tally.total_puzzles += 1;
            tally.possible += key.len() as u32;

            let Some(selection) = selections.get(index) else {
                continue;
            };
            if selection.pairs.is_empty() {
                continue;
            }
            tally.completed_puzzles += 1;
            for pair in &selection.pairs {
                if key.contains(&pair.normalized()) {
                    tally.correct += 1;
                } else {
                    tally.mistakes += 1;
                }
            }
        }
        tally
    }

    fn answer_request(
        game_id: GameId,
        _riddles: &[SwitchRiddle],
        selections: &[SwitchSelection],
        elapsed_time_ms: Option<u64>,
    ) -> GameAnswerRequest {
        GameAnswerRequest::Switch {
            game_id,
            selected_pairs: selections.iter().flat_map(|s| s.pairs.iter().cloned()).collect(),
            elapsed_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::compute_results;
    use crate::model::riddle::{GameText, RiddleWord};

    fn riddle() -> SwitchRiddle {
        SwitchRiddle {
            prompt: GameText {
                words: (1..=31)
                    .map(|i| RiddleWord {
                        id: format!("w{}", i),
                        value: format!("word{}", i),
                    })
                    .collect(),
            },
            switches: vec![SwitchPair::new("w2", "w3"), SwitchPair::new("w20", "w21")],
        }
    }

    fn click(riddle: &SwitchRiddle, selection: &mut SwitchSelection, word: &str) -> bool {
        SwitchRules::apply_input(riddle, selection, &SwitchInput::ClickWord(word.to_string()))
    }

    #[test]
    fn test_pair_order_does_not_matter() {
        let riddles = vec![riddle()];
        let forward = SwitchSelection::with_pairs(vec![SwitchPair::new("w2", "w3")]);
        let backward = SwitchSelection::with_pairs(vec![SwitchPair::new("w3", "w2")]);

        let a = compute_results::<SwitchRules>(&riddles, &[forward], 0);
        let b = compute_results::<SwitchRules>(&riddles, &[backward], 0);
        assert_eq!(a, b);
        assert_eq!(a.score, 50);
    }

    #[test]
    fn test_pairs_must_be_adjacent() {
        let riddle = riddle();
        let mut selection = SwitchSelection::default();
        assert!(click(&riddle, &mut selection, "w3"));
        assert!(!click(&riddle, &mut selection, "w5"));
        assert!(selection.open.is_some());
        assert!(click(&riddle, &mut selection, "w2"));
        assert_eq!(selection.pairs, vec![SwitchPair::new("w3", "w2")]);
        assert!(selection.open.is_none());
    }

    #[test]
    fn test_clicking_open_word_cancels() {
        let riddle = riddle();
        let mut selection = SwitchSelection::default();
        click(&riddle, &mut selection, "w7");
        assert!(click(&riddle, &mut selection, "w7"));
        assert!(selection.open.is_none());
        assert!(selection.pairs.is_empty());
    }

    #[test]
    fn test_paired_words_and_pair_limit() {
        let riddle = riddle();
        let mut selection = SwitchSelection::default();
        for (a, b) in [("w1", "w2"), ("w4", "w5"), ("w7", "w8")] {
            click(&riddle, &mut selection, a);
            click(&riddle, &mut selection, b);
        }
        assert_eq!(selection.pairs.len(), MAX_PAIRS_PER_PUZZLE);
        assert!(!click(&riddle, &mut selection, "w2"));
        assert!(!click(&riddle, &mut selection, "w10"));
        assert!(selection.open.is_none());

        assert!(SwitchRules::apply_input(&riddle, &mut selection, &SwitchInput::ClearPairs));
        assert_eq!(selection, SwitchSelection::default());
    }

    #[test]
    fn test_wrong_pairs_are_mistakes() {
        let riddles = vec![riddle(), riddle()];
        let selections = vec![SwitchSelection::with_pairs(vec![
            SwitchPair::new("w21", "w20"),
            SwitchPair::new("w10", "w11"),
        ])];
        let results = compute_results::<SwitchRules>(&riddles, &selections, 0);
        assert_eq!(results.completed_puzzles, 1);
        assert_eq!(results.total_mistakes, 1);
        assert!((results.accuracy - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_leaving_puzzle_drops_open_word() {
        let riddle = riddle();
        let mut selection = SwitchSelection::default();
        click(&riddle, &mut selection, "w9");
        SwitchRules::on_leave(&mut selection);
        assert!(selection.open.is_none());
    }
}
