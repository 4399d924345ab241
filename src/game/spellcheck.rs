use crate::game::rules::GameRules;
use crate::game::word_pick::{apply_toggle, flatten_selected, score_picks, WordInput};
use crate::model::riddle::SpellcheckRiddle;
use crate::model::wire::{GameAnswerRequest, GameId};
use crate::model::{GameKind, ScoreTally, WordSelection};

/// Letters inside some words are swapped; the player clicks the misspelled
/// words.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpellcheckRules;

impl GameRules for SpellcheckRules {
    type Riddle = SpellcheckRiddle;
    type Selection = WordSelection;
    type Input = WordInput;

    const KIND: GameKind = GameKind::Spellcheck;

    fn apply_input(riddle: &SpellcheckRiddle, selection: &mut WordSelection, input: &WordInput) -> bool {
        apply_toggle(&riddle.prompt, selection, input)
    }

    fn is_answered(_riddle: &SpellcheckRiddle, selection: &WordSelection) -> bool {
        !selection.is_empty()
    }

    fn score(riddles: &[SpellcheckRiddle], selections: &[WordSelection]) -> ScoreTally {
        score_picks(
            riddles
                .iter()
                .enumerate()
                .map(|(i, r)| (&r.misspelled_word_ids, selections.get(i))),
        )
    }

    fn answer_request(
        game_id: GameId,
        _riddles: &[SpellcheckRiddle],
        selections: &[WordSelection],
        elapsed_time_ms: Option<u64>,
    ) -> GameAnswerRequest {
        GameAnswerRequest::Spellcheck {
            game_id,
            selected_word_ids: flatten_selected(selections),
            elapsed_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::compute_results;
    use crate::model::riddle::{GameText, RiddleWord};

    fn riddle() -> SpellcheckRiddle {
        let words = ["Litwo,", "Ojczyzno", "moja!", "ty", "jestęs", "jak", "zdrowei;"];
        SpellcheckRiddle {
            prompt: GameText {
                words: words
                    .iter()
                    .enumerate()
                    .map(|(i, w)| RiddleWord {
                        id: format!("w{}", i + 1),
                        value: w.to_string(),
                    })
                    .collect(),
            },
            misspelled_word_ids: ["w5", "w7"].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_both_errors_found_is_perfect() {
        let selection: WordSelection = ["w5", "w7"].into_iter().collect();
        let results = compute_results::<SpellcheckRules>(&[riddle()], &[selection], 12);
        assert_eq!(results.accuracy, 1.0);
        assert_eq!(results.score, 100);
        assert_eq!(results.total_mistakes, 0);
    }

    #[test]
    fn test_one_hit_one_miss() {
        let selection: WordSelection = ["w5", "w6"].into_iter().collect();
        let results = compute_results::<SpellcheckRules>(&[riddle()], &[selection], 12);
        assert_eq!(results.total_mistakes, 1);
        assert_eq!(results.accuracy, 0.5);
        assert_eq!(results.score, 50);
    }

    #[test]
    fn test_accuracy_spans_every_puzzle_of_the_level() {
        let riddles = vec![riddle(); 5];
        let selections = vec![["w5", "w7"].into_iter().collect::<WordSelection>()];
        let results = compute_results::<SpellcheckRules>(&riddles, &selections, 0);
        assert_eq!(results.total_puzzles, 5);
        assert_eq!(results.completed_puzzles, 1);
        assert!((results.accuracy - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_monotone_in_hits_for_fixed_selection_size() {
        let riddles = vec![riddle()];
        let sizes_two = [["w1", "w2"], ["w5", "w2"], ["w5", "w7"]];
        let scores: Vec<u8> = sizes_two
            .iter()
            .map(|ids| {
                let selection: WordSelection = ids.iter().copied().collect();
                compute_results::<SpellcheckRules>(&riddles, &[selection], 0).score
            })
            .collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{:?}", scores);
        for s in scores {
            assert!(s <= 100);
        }
    }

    #[test]
    fn test_unknown_words_are_rejected() {
        let riddle = riddle();
        let mut selection = WordSelection::default();
        assert!(!SpellcheckRules::apply_input(
            &riddle,
            &mut selection,
            &WordInput::ToggleWord("w99".to_string())
        ));
        assert!(SpellcheckRules::apply_input(
            &riddle,
            &mut selection,
            &WordInput::ToggleWord("w5".to_string())
        ));
        assert!(SpellcheckRules::is_answered(&riddle, &selection));
    }

    #[test]
    fn test_answer_request_flattens_selected_words() {
        let selections = vec![
            ["w5"].into_iter().collect::<WordSelection>(),
            ["w7", "w2"].into_iter().collect::<WordSelection>(),
        ];
        let request =
            SpellcheckRules::answer_request(1002, &[riddle(), riddle()], &selections, Some(3000));
        match request {
            GameAnswerRequest::Spellcheck {
                game_id,
                selected_word_ids,
                elapsed_time_ms,
            } => {
                assert_eq!(game_id, 1002);
                assert_eq!(selected_word_ids, vec!["w5", "w2", "w7"]);
                assert_eq!(elapsed_time_ms, Some(3000));
            }
            other => panic!("unexpected request {:?}", other),
        }
    }
}
