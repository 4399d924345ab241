use crate::game::rules::GameRules;
use crate::game::word_pick::{apply_toggle, flatten_selected, score_picks, WordInput};
use crate::model::riddle::AnagramRiddle;
use crate::model::wire::{GameAnswerRequest, GameId};
use crate::model::{GameKind, ScoreTally, WordSelection};

/// Some words are written as anagrams; the player clicks them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnagramRules;

impl GameRules for AnagramRules {
    type Riddle = AnagramRiddle;
    type Selection = WordSelection;
    type Input = WordInput;

    const KIND: GameKind = GameKind::Anagram;

    fn apply_input(riddle: &AnagramRiddle, selection: &mut WordSelection, input: &WordInput) -> bool {
        apply_toggle(&riddle.prompt, selection, input)
    }

    fn is_answered(_riddle: &AnagramRiddle, selection: &WordSelection) -> bool {
        !selection.is_empty()
    }

    fn score(riddles: &[AnagramRiddle], selections: &[WordSelection]) -> ScoreTally {
        score_picks(
            riddles
                .iter()
                .enumerate()
                .map(|(i, r)| (&r.anagram_word_ids, selections.get(i))),
        )
    }

    fn answer_request(
        game_id: GameId,
        _riddles: &[AnagramRiddle],
        selections: &[WordSelection],
        elapsed_time_ms: Option<u64>,
    ) -> GameAnswerRequest {
        GameAnswerRequest::Anagram {
            game_id,
            selected_word_ids: flatten_selected(selections),
            elapsed_time_ms,
        }
    }
}
