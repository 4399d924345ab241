use crate::game::rules::GameRules;
use crate::model::riddle::{ChoiceRiddle, GapId, OptionId};
use crate::model::wire::{ChoiceAnswer, GameAnswerRequest, GameId};
use crate::model::{GapAnswers, GameKind, ScoreTally};

/// Each gap of the excerpt offers a few options; exactly one fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceRules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceInput {
    Select { gap_id: GapId, option_id: OptionId },
}

impl GameRules for ChoiceRules {
    type Riddle = ChoiceRiddle;
    type Selection = GapAnswers;
    type Input = ChoiceInput;

    const KIND: GameKind = GameKind::Choice;

    fn apply_input(riddle: &ChoiceRiddle, selection: &mut GapAnswers, input: &ChoiceInput) -> bool {
        match input {
            ChoiceInput::Select { gap_id, option_id } => {
                match riddle.gap(gap_id) {
                    Some(gap) if gap.has_option(option_id) => {
                        selection.set(gap_id.clone(), option_id.clone());
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    fn is_answered(riddle: &ChoiceRiddle, selection: &GapAnswers) -> bool {
        riddle.gaps.iter().all(|gap| selection.get(&gap.id).is_some())
    }

    fn score(riddles: &[ChoiceRiddle], selections: &[GapAnswers]) -> ScoreTally {
        let mut tally = ScoreTally::default();
        for (index, riddle) in riddles.iter().enumerate() {
            tally.total_puzzles += 1;
            tally.possible += riddle.gaps.len() as u32;

            let Some(selection) = selections.get(index) else {
                continue;
            };
            if !selection.is_empty() {
                tally.completed_puzzles += 1;
            }
            for gap in &riddle.gaps {
                match selection.get(&gap.id) {
                    Some(option_id) if option_id == gap.correct_option_id => tally.correct += 1,
                    Some(_) => tally.mistakes += 1,
                    None => {}
                }
            }
        }
        tally
    }

    fn answer_request(
        game_id: GameId,
        _riddles: &[ChoiceRiddle],
        selections: &[GapAnswers],
        elapsed_time_ms: Option<u64>,
    ) -> GameAnswerRequest {
        GameAnswerRequest::Choice {
            game_id,
            answers: selections
                .iter()
                .flat_map(|s| {
                    s.iter().map(|(gap_id, option_id)| ChoiceAnswer {
                        gap_id: gap_id.to_string(),
                        option_id: option_id.to_string(),
                    })
                })
                .collect(),
            elapsed_time_ms,
        }
    }
}
