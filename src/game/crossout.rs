use crate::game::rules::GameRules;
use crate::model::riddle::{CrossoutRiddle, LineId};
use crate::model::wire::{GameAnswerRequest, GameId};
use crate::model::{GameKind, LineSelection, ScoreTally};

/// One line of the excerpt does not belong there; the player crosses it out.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossoutRules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossoutInput {
    ToggleLine(LineId),
}

impl GameRules for CrossoutRules {
    type Riddle = CrossoutRiddle;
    type Selection = LineSelection;
    type Input = CrossoutInput;

    const KIND: GameKind = GameKind::Crossout;

    fn apply_input(riddle: &CrossoutRiddle, selection: &mut LineSelection, input: &CrossoutInput) -> bool {
        match input {
            CrossoutInput::ToggleLine(line_id) => {
                if !riddle.has_line(line_id) {
                    return false;
                }
                selection.toggle(line_id);
                true
            }
        }
    }

    fn is_answered(_riddle: &CrossoutRiddle, selection: &LineSelection) -> bool {
        selection.get().is_some()
    }

    fn score(riddles: &[CrossoutRiddle], selections: &[LineSelection]) -> ScoreTally {
        let mut tally = ScoreTally::default();
        for (index, riddle) in riddles.iter().enumerate() {
            tally.total_puzzles += 1;
            tally.possible += 1;

            match selections.get(index).and_then(LineSelection::get) {
                Some(line_id) => {
                    tally.completed_puzzles += 1;
                    if riddle.extra_line_id.as_deref() == Some(line_id) {
                        tally.correct += 1;
                    } else {
                        tally.mistakes += 1;
                    }
                }
                None => tally.mistakes += 1,
            }
        }
        tally
    }

    fn answer_request(
        game_id: GameId,
        _riddles: &[CrossoutRiddle],
        selections: &[LineSelection],
        elapsed_time_ms: Option<u64>,
    ) -> GameAnswerRequest {
        GameAnswerRequest::Crossout {
            game_id,
            crossed_out_line_ids: selections
                .iter()
                .filter_map(|s| s.get().map(str::to_string))
                .collect(),
            elapsed_time_ms,
        }
    }
}
