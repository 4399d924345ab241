use log::trace;

use crate::game::rules::GameRules;
use crate::model::riddle::{FillGapsRiddle, GapId, OptionId};
use crate::model::wire::{FillGapAnswer, GameAnswerRequest, GameId};
use crate::model::{GameKind, GapAnswers, ScoreTally};

/// Words were cut out of the excerpt; the player drops them back into the
/// gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillGapsRules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillGapsInput {
    Place { gap_id: GapId, option_id: OptionId },
    ClearGap(GapId),
    ClearAll,
}

/// Level-wide gap numbering. Every puzzle keeps its own local gap ids; the
/// service addresses gaps by position across the whole level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapNumbering {
    offsets: Vec<usize>,
    total: usize,
}

impl GapNumbering {
    pub fn new(riddles: &[FillGapsRiddle]) -> Self {
        let mut offsets = Vec::with_capacity(riddles.len());
        let mut total = 0;
        for riddle in riddles {
            offsets.push(total);
            total += riddle.gap_ids().len();
        }
        Self { offsets, total }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn offset(&self, puzzle_index: usize) -> Option<usize> {
        self.offsets.get(puzzle_index).copied()
    }

    pub fn global_index(&self, puzzle_index: usize, local_position: usize) -> Option<usize> {
        self.offset(puzzle_index).map(|offset| offset + local_position)
    }

    /// `g<n>`, numbered from 1 across the level.
    pub fn global_id(&self, puzzle_index: usize, local_position: usize) -> Option<String> {
        self.global_index(puzzle_index, local_position)
            .map(|index| format!("g{}", index + 1))
    }
}

impl GameRules for FillGapsRules {
    type Riddle = FillGapsRiddle;
    type Selection = GapAnswers;
    type Input = FillGapsInput;

    const KIND: GameKind = GameKind::FillGaps;

    fn apply_input(riddle: &FillGapsRiddle, selection: &mut GapAnswers, input: &FillGapsInput) -> bool {
        match input {
            FillGapsInput::Place { gap_id, option_id } => {
                if !riddle.gap_ids().contains(&gap_id.as_str()) || !riddle.has_option(option_id) {
                    return false;
                }
                if let Some(previous) = selection.gap_holding(option_id).map(str::to_string) {
                    trace!(target: "fill_gaps", "moving {} from {} to {}", option_id, previous, gap_id);
                    selection.clear_gap(&previous);
                }
                selection.set(gap_id.clone(), option_id.clone());
                true
            }
            FillGapsInput::ClearGap(gap_id) => selection.clear_gap(gap_id).is_some(),
            FillGapsInput::ClearAll => {
                *selection = GapAnswers::default();
                true
            }
        }
    }

    fn is_answered(riddle: &FillGapsRiddle, selection: &GapAnswers) -> bool {
        riddle.gap_ids().iter().all(|gap_id| selection.get(gap_id).is_some())
    }

    fn score(riddles: &[FillGapsRiddle], selections: &[GapAnswers]) -> ScoreTally {
        let mut tally = ScoreTally::default();
        for (index, riddle) in riddles.iter().enumerate() {
            tally.total_puzzles += 1;

            let Some(selection) = selections.get(index) else {
                continue;
            };
            if !Self::is_answered(riddle, selection) {
                continue;
            }
            tally.completed_puzzles += 1;

            for gap_id in riddle.gap_ids() {
                tally.possible += 1;
                if selection.get(gap_id) == riddle.answer_key.get(gap_id).map(String::as_str) {
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
        riddles: &[FillGapsRiddle],
        selections: &[GapAnswers],
        elapsed_time_ms: Option<u64>,
    ) -> GameAnswerRequest {
        let numbering = GapNumbering::new(riddles);
        let mut answers = Vec::new();
        for (index, riddle) in riddles.iter().enumerate() {
            let Some(selection) = selections.get(index) else {
                continue;
            };
            for (position, gap_id) in riddle.gap_ids().into_iter().enumerate() {
                let (Some(option_id), Some(gap_index)) =
                    (selection.get(gap_id), numbering.global_index(index, position))
                else {
                    continue;
                };
                answers.push(FillGapAnswer {
                    gap_index,
                    option_id: option_id.to_string(),
                });
            }
        }
        GameAnswerRequest::FillGaps {
            game_id,
            answers,
            elapsed_time_ms,
        }
    }
}
