use serde::{Deserialize, Serialize};

use crate::helpers::format_time;

/// Raw counts collected by a scoring pass over a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTally {
    /// Correct answers found.
    pub correct: u32,
    /// Denominator of the accuracy.
    pub possible: u32,
    pub mistakes: u32,
    pub completed_puzzles: u32,
    pub total_puzzles: u32,
}

impl ScoreTally {
    pub fn accuracy(&self) -> f64 {
        if self.possible == 0 {
            return 0.0;
        }
        f64::from(self.correct.min(self.possible)) / f64::from(self.possible)
    }
}

/// Outcome of one level. Built once when the level finishes.
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResults {
    /// 0..=100
    pub score: u8,
    /// 0.0..=1.0
    pub accuracy: f64,
    pub total_mistakes: u32,
    pub total_puzzles: u32,
    pub completed_puzzles: u32,
    pub time_seconds: u64,
}

impl Default for GameResults {
    fn default() -> Self {
        Self::empty()
    }
}

impl GameResults {
    pub fn empty() -> Self {
        Self {
            score: 0,
            accuracy: 0.0,
            total_mistakes: 0,
            total_puzzles: 0,
            completed_puzzles: 0,
            time_seconds: 0,
        }
    }

    pub fn from_tally(tally: &ScoreTally, time_seconds: u64) -> Self {
        let accuracy = tally.accuracy();
        Self {
            score: score_for(accuracy),
            accuracy,
            total_mistakes: tally.mistakes,
            total_puzzles: tally.total_puzzles,
            completed_puzzles: tally.completed_puzzles.min(tally.total_puzzles),
            time_seconds,
        }
    }

    /// Results computed elsewhere (e.g. by the game service); values are
    /// clamped into the ranges a local computation would produce.
    pub fn from_reported(
        score: f64,
        accuracy: f64,
        mistakes: u32,
        completed_puzzles: u32,
        total_puzzles: u32,
        time_seconds: u64,
    ) -> Self {
        let accuracy = if accuracy.is_finite() {
            accuracy.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let score = if score.is_finite() {
            score.round().clamp(0.0, 100.0) as u8
        } else {
            score_for(accuracy)
        };
        Self {
            score,
            accuracy,
            total_mistakes: mistakes,
            total_puzzles,
            completed_puzzles: completed_puzzles.min(total_puzzles),
            time_seconds,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_puzzles > 0 && self.completed_puzzles == self.total_puzzles
    }

    pub fn card(&self) -> ResultsCard {
        ResultsCard {
            score: self.score,
            accuracy_percent: score_for(self.accuracy),
            mistakes: self.total_mistakes,
            time_text: format_time(self.time_seconds),
            pages_text: format!("{}/{}", self.completed_puzzles, self.total_puzzles),
        }
    }
}

fn score_for(accuracy: f64) -> u8 {
    (accuracy * 100.0).round().clamp(0.0, 100.0) as u8
}

/// What the results screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsCard {
    pub score: u8,
    pub accuracy_percent: u8,
    pub mistakes: u32,
    pub time_text: String,
    pub pages_text: String,
}

impl std::fmt::Display for ResultsCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "score {}/100 | accuracy {}% | mistakes {} | time {} | pages {}",
            self.score, self.accuracy_percent, self.mistakes, self.time_text, self.pages_text
        )
    }
}
