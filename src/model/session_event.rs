use super::{GameKind, GameResults, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Active,
    Paused,
    Finished,
}

/// Inline message shown under the current puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    NeedSelection(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Loaded {
        kind: GameKind,
        total_puzzles: usize,
    },
    PhaseChanged(SessionPhase),
    PuzzleChanged {
        index: usize,
        total: usize,
    },
    SelectionChanged {
        index: usize,
        answered: bool,
    },
    FeedbackChanged(Option<Feedback>),
    TimerStateChanged(TimerState),
    /// Localized texts of the blocking "finish early?" modal.
    FinishConfirmationRequested {
        completed: usize,
        total: usize,
        title: String,
        message: String,
        confirm: String,
        cancel: String,
    },
    FinishConfirmationDismissed,
    Finished {
        kind: GameKind,
        results: GameResults,
    },
    SubmissionFailed(String),
}
