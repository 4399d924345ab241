use std::cell::RefCell;
use std::rc::Rc;

use fluent_i18n::t;
use log::{debug, error, info, trace};
use thiserror::Error;

use super::rules::{compute_results, GameRules};
use crate::api::mapping::map_submit_to_game_results;
use crate::api::{ClientError, GameService};
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::wire::GameId;
use crate::model::{
    Feedback, GameKind, GameResults, Level, SessionCommand, SessionEvent, SessionPhase, TimerState,
};

pub type Command<G> = SessionCommand<<G as GameRules>::Riddle, <G as GameRules>::Input>;

/// Snapshot of a level handed to a scorer when the player finishes.
pub struct Submission<'a, G: GameRules> {
    pub game_id: Option<GameId>,
    pub riddles: &'a [G::Riddle],
    pub selections: &'a [G::Selection],
    pub time_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("no {0} game in flight, answers were not sent")]
    MissingGameId(GameKind),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Turns a finished level into results.
pub trait ResultsScorer<G: GameRules> {
    fn score(&self, submission: &Submission<'_, G>) -> Result<GameResults, ScoringError>;
}

/// Scores on the device with the game's own rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScorer;

impl<G: GameRules> ResultsScorer<G> for LocalScorer {
    fn score(&self, submission: &Submission<'_, G>) -> Result<GameResults, ScoringError> {
        Ok(compute_results::<G>(
            submission.riddles,
            submission.selections,
            submission.time_seconds,
        ))
    }
}

/// Sends the answers to the game service and maps its verdict.
pub struct RemoteScorer<S: GameService> {
    service: Rc<S>,
}

impl<S: GameService> RemoteScorer<S> {
    pub fn new(service: Rc<S>) -> Self {
        Self { service }
    }
}

impl<G: GameRules, S: GameService> ResultsScorer<G> for RemoteScorer<S> {
    fn score(&self, submission: &Submission<'_, G>) -> Result<GameResults, ScoringError> {
        let game_id = submission
            .game_id
            .ok_or(ScoringError::MissingGameId(G::KIND))?;
        let request = G::answer_request(
            game_id,
            submission.riddles,
            submission.selections,
            Some(submission.time_seconds.saturating_mul(1000)),
        );
        let response = self.service.submit(&request)?;
        Ok(map_submit_to_game_results(
            &response,
            submission.riddles.len() as u32,
        ))
    }
}

/// One level of one game: puzzle navigation, selections, timer and
/// finishing.
pub struct GameSession<G: GameRules> {
    riddles: Vec<G::Riddle>,
    game_id: Option<GameId>,
    selections: Vec<G::Selection>,
    current_index: usize,
    phase: SessionPhase,
    timer_state: TimerState,
    feedback: Option<Feedback>,
    confirming_finish: bool,
    results: Option<GameResults>,
    scorer: Box<dyn ResultsScorer<G>>,
    event_emitter: EventEmitter<SessionEvent>,
    subscription: Option<Unsubscriber<Command<G>>>,
}

impl<G: GameRules> Destroyable for GameSession<G> {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl<G: GameRules> GameSession<G> {
    pub fn new(scorer: Box<dyn ResultsScorer<G>>, event_emitter: EventEmitter<SessionEvent>) -> Self {
        Self {
            riddles: Vec::new(),
            game_id: None,
            selections: Vec::new(),
            current_index: 0,
            phase: SessionPhase::Loading,
            timer_state: TimerState::default(),
            feedback: None,
            confirming_finish: false,
            results: None,
            scorer,
            event_emitter,
            subscription: None,
        }
    }

    /// A session driven by commands arriving on `command_observer`.
    pub fn wired(
        command_observer: EventObserver<Command<G>>,
        event_emitter: EventEmitter<SessionEvent>,
        scorer: Box<dyn ResultsScorer<G>>,
    ) -> Rc<RefCell<Self>> {
        let session = Rc::new(RefCell::new(Self::new(scorer, event_emitter)));
        let handler = session.clone();
        let subscription = command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_command(command.clone());
        });
        session.borrow_mut().subscription = Some(subscription);
        session
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_puzzles(&self) -> usize {
        self.riddles.len()
    }

    pub fn current_riddle(&self) -> Option<&G::Riddle> {
        self.riddles.get(self.current_index)
    }

    pub fn current_selection(&self) -> Option<&G::Selection> {
        self.selections.get(self.current_index)
    }

    pub fn selections(&self) -> &[G::Selection] {
        &self.selections
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_confirming_finish(&self) -> bool {
        self.confirming_finish
    }

    pub fn timer_state(&self) -> &TimerState {
        &self.timer_state
    }

    pub fn results(&self) -> Option<&GameResults> {
        self.results.as_ref()
    }

    pub fn answered_count(&self) -> usize {
        self.riddles
            .iter()
            .zip(&self.selections)
            .filter(|(riddle, selection)| G::is_answered(riddle, selection))
            .count()
    }

    pub fn handle_command(&mut self, command: Command<G>) {
        trace!(target: "session", "{} handling {:?}", G::KIND, command);
        match command {
            SessionCommand::Load(level) => self.load(level),
            SessionCommand::Tick => self.tick(),
            SessionCommand::Pause => self.pause(),
            SessionCommand::Resume => self.resume(),
            SessionCommand::ConfirmFinish => self.confirm_finish(),
            SessionCommand::CancelFinish => self.cancel_finish(),
            SessionCommand::Restart => self.restart(),
            command => {
                if self.phase != SessionPhase::Active || self.confirming_finish {
                    trace!(target: "session", "Ignoring {:?} in {:?}", command, self.phase);
                    return;
                }
                match command {
                    SessionCommand::Input(input) => self.apply_input(input),
                    SessionCommand::Next => self.next(),
                    SessionCommand::Prev => self.prev(),
                    SessionCommand::ResetCurrent => self.reset_current(),
                    SessionCommand::Finish => self.request_finish(),
                    _ => {}
                }
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        self.event_emitter.emit_owned(event);
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            debug!(target: "session", "{}: {:?} -> {:?}", G::KIND, self.phase, phase);
            self.phase = phase;
            self.emit(SessionEvent::PhaseChanged(phase));
        }
    }

    fn set_feedback(&mut self, feedback: Option<Feedback>) {
        if self.feedback != feedback {
            self.feedback = feedback.clone();
            self.emit(SessionEvent::FeedbackChanged(feedback));
        }
    }

    fn emit_puzzle_changed(&self) {
        self.emit(SessionEvent::PuzzleChanged {
            index: self.current_index,
            total: self.riddles.len(),
        });
    }

    fn emit_selection_changed(&self) {
        if let (Some(riddle), Some(selection)) = (self.current_riddle(), self.current_selection()) {
            self.emit(SessionEvent::SelectionChanged {
                index: self.current_index,
                answered: G::is_answered(riddle, selection),
            });
        }
    }

    fn start_over(&mut self) {
        self.selections = vec![G::Selection::default(); self.riddles.len()];
        self.current_index = 0;
        self.timer_state = TimerState::default();
        self.feedback = None;
        self.confirming_finish = false;
        self.results = None;
        self.set_phase(SessionPhase::Active);
        self.emit_puzzle_changed();
        self.emit(SessionEvent::TimerStateChanged(self.timer_state.clone()));
    }

    fn load(&mut self, level: Level<G::Riddle>) {
        info!(
            target: "session",
            "Loaded {} level with {} puzzles (game id {:?})",
            G::KIND,
            level.len(),
            level.game_id
        );
        self.game_id = level.game_id;
        self.riddles = level.riddles;
        self.emit(SessionEvent::Loaded {
            kind: G::KIND,
            total_puzzles: self.riddles.len(),
        });
        self.start_over();
    }

    fn restart(&mut self) {
        if self.phase == SessionPhase::Loading {
            return;
        }
        info!(target: "session", "Restarting {} level", G::KIND);
        self.start_over();
    }

    fn tick(&mut self) {
        if self.phase == SessionPhase::Active && self.timer_state.tick() {
            self.emit(SessionEvent::TimerStateChanged(self.timer_state.clone()));
        }
    }

    fn pause(&mut self) {
        if self.phase == SessionPhase::Active {
            self.timer_state = self.timer_state.paused();
            self.set_phase(SessionPhase::Paused);
            self.emit(SessionEvent::TimerStateChanged(self.timer_state.clone()));
        }
    }

    fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.timer_state = self.timer_state.resumed();
            self.set_phase(SessionPhase::Active);
            self.emit(SessionEvent::TimerStateChanged(self.timer_state.clone()));
        }
    }

    fn apply_input(&mut self, input: G::Input) {
        let index = self.current_index;
        let (Some(riddle), Some(selection)) = (self.riddles.get(index), self.selections.get_mut(index))
        else {
            return;
        };
        let changed = G::apply_input(riddle, selection, &input);
        self.set_feedback(None);
        if changed {
            self.emit_selection_changed();
        } else {
            trace!(target: "session", "Rejected {:?} on puzzle {}", input, index);
        }
    }

    fn current_is_answered(&self) -> bool {
        match (self.current_riddle(), self.current_selection()) {
            (Some(riddle), Some(selection)) => G::is_answered(riddle, selection),
            _ => false,
        }
    }

    fn leave_current(&mut self) {
        if let Some(selection) = self.selections.get_mut(self.current_index) {
            G::on_leave(selection);
        }
    }

    fn next(&mut self) {
        if self.current_index + 1 >= self.riddles.len() {
            return;
        }
        if !self.current_is_answered() {
            self.set_feedback(Some(Feedback::NeedSelection(G::KIND.need_selection_message())));
            return;
        }
        self.leave_current();
        self.current_index += 1;
        self.set_feedback(None);
        self.emit_puzzle_changed();
    }

    fn prev(&mut self) {
        if self.current_index == 0 {
            return;
        }
        self.leave_current();
        self.current_index -= 1;
        self.set_feedback(None);
        self.emit_puzzle_changed();
    }

    fn reset_current(&mut self) {
        if let Some(selection) = self.selections.get_mut(self.current_index) {
            *selection = G::Selection::default();
            self.set_feedback(None);
            self.emit_selection_changed();
        }
    }

    fn request_finish(&mut self) {
        let total = self.riddles.len();
        let completed = self.answered_count();
        if completed == total {
            self.finish();
            return;
        }
        debug!(target: "session", "Finish requested with {}/{} answered", completed, total);
        self.confirming_finish = true;
        self.emit(SessionEvent::FinishConfirmationRequested {
            completed,
            total,
            title: t!("finish-early-title"),
            message: t!("finish-early-message"),
            confirm: t!("finish-early-confirm"),
            cancel: t!("finish-early-cancel"),
        });
    }

    fn confirm_finish(&mut self) {
        if self.confirming_finish {
            self.confirming_finish = false;
            self.finish();
        }
    }

    fn cancel_finish(&mut self) {
        if self.confirming_finish {
            self.confirming_finish = false;
            self.emit(SessionEvent::FinishConfirmationDismissed);
        }
    }

    fn finish(&mut self) {
        let results = if self.riddles.is_empty() {
            GameResults::empty()
        } else {
            let submission = Submission::<G> {
                game_id: self.game_id,
                riddles: &self.riddles,
                selections: &self.selections,
                time_seconds: self.timer_state.seconds(),
            };
            match self.scorer.score(&submission) {
                Ok(results) => results,
                Err(err) => {
                    error!(target: "session", "Could not score {} level: {}", G::KIND, err);
                    self.emit(SessionEvent::SubmissionFailed(err.to_string()));
                    return;
                }
            }
        };

        info!(
            target: "session",
            "{} finished: score {} ({}/{} puzzles)",
            G::KIND,
            results.score,
            results.completed_puzzles,
            results.total_puzzles
        );
        self.timer_state = self.timer_state.stopped();
        self.results = Some(results.clone());
        self.set_phase(SessionPhase::Finished);
        self.emit(SessionEvent::TimerStateChanged(self.timer_state.clone()));
        self.emit(SessionEvent::Finished {
            kind: G::KIND,
            results,
        });
    }
}
