use crate::model::wire::{GameAnswerRequest, GameId};
use crate::model::{GameKind, GameResults, ScoreTally};

/// Per-game behaviour plugged into the session controller.
pub trait GameRules: std::fmt::Debug + Clone + 'static {
    type Riddle: std::fmt::Debug + Clone + 'static;
    type Selection: std::fmt::Debug + Clone + Default + PartialEq + 'static;
    type Input: std::fmt::Debug + Clone + 'static;

    const KIND: GameKind;

    /// Applies one user interaction to the selection of a puzzle. Returns
    /// false when the input was rejected and nothing changed.
    fn apply_input(
        riddle: &Self::Riddle,
        selection: &mut Self::Selection,
        input: &Self::Input,
    ) -> bool;

    /// Completeness predicate guarding forward navigation and finishing.
    fn is_answered(riddle: &Self::Riddle, selection: &Self::Selection) -> bool;

    /// Called on the selection being left when the current puzzle changes.
    fn on_leave(_selection: &mut Self::Selection) {}

    /// Pure scoring pass. `selections` may be shorter than `riddles`; missing
    /// entries count as empty selections.
    fn score(riddles: &[Self::Riddle], selections: &[Self::Selection]) -> ScoreTally;

    /// Payload for the game service's submit endpoint.
    fn answer_request(
        game_id: GameId,
        riddles: &[Self::Riddle],
        selections: &[Self::Selection],
        elapsed_time_ms: Option<u64>,
    ) -> GameAnswerRequest;
}

/// Local scoring of a whole level. An empty level yields the all-zero
/// result.
pub fn compute_results<G: GameRules>(
    riddles: &[G::Riddle],
    selections: &[G::Selection],
    time_seconds: u64,
) -> GameResults {
    if riddles.is_empty() {
        return GameResults::empty();
    }
    GameResults::from_tally(&G::score(riddles, selections), time_seconds)
}
