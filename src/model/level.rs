use super::wire::{GameId, StartedRiddle};

/// The ordered riddles of one chapter/game-type session.
#[derive(Debug, Clone, PartialEq)]
pub struct Level<R> {
    pub riddles: Vec<R>,
    /// Identifier of the in-flight game on the game service; `None` for
    /// locally generated content.
    pub game_id: Option<GameId>,
}

impl<R> Level<R> {
    pub fn local(riddles: Vec<R>) -> Self {
        Self {
            riddles,
            game_id: None,
        }
    }

    /// Builds a level from a start response; the first entry's game id
    /// identifies the level.
    pub fn from_started(started: Vec<StartedRiddle<R>>) -> Self {
        let game_id = started.first().map(|s| s.game_id);
        Self {
            riddles: started.into_iter().map(|s| s.riddle).collect(),
            game_id,
        }
    }

    pub fn len(&self) -> usize {
        self.riddles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riddles.is_empty()
    }
}
