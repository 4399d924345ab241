mod book;
mod game_kind;
mod game_results;
mod language;
mod level;
mod progress;
pub mod riddle;
mod selection;
mod session_command;
mod session_event;
mod timer_state;
pub mod wire;

pub use book::{genre_label, Book, BookId, Extract};
pub use game_kind::GameKind;
pub use game_results::{GameResults, ResultsCard, ScoreTally};
pub use language::Language;
pub use level::Level;
pub use progress::{BookProgress, ChapterProgress};
pub use selection::{GapAnswers, LineSelection, OpenWord, SwitchSelection, WordSelection};
pub use session_command::SessionCommand;
pub use session_event::{Feedback, SessionEvent, SessionPhase};
pub use timer_state::TimerState;
