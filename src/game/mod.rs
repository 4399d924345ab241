pub mod anagram;
pub mod choice;
pub mod crossout;
pub mod fill_gaps;
pub mod library;
pub mod progress_store;
pub mod results_recorder;
pub mod rules;
pub mod session;
pub mod settings;
pub mod spellcheck;
pub mod storage;
pub mod switch;
pub mod word_pick;

pub use anagram::AnagramRules;
pub use choice::ChoiceRules;
pub use crossout::CrossoutRules;
pub use fill_gaps::FillGapsRules;
pub use progress_store::{ProgressOverview, ProgressStore};
pub use results_recorder::ResultsRecorder;
pub use rules::GameRules;
pub use session::{GameSession, LocalScorer, RemoteScorer, ResultsScorer};
pub use settings::Settings;
pub use spellcheck::SpellcheckRules;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use switch::SwitchRules;
