//! Where books, riddles and results come from: the bundled mock library or
//! the remote services.

mod client_error;
pub mod mapping;
pub mod mock;
pub mod remote;
pub mod transport;

pub use client_error::ClientError;
pub use mock::MockClient;
pub use remote::RemoteClient;
pub use transport::{HttpRequest, HttpResponse, Method, Transport};

use crate::game::rules::GameRules;
use crate::model::wire::{
    GameAnswerRequest, GameAnswerResponse, ProgressSummaryItem, ResultsCreateRequest,
    ResultsSummaryResponse,
};
use crate::model::{Book, BookId, Extract, Level};

/// Library metadata and session creation.
pub trait ContentSource {
    fn books(&self) -> Result<Vec<Book>, ClientError>;
    fn extracts(&self, book_id: BookId) -> Result<Vec<Extract>, ClientError>;
    /// Creates a new anonymous session and returns its token.
    fn create_session(&self) -> Result<String, ClientError>;
}

/// Starts a level of game `G` for a book chapter.
pub trait RiddleSource<G: GameRules> {
    fn start_level(&self, book_id: BookId, chapter: usize) -> Result<Level<G::Riddle>, ClientError>;
}

/// Server-side scoring of a finished level.
pub trait GameService {
    fn submit(&self, request: &GameAnswerRequest) -> Result<GameAnswerResponse, ClientError>;
}

/// Per-session results storage on the backend.
pub trait ResultsService {
    fn post_result(&self, session_id: &str, request: &ResultsCreateRequest) -> Result<(), ClientError>;
    fn results_summary(&self, session_id: &str, book_id: BookId) -> Result<ResultsSummaryResponse, ClientError>;
    fn progress_summary(&self, session_id: &str) -> Result<Vec<ProgressSummaryItem>, ClientError>;
}
