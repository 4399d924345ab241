use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::mock::{mock_books, mock_extracts};
use super::transport::{HttpRequest, Transport};
use super::{ClientError, ContentSource, GameService, ResultsService, RiddleSource};
use crate::game::rules::GameRules;
use crate::model::wire::{
    GameAnswerRequest, GameAnswerResponse, ProgressSummaryItem, ResultsCreateRequest,
    ResultsSummaryEnvelope, ResultsSummaryResponse, SessionResponse, StartGameRequest,
    StartedRiddle,
};
use crate::model::{Book, BookId, Extract, Level};

pub const SESSION_HEADER: &str = "X-Session-Id";

/// JSON client for the backend (`api_url`: books, sessions, results) and the
/// game service (`game_service_url`: start and submit).
pub struct RemoteClient<T: Transport> {
    transport: T,
    api_url: String,
    game_service_url: String,
}

impl<T: Transport> RemoteClient<T> {
    pub fn new(transport: T, api_url: &str, game_service_url: &str) -> Self {
        Self {
            transport,
            api_url: api_url.trim_end_matches('/').to_string(),
            game_service_url: game_service_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn exchange(&self, operation: &str, request: HttpRequest) -> Result<String, ClientError> {
        debug!(target: "remote_client", "{:?} {}", request.method, request.url);
        let response = self.transport.send(&request)?;
        if !response.is_success() {
            return Err(ClientError::Status {
                operation: operation.to_string(),
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    fn post_json<B: Serialize>(
        &self,
        operation: &str,
        url: String,
        body: &B,
        session_id: Option<&str>,
    ) -> Result<String, ClientError> {
        let body = serde_json::to_string(body).map_err(ClientError::Encode)?;
        let mut request = HttpRequest::post(url, body);
        if let Some(session_id) = session_id {
            request = request.with_header(SESSION_HEADER, session_id);
        }
        self.exchange(operation, request)
    }

    fn get_with_session(&self, operation: &str, url: String, session_id: &str) -> Result<String, ClientError> {
        self.exchange(operation, HttpRequest::get(url).with_header(SESSION_HEADER, session_id))
    }
}

fn decode<D: DeserializeOwned>(operation: &str, body: &str) -> Result<D, ClientError> {
    serde_json::from_str(body).map_err(|source| ClientError::Decode {
        operation: operation.to_string(),
        source,
    })
}

impl<T: Transport> ContentSource for RemoteClient<T> {
    /// Any failure falls back to the bundled library.
    fn books(&self) -> Result<Vec<Book>, ClientError> {
        let url = format!("{}/books", self.api_url);
        let fetched = self
            .exchange("Books", HttpRequest::get(url))
            .and_then(|body| decode::<Vec<Book>>("Books", &body));
        match fetched {
            Ok(books) => Ok(books),
            Err(err) => {
                warn!(target: "remote_client", "Falling back to bundled books: {}", err);
                Ok(mock_books())
            }
        }
    }

    /// The backend has no extracts endpoint yet; extracts are bundled.
    fn extracts(&self, book_id: BookId) -> Result<Vec<Extract>, ClientError> {
        Ok(mock_extracts(book_id))
    }

    fn create_session(&self) -> Result<String, ClientError> {
        let body = self.post_json("Session", format!("{}/session", self.api_url), &serde_json::json!({}), None)?;
        let response: SessionResponse = decode("Session", &body)?;
        Ok(response.session_id)
    }
}

impl<T, G> RiddleSource<G> for RemoteClient<T>
where
    T: Transport,
    G: GameRules,
    G::Riddle: DeserializeOwned,
{
    fn start_level(&self, book_id: BookId, chapter: usize) -> Result<Level<G::Riddle>, ClientError> {
        let operation = format!("{} start", G::KIND);
        let request = StartGameRequest {
            book_id,
            game_type: G::KIND,
            chapter,
        };
        let url = format!("{}/games/{}/start", self.game_service_url, G::KIND.slug());
        let body = self.post_json(&operation, url, &request, None)?;
        let started: Vec<StartedRiddle<G::Riddle>> = decode(&operation, &body)?;
        Ok(Level::from_started(started))
    }
}

impl<T: Transport> GameService for RemoteClient<T> {
    fn submit(&self, request: &GameAnswerRequest) -> Result<GameAnswerResponse, ClientError> {
        let operation = format!("{} submit", request.kind());
        let url = format!("{}/games/{}/submit", self.game_service_url, request.kind().slug());
        let body = self.post_json(&operation, url, request, None)?;
        decode(&operation, &body)
    }
}

impl<T: Transport> ResultsService for RemoteClient<T> {
    /// The response body is ignored.
    fn post_result(&self, session_id: &str, request: &ResultsCreateRequest) -> Result<(), ClientError> {
        self.post_json(
            "Results POST",
            format!("{}/results", self.api_url),
            request,
            Some(session_id),
        )?;
        Ok(())
    }

    fn results_summary(&self, session_id: &str, book_id: BookId) -> Result<ResultsSummaryResponse, ClientError> {
        let operation = "Results summary";
        let url = format!("{}/results/summary?book_id={}", self.api_url, book_id);
        let body = self.get_with_session(operation, url, session_id)?;
        match decode::<ResultsSummaryEnvelope>(operation, &body)? {
            ResultsSummaryEnvelope::Plain(summary) => Ok(summary),
            ResultsSummaryEnvelope::Wrapped { books } => books
                .into_iter()
                .next()
                .ok_or_else(|| ClientError::EmptySummary(operation.to_string())),
        }
    }

    /// A body that is not an array reads as "no progress".
    fn progress_summary(&self, session_id: &str) -> Result<Vec<ProgressSummaryItem>, ClientError> {
        let operation = "Progress summary";
        let url = format!("{}/progress/summary", self.api_url);
        let body = self.get_with_session(operation, url, session_id)?;
        let value: serde_json::Value = decode(operation, &body)?;
        if !value.is_array() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|source| ClientError::Decode {
            operation: operation.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use crate::api::transport::Method;
    use crate::game::{CrossoutRules, SpellcheckRules};
    use crate::model::riddle::CrossoutRiddle;
    use crate::model::GameKind;

    const API: &str = "http://backend.test/";
    const GAMES: &str = "http://games.test";

    fn client(transport: ScriptedTransport) -> RemoteClient<ScriptedTransport> {
        RemoteClient::new(transport, API, GAMES)
    }

    #[test]
    fn test_books_fall_back_to_bundled_library() {
        let client = client(ScriptedTransport::default().respond(500, "boom"));
        let books = client.books().unwrap();
        assert_eq!(books.len(), 8);
        assert_eq!(
            client.transport().last_request().unwrap().url,
            "http://backend.test/books"
        );

        let client = RemoteClient::new(ScriptedTransport::default().fail("offline"), API, GAMES);
        assert_eq!(client.books().unwrap()[0].title, "Pan Tadeusz");
    }

    #[test]
    fn test_start_level_posts_request_and_reads_game_id() {
        let body = r#"[
            {"gameId": 77, "riddle": {"lines": [{"id": "1", "text": "a"}, {"id": "2", "text": "b"}]}},
            {"gameId": 77, "riddle": {"lines": [{"id": "1", "text": "c"}]}}
        ]"#;
        let client = client(ScriptedTransport::default().respond(200, body));
        let level: Level<CrossoutRiddle> =
            RiddleSource::<CrossoutRules>::start_level(&client, 3, 2).unwrap();

        assert_eq!(level.game_id, Some(77));
        assert_eq!(level.len(), 2);
        assert!(level.riddles[0].extra_line_id.is_none());

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://games.test/games/crossout/start");
        let sent: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent["bookId"], 3);
        assert_eq!(sent["gameType"], "crossout");
        assert_eq!(sent["chapter"], 2);
    }

    #[test]
    fn test_non_success_status_is_an_error_with_body() {
        let client = client(ScriptedTransport::default().respond(503, "maintenance"));
        let err = RiddleSource::<SpellcheckRules>::start_level(&client, 1, 0).unwrap_err();
        assert_eq!(err.to_string(), "spellcheck start failed: 503 maintenance");
    }

    #[test]
    fn test_submit_goes_to_game_slug() {
        let client = client(
            ScriptedTransport::default()
                .respond(200, r#"{"score": 100, "accuracy": 1.0, "pagesCompleted": 5, "time": "00:42"}"#),
        );
        let request = GameAnswerRequest::Spellcheck {
            game_id: 1002,
            selected_word_ids: vec!["w5".to_string(), "w7".to_string()],
            elapsed_time_ms: Some(42000),
        };
        let response = client.submit(&request).unwrap();
        assert_eq!(response.pages_completed, 5);
        assert_eq!(
            client.transport().last_request().unwrap().url,
            "http://games.test/games/spellcheck/submit"
        );
    }

    #[test]
    fn test_results_calls_carry_session_header() {
        let summary = r#"{"books": [{"chapterName": "Rozdział 1", "chapters": 20,
            "completedChapters": 3, "score": 70, "mistakes": 2, "time": "03:00"}]}"#;
        let client = client(
            ScriptedTransport::default()
                .respond(201, "")
                .respond(200, summary)
                .respond(200, r#"{"error": "nothing yet"}"#),
        );
        let request = ResultsCreateRequest {
            book_id: 2,
            chapter: 4,
            game_type: GameKind::Choice,
            score: 90,
            accuracy: 0.9,
            mistakes: 1,
            duration_sec: 61,
            completed_puzzles: 5,
            total_puzzles: 5,
        };
        client.post_result("abc", &request).unwrap();
        assert_eq!(
            client.transport().last_request().unwrap().header("x-session-id"),
            Some("abc")
        );

        let summary = client.results_summary("abc", 2).unwrap();
        assert_eq!(summary.completed_chapters, 3);
        assert_eq!(
            client.transport().last_request().unwrap().url,
            "http://backend.test/results/summary?book_id=2"
        );

        assert!(client.progress_summary("abc").unwrap().is_empty());
    }

    #[test]
    fn test_empty_wrapped_summary_is_an_error() {
        let client = client(ScriptedTransport::default().respond(200, r#"{"books": []}"#));
        let err = client.results_summary("abc", 1).unwrap_err();
        assert!(matches!(err, ClientError::EmptySummary(_)));
    }

    #[test]
    fn test_create_session_reads_token() {
        let client = client(ScriptedTransport::default().respond(200, r#"{"session_id": "s-1"}"#));
        assert_eq!(client.create_session().unwrap(), "s-1");
    }
}
