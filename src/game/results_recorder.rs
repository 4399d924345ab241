use std::rc::Rc;

use log::{error, info};

use super::progress_store::ProgressStore;
use crate::api::ResultsService;
use crate::events::EventHandler;
use crate::model::wire::ResultsCreateRequest;
use crate::model::{Book, GameKind, GameResults, SessionEvent};

/// Records finished levels of one book chapter: local progress always, the
/// backend's results list when a results service is configured.
pub struct ResultsRecorder {
    progress: Rc<ProgressStore>,
    results_service: Option<Rc<dyn ResultsService>>,
    book: Book,
    chapter_index: usize,
    recorded: Vec<GameResults>,
}

impl ResultsRecorder {
    pub fn new(
        progress: Rc<ProgressStore>,
        results_service: Option<Rc<dyn ResultsService>>,
        book: Book,
        chapter_index: usize,
    ) -> Self {
        Self {
            progress,
            results_service,
            book,
            chapter_index,
            recorded: Vec::new(),
        }
    }

    pub fn recorded(&self) -> &[GameResults] {
        &self.recorded
    }

    fn record(&mut self, kind: GameKind, results: &GameResults) {
        if let Err(err) = self
            .progress
            .update_for_chapter(&self.book, self.chapter_index, results)
        {
            error!(target: "results", "Could not save progress: {}", err);
        }
        self.recorded.push(results.clone());

        let Some(service) = &self.results_service else {
            return;
        };
        let Some(session_id) = self.progress.session_token() else {
            error!(target: "results", "No session token, {} result not sent", kind);
            return;
        };

        let request = ResultsCreateRequest {
            book_id: self.book.id,
            chapter: self.chapter_index + 1,
            game_type: kind,
            score: results.score,
            accuracy: results.accuracy,
            mistakes: results.total_mistakes,
            duration_sec: results.time_seconds,
            completed_puzzles: results.completed_puzzles,
            total_puzzles: results.total_puzzles,
        };
        match service.post_result(&session_id, &request) {
            Ok(()) => info!(target: "results", "Sent {} result for book {}", kind, self.book.id),
            Err(err) => error!(target: "results", "Failed to send result: {}", err),
        }
    }
}

impl EventHandler<SessionEvent> for ResultsRecorder {
    fn handle_event(&mut self, event: &SessionEvent) {
        if let SessionEvent::Finished { kind, results } = event {
            self.record(*kind, results);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use test_context::test_context;

    use super::*;
    use crate::api::mock::mock_books;
    use crate::api::ClientError;
    use crate::events::{subscribe_handler, Channel};
    use crate::game::progress_store::SESSION_KEY;
    use crate::game::storage::{KeyValueStorage, MemoryStorage};
    use crate::model::wire::{ProgressSummaryItem, ResultsSummaryResponse};
    use crate::model::{BookId, Language};
    use crate::tests::UsingLogger;

    #[derive(Default)]
    struct RecordingService {
        fail: bool,
        posted: RefCell<Vec<(String, ResultsCreateRequest)>>,
    }

    impl ResultsService for RecordingService {
        fn post_result(&self, session_id: &str, request: &ResultsCreateRequest) -> Result<(), ClientError> {
            self.posted
                .borrow_mut()
                .push((session_id.to_string(), request.clone()));
            if self.fail {
                return Err(ClientError::Status {
                    operation: "Results POST".to_string(),
                    status: 500,
                    body: String::new(),
                });
            }
            Ok(())
        }

        fn results_summary(&self, _: &str, _: BookId) -> Result<ResultsSummaryResponse, ClientError> {
            Err(ClientError::EmptySummary("Results summary".to_string()))
        }

        fn progress_summary(&self, _: &str) -> Result<Vec<ProgressSummaryItem>, ClientError> {
            Ok(Vec::new())
        }
    }

    fn finished(score: u8) -> SessionEvent {
        SessionEvent::Finished {
            kind: GameKind::Anagram,
            results: GameResults::from_reported(f64::from(score), f64::from(score) / 100.0, 1, 5, 5, 64),
        }
    }

    fn setup(service: Rc<RecordingService>) -> (ResultsRecorder, Rc<ProgressStore>, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::default());
        let progress = Rc::new(ProgressStore::new(storage.clone(), Language::Pl));
        let service: Rc<dyn ResultsService> = service;
        let recorder = ResultsRecorder::new(progress.clone(), Some(service), mock_books()[1].clone(), 3);
        (recorder, progress, storage)
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_finished_level_updates_progress_and_posts(_: &mut UsingLogger) {
        let service = Rc::new(RecordingService::default());
        let (recorder, progress, storage) = setup(service.clone());
        storage.set(SESSION_KEY, "token-1").unwrap();

        let (emitter, observer) = Channel::<SessionEvent>::new();
        let recorder = Rc::new(RefCell::new(recorder));
        let subscription = subscribe_handler(&observer, recorder.clone());

        emitter.emit_owned(SessionEvent::FinishConfirmationDismissed);
        emitter.emit_owned(finished(70));
        subscription.unsubscribe();
        emitter.emit_owned(finished(10));

        assert_eq!(recorder.borrow().recorded().len(), 1);
        let chapter = &progress.load()[0].chapters[3];
        assert!(chapter.completed);
        assert_eq!(chapter.score_percent, 70);
        assert_eq!(chapter.title, "Rozdział 4");

        let posted = service.posted.borrow();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0, "token-1");
        assert_eq!(posted[0].1.book_id, 2);
        assert_eq!(posted[0].1.chapter, 4);
        assert_eq!(posted[0].1.game_type, GameKind::Anagram);
        assert_eq!(posted[0].1.duration_sec, 64);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_missing_token_skips_post(_: &mut UsingLogger) {
        let service = Rc::new(RecordingService::default());
        let (mut recorder, progress, _) = setup(service.clone());
        recorder.handle_event(&finished(50));

        assert!(service.posted.borrow().is_empty());
        assert_eq!(progress.completed_chapters(2), 1);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_failed_post_is_swallowed(_: &mut UsingLogger) {
        let service = Rc::new(RecordingService {
            fail: true,
            ..Default::default()
        });
        let (mut recorder, progress, storage) = setup(service.clone());
        storage.set(SESSION_KEY, "token-1").unwrap();
        recorder.handle_event(&finished(50));

        assert_eq!(service.posted.borrow().len(), 1);
        assert_eq!(progress.completed_chapters(2), 1);
        assert_eq!(recorder.recorded().len(), 1);
    }
}
