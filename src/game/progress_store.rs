use std::io;
use std::rc::Rc;

use fluent_i18n::t;
use log::{error, info, warn};

use super::storage::KeyValueStorage;
use crate::api::mapping::map_progress_summary;
use crate::api::{ClientError, ContentSource, ResultsService};
use crate::model::{Book, BookId, BookProgress, ChapterProgress, GameResults, Language};

pub const PROGRESS_KEY: &str = "pll_progress";
pub const SESSION_KEY: &str = "session_id";

/// Per-book chapter progress kept as one JSON array in storage. Every
/// mutation rewrites the whole array.
pub struct ProgressStore {
    storage: Rc<dyn KeyValueStorage>,
    language: Language,
}

impl ProgressStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>, language: Language) -> Self {
        Self { storage, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Missing or unreadable progress reads as empty.
    pub fn load(&self) -> Vec<BookProgress> {
        let raw = match self.storage.get(PROGRESS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(target: "progress", "Could not read progress: {}", err);
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(target: "progress", "Discarding unreadable progress: {}", err);
            Vec::new()
        })
    }

    pub fn save(&self, progress: &[BookProgress]) -> io::Result<()> {
        let contents = serde_json::to_string(progress)?;
        self.storage.set(PROGRESS_KEY, &contents)
    }

    /// One record per book, chapter lists padded or truncated to the book's
    /// chapter count. Records of books not listed are dropped.
    pub fn ensure_for_books(&self, books: &[Book]) -> io::Result<Vec<BookProgress>> {
        let mut existing = self.load();
        let progress: Vec<BookProgress> = books
            .iter()
            .map(|book| {
                let found = existing
                    .iter()
                    .position(|p| p.book_id == book.id)
                    .map(|index| existing.swap_remove(index));
                match found {
                    Some(mut record) => {
                        self.fit_chapters(&mut record, book);
                        record
                    }
                    None => BookProgress::empty(book, self.language),
                }
            })
            .collect();
        self.save(&progress)?;
        Ok(progress)
    }

    fn fit_chapters(&self, record: &mut BookProgress, book: &Book) {
        record.chapters.truncate(book.chapters);
        for index in record.chapters.len()..book.chapters {
            record
                .chapters
                .push(ChapterProgress::empty(book, index, self.language));
        }
    }

    /// Overwrites the chapter's score and time and marks it completed,
    /// creating the book or chapter record when missing.
    pub fn update_for_chapter(
        &self,
        book: &Book,
        chapter_index: usize,
        results: &GameResults,
    ) -> io::Result<Vec<BookProgress>> {
        if chapter_index >= book.chapters {
            warn!(
                target: "progress",
                "Book {} has {} chapters, ignoring result for chapter {}",
                book.id,
                book.chapters,
                chapter_index + 1
            );
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("book {} has no chapter {}", book.id, chapter_index + 1),
            ));
        }
        let mut progress = self.load();
        let position = match progress.iter().position(|p| p.book_id == book.id) {
            Some(position) => position,
            None => {
                progress.push(BookProgress::empty(book, self.language));
                progress.len() - 1
            }
        };
        let record = &mut progress[position];
        for index in record.chapters.len()..=chapter_index {
            record
                .chapters
                .push(ChapterProgress::empty(book, index, self.language));
        }

        let chapter = &mut record.chapters[chapter_index];
        chapter.score_percent = results.score;
        chapter.time_seconds = results.time_seconds;
        chapter.completed = true;
        chapter.updated_at = Some(chrono::Utc::now().timestamp());
        info!(
            target: "progress",
            "Book {} chapter {} completed with score {}",
            book.id,
            chapter_index + 1,
            results.score
        );

        self.save(&progress)?;
        Ok(progress)
    }

    pub fn reset_for_book(&self, book: &Book) -> io::Result<Vec<BookProgress>> {
        let mut progress = self.load();
        for record in progress.iter_mut().filter(|p| p.book_id == book.id) {
            *record = BookProgress::empty(book, self.language);
        }
        self.save(&progress)?;
        Ok(progress)
    }

    pub fn completed_chapters(&self, book_id: BookId) -> usize {
        self.load()
            .iter()
            .find(|p| p.book_id == book_id)
            .map(BookProgress::completed_count)
            .unwrap_or(0)
    }

    pub fn session_token(&self) -> Option<String> {
        match self.storage.get(SESSION_KEY) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(err) => {
                warn!(target: "progress", "Could not read session token: {}", err);
                None
            }
        }
    }

    /// Returns the stored session token, creating and storing one through
    /// `source` when there is none yet.
    pub fn ensure_session(&self, source: &dyn ContentSource) -> Result<String, ClientError> {
        if let Some(token) = self.session_token() {
            return Ok(token);
        }
        let token = source.create_session()?;
        if let Err(err) = self.storage.set(SESSION_KEY, &token) {
            error!(target: "progress", "Could not store session token: {}", err);
        }
        info!(target: "progress", "Started session {}", token);
        Ok(token)
    }

    /// Server-side summary when possible, local progress otherwise. The
    /// error string is meant for inline display.
    pub fn overview(&self, books: &[Book], results: Option<&dyn ResultsService>) -> ProgressOverview {
        let local = || ProgressOverview {
            books: books.to_vec(),
            progress: self.load(),
            error: None,
        };

        let Some(results) = results else {
            return local();
        };
        let Some(session_id) = self.session_token() else {
            return ProgressOverview {
                error: Some(t!("no-session-token")),
                ..local()
            };
        };

        match results.progress_summary(&session_id) {
            Ok(items) if !items.is_empty() => {
                let (books, progress) = map_progress_summary(&items, self.language);
                ProgressOverview {
                    books,
                    progress,
                    error: None,
                }
            }
            Ok(_) => local(),
            Err(err) => {
                error!(target: "progress", "Failed to load results: {}", err);
                ProgressOverview {
                    error: Some(format!("{}: {}", t!("progress-load-failed"), err)),
                    ..local()
                }
            }
        }
    }
}

/// What the progress screen lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressOverview {
    pub books: Vec<Book>,
    pub progress: Vec<BookProgress>,
    pub error: Option<String>,
}

impl ProgressOverview {
    /// Books with their completed chapter counts taken from `progress`.
    pub fn books_with_progress(&self) -> Vec<Book> {
        self.books
            .iter()
            .map(|book| Book {
                completed_chapters: self
                    .progress
                    .iter()
                    .find(|p| p.book_id == book.id)
                    .map(BookProgress::completed_count)
                    .unwrap_or(0),
                ..book.clone()
            })
            .collect()
    }
}
