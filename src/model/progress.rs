use serde::{Deserialize, Serialize};

use super::{Book, BookId, Language};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterProgress {
    pub id: String,
    pub chapter_index: usize,
    pub title: String,
    pub number_label: String,
    pub score_percent: u8,
    pub time_seconds: u64,
    pub completed: bool,
    /// Unix timestamp of the last finished play.
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl ChapterProgress {
    pub fn empty(book: &Book, chapter_index: usize, language: Language) -> Self {
        Self {
            id: format!("{}-{}", book.id, chapter_index),
            chapter_index,
            title: language.chapter_title(chapter_index),
            number_label: format!("{} / {}", chapter_index + 1, book.chapters),
            score_percent: 0,
            time_seconds: 0,
            completed: false,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookProgress {
    pub book_id: BookId,
    pub chapters: Vec<ChapterProgress>,
}

impl BookProgress {
    pub fn empty(book: &Book, language: Language) -> Self {
        Self {
            book_id: book.id,
            chapters: (0..book.chapters)
                .map(|index| ChapterProgress::empty(book, index, language))
                .collect(),
        }
    }

    pub fn completed_count(&self) -> usize {
        self.chapters.iter().filter(|c| c.completed).count()
    }
}
