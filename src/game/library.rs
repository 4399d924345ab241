use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io;

use fluent_i18n::t;
use itertools::Itertools;
use log::info;

use super::progress_store::ProgressStore;
use crate::model::{genre_label, Book, BookId, BookProgress, Language};

/// Title searches shorter than this (after trimming) are ignored.
pub const MIN_SEARCH_LEN: usize = 3;
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    pub search: String,
    pub authors: BTreeSet<String>,
    pub genres: BTreeSet<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub sort: SortKey,
    pub order: SortOrder,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            authors: BTreeSet::new(),
            genres: BTreeSet::new(),
            year_from: None,
            year_to: None,
            sort: SortKey::default(),
            order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl BookQuery {
    fn matches(&self, book: &Book) -> bool {
        let search = self.search.trim().to_lowercase();
        if search.chars().count() >= MIN_SEARCH_LEN && !book.title.to_lowercase().contains(&search) {
            return false;
        }
        if !self.authors.is_empty() && !self.authors.contains(&book.author) {
            return false;
        }
        if !self.genres.is_empty() && !self.genres.contains(&book.genre) {
            return false;
        }
        self.year_from.map_or(true, |from| book.year >= from) && self.year_to.map_or(true, |to| book.year <= to)
    }

    fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let ordering = match self.sort {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
            SortKey::Year => a.year.cmp(&b.year),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Filters, sorts and pages `books`. An out-of-range page is clamped,
    /// so an empty result still reports page 1 of 1.
    pub fn run(&self, books: &[Book], progress: &[BookProgress]) -> BookPage {
        let matching = books
            .iter()
            .filter(|book| self.matches(book))
            .map(|book| with_progress(book, progress))
            .sorted_by(|a, b| self.compare(a, b))
            .collect::<Vec<_>>();

        let page_size = self.page_size.max(1);
        let total_pages = matching.len().div_ceil(page_size).max(1);
        let page = self.page.clamp(1, total_pages);
        let total_matches = matching.len();
        let books = matching
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        BookPage {
            books,
            page,
            total_pages,
            total_matches,
        }
    }
}

fn with_progress(book: &Book, progress: &[BookProgress]) -> Book {
    match progress.iter().find(|p| p.book_id == book.id) {
        Some(p) => Book {
            completed_chapters: p.completed_count(),
            ..book.clone()
        },
        None => book.clone(),
    }
}

/// Distinct authors for the author filter, alphabetically.
pub fn authors(books: &[Book]) -> Vec<String> {
    books.iter().map(|b| b.author.clone()).unique().sorted().collect()
}

/// Distinct genres with their localized labels, ordered by label.
pub fn genres(books: &[Book], language: Language) -> Vec<(String, String)> {
    books
        .iter()
        .map(|b| b.genre.clone())
        .unique()
        .map(|genre| {
            let label = genre_label(&genre, language);
            (genre, label)
        })
        .sorted_by(|a, b| a.1.cmp(&b.1))
        .collect()
}

/// Inclusive (min, max) publication years, `None` for an empty library.
pub fn year_bounds(books: &[Book]) -> Option<(i32, i32)> {
    books.iter().map(|b| b.year).minmax().into_option()
}

#[derive(Debug, Clone, PartialEq)]
pub enum StartOver {
    /// Nothing to lose; the book can be started right away.
    Ready,
    Confirm { title: String, message: String },
}

/// Holds a start-over request until the player confirms it. Progress is
/// only reset on `confirm`.
#[derive(Debug, Default)]
pub struct StartOverGuard {
    pending: Option<Book>,
}

impl StartOverGuard {
    pub fn request(&mut self, book: &Book, progress: &ProgressStore) -> StartOver {
        if progress.completed_chapters(book.id) == 0 {
            self.pending = None;
            return StartOver::Ready;
        }
        self.pending = Some(book.clone());
        StartOver::Confirm {
            title: t!("start-over-title"),
            message: t!("start-over-message"),
        }
    }

    pub fn pending(&self) -> Option<BookId> {
        self.pending.as_ref().map(|b| b.id)
    }

    pub fn confirm(&mut self, progress: &ProgressStore) -> io::Result<Option<Vec<BookProgress>>> {
        let Some(book) = self.pending.take() else {
            return Ok(None);
        };
        info!(target: "library", "Starting {} over", book.title);
        progress.reset_for_book(&book).map(Some)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
