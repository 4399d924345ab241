use serde::{Deserialize, Serialize};

use super::Language;

pub type BookId = u32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub chapters: usize,
    #[serde(default)]
    pub completed_chapters: usize,
}

/// An excerpt of a book that a chapter's puzzles are built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Extract {
    pub id: u32,
    pub order_no: u32,
    pub title: String,
}

pub fn genre_label(genre: &str, language: Language) -> String {
    let label = match (genre, language) {
        ("Epic poem", Language::Pl) => "Epopeja",
        ("Novel", Language::Pl) => "Powieść",
        ("Historical novel", Language::Pl) => "Powieść historyczna",
        ("Drama", Language::Pl) => "Dramat",
        _ => genre,
    };
    label.to_string()
}
