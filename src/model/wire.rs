//! JSON shapes exchanged with the game and results services.

use serde::{Deserialize, Serialize};

use super::riddle::SwitchPair;
use super::{Book, BookId, BookProgress, ChapterProgress, GameKind, Language};

pub type GameId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub book_id: BookId,
    pub game_type: GameKind,
    pub chapter: usize,
}

/// One entry of a `/games/{type}/start` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartedRiddle<R> {
    pub game_id: GameId,
    pub riddle: R,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FillGapAnswer {
    /// Level-wide gap index.
    pub gap_index: usize,
    pub option_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceAnswer {
    pub gap_id: String,
    pub option_id: String,
}

/// Body of `/games/{type}/submit`; the service switches on `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum GameAnswerRequest {
    FillGaps {
        game_id: GameId,
        answers: Vec<FillGapAnswer>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_time_ms: Option<u64>,
    },
    Spellcheck {
        game_id: GameId,
        selected_word_ids: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_time_ms: Option<u64>,
    },
    Crossout {
        game_id: GameId,
        crossed_out_line_ids: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_time_ms: Option<u64>,
    },
    Anagram {
        game_id: GameId,
        selected_word_ids: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_time_ms: Option<u64>,
    },
    Switch {
        game_id: GameId,
        selected_pairs: Vec<SwitchPair>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_time_ms: Option<u64>,
    },
    Choice {
        game_id: GameId,
        answers: Vec<ChoiceAnswer>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_time_ms: Option<u64>,
    },
}

impl GameAnswerRequest {
    pub fn kind(&self) -> GameKind {
        match self {
            GameAnswerRequest::FillGaps { .. } => GameKind::FillGaps,
            GameAnswerRequest::Spellcheck { .. } => GameKind::Spellcheck,
            GameAnswerRequest::Crossout { .. } => GameKind::Crossout,
            GameAnswerRequest::Anagram { .. } => GameKind::Anagram,
            GameAnswerRequest::Switch { .. } => GameKind::Switch,
            GameAnswerRequest::Choice { .. } => GameKind::Choice,
        }
    }

    pub fn game_id(&self) -> GameId {
        match self {
            GameAnswerRequest::FillGaps { game_id, .. }
            | GameAnswerRequest::Spellcheck { game_id, .. }
            | GameAnswerRequest::Crossout { game_id, .. }
            | GameAnswerRequest::Anagram { game_id, .. }
            | GameAnswerRequest::Switch { game_id, .. }
            | GameAnswerRequest::Choice { game_id, .. } => *game_id,
        }
    }
}

/// What `/games/{type}/submit` answers with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameAnswerResponse {
    pub score: f64,
    pub accuracy: f64,
    #[serde(default)]
    pub mistakes: Option<u32>,
    #[serde(default)]
    pub pages_completed: u32,
    /// `mm:ss`
    #[serde(default)]
    pub time: String,
}

/// Body of `POST /results`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultsCreateRequest {
    pub book_id: BookId,
    pub chapter: usize,
    pub game_type: GameKind,
    pub score: u8,
    pub accuracy: f64,
    pub mistakes: u32,
    pub duration_sec: u64,
    pub completed_puzzles: u32,
    pub total_puzzles: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummaryResponse {
    pub chapter_name: String,
    pub chapters: usize,
    pub completed_chapters: usize,
    /// percent, 0-100
    pub score: f64,
    pub mistakes: u32,
    /// `mm:ss`
    pub time: String,
}

/// `/results/summary` answers either with the summary itself or wrapped in
/// a `books` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResultsSummaryEnvelope {
    Wrapped { books: Vec<ResultsSummaryResponse> },
    Plain(ResultsSummaryResponse),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryBook {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub total_chapters: usize,
    pub completed_chapters: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryResult {
    pub score: f64,
    #[serde(default)]
    pub duration_sec: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryChapter {
    pub extract_id: u32,
    pub extract_no: usize,
    #[serde(default)]
    pub extract_title: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub result: Option<SummaryResult>,
}

/// One book of `/progress/summary`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSummaryItem {
    pub book: SummaryBook,
    pub stats: SummaryStats,
    pub chapters: Vec<SummaryChapter>,
}

impl ProgressSummaryItem {
    pub fn to_book(&self) -> Book {
        Book {
            id: self.book.book_id,
            title: self.book.title.clone(),
            author: self.book.author.clone(),
            year: 0,
            genre: self.book.genre.clone().unwrap_or_default(),
            chapters: self.stats.total_chapters,
            completed_chapters: self.stats.completed_chapters,
        }
    }

    pub fn to_progress(&self, language: Language) -> BookProgress {
        let chapters = self
            .chapters
            .iter()
            .enumerate()
            .map(|(index, chapter)| ChapterProgress {
                id: chapter.extract_id.to_string(),
                chapter_index: chapter.extract_no,
                title: chapter
                    .extract_title
                    .clone()
                    .unwrap_or_else(|| language.chapter_title(index)),
                number_label: format!("{} / {}", chapter.extract_no, self.stats.total_chapters),
                score_percent: chapter
                    .result
                    .as_ref()
                    .map(|r| r.score.round().clamp(0.0, 100.0) as u8)
                    .unwrap_or(0),
                time_seconds: chapter.result.as_ref().map(|r| r.duration_sec).unwrap_or(0),
                completed: chapter.completed,
                updated_at: None,
            })
            .collect();
        BookProgress {
            book_id: self.book.book_id,
            chapters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_request_is_tagged_by_slug() {
        let request = GameAnswerRequest::Switch {
            game_id: 1005,
            selected_pairs: vec![SwitchPair::new("w2", "w3")],
            elapsed_time_ms: Some(45000),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "switch");
        assert_eq!(json["gameId"], 1005);
        assert_eq!(json["selectedPairs"][0]["firstWordId"], "w2");
        assert_eq!(json["elapsedTimeMs"], 45000);
        assert_eq!(request.kind(), GameKind::Switch);
    }

    #[test]
    fn test_elapsed_time_is_omitted_when_unknown() {
        let request = GameAnswerRequest::FillGaps {
            game_id: 1001,
            answers: vec![FillGapAnswer {
                gap_index: 1,
                option_id: "opt1".to_string(),
            }],
            elapsed_time_ms: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "fill-gaps");
        assert_eq!(json["answers"][0]["gapIndex"], 1);
        assert!(json.get("elapsedTimeMs").is_none());
    }

    #[test]
    fn test_summary_envelope_accepts_both_shapes() {
        let plain = r#"{"chapterName":"Chapter 1","chapters":17,"completedChapters":2,
            "score":81,"mistakes":3,"time":"04:10"}"#;
        let wrapped = format!(r#"{{"books":[{}]}}"#, plain);

        for body in [plain.to_string(), wrapped] {
            let envelope: ResultsSummaryEnvelope = serde_json::from_str(&body).unwrap();
            let summary = match envelope {
                ResultsSummaryEnvelope::Wrapped { mut books } => books.remove(0),
                ResultsSummaryEnvelope::Plain(summary) => summary,
            };
            assert_eq!(summary.completed_chapters, 2);
        }
    }

    #[test]
    fn test_progress_summary_maps_to_book_and_progress() {
        let item: ProgressSummaryItem = serde_json::from_str(
            r#"{
                "book": {"book_id": 1, "title": "Pan Tadeusz", "author": "Adam Mickiewicz"},
                "stats": {"total_chapters": 12, "completed_chapters": 1},
                "chapters": [
                    {"extract_id": 101, "extract_no": 1, "completed": true,
                     "result": {"score": 87.6, "duration_sec": 95}},
                    {"extract_id": 102, "extract_no": 2, "completed": false}
                ]
            }"#,
        )
        .unwrap();

        let book = item.to_book();
        assert_eq!(book.genre, "");
        assert_eq!(book.completed_chapters, 1);

        let progress = item.to_progress(Language::Pl);
        assert_eq!(progress.chapters[0].score_percent, 88);
        assert_eq!(progress.chapters[0].time_seconds, 95);
        assert_eq!(progress.chapters[1].title, "Rozdział 2");
        assert_eq!(progress.chapters[1].number_label, "2 / 12");
    }
}
