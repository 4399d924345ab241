use crate::helpers::parse_time_to_seconds;
use crate::model::wire::{GameAnswerResponse, ProgressSummaryItem};
use crate::model::{Book, BookProgress, GameResults, Language};

/// Submit responses carry no puzzle total; the caller supplies the level size.
pub fn map_submit_to_game_results(response: &GameAnswerResponse, total_puzzles: u32) -> GameResults {
    GameResults::from_reported(
        response.score,
        response.accuracy,
        response.mistakes.unwrap_or(0),
        response.pages_completed,
        total_puzzles,
        parse_time_to_seconds(&response.time),
    )
}

pub fn map_progress_summary(
    items: &[ProgressSummaryItem],
    language: Language,
) -> (Vec<Book>, Vec<BookProgress>) {
    items
        .iter()
        .map(|item| (item.to_book(), item.to_progress(language)))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_response_mapping() {
        let response: GameAnswerResponse = serde_json::from_str(
            r#"{"score": 80, "accuracy": 0.8, "pagesCompleted": 4, "time": "01:05"}"#,
        )
        .unwrap();
        let results = map_submit_to_game_results(&response, 5);

        assert_eq!(results.score, 80);
        assert_eq!(results.accuracy, 0.8);
        assert_eq!(results.total_mistakes, 0);
        assert_eq!(results.completed_puzzles, 4);
        assert_eq!(results.total_puzzles, 5);
        assert_eq!(results.time_seconds, 65);
    }

    #[test]
    fn test_bad_time_maps_to_zero() {
        let response = GameAnswerResponse {
            score: 10.0,
            accuracy: 0.1,
            mistakes: Some(3),
            pages_completed: 1,
            time: "soon".to_string(),
        };
        let results = map_submit_to_game_results(&response, 5);
        assert_eq!(results.time_seconds, 0);
        assert_eq!(results.total_mistakes, 3);
    }

    #[test]
    fn test_oversized_time_maps_to_zero() {
        let response = GameAnswerResponse {
            score: 50.0,
            accuracy: 0.5,
            mistakes: None,
            pages_completed: 5,
            time: "999999999999999999:00".to_string(),
        };
        let results = map_submit_to_game_results(&response, 5);
        assert_eq!(results.time_seconds, 0);
        assert_eq!(results.score, 50);
    }

    #[test]
    fn test_progress_summary_splits_books_and_progress() {
        let items: Vec<ProgressSummaryItem> = serde_json::from_str(
            r#"[{
                "book": {"book_id": 2, "title": "Lalka", "author": "Bolesław Prus", "genre": "Novel"},
                "stats": {"total_chapters": 20, "completed_chapters": 1},
                "chapters": [
                    {"extract_id": 201, "extract_no": 1, "completed": true,
                     "result": {"score": 75.4, "duration_sec": 93}}
                ]
            }]"#,
        )
        .unwrap();
        let (books, progress) = map_progress_summary(&items, Language::Pl);

        assert_eq!(books[0].title, "Lalka");
        assert_eq!(books[0].chapters, 20);
        assert_eq!(progress[0].book_id, 2);
        assert_eq!(progress[0].chapters[0].score_percent, 75);
        assert_eq!(progress[0].chapters[0].title, "Rozdział 1");
        assert_eq!(progress[0].chapters[0].number_label, "1 / 20");
    }
}
