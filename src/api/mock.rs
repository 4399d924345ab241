//! Bundled offline library: eight Polish classics and five puzzles per game
//! built from the invocation of "Pan Tadeusz".

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use uuid::Uuid;

use super::{ClientError, ContentSource, RiddleSource};
use crate::game::{AnagramRules, ChoiceRules, CrossoutRules, FillGapsRules, SpellcheckRules, SwitchRules};
use crate::model::riddle::{
    AnagramRiddle, ChoiceGap, ChoicePart, ChoiceRiddle, CrossoutLine, CrossoutRiddle, FillGapsPart,
    FillGapsPrompt, FillGapsRiddle, GameText, RiddleOption, RiddleWord, SpellcheckRiddle, SwitchPair,
    SwitchRiddle,
};
use crate::model::wire::{GameId, StartedRiddle};
use crate::model::{Book, BookId, Extract, Level};

pub const PUZZLES_PER_LEVEL: usize = 5;

const FILL_GAPS_GAME_ID: GameId = 1001;
const SPELLCHECK_GAME_ID: GameId = 1002;
const CROSSOUT_GAME_ID: GameId = 1003;
const ANAGRAM_GAME_ID: GameId = 1004;
const SWITCH_GAME_ID: GameId = 1005;
const CHOICE_GAME_ID: GameId = 1006;

/// (id, title, author, year, genre, chapters, completed chapters)
const BOOKS: [(BookId, &str, &str, i32, &str, usize, usize); 8] = [
    (1, "Pan Tadeusz", "Adam Mickiewicz", 1834, "Epic poem", 17, 0),
    (2, "Lalka", "Bolesław Prus", 1890, "Novel", 20, 3),
    (3, "Ferdydurke", "Witold Gombrowicz", 1937, "Novel", 15, 0),
    (4, "Quo Vadis", "Henryk Sienkiewicz", 1896, "Historical novel", 10, 0),
    (5, "Wesele", "Stanisław Wyspiański", 1901, "Drama", 8, 0),
    (6, "Chłopi", "Władysław Reymont", 1904, "Novel", 12, 0),
    (7, "Przedwiośnie", "Stefan Żeromski", 1925, "Novel", 9, 0),
    (8, "Solaris", "Stanisław Lem", 1961, "Science fiction", 14, 0),
];

const EXTRACT_TITLES: [&str; 8] = [
    "Inwokacja",
    "Rozdział 1",
    "Fragment 1",
    "Fragment 1",
    "Scena 1",
    "Fragment 1",
    "Fragment 1",
    "Fragment 1",
];

const INVOCATION: [&str; 31] = [
    "Litwo,", "Ojczyzno", "moja!", "ty", "jesteś", "jak", "zdrowie;", "Ile", "cię", "trzeba",
    "cenić,", "ten", "tylko", "się", "dowie,", "Kto", "cię", "stracił.", "Dziś", "piękność", "twą",
    "w", "całej", "ozdobie", "Widzę", "i", "opisuję,", "bo", "tęsknię", "po", "tobie.",
];

const INVOCATION_LINES: [&str; 4] = [
    "Litwo, Ojczyzno moja! ty jesteś jak zdrowie;",
    "Ile cię trzeba cenić, ten tylko się dowie,",
    "Kto cię stracił. Dziś piękność twą w całej ozdobie",
    "Widzę i opisuję, bo tęsknię po tobie.",
];

const EXTRA_LINE: &str = "A jutro rano lecę sobie w Bieszczady.";

const FILL_GAPS_PREFIXES: [&str; PUZZLES_PER_LEVEL] = [
    "Litwo! Ojczyzno moja! ty jesteś jak ",
    "Ojczyzno moja! jak wiele w Tobie jest jak ",
    "Kraju rodzinny, dla mnie jesteś niczym ",
    "Ziemio rodzinna! w pamięci jawisz się jak ",
    "Młodości wspomnienie! ty jesteś mi niczym ",
];

/// Text following each of the six fill-gaps gaps.
const FILL_GAPS_TAILS: [&str; 6] = [
    ";\nIle cię trzeba ",
    ", ten tylko się dowie,\nKto cię ",
    ". Dziś piękność twą w całej ",
    "\nW ",
    " nazwach widzę i opisuję,\nBo tęskno mi za tobą i ",
    ".",
];

const FILL_GAPS_WORDS: [&str; 6] = ["zdrowie", "cenić", "stracił", "ozdobie", "porządku", "płaczę"];

const CHOICE_TEXTS: [&str; 6] = [
    "Litwo! Ojczyzno moja! ty jesteś jak ",
    ";\n\nIle cię trzeba ",
    ", ten tylko się dowie,\n\nKto cię ",
    ". Dziś piękność twą w całej ozdobie\n\nW ",
    " nazwach widzę i opisuję,\n\nBo tęskno mi za tobą i ",
    ".",
];

/// Per gap: the correct word first, then two distractors.
const CHOICE_OPTIONS: [[&str; 3]; 5] = [
    ["zdrowie", "bogactwo", "siła"],
    ["cenić", "szanować", "podziwiać"],
    ["stracił", "zapomniał", "opuścił"],
    ["polskich", "obcych", "dawnych"],
    ["płaczę", "śpiewam", "milczę"],
];

/// Offline content source. With a seed the fill-gaps option order is
/// shuffled reproducibly; without one options keep their natural order.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    seed: Option<u64>,
}

impl MockClient {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn level<R>(game_id: GameId, riddles: Vec<R>) -> Level<R> {
        Level::from_started(
            riddles
                .into_iter()
                .map(|riddle| StartedRiddle { game_id, riddle })
                .collect(),
        )
    }
}

pub fn mock_books() -> Vec<Book> {
    BOOKS
        .iter()
        .map(|&(id, title, author, year, genre, chapters, completed_chapters)| Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            year,
            genre: genre.to_string(),
            chapters,
            completed_chapters,
        })
        .collect()
}

pub fn mock_extracts(book_id: BookId) -> Vec<Extract> {
    let Some(index) = BOOKS.iter().position(|b| b.0 == book_id) else {
        return Vec::new();
    };
    vec![Extract {
        id: book_id * 100 + 1,
        order_no: 1,
        title: EXTRACT_TITLES[index].to_string(),
    }]
}

fn invocation_text(replace: &[(usize, &str)]) -> GameText {
    GameText {
        words: INVOCATION
            .iter()
            .enumerate()
            .map(|(index, word)| {
                let value = replace
                    .iter()
                    .find(|(at, _)| *at == index + 1)
                    .map(|(_, value)| *value)
                    .unwrap_or(*word);
                RiddleWord {
                    id: format!("w{}", index + 1),
                    value: value.to_string(),
                }
            })
            .collect(),
    }
}

fn word_ids(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

pub fn fill_gaps_riddles(seed: Option<u64>) -> Vec<FillGapsRiddle> {
    let mut rng = seed.map(StdRng::seed_from_u64);
    FILL_GAPS_PREFIXES
        .iter()
        .enumerate()
        .map(|(index, prefix)| {
            let mut parts = vec![FillGapsPart::Text {
                value: prefix.to_string(),
            }];
            for (gap, tail) in FILL_GAPS_TAILS.iter().enumerate() {
                parts.push(FillGapsPart::Gap {
                    id: format!("g{}", gap + 1),
                });
                parts.push(FillGapsPart::Text {
                    value: tail.to_string(),
                });
            }

            let mut options: Vec<RiddleOption> = FILL_GAPS_WORDS
                .iter()
                .enumerate()
                .map(|(i, label)| RiddleOption {
                    id: format!("w{}", i + 1),
                    label: label.to_string(),
                })
                .collect();
            if let Some(rng) = rng.as_mut() {
                options.shuffle(rng);
            }

            let answer_key: BTreeMap<String, String> = (1..=FILL_GAPS_WORDS.len())
                .map(|i| (format!("g{}", i), format!("w{}", i)))
                .collect();

            FillGapsRiddle {
                id: index as u32 + 1,
                prompt: FillGapsPrompt { parts },
                options,
                answer_key,
            }
        })
        .collect()
}

pub fn spellcheck_riddle() -> SpellcheckRiddle {
    SpellcheckRiddle {
        prompt: invocation_text(&[(5, "jestęs"), (7, "zdrowei;")]),
        misspelled_word_ids: word_ids(&["w5", "w7"]),
    }
}

pub fn crossout_riddle() -> CrossoutRiddle {
    let mut lines: Vec<CrossoutLine> = INVOCATION_LINES
        .iter()
        .enumerate()
        .map(|(index, text)| CrossoutLine {
            id: (index + 1).to_string(),
            text: text.to_string(),
        })
        .collect();
    lines.push(CrossoutLine {
        id: "5".to_string(),
        text: EXTRA_LINE.to_string(),
    });
    CrossoutRiddle {
        lines,
        extra_line_id: Some("5".to_string()),
    }
}

pub fn anagram_riddle() -> AnagramRiddle {
    AnagramRiddle {
        prompt: invocation_text(&[(2, "oczjzynO"), (7, "rodzwei;")]),
        anagram_word_ids: word_ids(&["w2", "w7"]),
    }
}

pub fn switch_riddle() -> SwitchRiddle {
    SwitchRiddle {
        prompt: invocation_text(&[(2, "moja!"), (3, "Ojczyzno"), (20, "twą"), (21, "piękność")]),
        switches: vec![SwitchPair::new("w2", "w3"), SwitchPair::new("w20", "w21")],
    }
}

pub fn choice_riddle() -> ChoiceRiddle {
    let gaps: Vec<ChoiceGap> = CHOICE_OPTIONS
        .iter()
        .enumerate()
        .map(|(index, labels)| {
            let gap_id = format!("g{}", index + 1);
            ChoiceGap {
                correct_option_id: format!("{}-opt1", gap_id),
                options: labels
                    .iter()
                    .enumerate()
                    .map(|(o, label)| RiddleOption {
                        id: format!("{}-opt{}", gap_id, o + 1),
                        label: label.to_string(),
                    })
                    .collect(),
                id: gap_id,
            }
        })
        .collect();

    let mut parts = Vec::with_capacity(CHOICE_TEXTS.len() + gaps.len());
    for (index, text) in CHOICE_TEXTS.iter().enumerate() {
        parts.push(ChoicePart::Text {
            value: text.to_string(),
        });
        if let Some(gap) = gaps.get(index) {
            parts.push(ChoicePart::Gap {
                gap_id: gap.id.clone(),
            });
        }
    }

    ChoiceRiddle {
        id: "choice-1".to_string(),
        parts,
        gaps,
    }
}

impl ContentSource for MockClient {
    fn books(&self) -> Result<Vec<Book>, ClientError> {
        Ok(mock_books())
    }

    fn extracts(&self, book_id: BookId) -> Result<Vec<Extract>, ClientError> {
        Ok(mock_extracts(book_id))
    }

    fn create_session(&self) -> Result<String, ClientError> {
        let token = Uuid::new_v4().to_string();
        debug!(target: "mock_client", "Created offline session {}", token);
        Ok(token)
    }
}

impl RiddleSource<FillGapsRules> for MockClient {
    fn start_level(&self, _book_id: BookId, _chapter: usize) -> Result<Level<FillGapsRiddle>, ClientError> {
        Ok(Self::level(FILL_GAPS_GAME_ID, fill_gaps_riddles(self.seed)))
    }
}

impl RiddleSource<SpellcheckRules> for MockClient {
    fn start_level(&self, _book_id: BookId, _chapter: usize) -> Result<Level<SpellcheckRiddle>, ClientError> {
        Ok(Self::level(SPELLCHECK_GAME_ID, vec![spellcheck_riddle(); PUZZLES_PER_LEVEL]))
    }
}

impl RiddleSource<CrossoutRules> for MockClient {
    fn start_level(&self, _book_id: BookId, _chapter: usize) -> Result<Level<CrossoutRiddle>, ClientError> {
        Ok(Self::level(CROSSOUT_GAME_ID, vec![crossout_riddle(); PUZZLES_PER_LEVEL]))
    }
}

impl RiddleSource<AnagramRules> for MockClient {
    fn start_level(&self, _book_id: BookId, _chapter: usize) -> Result<Level<AnagramRiddle>, ClientError> {
        Ok(Self::level(ANAGRAM_GAME_ID, vec![anagram_riddle(); PUZZLES_PER_LEVEL]))
    }
}

impl RiddleSource<SwitchRules> for MockClient {
    fn start_level(&self, _book_id: BookId, _chapter: usize) -> Result<Level<SwitchRiddle>, ClientError> {
        Ok(Self::level(SWITCH_GAME_ID, vec![switch_riddle(); PUZZLES_PER_LEVEL]))
    }
}

impl RiddleSource<ChoiceRules> for MockClient {
    fn start_level(&self, _book_id: BookId, _chapter: usize) -> Result<Level<ChoiceRiddle>, ClientError> {
        Ok(Self::level(CHOICE_GAME_ID, vec![choice_riddle(); PUZZLES_PER_LEVEL]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::GameRules;

    #[test]
    fn test_library_matches_bundled_books() {
        let client = MockClient::default();
        let books = client.books().unwrap();
        assert_eq!(books.len(), 8);
        assert_eq!(books[1].title, "Lalka");
        assert_eq!(books[1].completed_chapters, 3);
        assert_eq!(client.extracts(1).unwrap()[0].title, "Inwokacja");
        assert_eq!(client.extracts(8).unwrap()[0].id, 801);
        assert!(client.extracts(42).unwrap().is_empty());
    }

    #[test]
    fn test_every_game_starts_five_puzzles() {
        let client = MockClient::default();
        let fill: Level<FillGapsRiddle> = RiddleSource::<FillGapsRules>::start_level(&client, 1, 0).unwrap();
        let switch: Level<SwitchRiddle> = RiddleSource::<SwitchRules>::start_level(&client, 1, 0).unwrap();
        let choice: Level<ChoiceRiddle> = RiddleSource::<ChoiceRules>::start_level(&client, 1, 0).unwrap();

        assert_eq!(fill.len(), PUZZLES_PER_LEVEL);
        assert_eq!(fill.game_id, Some(1001));
        assert_eq!(fill.riddles[0].gap_ids().len(), 6);
        assert_eq!(switch.riddles[0].prompt.words.len(), 31);
        assert_eq!(choice.riddles[0].gaps.len(), 5);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let a = fill_gaps_riddles(Some(7));
        let b = fill_gaps_riddles(Some(7));
        assert_eq!(a, b);
        let mut labels: Vec<&str> = a[0].options.iter().map(|o| o.label.as_str()).collect();
        labels.sort();
        let mut expected = FILL_GAPS_WORDS.to_vec();
        expected.sort();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_answer_keys_solve_the_mock_puzzles() {
        let riddle = switch_riddle();
        let selection = crate::model::SwitchSelection::with_pairs(riddle.switches.clone());
        let tally = SwitchRules::score(&[riddle], &[selection]);
        assert_eq!(tally.correct, tally.possible);

        let crossout = crossout_riddle();
        assert_eq!(crossout.lines.len(), 5);
        assert!(crossout.has_line("5"));
    }

    #[test]
    fn test_offline_sessions_are_unique() {
        let client = MockClient::default();
        assert_ne!(client.create_session().unwrap(), client.create_session().unwrap());
    }
}
