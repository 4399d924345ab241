use std::cell::RefCell;
use std::rc::Rc;

use itertools::Itertools;
use log::{info, warn};

use litgame::api::{ClientError, ContentSource, MockClient, RiddleSource};
use litgame::events::{subscribe_handler, Channel, EventHandler};
use litgame::game::choice::ChoiceInput;
use litgame::game::crossout::CrossoutInput;
use litgame::game::fill_gaps::FillGapsInput;
use litgame::game::library::BookQuery;
use litgame::game::session::Command;
use litgame::game::switch::SwitchInput;
use litgame::game::word_pick::WordInput;
use litgame::game::{
    AnagramRules, ChoiceRules, CrossoutRules, FileStorage, FillGapsRules, GameRules, GameSession,
    LocalScorer, ProgressStore, ResultsRecorder, Settings, SpellcheckRules, SwitchRules,
};
use litgame::model::riddle::{
    AnagramRiddle, ChoiceRiddle, CrossoutRiddle, FillGapsRiddle, SpellcheckRiddle, SwitchRiddle,
};
use litgame::model::{Book, GameKind, GameResults, SessionCommand, SessionEvent};
use litgame::Destroyable;

fn init_logging() {
    env_logger::init();
}

/// Echoes session transitions when `DEBUG=1`.
struct EventLog;

impl EventHandler<SessionEvent> for EventLog {
    fn handle_event(&mut self, event: &SessionEvent) {
        println!("  {:?}", event);
    }
}

/// Plays one level of `G` with perfect answers through a wired session, the
/// same way a front end would drive it.
fn autoplay<G, S>(
    source: &S,
    progress: &Rc<ProgressStore>,
    book: &Book,
    chapter_index: usize,
    solve: fn(&G::Riddle) -> Vec<G::Input>,
) -> Result<Option<GameResults>, ClientError>
where
    G: GameRules,
    S: RiddleSource<G>,
{
    let level = source.start_level(book.id, chapter_index + 1)?;
    let riddles = level.riddles.clone();

    let (command_emitter, command_observer) = Channel::<Command<G>>::new();
    let (event_emitter, event_observer) = Channel::<SessionEvent>::new();

    let recorder = Rc::new(RefCell::new(ResultsRecorder::new(
        progress.clone(),
        None,
        book.clone(),
        chapter_index,
    )));
    let recorder_subscription = subscribe_handler(&event_observer, recorder.clone());
    let log_subscription = Settings::is_debug_mode()
        .then(|| subscribe_handler(&event_observer, Rc::new(RefCell::new(EventLog))));

    let session = GameSession::<G>::wired(command_observer, event_emitter, Box::new(LocalScorer));

    command_emitter.emit_owned(SessionCommand::Load(level));
    for riddle in &riddles {
        for input in solve(riddle) {
            command_emitter.emit_owned(SessionCommand::Input(input));
        }
        command_emitter.emit_owned(SessionCommand::Tick);
        command_emitter.emit_owned(SessionCommand::Next);
    }
    command_emitter.emit_owned(SessionCommand::Finish);

    let results = session.borrow().results().cloned();
    session.borrow_mut().destroy();
    recorder_subscription.unsubscribe();
    if let Some(subscription) = log_subscription {
        subscription.unsubscribe();
    }
    Ok(results)
}

fn solve_fill_gaps(riddle: &FillGapsRiddle) -> Vec<FillGapsInput> {
    riddle
        .answer_key
        .iter()
        .map(|(gap_id, option_id)| FillGapsInput::Place {
            gap_id: gap_id.clone(),
            option_id: option_id.clone(),
        })
        .collect()
}

fn solve_spellcheck(riddle: &SpellcheckRiddle) -> Vec<WordInput> {
    riddle
        .misspelled_word_ids
        .iter()
        .cloned()
        .map(WordInput::ToggleWord)
        .collect()
}

fn solve_crossout(riddle: &CrossoutRiddle) -> Vec<CrossoutInput> {
    riddle
        .extra_line_id
        .iter()
        .cloned()
        .map(CrossoutInput::ToggleLine)
        .collect()
}

fn solve_anagram(riddle: &AnagramRiddle) -> Vec<WordInput> {
    riddle
        .anagram_word_ids
        .iter()
        .cloned()
        .map(WordInput::ToggleWord)
        .collect()
}

fn solve_switch(riddle: &SwitchRiddle) -> Vec<SwitchInput> {
    riddle
        .switches
        .iter()
        .flat_map(|pair| {
            [
                SwitchInput::ClickWord(pair.first_word_id.clone()),
                SwitchInput::ClickWord(pair.second_word_id.clone()),
            ]
        })
        .collect()
}

fn solve_choice(riddle: &ChoiceRiddle) -> Vec<ChoiceInput> {
    riddle
        .gaps
        .iter()
        .map(|gap| ChoiceInput::Select {
            gap_id: gap.id.clone(),
            option_id: gap.correct_option_id.clone(),
        })
        .collect()
}

fn play(
    kind: GameKind,
    client: &MockClient,
    progress: &Rc<ProgressStore>,
    book: &Book,
    chapter_index: usize,
) -> Result<Option<GameResults>, ClientError> {
    match kind {
        GameKind::FillGaps => {
            autoplay::<FillGapsRules, _>(client, progress, book, chapter_index, solve_fill_gaps)
        }
        GameKind::Spellcheck => {
            autoplay::<SpellcheckRules, _>(client, progress, book, chapter_index, solve_spellcheck)
        }
        GameKind::Crossout => {
            autoplay::<CrossoutRules, _>(client, progress, book, chapter_index, solve_crossout)
        }
        GameKind::Anagram => {
            autoplay::<AnagramRules, _>(client, progress, book, chapter_index, solve_anagram)
        }
        GameKind::Switch => {
            autoplay::<SwitchRules, _>(client, progress, book, chapter_index, solve_switch)
        }
        GameKind::Choice => {
            autoplay::<ChoiceRules, _>(client, progress, book, chapter_index, solve_choice)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let settings = Settings::load();
    if settings.api_url.is_some() {
        warn!("This build has no HTTP transport, playing with bundled content");
    }
    let language = settings.language;

    let client = MockClient::new(Settings::seed_from_env());
    let storage = Rc::new(FileStorage::new(Settings::data_dir()));
    let progress = Rc::new(ProgressStore::new(storage, language));
    let session_id = progress.ensure_session(&client)?;
    info!("Session {}", session_id);

    let books = client.books()?;
    progress.ensure_for_books(&books)?;

    let page = BookQuery::default().run(&books, &progress.load());
    println!("Library (page {}/{}):", page.page, page.total_pages);
    for book in &page.books {
        println!(
            "  {} ({}, {}) {}/{}",
            book.title, book.author, book.year, book.completed_chapters, book.chapters
        );
    }

    let Some(book) = books.first() else {
        return Ok(());
    };
    let chapter_index = progress.completed_chapters(book.id).min(book.chapters.saturating_sub(1));
    let extract = client
        .extracts(book.id)?
        .into_iter()
        .map(|e| e.title)
        .next()
        .unwrap_or_else(|| language.chapter_title(chapter_index));
    println!("\n{}: {}", book.title, extract);

    for kind in GameKind::ALL {
        match play(kind, &client, &progress, book, chapter_index)? {
            Some(results) => println!("  {:<24} {}", kind.title(language), results.card()),
            None => println!("  {:<24} not finished", kind.title(language)),
        }
    }

    let overview = progress.overview(&books, None);
    let summary = overview
        .books_with_progress()
        .iter()
        .filter(|b| b.completed_chapters > 0)
        .map(|b| format!("{} {}/{}", b.title, b.completed_chapters, b.chapters))
        .join(", ");
    println!("\nProgress: {}", summary);
    Ok(())
}
