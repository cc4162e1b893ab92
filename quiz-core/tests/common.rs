#![allow(dead_code)]

use quiz_core::{GameSession, GuessMatcher, QuizEvent, QuizEventHandler};
use quiz_types::{CatalogEntry, Champion, ChampionImage, ChampionInfo, GamePhase, GameSnapshot, Tag};
use std::sync::{Arc, Mutex};

/// The two-champion catalog used by the guessing scenarios
pub fn create_scenario_catalog() -> Vec<CatalogEntry> {
    vec![CatalogEntry::new("1", "Kai'Sa"), CatalogEntry::new("2", "Zed")]
}

pub fn create_scenario_matcher() -> GuessMatcher {
    GuessMatcher::new(create_scenario_catalog())
}

pub fn create_test_champion(id: &str, name: &str, tags: Vec<Tag>, difficulty: u8) -> Champion {
    Champion {
        id: id.to_string(),
        key: id.to_string(),
        name: name.to_string(),
        title: format!("the {}", name),
        tags,
        info: ChampionInfo {
            difficulty,
            ..ChampionInfo::default()
        },
        image: ChampionImage {
            loading: format!("https://example.test/loading/{}.jpg", id),
            square: String::new(),
        },
    }
}

pub fn create_test_champions() -> Vec<Champion> {
    vec![
        create_test_champion("Ahri", "Ahri", vec![Tag::Mage, Tag::Assassin], 5),
        create_test_champion("Garen", "Garen", vec![Tag::Fighter, Tag::Tank], 1),
        create_test_champion("Jinx", "Jinx", vec![Tag::Marksman], 6),
        create_test_champion("Kaisa", "Kai'Sa", vec![Tag::Marksman], 6),
        create_test_champion("Zed", "Zed", vec![Tag::Assassin], 7),
    ]
}

/// A session that has just ended with the given champions guessed
pub fn create_game_over_session(guessed: &[&str]) -> GameSession {
    GameSession::restore(
        Default::default(),
        GameSnapshot {
            lives: 0,
            score: guessed.len() as u32,
            correct_guesses: guessed.iter().map(|s| s.to_string()).collect(),
            phase: GamePhase::GameOver,
        },
    )
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<QuizEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<QuizEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(QuizEvent::name).collect()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&QuizEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl QuizEventHandler for EventCollector {
    fn handle_event(&mut self, event: QuizEvent) {
        self.events.lock().unwrap().push(event);
    }
}
