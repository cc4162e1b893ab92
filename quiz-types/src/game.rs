use crate::ChampionId;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Playing,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Playing => f.write_str("Playing"),
            GamePhase::GameOver => f.write_str("GameOver"),
        }
    }
}

/// Result of matching one guess against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessOutcome {
    Correct(ChampionId),
    Duplicate(ChampionId),
    Miss,
}

impl GuessOutcome {
    pub fn champion_id(&self) -> Option<&ChampionId> {
        match self {
            GuessOutcome::Correct(id) | GuessOutcome::Duplicate(id) => Some(id),
            GuessOutcome::Miss => None,
        }
    }
}

/// Observable quiz state, also what gets written to local storage.
/// `correct_guesses` holds normalized names in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSnapshot {
    pub lives: u32,
    pub score: u32,
    pub correct_guesses: Vec<String>,
    pub phase: GamePhase,
}
