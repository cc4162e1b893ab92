use crate::GamePhase;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Failures surfaced to the player. An unrecognised guess is not one of
/// them: any text is accepted and at worst counts as a miss.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum QuizError {
    #[error("champion catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },
    #[error("leaderboard unavailable: {reason}")]
    LeaderboardUnavailable { reason: String },
    #[error("local storage unavailable: {reason}")]
    StorageUnavailable { reason: String },
    #[error("action not allowed while {current_phase}")]
    InvalidGameState { current_phase: GamePhase },
    #[error("a score submission is already in progress")]
    SubmissionInProgress,
    #[error("player name must not be empty")]
    EmptyPlayerName,
}
