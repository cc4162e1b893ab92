use quiz_types::{GuessOutcome, QuizError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("Champion catalog unavailable: {0}")]
    CatalogUnavailable(#[source] anyhow::Error),
    #[error("Leaderboard unavailable: {0}")]
    LeaderboardUnavailable(#[source] anyhow::Error),
    #[error("Local storage unavailable: {0}")]
    StorageUnavailable(#[source] anyhow::Error),
    #[error("Guess counted as {outcome:?} but could not be saved: {source}")]
    UnsavedGuess {
        outcome: GuessOutcome,
        #[source]
        source: anyhow::Error,
    },
    #[error("Unknown champion: {0}")]
    UnknownChampion(String),
}

impl SessionError {
    /// Serializable form for the presentation layer
    pub fn to_quiz_error(&self) -> Option<QuizError> {
        match self {
            SessionError::Quiz(error) => Some(error.clone()),
            SessionError::CatalogUnavailable(source) => Some(QuizError::CatalogUnavailable {
                reason: source.to_string(),
            }),
            SessionError::LeaderboardUnavailable(source) => Some(QuizError::LeaderboardUnavailable {
                reason: source.to_string(),
            }),
            SessionError::StorageUnavailable(source) => Some(QuizError::StorageUnavailable {
                reason: source.to_string(),
            }),
            SessionError::UnsavedGuess { source, .. } => Some(QuizError::StorageUnavailable {
                reason: source.to_string(),
            }),
            SessionError::UnknownChampion(_) => None,
        }
    }

    /// Whether trying the same action again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::LeaderboardUnavailable(_)
                | SessionError::StorageUnavailable(_)
                | SessionError::Quiz(QuizError::SubmissionInProgress)
        )
    }
}
