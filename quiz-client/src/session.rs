use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::SessionError;
use quiz_core::{
    CatalogSource, GameSession, GameStateStore, GuessMatcher, Leaderboard, LeaderboardStore,
    PendingSubmission, QuizEventHandler, QuizRules, SubmissionPlan, execute_plan,
};
use quiz_types::{Champion, GameSnapshot, GuessOutcome, LeaderboardEntry};

/// Owns one player's quiz run and coordinates it with the catalog, the
/// leaderboard and local storage.
///
/// Every transition runs under the session lock and is written through to the
/// state store before the lock is released. A score submission holds a
/// pending flag instead of the lock while it talks to the leaderboard, so
/// guesses and resets arriving in the meantime are refused rather than queued.
pub struct QuizSession {
    game: Arc<RwLock<GameSession>>,
    matcher: GuessMatcher,
    champions: Vec<Champion>,
    leaderboard: Arc<dyn LeaderboardStore>,
    state_store: Arc<dyn GameStateStore>,
}

impl QuizSession {
    /// Fetch the catalog and restore the last stored run, or start a fresh one.
    /// Without a catalog nothing can be guessed, so that failure is fatal here.
    pub async fn load(
        catalog: &dyn CatalogSource,
        leaderboard: Arc<dyn LeaderboardStore>,
        state_store: Arc<dyn GameStateStore>,
        rules: QuizRules,
    ) -> Result<Self, SessionError> {
        let champions = catalog
            .fetch_champions()
            .await
            .map_err(SessionError::CatalogUnavailable)?;

        let game = match state_store
            .load_snapshot()
            .await
            .map_err(SessionError::StorageUnavailable)?
        {
            Some(snapshot) => {
                info!(lives = snapshot.lives, score = snapshot.score, "Restoring stored quiz run");
                GameSession::restore(rules, snapshot)
            }
            None => GameSession::new(rules),
        };

        let matcher = GuessMatcher::from_champions(&champions);
        info!("Quiz session ready with {} champions", matcher.entry_count());
        Ok(Self {
            game: Arc::new(RwLock::new(game)),
            matcher,
            champions,
            leaderboard,
            state_store,
        })
    }

    pub fn champions(&self) -> &[Champion] {
        &self.champions
    }

    pub async fn add_event_handler(&self, handler: Box<dyn QuizEventHandler>) {
        self.game.write().await.event_bus.add_handler(handler);
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.game.read().await.snapshot()
    }

    pub async fn is_submission_pending(&self) -> bool {
        self.game.read().await.is_submission_pending()
    }

    /// Score shown against the catalog size, e.g. `"12 / 168"`
    pub async fn progress(&self) -> String {
        let score = self.game.read().await.score();
        Leaderboard::format_progress(score, self.champions.len())
    }

    /// Whether the champion has been guessed in the current run
    pub async fn is_guessed(&self, champion: &Champion) -> bool {
        let Some(normalized) = self.matcher.normalized_name_of(&champion.id) else {
            return false;
        };
        self.game.read().await.has_guessed(normalized)
    }

    /// Apply a guess and store the new state. If storing fails the guess has
    /// still counted, and the error carries its outcome.
    pub async fn submit_guess(&self, guess: &str) -> Result<GuessOutcome, SessionError> {
        let mut game = self.game.write().await;
        let outcome = game.submit_guess(&self.matcher, guess)?;

        if !matches!(outcome, GuessOutcome::Duplicate(_)) {
            if let Err(source) = self.state_store.save_snapshot(&game.snapshot()).await {
                return Err(SessionError::UnsavedGuess { outcome, source });
            }
        }
        Ok(outcome)
    }

    pub async fn reset(&self) -> Result<(), SessionError> {
        let mut game = self.game.write().await;
        game.reset()?;
        self.persist(&game.snapshot()).await
    }

    /// Record the finished game's score under `player_name`. A new or better
    /// score starts a new round; an equal or lower one leaves the game over
    /// screen in place. If the leaderboard can't be read or written the run
    /// stays in game over, untouched, and the caller may retry. Dropping the
    /// returned future before it finishes also releases the submission.
    pub async fn submit_final_score(&self, player_name: &str) -> Result<SubmissionPlan, SessionError> {
        let pending = self.game.write().await.begin_submission(player_name)?;
        let guard = PendingSubmissionGuard::new(self.game.clone());

        match self.write_high_score(&pending).await {
            Ok(plan) => {
                let mut game = self.game.write().await;
                game.complete_submission(plan.clone())?;
                guard.disarm();
                self.persist(&game.snapshot()).await?;
                Ok(plan)
            }
            Err(error) => {
                warn!("Score submission for {} failed: {}", pending.player_name, error);
                self.game.write().await.abort_submission(&error.to_string())?;
                guard.disarm();
                Err(error)
            }
        }
    }

    async fn write_high_score(&self, pending: &PendingSubmission) -> Result<SubmissionPlan, SessionError> {
        let records = self
            .leaderboard
            .fetch_high_scores()
            .await
            .map_err(SessionError::LeaderboardUnavailable)?;

        let plan = Leaderboard::plan_submission(pending, &records);
        execute_plan(self.leaderboard.as_ref(), &plan)
            .await
            .map_err(SessionError::LeaderboardUnavailable)?;

        Ok(plan)
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, SessionError> {
        let records = self
            .leaderboard
            .fetch_high_scores()
            .await
            .map_err(SessionError::LeaderboardUnavailable)?;
        Ok(Leaderboard::rank(records))
    }

    async fn persist(&self, snapshot: &GameSnapshot) -> Result<(), SessionError> {
        self.state_store
            .save_snapshot(snapshot)
            .await
            .map_err(SessionError::StorageUnavailable)
    }
}

const SUBMISSION_CANCELLED: &str = "submission cancelled before it finished";

/// Aborts the pending submission if `submit_final_score` is dropped midway,
/// so a timed out or cancelled caller can't leave the session locked.
struct PendingSubmissionGuard {
    game: Arc<RwLock<GameSession>>,
    armed: bool,
}

impl PendingSubmissionGuard {
    fn new(game: Arc<RwLock<GameSession>>) -> Self {
        Self { game, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSubmissionGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        warn!("Score submission dropped before completing, releasing it");
        match self.game.try_write() {
            Ok(mut game) => abort_cancelled(&mut game),
            Err(_) => {
                // Someone holds the lock; finish the abort once they let go
                let game = self.game.clone();
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        handle.spawn(async move {
                            abort_cancelled(&mut *game.write().await);
                        });
                    }
                    Err(_) => error!("No runtime to release a cancelled score submission"),
                }
            }
        }
    }
}

fn abort_cancelled(game: &mut GameSession) {
    if let Err(e) = game.abort_submission(SUBMISSION_CANCELLED) {
        warn!("Could not release cancelled submission: {}", e);
    }
}
