use crate::{GuessMatcher, QuizEvent, QuizEventBus, SubmissionPlan, normalize_name};
use quiz_types::{GamePhase, GameSnapshot, GuessOutcome, QuizError};
use std::collections::BTreeSet;
use tracing::{debug, info};

pub const DEFAULT_MAX_LIVES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRules {
    pub max_lives: u32,
}

impl QuizRules {
    pub fn new(max_lives: u32) -> Self {
        Self {
            max_lives: max_lives.max(1),
        }
    }
}

impl Default for QuizRules {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LIVES)
    }
}

/// Score captured when a finished game is handed to the leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub player_name: String,
    pub score: u32,
}

/// One player's quiz run.
///
/// The score is always the number of distinct champions guessed, so it can't
/// drift from the guessed set. Losing the last life moves to `GameOver` with
/// zero lives still visible; lives are refilled only when a new round starts
/// through [`GameSession::reset`] or a completed score submission.
#[derive(Debug)]
pub struct GameSession {
    rules: QuizRules,
    lives: u32,
    correct_guesses: BTreeSet<String>,
    phase: GamePhase,
    submission_pending: bool,
    pub event_bus: QuizEventBus,
}

impl GameSession {
    pub fn new(rules: QuizRules) -> Self {
        Self {
            rules,
            lives: rules.max_lives,
            correct_guesses: BTreeSet::new(),
            phase: GamePhase::Playing,
            submission_pending: false,
            event_bus: QuizEventBus::new(),
        }
    }

    /// Rebuild a session from stored state. Out-of-range lives are clamped and
    /// a run stored with no lives left comes back as game over.
    pub fn restore(rules: QuizRules, snapshot: GameSnapshot) -> Self {
        let lives = snapshot.lives.min(rules.max_lives);
        let phase = if lives == 0 {
            GamePhase::GameOver
        } else {
            snapshot.phase
        };
        let correct_guesses: BTreeSet<String> = snapshot
            .correct_guesses
            .iter()
            .map(|name| normalize_name(name))
            .filter(|name| !name.is_empty())
            .collect();

        if snapshot.score as usize != correct_guesses.len() {
            debug!(
                stored_score = snapshot.score,
                restored_score = correct_guesses.len(),
                "Stored score disagrees with guessed champions, using guessed set"
            );
        }

        Self {
            rules,
            lives,
            correct_guesses,
            phase,
            submission_pending: false,
            event_bus: QuizEventBus::new(),
        }
    }

    pub fn rules(&self) -> QuizRules {
        self.rules
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.correct_guesses.len() as u32
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn correct_guesses(&self) -> &BTreeSet<String> {
        &self.correct_guesses
    }

    /// Whether the champion with this (raw or normalized) name has been guessed
    pub fn has_guessed(&self, name: &str) -> bool {
        self.correct_guesses.contains(&normalize_name(name))
    }

    pub fn is_submission_pending(&self) -> bool {
        self.submission_pending
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            lives: self.lives,
            score: self.score(),
            correct_guesses: self.correct_guesses.iter().cloned().collect(),
            phase: self.phase,
        }
    }

    pub fn submit_guess(&mut self, matcher: &GuessMatcher, guess: &str) -> Result<GuessOutcome, QuizError> {
        self.ensure_idle()?;
        if self.phase != GamePhase::Playing {
            return Err(QuizError::InvalidGameState {
                current_phase: self.phase,
            });
        }

        let Some((entry, normalized)) = matcher.find_match(guess) else {
            return Ok(self.record_miss(guess));
        };

        if self.correct_guesses.contains(normalized) {
            debug!(champion = %entry.id, "Champion already guessed");
            self.event_bus.publish(QuizEvent::GuessRepeated {
                champion_id: entry.id.clone(),
            });
            return Ok(GuessOutcome::Duplicate(entry.id.clone()));
        }

        self.correct_guesses.insert(normalized.to_string());
        let score = self.score();
        info!(champion = %entry.id, score, "Correct guess");
        self.event_bus.publish(QuizEvent::GuessAccepted {
            champion_id: entry.id.clone(),
            score,
        });

        Ok(GuessOutcome::Correct(entry.id.clone()))
    }

    fn record_miss(&mut self, guess: &str) -> GuessOutcome {
        self.lives = self.lives.saturating_sub(1);
        debug!(lives = self.lives, "Missed guess");
        self.event_bus.publish(QuizEvent::GuessMissed {
            guess: guess.to_string(),
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            info!(final_score = self.score(), "Game over");
            self.event_bus.publish(QuizEvent::GameOver {
                final_score: self.score(),
            });
        }

        GuessOutcome::Miss
    }

    /// Start a fresh round from any phase
    pub fn reset(&mut self) -> Result<(), QuizError> {
        self.ensure_idle()?;
        self.start_new_round();
        Ok(())
    }

    fn start_new_round(&mut self) {
        self.lives = self.rules.max_lives;
        self.correct_guesses.clear();
        self.phase = GamePhase::Playing;
        info!("Quiz session reset");
        self.event_bus.publish(QuizEvent::SessionReset);
    }

    /// Lock the finished game's score for submission. Until the submission is
    /// completed or aborted, guesses and resets are refused.
    pub fn begin_submission(&mut self, player_name: &str) -> Result<PendingSubmission, QuizError> {
        self.ensure_idle()?;
        if self.phase != GamePhase::GameOver {
            return Err(QuizError::InvalidGameState {
                current_phase: self.phase,
            });
        }

        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(QuizError::EmptyPlayerName);
        }

        self.submission_pending = true;
        let pending = PendingSubmission {
            player_name: player_name.to_string(),
            score: self.score(),
        };
        self.event_bus.publish(QuizEvent::SubmissionStarted {
            player_name: pending.player_name.clone(),
            score: pending.score,
        });

        Ok(pending)
    }

    /// The leaderboard accepted the plan. A written score starts the next
    /// round; a `Keep` plan leaves the finished game in place.
    pub fn complete_submission(&mut self, plan: SubmissionPlan) -> Result<(), QuizError> {
        self.ensure_pending()?;
        self.submission_pending = false;
        info!(?plan, "Score submitted");

        let wrote = plan.is_write();
        self.event_bus.publish(QuizEvent::ScoreSubmitted { plan });
        if wrote {
            self.start_new_round();
        }
        Ok(())
    }

    /// The leaderboard write failed; stay in game over so the player can retry
    pub fn abort_submission(&mut self, reason: &str) -> Result<(), QuizError> {
        self.ensure_pending()?;
        self.submission_pending = false;
        self.event_bus.publish(QuizEvent::SubmissionFailed {
            reason: reason.to_string(),
        });
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), QuizError> {
        if self.submission_pending {
            return Err(QuizError::SubmissionInProgress);
        }
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), QuizError> {
        if !self.submission_pending {
            return Err(QuizError::InvalidGameState {
                current_phase: self.phase,
            });
        }
        Ok(())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(QuizRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_types::CatalogEntry;

    fn create_test_matcher() -> GuessMatcher {
        GuessMatcher::new(vec![
            CatalogEntry::new("1", "Kai'Sa"),
            CatalogEntry::new("2", "Zed"),
        ])
    }

    fn create_game_over_session(score_names: &[&str]) -> GameSession {
        let snapshot = GameSnapshot {
            lives: 0,
            score: score_names.len() as u32,
            correct_guesses: score_names.iter().map(|s| s.to_string()).collect(),
            phase: GamePhase::GameOver,
        };
        GameSession::restore(QuizRules::default(), snapshot)
    }

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::default();
        assert_eq!(session.lives(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.correct_guesses().is_empty());
    }

    #[test]
    fn test_correct_then_duplicate_counts_once() {
        let matcher = create_test_matcher();
        let mut session = GameSession::default();

        assert_eq!(session.submit_guess(&matcher, "zed"), Ok(GuessOutcome::Correct("2".to_string())));
        assert_eq!(session.submit_guess(&matcher, "Zed"), Ok(GuessOutcome::Duplicate("2".to_string())));

        assert_eq!(session.correct_guesses().len(), 1);
        assert_eq!(session.score(), 1);
        assert_eq!(session.lives(), 3);
        assert!(session.has_guessed("ZED"));
    }

    #[test]
    fn test_three_misses_end_the_game_with_zero_lives_visible() {
        let matcher = create_test_matcher();
        let mut session = GameSession::default();

        for expected_lives in [2, 1, 0] {
            assert_eq!(session.submit_guess(&matcher, "xyzxyz"), Ok(GuessOutcome::Miss));
            assert_eq!(session.lives(), expected_lives);
        }

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.snapshot().lives, 0);
    }

    #[test]
    fn test_guess_rejected_after_game_over() {
        let matcher = create_test_matcher();
        let mut session = create_game_over_session(&[]);

        let result = session.submit_guess(&matcher, "zed");
        assert_eq!(
            result,
            Err(QuizError::InvalidGameState {
                current_phase: GamePhase::GameOver
            })
        );
    }

    #[test]
    fn test_reset_from_any_state() {
        let matcher = create_test_matcher();
        let mut session = GameSession::default();
        session.submit_guess(&matcher, "kaisa").unwrap();
        session.submit_guess(&matcher, "nobody").unwrap();
        session.reset().unwrap();

        let expected = GameSnapshot {
            lives: 3,
            score: 0,
            correct_guesses: vec![],
            phase: GamePhase::Playing,
        };
        assert_eq!(session.snapshot(), expected);

        let mut finished = create_game_over_session(&["zed"]);
        finished.reset().unwrap();
        assert_eq!(finished.snapshot(), expected);
    }

    #[test]
    fn test_restore_normalizes_and_derives_score() {
        let snapshot = GameSnapshot {
            lives: 7,
            score: 40,
            correct_guesses: vec!["Kai'Sa".to_string(), "kaisa".to_string(), "Zed".to_string()],
            phase: GamePhase::Playing,
        };
        let session = GameSession::restore(QuizRules::default(), snapshot);

        assert_eq!(session.lives(), 3);
        assert_eq!(session.score(), 2);
        assert_eq!(session.snapshot().correct_guesses, vec!["kaisa", "zed"]);
    }

    #[test]
    fn test_restore_with_no_lives_is_game_over() {
        let snapshot = GameSnapshot {
            lives: 0,
            score: 0,
            correct_guesses: vec![],
            phase: GamePhase::Playing,
        };
        let session = GameSession::restore(QuizRules::default(), snapshot);
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_submission_requires_game_over_and_a_name() {
        let mut playing = GameSession::default();
        assert_eq!(
            playing.begin_submission("alice"),
            Err(QuizError::InvalidGameState {
                current_phase: GamePhase::Playing
            })
        );

        let mut finished = create_game_over_session(&["zed"]);
        assert_eq!(finished.begin_submission("   "), Err(QuizError::EmptyPlayerName));
        assert!(!finished.is_submission_pending());
    }

    #[test]
    fn test_pending_submission_blocks_other_actions() {
        let matcher = create_test_matcher();
        let mut session = create_game_over_session(&["zed", "kaisa"]);

        let pending = session.begin_submission("  Alice ").unwrap();
        assert_eq!(pending.player_name, "Alice");
        assert_eq!(pending.score, 2);
        assert!(session.is_submission_pending());

        assert_eq!(session.reset(), Err(QuizError::SubmissionInProgress));
        assert_eq!(session.submit_guess(&matcher, "zed"), Err(QuizError::SubmissionInProgress));
        assert_eq!(session.begin_submission("Alice"), Err(QuizError::SubmissionInProgress));
    }

    #[test]
    fn test_completed_submission_starts_new_round() {
        let mut session = create_game_over_session(&["zed"]);
        let pending = session.begin_submission("alice").unwrap();

        let plan = SubmissionPlan::Create {
            player_name: pending.player_name,
            score: pending.score,
        };
        session.complete_submission(plan).unwrap();

        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.score(), 0);
        assert!(!session.is_submission_pending());
    }

    #[test]
    fn test_aborted_submission_stays_game_over() {
        let mut session = create_game_over_session(&["zed"]);
        session.begin_submission("alice").unwrap();
        session.abort_submission("connection refused").unwrap();

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.score(), 1);
        assert!(!session.is_submission_pending());

        // retry is allowed
        assert!(session.begin_submission("alice").is_ok());
    }

    #[test]
    fn test_kept_score_stays_game_over() {
        let mut session = create_game_over_session(&["zed"]);
        session.begin_submission("alice").unwrap();
        session.complete_submission(SubmissionPlan::Keep { best_score: 5 }).unwrap();

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.lives(), 0);
        assert_eq!(session.score(), 1);
        assert!(!session.is_submission_pending());
        assert!(session.reset().is_ok());
    }

    #[test]
    fn test_complete_without_pending_is_rejected() {
        let mut session = create_game_over_session(&[]);
        let result = session.complete_submission(SubmissionPlan::Keep { best_score: 1 });
        assert!(result.is_err());
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_custom_rules_control_lives() {
        let matcher = create_test_matcher();
        let mut session = GameSession::new(QuizRules::new(1));

        session.submit_guess(&matcher, "nobody").unwrap();
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(QuizRules::new(0).max_lives, 1);
    }
}
