use crate::SubmissionPlan;
use quiz_types::ChampionId;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    GuessAccepted {
        champion_id: ChampionId,
        score: u32,
    },
    GuessRepeated {
        champion_id: ChampionId,
    },
    GuessMissed {
        guess: String,
        lives_left: u32,
    },
    GameOver {
        final_score: u32,
    },
    SubmissionStarted {
        player_name: String,
        score: u32,
    },
    ScoreSubmitted {
        plan: SubmissionPlan,
    },
    SubmissionFailed {
        reason: String,
    },
    SessionReset,
}

impl QuizEvent {
    pub fn name(&self) -> &'static str {
        match self {
            QuizEvent::GuessAccepted { .. } => "guess_accepted",
            QuizEvent::GuessRepeated { .. } => "guess_repeated",
            QuizEvent::GuessMissed { .. } => "guess_missed",
            QuizEvent::GameOver { .. } => "game_over",
            QuizEvent::SubmissionStarted { .. } => "submission_started",
            QuizEvent::ScoreSubmitted { .. } => "score_submitted",
            QuizEvent::SubmissionFailed { .. } => "submission_failed",
            QuizEvent::SessionReset => "session_reset",
        }
    }
}

/// Event handler trait for reacting to quiz transitions (UI feedback, sounds, analytics)
pub trait QuizEventHandler: Send + Sync {
    fn handle_event(&mut self, event: QuizEvent);
}

/// Simple event bus for distributing quiz events
pub struct QuizEventBus {
    handlers: Vec<Box<dyn QuizEventHandler>>,
}

impl QuizEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn QuizEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: QuizEvent) {
        tracing::debug!(event = event.name(), "Publishing quiz event");
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for QuizEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
