use crate::PendingSubmission;
use quiz_types::{HighScoreRecord, LeaderboardEntry};

/// The leaderboard write (if any) a finished game should trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPlan {
    Create { player_name: String, score: u32 },
    Update { id: String, player_name: String, score: u32 },
    /// The player already holds an equal or better score
    Keep { best_score: u32 },
}

impl SubmissionPlan {
    pub fn is_write(&self) -> bool {
        !matches!(self, SubmissionPlan::Keep { .. })
    }
}

pub struct Leaderboard;

impl Leaderboard {
    /// Rank records by score, highest first. Ties keep their incoming order.
    pub fn rank(records: impl IntoIterator<Item = HighScoreRecord>) -> Vec<LeaderboardEntry> {
        let mut records: Vec<HighScoreRecord> = records.into_iter().collect();
        records.sort_by(|a, b| b.score.cmp(&a.score));

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| LeaderboardEntry {
                record,
                rank: (index + 1) as u32,
            })
            .collect()
    }

    /// Find the player's record by name, ignoring case
    pub fn find_player<'a>(records: &'a [HighScoreRecord], player_name: &str) -> Option<&'a HighScoreRecord> {
        let player_name = player_name.to_lowercase();
        records
            .iter()
            .find(|record| record.player_name.to_lowercase() == player_name)
    }

    /// Decide how a finished game's score lands on the leaderboard.
    ///
    /// An existing record is only rewritten when the new score beats it, and
    /// keeps its stored spelling of the name. A record without an id cannot be
    /// updated, so the score goes in as a new record instead.
    pub fn plan_submission(pending: &PendingSubmission, records: &[HighScoreRecord]) -> SubmissionPlan {
        match Self::find_player(records, &pending.player_name) {
            Some(HighScoreRecord { id: Some(id), player_name, score }) => {
                if pending.score > *score {
                    SubmissionPlan::Update {
                        id: id.clone(),
                        player_name: player_name.clone(),
                        score: pending.score,
                    }
                } else {
                    SubmissionPlan::Keep { best_score: *score }
                }
            }
            _ => SubmissionPlan::Create {
                player_name: pending.player_name.clone(),
                score: pending.score,
            },
        }
    }

    /// Score as shown next to a leaderboard name, out of the catalog size
    pub fn format_progress(score: u32, catalog_len: usize) -> String {
        format!("{} / {}", score, catalog_len)
    }
}
