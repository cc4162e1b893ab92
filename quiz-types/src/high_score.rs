use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HighScoreRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "name")]
    pub player_name: String,
    pub score: u32,
}

impl HighScoreRecord {
    pub fn new(id: Option<String>, player_name: impl Into<String>, score: u32) -> Self {
        Self {
            id,
            player_name: player_name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    pub record: HighScoreRecord,
    pub rank: u32,
}
