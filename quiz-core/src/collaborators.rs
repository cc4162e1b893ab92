use crate::{Bookmarks, SubmissionPlan};
use anyhow::Result;
use async_trait::async_trait;
use quiz_types::{Champion, GameSnapshot, HighScoreRecord};

/// Where the champion catalog comes from (remote API, bundled file, ...)
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_champions(&self) -> Result<Vec<Champion>>;
}

/// The shared high score collection
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    async fn fetch_high_scores(&self) -> Result<Vec<HighScoreRecord>>;

    async fn create_high_score(&self, player_name: &str, score: u32) -> Result<HighScoreRecord>;

    async fn update_high_score(&self, id: &str, player_name: &str, score: u32) -> Result<HighScoreRecord>;
}

/// Device-local storage for the current quiz run
#[async_trait]
pub trait GameStateStore: Send + Sync {
    async fn load_snapshot(&self) -> Result<Option<GameSnapshot>>;

    async fn save_snapshot(&self, snapshot: &GameSnapshot) -> Result<()>;
}

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn load_bookmarks(&self) -> Result<Bookmarks>;

    async fn save_bookmarks(&self, bookmarks: &Bookmarks) -> Result<()>;
}

/// Perform the write a submission plan calls for. `Keep` writes nothing.
pub async fn execute_plan(
    store: &dyn LeaderboardStore,
    plan: &SubmissionPlan,
) -> Result<Option<HighScoreRecord>> {
    let record = match plan {
        SubmissionPlan::Create { player_name, score } => {
            Some(store.create_high_score(player_name, *score).await?)
        }
        SubmissionPlan::Update {
            id,
            player_name,
            score,
        } => Some(store.update_high_score(id, player_name, *score).await?),
        SubmissionPlan::Keep { .. } => None,
    };
    Ok(record)
}
