use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::entities::{high_scores, prelude::*};
use quiz_core::LeaderboardStore;
use quiz_types::HighScoreRecord;

/// Leaderboard kept in the local database, used when no remote collection is configured
pub struct HighScoreRepository {
    db: DatabaseConnection,
}

impl HighScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_record(model: high_scores::Model) -> HighScoreRecord {
        HighScoreRecord {
            id: Some(model.id),
            player_name: model.player_name,
            score: model.score.max(0) as u32,
        }
    }
}

#[async_trait]
impl LeaderboardStore for HighScoreRepository {
    async fn fetch_high_scores(&self) -> Result<Vec<HighScoreRecord>> {
        let models = HighScores::find()
            .order_by_asc(high_scores::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Self::model_to_record).collect())
    }

    async fn create_high_score(&self, player_name: &str, score: u32) -> Result<HighScoreRecord> {
        let now = chrono::Utc::now().into();
        let model = high_scores::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4().to_string()),
            player_name: sea_orm::ActiveValue::Set(player_name.to_string()),
            score: sea_orm::ActiveValue::Set(i32::try_from(score)?),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
        };

        let inserted = HighScores::insert(model).exec(&self.db).await?;

        let created = HighScores::find_by_id(inserted.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created high score"))?;

        tracing::info!(player = %created.player_name, score, "Created high score");
        Ok(Self::model_to_record(created))
    }

    async fn update_high_score(&self, id: &str, player_name: &str, score: u32) -> Result<HighScoreRecord> {
        let existing = HighScores::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("High score {} not found", id))?;

        let updated = high_scores::ActiveModel {
            id: sea_orm::ActiveValue::Unchanged(existing.id),
            player_name: sea_orm::ActiveValue::Set(player_name.to_string()),
            score: sea_orm::ActiveValue::Set(i32::try_from(score)?),
            created_at: sea_orm::ActiveValue::Unchanged(existing.created_at),
            updated_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        let model = HighScores::update(updated).exec(&self.db).await?;
        tracing::info!(player = %model.player_name, score, "Updated high score");
        Ok(Self::model_to_record(model))
    }
}
