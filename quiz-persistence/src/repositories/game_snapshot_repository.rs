use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entities::{game_snapshots, prelude::*};
use quiz_core::GameStateStore;
use quiz_types::{GamePhase, GameSnapshot};

const CURRENT_RUN_ID: i32 = 1;

pub struct GameSnapshotRepository {
    db: DatabaseConnection,
}

impl GameSnapshotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn phase_to_column(phase: GamePhase) -> String {
        phase.to_string()
    }

    fn phase_from_column(phase: &str) -> Result<GamePhase> {
        match phase {
            "Playing" => Ok(GamePhase::Playing),
            "GameOver" => Ok(GamePhase::GameOver),
            other => Err(anyhow!("Unknown stored game phase: {}", other)),
        }
    }

    fn model_to_snapshot(model: game_snapshots::Model) -> Result<GameSnapshot> {
        let correct_guesses: Vec<String> = serde_json::from_str(&model.correct_guesses)?;
        Ok(GameSnapshot {
            lives: model.lives.max(0) as u32,
            score: correct_guesses.len() as u32,
            correct_guesses,
            phase: Self::phase_from_column(&model.phase)?,
        })
    }
}

#[async_trait]
impl GameStateStore for GameSnapshotRepository {
    async fn load_snapshot(&self) -> Result<Option<GameSnapshot>> {
        let model = GameSnapshots::find_by_id(CURRENT_RUN_ID).one(&self.db).await?;
        model.map(Self::model_to_snapshot).transpose()
    }

    async fn save_snapshot(&self, snapshot: &GameSnapshot) -> Result<()> {
        let existing = GameSnapshots::find_by_id(CURRENT_RUN_ID).one(&self.db).await?;

        let model = game_snapshots::ActiveModel {
            id: sea_orm::ActiveValue::Set(CURRENT_RUN_ID),
            lives: sea_orm::ActiveValue::Set(i32::try_from(snapshot.lives)?),
            phase: sea_orm::ActiveValue::Set(Self::phase_to_column(snapshot.phase)),
            correct_guesses: sea_orm::ActiveValue::Set(serde_json::to_string(&snapshot.correct_guesses)?),
            updated_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        if existing.is_some() {
            GameSnapshots::update(model).exec(&self.db).await?;
        } else {
            GameSnapshots::insert(model).exec(&self.db).await?;
        }

        tracing::debug!(lives = snapshot.lives, score = snapshot.score, "Saved game snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};

    async fn setup_test_db() -> GameSnapshotRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        GameSnapshotRepository::new(db)
    }

    #[tokio::test]
    async fn test_empty_store_has_no_snapshot() {
        let repo = setup_test_db().await;
        assert!(repo.load_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_overwrite_snapshot() {
        let repo = setup_test_db().await;

        let first = GameSnapshot {
            lives: 2,
            score: 1,
            correct_guesses: vec!["zed".to_string()],
            phase: GamePhase::Playing,
        };
        repo.save_snapshot(&first).await.unwrap();
        assert_eq!(repo.load_snapshot().await.unwrap(), Some(first));

        let second = GameSnapshot {
            lives: 0,
            score: 2,
            correct_guesses: vec!["kaisa".to_string(), "zed".to_string()],
            phase: GamePhase::GameOver,
        };
        repo.save_snapshot(&second).await.unwrap();
        assert_eq!(repo.load_snapshot().await.unwrap(), Some(second));
    }

    #[test]
    fn test_unknown_phase_is_rejected() {
        assert!(GameSnapshotRepository::phase_from_column("Paused").is_err());
        assert_eq!(
            GameSnapshotRepository::phase_from_column("GameOver").unwrap(),
            GamePhase::GameOver
        );
    }
}
