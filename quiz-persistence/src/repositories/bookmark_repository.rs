use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};

use crate::entities::{bookmarks, prelude::*};
use quiz_core::{BookmarkStore, Bookmarks as BookmarkSet};

pub struct BookmarkRepository {
    db: DatabaseConnection,
}

impl BookmarkRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookmarkStore for BookmarkRepository {
    async fn load_bookmarks(&self) -> Result<BookmarkSet> {
        let models = Bookmarks::find()
            .order_by_asc(bookmarks::Column::ChampionId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|model| model.champion_id).collect())
    }

    /// Replace the stored set with `bookmark_set`
    async fn save_bookmarks(&self, bookmark_set: &BookmarkSet) -> Result<()> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let rows: Vec<bookmarks::ActiveModel> = bookmark_set
            .ids()
            .map(|id| bookmarks::ActiveModel {
                champion_id: sea_orm::ActiveValue::Set(id.clone()),
                created_at: sea_orm::ActiveValue::Set(now),
            })
            .collect();

        let txn = self.db.begin().await?;
        Bookmarks::delete_many().exec(&txn).await?;
        if !rows.is_empty() {
            Bookmarks::insert_many(rows).exec(&txn).await?;
        }
        txn.commit().await?;

        tracing::debug!(count = bookmark_set.len(), "Saved bookmarks");
        Ok(())
    }
}
