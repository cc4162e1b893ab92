//! In-memory collaborators for tests and offline play.

use crate::{BookmarkStore, Bookmarks, CatalogSource, GameStateStore, LeaderboardStore};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use quiz_types::{Champion, GameSnapshot, HighScoreRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// A catalog that is already loaded. Can be switched to fail like an unreachable API.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    champions: Vec<Champion>,
    unavailable: AtomicBool,
}

impl StaticCatalog {
    pub fn new(champions: Vec<Champion>) -> Self {
        Self {
            champions,
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_champions(&self) -> Result<Vec<Champion>> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("catalog source is unavailable");
        }
        Ok(self.champions.clone())
    }
}

#[derive(Debug, Default)]
struct LeaderboardState {
    records: Vec<HighScoreRecord>,
    next_id: u64,
    writes: usize,
}

#[derive(Debug, Default)]
pub struct InMemoryLeaderboard {
    state: RwLock<LeaderboardState>,
    unavailable: AtomicBool,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<HighScoreRecord>) -> Self {
        Self {
            state: RwLock::new(LeaderboardState {
                next_id: records.len() as u64 + 1,
                records,
                writes: 0,
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every read and write fail until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful creates and updates
    pub async fn write_count(&self) -> usize {
        self.state.read().await.writes
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("leaderboard is unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl LeaderboardStore for InMemoryLeaderboard {
    async fn fetch_high_scores(&self) -> Result<Vec<HighScoreRecord>> {
        self.ensure_available()?;
        Ok(self.state.read().await.records.clone())
    }

    async fn create_high_score(&self, player_name: &str, score: u32) -> Result<HighScoreRecord> {
        self.ensure_available()?;
        let mut state = self.state.write().await;

        let record = HighScoreRecord::new(Some(state.next_id.to_string()), player_name, score);
        state.next_id += 1;
        state.writes += 1;
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update_high_score(&self, id: &str, player_name: &str, score: u32) -> Result<HighScoreRecord> {
        self.ensure_available()?;
        let mut state = self.state.write().await;

        let record = state
            .records
            .iter_mut()
            .find(|record| record.id.as_deref() == Some(id))
            .ok_or_else(|| anyhow!("High score {} not found", id))?;
        record.player_name = player_name.to_string();
        record.score = score;
        let updated = record.clone();

        state.writes += 1;
        Ok(updated)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryGameStateStore {
    snapshot: RwLock<Option<GameSnapshot>>,
    read_only: AtomicBool,
}

impl InMemoryGameStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: GameSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
            read_only: AtomicBool::new(false),
        }
    }

    /// Make saves fail, like a full disk, until switched back
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

#[async_trait]
impl GameStateStore for InMemoryGameStateStore {
    async fn load_snapshot(&self) -> Result<Option<GameSnapshot>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save_snapshot(&self, snapshot: &GameSnapshot) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            bail!("game state store is read only");
        }
        *self.snapshot.write().await = Some(snapshot.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBookmarkStore {
    bookmarks: RwLock<Bookmarks>,
}

impl InMemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    async fn load_bookmarks(&self) -> Result<Bookmarks> {
        Ok(self.bookmarks.read().await.clone())
    }

    async fn save_bookmarks(&self, bookmarks: &Bookmarks) -> Result<()> {
        *self.bookmarks.write().await = bookmarks.clone();
        Ok(())
    }
}
