pub mod bookmark_repository;
pub mod game_snapshot_repository;
pub mod high_score_repository;

pub use bookmark_repository::BookmarkRepository;
pub use game_snapshot_repository::GameSnapshotRepository;
pub use high_score_repository::HighScoreRepository;
