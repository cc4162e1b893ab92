pub use super::bookmarks::Entity as Bookmarks;
pub use super::game_snapshots::Entity as GameSnapshots;
pub use super::high_scores::Entity as HighScores;
