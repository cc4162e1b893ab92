pub mod prelude;

pub mod bookmarks;
pub mod game_snapshots;
pub mod high_scores;
