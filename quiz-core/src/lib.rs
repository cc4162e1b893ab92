pub mod catalog;
pub mod collaborators;
pub mod game_events;
pub mod game_state;
pub mod leaderboard;
pub mod memory;
pub mod name_matching;

// Re-export main components
pub use catalog::*;
pub use collaborators::*;
pub use game_events::*;
pub use game_state::*;
pub use leaderboard::*;
pub use name_matching::*;
