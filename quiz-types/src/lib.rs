pub mod champion;
pub mod errors;
pub mod game;
pub mod high_score;

// Re-export all types
pub use champion::*;
pub use errors::*;
pub use game::*;
pub use high_score::*;
