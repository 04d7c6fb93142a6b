pub mod board;
pub mod dictionary;
pub mod game_state;
pub mod letters;
pub mod player;
pub mod scoring;

// Re-export main components
pub use board::*;
pub use dictionary::*;
pub use game_state::*;
pub use letters::*;
pub use player::*;
pub use scoring::*;
