pub mod errors;
pub mod game;
pub mod messages;
pub mod user;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use user::*;

pub type GameId = String;
pub type PlayerUid = String;
