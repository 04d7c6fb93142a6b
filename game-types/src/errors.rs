use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Coarse class of a [`GameError`], used by the transport to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    InvalidInput,
    NotFound,
    Conflict,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[serde(tag = "kind")]
#[ts(export)]
pub enum GameError {
    #[error("Missing game id")]
    MissingGameId,
    #[error("Missing player uid")]
    MissingPlayerUid,
    #[error("Missing word")]
    MissingWord,
    #[error("At least {min} letters are required, got {got}")]
    TooFewLetters { min: usize, got: usize },
    #[error("At most {max} letters are allowed, got {got}")]
    TooManyLetters { max: usize, got: usize },
    #[error("Letter index {index} out of bounds")]
    LetterIndexOutOfBounds { index: i32 },
    #[error("Found duplicate letter indexes")]
    DuplicateLetterIndexes,
    #[error("Word is too long: {length} > {max}")]
    WordTooLong { length: usize, max: usize },
    #[error("Invalid nickname: {nickname}")]
    InvalidNickname { nickname: String },

    #[error("Game not found: {game_id}")]
    GameNotFound {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    #[error("Player not found: {player}")]
    PlayerNotFound { player: String },

    #[error("Game has already ended: {game_id}")]
    GameAlreadyEnded {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    #[error("Game already assigned to a player: {game_id}")]
    GameAlreadyAssigned {
        #[serde(rename = "gameId")]
        game_id: String,
    },
    #[error("Nickname already taken: {nickname}")]
    NicknameTaken { nickname: String },
    #[error("Game was modified concurrently: {game_id}")]
    ConcurrentModification {
        #[serde(rename = "gameId")]
        game_id: String,
    },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },
}

impl GameError {
    pub fn class(&self) -> ErrorClass {
        match self {
            GameError::MissingGameId
            | GameError::MissingPlayerUid
            | GameError::MissingWord
            | GameError::TooFewLetters { .. }
            | GameError::TooManyLetters { .. }
            | GameError::LetterIndexOutOfBounds { .. }
            | GameError::DuplicateLetterIndexes
            | GameError::WordTooLong { .. }
            | GameError::InvalidNickname { .. } => ErrorClass::InvalidInput,
            GameError::GameNotFound { .. } | GameError::PlayerNotFound { .. } => {
                ErrorClass::NotFound
            }
            GameError::GameAlreadyEnded { .. }
            | GameError::GameAlreadyAssigned { .. }
            | GameError::NicknameTaken { .. }
            | GameError::ConcurrentModification { .. } => ErrorClass::Conflict,
            GameError::StorageUnavailable { .. } => ErrorClass::Unavailable,
        }
    }
}
