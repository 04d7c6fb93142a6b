use crate::GameId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single board letter with its draw weight and point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Letter {
    #[serde(rename = "char")]
    pub ch: char,
    pub score: i32,
    pub weight: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    Active, // Accepting words
    Ended,  // Terminal, no further mutation
}

/// One submission, correct or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlayedWord {
    pub word: String,
    pub correct: bool,
    pub score_for_word: i32,
    pub score_for_letters: i32,
    pub score_for_length: i32,
}

impl PlayedWord {
    pub fn incorrect(word: String) -> Self {
        Self {
            word,
            correct: false,
            score_for_word: 0,
            score_for_letters: 0,
            score_for_length: 0,
        }
    }
}

/// Public view of a game. The owning player's uid is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Game {
    pub id: GameId,
    pub board: Vec<Letter>,
    pub status: GameStatus,
    pub score: i32,
    pub word_count: i32,
    pub leaderboard_rank: Option<i32>,
    pub name: Option<String>,
    pub started_at: i64, // epoch millis
    pub ended_at: Option<i64>,
    pub ended_and_named: bool,
    pub top_word: Option<String>,
    pub top_word_score: i32,
    pub words: Vec<PlayedWord>,
    pub assigned_to_player: bool,
    pub missed_opportunity: Option<String>,
    pub possible_words: i32,
}

/// Result of a word submission: the judged word plus the updated game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckWordResult {
    #[serde(flatten)]
    pub played: PlayedWord,
    pub game: Game,
}
