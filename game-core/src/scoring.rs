use crate::letters::{BOARD_SIZE, letter_for};
use game_types::PlayedWord;

pub const MIN_WORD_LENGTH: usize = 3;
pub const MAX_WORD_LENGTH: usize = BOARD_SIZE;

/// Bonus per word length, indexed by length. Doubles from 4 letters on.
const SCORE_BY_LENGTH: [i32; MAX_WORD_LENGTH + 1] = [
    0, 0, 0, // 0..=2 never accepted
    0, 1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096,
];

pub struct ScoringEngine;

impl ScoringEngine {
    /// Sum of the point values of each letter. Unknown characters count 0.
    pub fn score_for_letters(word: &str) -> i32 {
        word.chars()
            .map(|ch| letter_for(ch).map_or(0, |letter| letter.score))
            .sum()
    }

    pub fn score_for_length(word: &str) -> i32 {
        SCORE_BY_LENGTH
            .get(word.chars().count())
            .copied()
            .unwrap_or(0)
    }

    pub fn score_for_word(word: &str) -> i32 {
        Self::score_for_letters(word) + Self::score_for_length(word)
    }

    /// Build the played-word record for an accepted word
    pub fn score_correct_word(word: &str) -> PlayedWord {
        let score_for_letters = Self::score_for_letters(word);
        let score_for_length = Self::score_for_length(word);

        PlayedWord {
            word: word.to_string(),
            correct: true,
            score_for_word: score_for_letters + score_for_length,
            score_for_letters,
            score_for_length,
        }
    }
}
