#![allow(dead_code)]

use game_core::{Board, Dictionary, GameRecord};
use game_types::PlayedWord;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const TEST_BOARD: &str = "ratmizakrtvodnoe";

/// Creates a test Dictionary with a known set of words
pub fn create_test_dictionary() -> Dictionary {
    let word_list = "rat\nkrt\nmiza\nvoda\nnos\nzvon\ntema\nroka\nmorje\nodmor\nzvonček";
    Dictionary::from_word_list(word_list)
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a game on a fixed board
pub fn create_game_with_board(board: &str, dictionary: &Dictionary) -> GameRecord {
    let id = uuid::Uuid::new_v4().to_string();
    let board = Board::from_chars(board).expect("test board must be valid");
    GameRecord::with_board(id, board, 1_700_000_000_000, dictionary)
}

/// Creates the standard test game
pub fn create_standard_game(dictionary: &Dictionary) -> GameRecord {
    create_game_with_board(TEST_BOARD, dictionary)
}

/// Finds the board positions spelling `word`, using each position once
pub fn positions_for(record: &GameRecord, word: &str) -> Option<Vec<usize>> {
    let mut used = Vec::new();
    for ch in word.chars() {
        let position = (0..16)
            .find(|index| !used.contains(index) && record.board.letter_at(*index).ch == ch)?;
        used.push(position);
    }
    Some(used)
}

/// Asserts the score and word count agree with the played words
pub fn assert_score_consistent(record: &GameRecord) {
    let correct: Vec<&PlayedWord> = record.words.iter().filter(|word| word.correct).collect();
    assert_eq!(
        record.word_count as usize,
        correct.len(),
        "Expected word count {}, got {}",
        correct.len(),
        record.word_count
    );
    assert_eq!(
        record.score,
        correct.iter().map(|word| word.score_for_word).sum::<i32>(),
        "Score doesn't match the sum of correct words"
    );
}
