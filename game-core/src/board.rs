use std::collections::HashSet;
use std::fmt;

use game_types::Letter;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::letters::{
    BOARD_SIZE, MIN_UNIQUE_LETTERS_PER_BOARD, fallback_vowel, is_vowel, letter_for, random_letter,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid board {board:?}: {reason}")]
pub struct InvalidBoard {
    pub board: String,
    pub reason: String,
}

/// The 16 letter play surface. Positions are addressed by flat index only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    tiles: [&'static Letter; BOARD_SIZE],
}

impl Board {
    /// Generate a fresh board.
    ///
    /// The first 12 draws are pairwise distinct, the last 4 may repeat. The
    /// board always contains at least one vowel, and is shuffled so that the
    /// repeats don't cluster at the end.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = draw_tiles(rng);

        let fill_positions: Vec<usize> = (MIN_UNIQUE_LETTERS_PER_BOARD..BOARD_SIZE).collect();
        ensure_solvable(&mut tiles, &fill_positions, rng);

        tiles.shuffle(rng);
        Self { tiles }
    }

    /// Parse a board from its 16 characters, e.g. as stored.
    pub fn from_chars(chars: &str) -> Result<Self, InvalidBoard> {
        let invalid = |reason: String| InvalidBoard {
            board: chars.to_string(),
            reason,
        };

        let letters = chars
            .chars()
            .map(|ch| letter_for(ch).ok_or_else(|| invalid(format!("unknown letter '{}'", ch))))
            .collect::<Result<Vec<_>, _>>()?;

        let tiles: [&'static Letter; BOARD_SIZE] = letters
            .try_into()
            .map_err(|letters: Vec<_>| {
                invalid(format!("expected {} letters, got {}", BOARD_SIZE, letters.len()))
            })?;

        Ok(Self { tiles })
    }

    pub fn letter_at(&self, index: usize) -> &'static Letter {
        self.tiles[index]
    }

    pub fn letters(&self) -> impl Iterator<Item = &'static Letter> + '_ {
        self.tiles.iter().copied()
    }

    /// All 16 characters in index order
    pub fn chars(&self) -> String {
        self.tiles.iter().map(|letter| letter.ch).collect()
    }

    /// Spell a word from the given positions, in submission order
    pub fn word_at(&self, indexes: &[usize]) -> String {
        indexes
            .iter()
            .map(|&index| self.tiles[index].ch)
            .collect::<String>()
            .to_lowercase()
    }

    pub fn to_letters(&self) -> Vec<Letter> {
        self.tiles.iter().map(|letter| **letter).collect()
    }

    pub fn has_vowel(&self) -> bool {
        self.tiles.iter().any(|letter| is_vowel(letter))
    }

    /// Replace the letters at `indexes` after they were used for a word.
    ///
    /// New letters are biased towards novelty until the board holds 12
    /// distinct letters again. The vowel guarantee is restored using only
    /// the replaced positions.
    pub fn replace_letters<R: Rng + ?Sized>(&mut self, indexes: &[usize], rng: &mut R) {
        if indexes.is_empty() {
            return;
        }

        let mut unique_letters: HashSet<char> = self
            .tiles
            .iter()
            .enumerate()
            .filter(|(index, _)| !indexes.contains(index))
            .map(|(_, letter)| letter.ch)
            .collect();

        let mut new_letters = Vec::with_capacity(indexes.len());
        for _ in indexes {
            let mut letter = random_letter(rng);
            while unique_letters.contains(&letter.ch)
                && unique_letters.len() < MIN_UNIQUE_LETTERS_PER_BOARD
            {
                letter = random_letter(rng);
            }

            unique_letters.insert(letter.ch);
            new_letters.push(letter);
        }

        // Draw order would otherwise put the repeats last
        new_letters.shuffle(rng);

        for (&index, letter) in indexes.iter().zip(new_letters) {
            self.tiles[index] = letter;
        }

        ensure_solvable(&mut self.tiles, indexes, rng);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(4) {
            let line: String = row.iter().map(|letter| letter.ch).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Draw 12 distinct letters followed by 4 unrestricted ones, unshuffled.
fn draw_tiles<R: Rng + ?Sized>(rng: &mut R) -> [&'static Letter; BOARD_SIZE] {
    let mut tiles: Vec<&'static Letter> = Vec::with_capacity(BOARD_SIZE);

    while tiles.len() < MIN_UNIQUE_LETTERS_PER_BOARD {
        let letter = random_letter(rng);
        if !tiles.iter().any(|drawn| drawn.ch == letter.ch) {
            tiles.push(letter);
        }
    }

    while tiles.len() < BOARD_SIZE {
        tiles.push(random_letter(rng));
    }

    let mut board = [tiles[0]; BOARD_SIZE];
    board.copy_from_slice(&tiles);
    board
}

/// Overwrite one of `candidates` with the fallback vowel if the board has none.
fn ensure_solvable<R: Rng + ?Sized>(
    tiles: &mut [&'static Letter; BOARD_SIZE],
    candidates: &[usize],
    rng: &mut R,
) {
    if tiles.iter().any(|letter| is_vowel(letter)) {
        return;
    }

    if let Some(&index) = candidates.choose(rng) {
        tiles[index] = fallback_vowel();
    }
}
