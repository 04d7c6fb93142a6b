use game_types::Letter;
use rand::Rng;

pub const BOARD_SIZE: usize = 16;
pub const MIN_UNIQUE_LETTERS_PER_BOARD: usize = 12;

/// Letters that keep a board solvable. `r` works as a vowel in Slovenian.
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'r'];

/// Fallback written onto a board that has no vowel at all.
pub const FALLBACK_VOWEL: char = 'r';

macro_rules! letter {
    ($ch:literal, $weight:literal, $score:literal) => {
        Letter {
            ch: $ch,
            score: $score,
            weight: $weight,
        }
    };
}

pub static LETTERS: [Letter; 25] = [
    letter!('a', 100, 1),
    letter!('b', 25, 8),
    letter!('c', 15, 10),
    letter!('č', 20, 9),
    letter!('d', 40, 7),
    letter!('e', 100, 1),
    letter!('f', 10, 10),
    letter!('g', 25, 9),
    letter!('h', 20, 9),
    letter!('i', 85, 2),
    letter!('j', 50, 6),
    letter!('k', 40, 7),
    letter!('l', 55, 6),
    letter!('m', 35, 7),
    letter!('n', 65, 5),
    letter!('o', 85, 2),
    letter!('p', 35, 7),
    letter!('r', 50, 6),
    letter!('s', 50, 6),
    letter!('š', 15, 9),
    letter!('t', 45, 6),
    letter!('u', 25, 8),
    letter!('v', 40, 7),
    letter!('z', 25, 8),
    letter!('ž', 15, 10),
];

/// Look up a letter by character, case-insensitively.
pub fn letter_for(ch: char) -> Option<&'static Letter> {
    let lower = ch.to_lowercase().next().unwrap_or(ch);
    LETTERS.iter().find(|letter| letter.ch == lower)
}

pub fn is_vowel(letter: &Letter) -> bool {
    VOWELS.contains(&letter.ch)
}

pub fn fallback_vowel() -> &'static Letter {
    // The fallback is part of the static table above.
    letter_for(FALLBACK_VOWEL).unwrap_or(&LETTERS[17])
}

/// Draw a letter with probability proportional to its weight.
pub fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> &'static Letter {
    let total_weight: i32 = LETTERS.iter().map(|letter| letter.weight).sum();
    let target = rng.random::<f64>() * f64::from(total_weight);
    pick_by_weight(target)
}

/// First letter whose cumulative weight meets or exceeds `target`.
fn pick_by_weight(target: f64) -> &'static Letter {
    let mut sum_so_far = 0.0;
    for letter in &LETTERS {
        sum_so_far += f64::from(letter.weight);
        if target <= sum_so_far {
            return letter;
        }
    }

    // Floating point slack at the upper boundary
    &LETTERS[LETTERS.len() - 1]
}
