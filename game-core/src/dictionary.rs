use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::scoring::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use game_types::GameError;

const EMBEDDED_WORDS: &str = include_str!("../words/sl.txt");

/// Immutable in-memory word list. Built once at startup and shared.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Dictionary {
    /// Create a dictionary from a newline separated word list
    pub fn from_word_list(word_list: &str) -> Self {
        let mut words = Vec::new();
        let mut index = HashSet::new();

        for word in word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .filter(|word| (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word.chars().count()))
        {
            if index.insert(word.clone()) {
                words.push(word);
            }
        }

        Self { words, index }
    }

    /// The word list compiled into the binary
    pub fn embedded() -> Self {
        Self::from_word_list(EMBEDDED_WORDS)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_word_list(&content))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check whether the word exists, ignoring case
    pub fn has_word(&self, word: &str) -> Result<bool, GameError> {
        tracing::debug!("Checking word: {}", word);

        if word.is_empty() {
            return Err(GameError::MissingWord);
        }

        let length = word.chars().count();
        if length > MAX_WORD_LENGTH {
            return Err(GameError::WordTooLong {
                length,
                max: MAX_WORD_LENGTH,
            });
        }

        Ok(self.index.contains(&word.to_lowercase()))
    }

    /// Every word that can be spelled from the multiset of `available` characters.
    ///
    /// A character may be used at most as many times as it occurs in `available`.
    /// Results keep dictionary order; callers sort when they need another one.
    pub fn words_by_characters(&self, available: &str) -> Vec<&str> {
        let available = available.to_lowercase();
        let available_len = available.chars().count();
        let available_counts = char_counts(&available);

        self.words
            .iter()
            .filter(|word| word.chars().count() <= available_len)
            .filter(|word| {
                char_counts(word)
                    .iter()
                    .all(|(ch, count)| available_counts.get(ch).is_some_and(|have| have >= count))
            })
            .map(String::as_str)
            .collect()
    }

    /// Get word count by length
    pub fn word_count_by_length(&self, length: usize) -> usize {
        self.words
            .iter()
            .filter(|word| word.chars().count() == length)
            .count()
    }
}

fn char_counts(s: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for ch in s.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}
