use std::collections::HashSet;

use game_types::{Game, GameError, GameId, GameStatus, PlayedWord, PlayerUid};
use rand::Rng;
use uuid::Uuid;

use crate::board::Board;
use crate::dictionary::Dictionary;
use crate::letters::BOARD_SIZE;
use crate::scoring::{MAX_WORD_LENGTH, MIN_WORD_LENGTH, ScoringEngine};

pub const MAX_WORDS_PER_GAME: i32 = 100;

/// Score band width that unlocks one more letter for the missed opportunity
const SCORE_PER_EXTRA_LETTER: i32 = 500;
const BASE_SUGGESTION_LENGTH: usize = 5;

/// Authoritative game state as stored. Callers only ever see the [`Game`] view.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: GameId,
    pub board: Board,
    pub score: i32,
    pub word_count: i32,
    pub leaderboard_rank: Option<i32>,
    pub name: Option<String>,
    pub player_uid: Option<PlayerUid>,
    pub started_at: i64,
    pub ended_at: Option<i64>,
    pub ended_and_named: bool,
    pub top_word: Option<String>,
    pub top_word_score: i32,
    pub words: Vec<PlayedWord>,
    pub assigned_to_player: bool,
    pub missed_opportunity: Option<String>,
    pub possible_words: i32,
    /// Bumped on every write, used for conditional updates
    pub version: i64,
}

/// What happened to a submitted word
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub played: PlayedWord,
    /// The word limit was reached, the caller must finish the game
    pub reached_word_limit: bool,
}

impl GameRecord {
    /// Start a new game on a freshly generated board
    pub fn start<R: Rng + ?Sized>(dictionary: &Dictionary, rng: &mut R) -> Self {
        let board = Board::generate(rng);
        Self::with_board(
            Uuid::new_v4().to_string(),
            board,
            chrono::Utc::now().timestamp_millis(),
            dictionary,
        )
    }

    pub fn with_board(id: GameId, board: Board, started_at: i64, dictionary: &Dictionary) -> Self {
        let mut record = Self {
            id,
            board,
            score: 0,
            word_count: 0,
            leaderboard_rank: None,
            name: None,
            player_uid: None,
            started_at,
            ended_at: None,
            ended_and_named: false,
            top_word: None,
            top_word_score: 0,
            words: Vec::new(),
            assigned_to_player: false,
            missed_opportunity: None,
            possible_words: 0,
            version: 0,
        };
        record.refresh_possible_words(dictionary);
        record
    }

    pub fn status(&self) -> GameStatus {
        if self.ended_at.is_some() {
            GameStatus::Ended
        } else {
            GameStatus::Active
        }
    }

    pub fn ensure_active(&self) -> Result<(), GameError> {
        match self.status() {
            GameStatus::Active => Ok(()),
            GameStatus::Ended => Err(GameError::GameAlreadyEnded {
                game_id: self.id.clone(),
            }),
        }
    }

    pub fn ensure_unassigned(&self) -> Result<(), GameError> {
        if self.player_uid.is_some() || self.assigned_to_player {
            return Err(GameError::GameAlreadyAssigned {
                game_id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// All dictionary words producible from the current board
    pub fn producible_words<'d>(&self, dictionary: &'d Dictionary) -> Vec<&'d str> {
        dictionary.words_by_characters(&self.board.chars())
    }

    fn refresh_possible_words(&mut self, dictionary: &Dictionary) -> Vec<String> {
        let producible: Vec<String> = self
            .producible_words(dictionary)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.possible_words = i32::try_from(producible.len()).unwrap_or(i32::MAX);
        producible
    }

    /// Judge a word spelled from board positions, normally already checked by
    /// [`validate_letter_indexes`]. Positions past the board are rejected.
    ///
    /// An unknown word is recorded with zero score and leaves the board as is.
    /// A known word is scored, its letters are replaced and the count of
    /// producible words is refreshed.
    pub fn submit_word<R: Rng + ?Sized>(
        &mut self,
        indexes: &[usize],
        dictionary: &Dictionary,
        rng: &mut R,
    ) -> Result<SubmitOutcome, GameError> {
        self.ensure_active()?;
        if let Some(&index) = indexes.iter().find(|&&index| index >= BOARD_SIZE) {
            return Err(GameError::LetterIndexOutOfBounds {
                index: i32::try_from(index).unwrap_or(i32::MAX),
            });
        }

        let word = self.board.word_at(indexes);
        if !dictionary.has_word(&word)? {
            let played = PlayedWord::incorrect(word);
            self.words.push(played.clone());
            return Ok(SubmitOutcome {
                played,
                reached_word_limit: false,
            });
        }

        let played = ScoringEngine::score_correct_word(&word);
        self.score += played.score_for_word;
        self.word_count += 1;
        if self.top_word_score < played.score_for_word {
            self.top_word_score = played.score_for_word;
            self.top_word = Some(word);
        }

        self.board.replace_letters(indexes, rng);
        self.words.push(played.clone());
        self.refresh_possible_words(dictionary);

        Ok(SubmitOutcome {
            played,
            reached_word_limit: self.word_count >= MAX_WORDS_PER_GAME,
        })
    }

    /// End the game. Rank must already be computed against the final score.
    pub fn finish(&mut self, leaderboard_rank: i32, ended_at: i64, dictionary: &Dictionary) {
        self.ended_at = Some(ended_at);
        self.leaderboard_rank = Some(leaderboard_rank);
        self.ended_and_named = self.name.is_some();

        let producible = self.refresh_possible_words(dictionary);
        let played: HashSet<&str> = self
            .words
            .iter()
            .filter(|word| word.correct)
            .map(|word| word.word.as_str())
            .collect();

        let mut candidates: Vec<&str> = producible
            .iter()
            .map(String::as_str)
            .filter(|word| !played.contains(word))
            .collect();
        // Longest first, dictionary order within a length
        candidates.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));

        self.missed_opportunity = pick_missed_opportunity(self.score, &candidates);
    }

    /// Attach a player. Returns true when the game had already ended, i.e.
    /// the player's top game has to be updated now.
    pub fn assign_player(
        &mut self,
        player_uid: PlayerUid,
        nickname: String,
    ) -> Result<bool, GameError> {
        self.ensure_unassigned()?;

        self.name = Some(nickname);
        self.player_uid = Some(player_uid);
        self.assigned_to_player = true;

        if self.ended_at.is_some() {
            self.ended_and_named = true;
        }
        Ok(self.ended_and_named)
    }
}

impl From<&GameRecord> for Game {
    fn from(record: &GameRecord) -> Self {
        Game {
            id: record.id.clone(),
            board: record.board.to_letters(),
            status: record.status(),
            score: record.score,
            word_count: record.word_count,
            leaderboard_rank: record.leaderboard_rank,
            name: record.name.clone(),
            started_at: record.started_at,
            ended_at: record.ended_at,
            ended_and_named: record.ended_and_named,
            top_word: record.top_word.clone(),
            top_word_score: record.top_word_score,
            words: record.words.clone(),
            assigned_to_player: record.assigned_to_player,
            missed_opportunity: record.missed_opportunity.clone(),
            possible_words: record.possible_words,
        }
    }
}

/// Check submitted positions before touching any state
pub fn validate_letter_indexes(letter_indexes: &[i32]) -> Result<Vec<usize>, GameError> {
    if letter_indexes.len() < MIN_WORD_LENGTH {
        return Err(GameError::TooFewLetters {
            min: MIN_WORD_LENGTH,
            got: letter_indexes.len(),
        });
    }
    if letter_indexes.len() > MAX_WORD_LENGTH {
        return Err(GameError::TooManyLetters {
            max: MAX_WORD_LENGTH,
            got: letter_indexes.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut indexes = Vec::with_capacity(letter_indexes.len());
    for &index in letter_indexes {
        let position = usize::try_from(index)
            .ok()
            .filter(|&position| position < BOARD_SIZE)
            .ok_or(GameError::LetterIndexOutOfBounds { index })?;
        indexes.push(position);
        if !seen.insert(position) {
            return Err(GameError::DuplicateLetterIndexes);
        }
    }

    Ok(indexes)
}

/// Longest word length the player is shown for the given final score
pub fn suggestion_length_cap(score: i32) -> usize {
    let bands = usize::try_from(score.max(0) / SCORE_PER_EXTRA_LETTER).unwrap_or(0);
    (BASE_SUGGESTION_LENGTH + bands).min(MAX_WORD_LENGTH)
}

/// Pick the longest candidate within the score's length cap.
///
/// `candidates` must be sorted longest first. If nothing fits, the cap is
/// raised one letter at a time up to the board size.
pub fn pick_missed_opportunity(score: i32, candidates: &[&str]) -> Option<String> {
    let mut max_length = suggestion_length_cap(score);

    while max_length <= MAX_WORD_LENGTH {
        if let Some(word) = candidates
            .iter()
            .find(|word| word.chars().count() <= max_length)
        {
            return Some(word.to_string());
        }
        max_length += 1;
    }

    None
}
