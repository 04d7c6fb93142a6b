use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::store::Store;
use game_core::{Dictionary, GameRecord, validate_letter_indexes};
use game_types::{
    AssignPlayerRequest, CheckWordResult, Game, GameError, GameId, GameOverRequest,
    SubmitWordRequest,
};

pub struct GameManager {
    dictionary: Arc<Dictionary>,
    store: Store,
    game_locks: DashMap<GameId, Arc<Mutex<()>>>,
    leaderboard_limit: u64,
    player_leaderboard_limit: u64,
}

fn require_game_id(game_id: &str) -> Result<(), GameError> {
    if game_id.trim().is_empty() {
        return Err(GameError::MissingGameId);
    }
    Ok(())
}

impl GameManager {
    pub fn new(dictionary: Arc<Dictionary>, store: Store, config: &Config) -> Self {
        Self {
            dictionary,
            store,
            game_locks: DashMap::new(),
            leaderboard_limit: config.leaderboard_limit,
            player_leaderboard_limit: config.player_leaderboard_limit,
        }
    }

    /// Run `operation` while holding the lock of `game_id`.
    ///
    /// Locks are dropped from the map again once nobody holds or waits on them.
    async fn with_game_lock<T>(
        &self,
        game_id: &str,
        operation: impl Future<Output = Result<T, GameError>>,
    ) -> Result<T, GameError> {
        let lock = self.game_locks.entry(game_id.to_string()).or_default().clone();

        let result = {
            let _guard = lock.lock().await;
            operation.await
        };

        drop(lock);
        self.game_locks
            .remove_if(game_id, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    async fn load(&self, game_id: &str) -> Result<GameRecord, GameError> {
        self.store
            .call("load game", || self.store.games.find_by_id(game_id))
            .await?
            .ok_or_else(|| GameError::GameNotFound {
                game_id: game_id.to_string(),
            })
    }

    async fn save(&self, record: &GameRecord, expected_version: i64) -> Result<(), GameError> {
        let written = self
            .store
            .call("save game", || {
                self.store.games.update(record, expected_version)
            })
            .await?;

        if !written {
            warn!("Game {} changed underneath us, rejecting write", record.id);
            return Err(GameError::ConcurrentModification {
                game_id: record.id.clone(),
            });
        }
        Ok(())
    }

    /// Write a game together with its player's top game
    async fn save_named(&self, record: &GameRecord, expected_version: i64) -> Result<(), GameError> {
        let player_uid = record
            .player_uid
            .as_deref()
            .filter(|_| record.ended_and_named);

        let written = self
            .store
            .call("save finished game", || {
                self.store
                    .games
                    .update_with_top_game(record, expected_version, player_uid)
            })
            .await?;

        if !written {
            warn!("Game {} changed underneath us, rejecting write", record.id);
            return Err(GameError::ConcurrentModification {
                game_id: record.id.clone(),
            });
        }
        Ok(())
    }

    /// Rank a score would get on the leaderboard right now
    pub async fn leaderboard_rank(&self, score: i32) -> Result<i32, GameError> {
        let at_or_above = self
            .store
            .call("count ranked games", || {
                self.store.games.count_ranked_at_or_above(score)
            })
            .await?;

        Ok(i32::try_from(at_or_above)
            .unwrap_or(i32::MAX)
            .saturating_add(1))
    }

    async fn finish(&self, record: &mut GameRecord, expected_version: i64) -> Result<(), GameError> {
        let rank = self.leaderboard_rank(record.score).await?;
        record.finish(rank, chrono::Utc::now().timestamp_millis(), &self.dictionary);
        self.save_named(record, expected_version).await?;

        info!(
            "Game {} ended with score {} after {} words (rank {})",
            record.id, record.score, record.word_count, rank
        );
        Ok(())
    }

    pub async fn start_game(&self) -> Result<Game, GameError> {
        let record = {
            let mut rng = rand::rng();
            GameRecord::start(&self.dictionary, &mut rng)
        };

        self.store
            .call("insert game", || self.store.games.insert(&record))
            .await?;

        info!(
            "Started game {} with {} possible words",
            record.id, record.possible_words
        );
        Ok(Game::from(&record))
    }

    pub async fn submit_word(&self, request: SubmitWordRequest) -> Result<CheckWordResult, GameError> {
        require_game_id(&request.game_id)?;
        let indexes = validate_letter_indexes(&request.letter_indexes)?;

        self.with_game_lock(&request.game_id, async {
            let mut record = self.load(&request.game_id).await?;
            let expected_version = record.version;

            let outcome = {
                let mut rng = rand::rng();
                record.submit_word(&indexes, &self.dictionary, &mut rng)?
            };
            debug!(
                "Game {}: {} is {}",
                record.id,
                outcome.played.word,
                if outcome.played.correct { "correct" } else { "incorrect" }
            );

            if outcome.reached_word_limit {
                info!("Game {} reached the word limit", record.id);
                self.finish(&mut record, expected_version).await?;
            } else {
                self.save(&record, expected_version).await?;
            }

            Ok(CheckWordResult {
                played: outcome.played,
                game: Game::from(&record),
            })
        })
        .await
    }

    pub async fn end_game(&self, request: GameOverRequest) -> Result<Game, GameError> {
        require_game_id(&request.game_id)?;

        self.with_game_lock(&request.game_id, async {
            let mut record = self.load(&request.game_id).await?;
            record.ensure_active()?;

            let expected_version = record.version;
            self.finish(&mut record, expected_version).await?;
            Ok(Game::from(&record))
        })
        .await
    }

    pub async fn assign_to_player(&self, request: AssignPlayerRequest) -> Result<Game, GameError> {
        require_game_id(&request.game_id)?;
        if request.player_uid.trim().is_empty() {
            return Err(GameError::MissingPlayerUid);
        }

        self.with_game_lock(&request.game_id, async {
            let mut record = self.load(&request.game_id).await?;
            record.ensure_unassigned()?;

            let player = self
                .store
                .call("load player", || {
                    self.store.players.find_by_uid(&request.player_uid)
                })
                .await?
                .ok_or_else(|| GameError::PlayerNotFound {
                    player: request.player_uid.clone(),
                })?;

            let expected_version = record.version;
            let ended = record.assign_player(player.uid, player.nickname)?;
            if ended {
                self.save_named(&record, expected_version).await?;
            } else {
                self.save(&record, expected_version).await?;
            }

            info!("Game {} assigned to player {}", record.id, request.player_uid);
            Ok(Game::from(&record))
        })
        .await
    }

    /// Best game of each of the top players, best first
    pub async fn leaderboard(&self) -> Result<Vec<Game>, GameError> {
        let players = self
            .store
            .call("load top players", || {
                self.store.players.top_players(self.leaderboard_limit)
            })
            .await?;

        let game_ids: Vec<GameId> = players
            .into_iter()
            .filter_map(|player| player.top_game_id)
            .collect();
        let games = self
            .store
            .call("load top games", || self.store.games.find_many(&game_ids))
            .await?;

        Ok(games.iter().map(Game::from).collect())
    }

    /// A player's best ended games, by nickname
    pub async fn player_leaderboard(&self, nickname: &str) -> Result<Vec<Game>, GameError> {
        let player = self
            .store
            .call("load player", || self.store.players.find_by_nickname(nickname))
            .await?
            .ok_or_else(|| GameError::PlayerNotFound {
                player: nickname.to_string(),
            })?;

        let games = self
            .store
            .call("load player games", || {
                self.store
                    .games
                    .top_games_for_player(&player.uid, self.player_leaderboard_limit)
            })
            .await?;

        Ok(games.iter().map(Game::from).collect())
    }
}
