use std::sync::LazyLock;

use regex::Regex;
use sea_orm::SqlErr;
use tracing::{info, warn};

use crate::store::{Store, StoreError};
use game_core::PlayerRecord;
use game_types::{Game, GameError, PlayerProfile, SubmitProfileRequest};

static NICKNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.]{1,20}$").expect("nickname pattern is valid"));

pub fn is_valid_nickname(nickname: &str) -> bool {
    NICKNAME_PATTERN.is_match(nickname)
}

pub struct PlayerManager {
    store: Store,
}

impl PlayerManager {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    async fn to_profile(&self, player: PlayerRecord) -> Result<PlayerProfile, GameError> {
        let top_game = match &player.top_game_id {
            Some(game_id) => self
                .store
                .call("load top game", || self.store.games.find_by_id(game_id))
                .await?
                .map(|record| Game::from(&record)),
            None => None,
        };

        Ok(player.to_profile(top_game))
    }

    /// Create or rename the profile of `uid`. An existing top game is kept.
    pub async fn submit_profile(
        &self,
        request: SubmitProfileRequest,
    ) -> Result<PlayerProfile, GameError> {
        if request.uid.trim().is_empty() {
            return Err(GameError::MissingPlayerUid);
        }
        let nickname = request.nickname.trim().to_string();
        if !is_valid_nickname(&nickname) {
            return Err(GameError::InvalidNickname { nickname });
        }

        let taken = self
            .store
            .call("check nickname", || {
                self.store
                    .players
                    .count_other_with_nickname(&nickname, &request.uid)
            })
            .await?;
        if taken > 0 {
            return Err(GameError::NicknameTaken { nickname });
        }

        let player = match self
            .store
            .call("load player", || self.store.players.find_by_uid(&request.uid))
            .await?
        {
            Some(mut player) => {
                player.rename(nickname.clone());
                player
            }
            None => PlayerRecord::new(request.uid.clone(), nickname.clone()),
        };

        match self
            .store
            .call("save player", || self.store.players.save(&player))
            .await
        {
            Ok(()) => {}
            // Lost a race for the same nickname against another uid
            Err(StoreError::Rejected { source, .. })
                if matches!(source.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                warn!("Nickname {} was taken concurrently", nickname);
                return Err(GameError::NicknameTaken { nickname });
            }
            Err(err) => return Err(err.into()),
        }

        info!("Saved profile {} for player {}", player.nickname, player.uid);
        self.to_profile(player).await
    }

    /// Case-insensitive profile lookup
    pub async fn read_profile(&self, nickname: &str) -> Result<Option<PlayerProfile>, GameError> {
        let player = self
            .store
            .call("load player", || self.store.players.find_by_nickname(nickname))
            .await?;

        match player {
            Some(player) => Ok(Some(self.to_profile(player).await?)),
            None => Ok(None),
        }
    }

    pub async fn read_profile_by_uid(&self, uid: &str) -> Result<Option<PlayerProfile>, GameError> {
        let player = self
            .store
            .call("load player", || self.store.players.find_by_uid(uid))
            .await?;

        match player {
            Some(player) => Ok(Some(self.to_profile(player).await?)),
            None => Ok(None),
        }
    }
}
