use game_types::{Game, GameId, PlayerProfile, PlayerUid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub uid: PlayerUid,
    pub nickname: String,
    pub nickname_lowercase: String,
    pub top_game_id: Option<GameId>,
    pub top_game_score: Option<i32>,
}

impl PlayerRecord {
    pub fn new(uid: PlayerUid, nickname: String) -> Self {
        let nickname_lowercase = normalize_nickname(&nickname);
        Self {
            uid,
            nickname,
            nickname_lowercase,
            top_game_id: None,
            top_game_score: None,
        }
    }

    pub fn rename(&mut self, nickname: String) {
        self.nickname_lowercase = normalize_nickname(&nickname);
        self.nickname = nickname;
    }

    pub fn to_profile(&self, top_game: Option<Game>) -> PlayerProfile {
        PlayerProfile {
            nickname: self.nickname.clone(),
            top_game,
        }
    }
}

/// Key used for case-insensitive nickname uniqueness
pub fn normalize_nickname(nickname: &str) -> String {
    nickname.trim().to_lowercase()
}
