use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameId, PlayerUid};

// Missing fields deserialize as empty so they surface as typed validation errors

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct SubmitWordRequest {
    pub game_id: GameId,
    pub letter_indexes: Vec<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct GameOverRequest {
    pub game_id: GameId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct AssignPlayerRequest {
    pub game_id: GameId,
    pub player_uid: PlayerUid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct SubmitProfileRequest {
    pub uid: PlayerUid,
    pub nickname: String,
}
