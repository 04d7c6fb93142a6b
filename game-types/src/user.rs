use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Game;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlayerProfile {
    pub nickname: String,
    pub top_game: Option<Game>,
}
