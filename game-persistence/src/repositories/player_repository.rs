use game_core::{PlayerRecord, normalize_nickname};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::{players, prelude::*};

#[derive(Clone)]
pub struct PlayerRepository {
    db: DatabaseConnection,
}

pub(crate) fn model_to_player(model: players::Model) -> PlayerRecord {
    PlayerRecord {
        uid: model.uid,
        nickname: model.nickname,
        nickname_lowercase: model.nickname_lowercase,
        top_game_id: model.top_game_id,
        top_game_score: model.top_game_score,
    }
}

/// Point the player's top game at `game_id` unless the current one scores
/// at least as much. Returns whether the row changed.
pub(crate) async fn set_top_game_if_better<C: ConnectionTrait>(
    conn: &C,
    uid: &str,
    game_id: &str,
    score: i32,
) -> Result<bool, DbErr> {
    let result = Players::update_many()
        .col_expr(players::Column::TopGameId, Expr::value(game_id.to_string()))
        .col_expr(players::Column::TopGameScore, Expr::value(score))
        .filter(players::Column::Uid.eq(uid))
        .filter(
            Condition::any()
                .add(players::Column::TopGameScore.is_null())
                .add(players::Column::TopGameScore.lt(score)),
        )
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_uid(&self, uid: &str) -> Result<Option<PlayerRecord>, DbErr> {
        let model = Players::find_by_id(uid).one(&self.db).await?;
        Ok(model.map(model_to_player))
    }

    /// Case-insensitive lookup
    pub async fn find_by_nickname(&self, nickname: &str) -> Result<Option<PlayerRecord>, DbErr> {
        let model = Players::find()
            .filter(players::Column::NicknameLowercase.eq(normalize_nickname(nickname)))
            .one(&self.db)
            .await?;

        Ok(model.map(model_to_player))
    }

    /// Players other than `uid` holding the nickname, ignoring case
    pub async fn count_other_with_nickname(&self, nickname: &str, uid: &str) -> Result<u64, DbErr> {
        Players::find()
            .filter(players::Column::NicknameLowercase.eq(normalize_nickname(nickname)))
            .filter(players::Column::Uid.ne(uid))
            .count(&self.db)
            .await
    }

    /// Insert or rename. The top game of an existing player is left alone.
    pub async fn save(&self, player: &PlayerRecord) -> Result<(), DbErr> {
        let model = players::ActiveModel {
            uid: ActiveValue::Set(player.uid.clone()),
            nickname: ActiveValue::Set(player.nickname.clone()),
            nickname_lowercase: ActiveValue::Set(player.nickname_lowercase.clone()),
            top_game_id: ActiveValue::Set(player.top_game_id.clone()),
            top_game_score: ActiveValue::Set(player.top_game_score),
        };

        Players::insert(model)
            .on_conflict(
                OnConflict::column(players::Column::Uid)
                    .update_columns([
                        players::Column::Nickname,
                        players::Column::NicknameLowercase,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    /// Players with a top game, best first
    pub async fn top_players(&self, limit: u64) -> Result<Vec<PlayerRecord>, DbErr> {
        let players = Players::find()
            .filter(players::Column::TopGameId.is_not_null())
            .order_by_desc(players::Column::TopGameScore)
            .order_by_asc(players::Column::NicknameLowercase)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(players.into_iter().map(model_to_player).collect())
    }

    pub async fn update_top_game(&self, uid: &str, game_id: &str, score: i32) -> Result<bool, DbErr> {
        set_top_game_if_better(&self.db, uid, game_id, score).await
    }
}
