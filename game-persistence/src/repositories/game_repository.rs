use std::collections::HashMap;

use game_core::{Board, GameRecord};
use game_types::GameId;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::entities::{games, prelude::*};
use crate::repositories::player_repository::set_top_game_if_better;

#[derive(Clone)]
pub struct GameRepository {
    db: DatabaseConnection,
}

fn model_to_record(model: games::Model) -> Result<GameRecord, DbErr> {
    let board = Board::from_chars(&model.board).map_err(|e| DbErr::Custom(e.to_string()))?;
    let words = serde_json::from_str(&model.words).map_err(|e| DbErr::Json(e.to_string()))?;

    Ok(GameRecord {
        id: model.id,
        board,
        score: model.score,
        word_count: model.word_count,
        leaderboard_rank: model.leaderboard_rank,
        name: model.name,
        player_uid: model.player_uid,
        started_at: model.started_at,
        ended_at: model.ended_at,
        ended_and_named: model.ended_and_named,
        top_word: model.top_word,
        top_word_score: model.top_word_score,
        words,
        assigned_to_player: model.assigned_to_player,
        missed_opportunity: model.missed_opportunity,
        possible_words: model.possible_words,
        version: model.version,
    })
}

fn record_to_active_model(record: &GameRecord, version: i64) -> Result<games::ActiveModel, DbErr> {
    let words = serde_json::to_string(&record.words).map_err(|e| DbErr::Json(e.to_string()))?;

    Ok(games::ActiveModel {
        id: ActiveValue::Set(record.id.clone()),
        board: ActiveValue::Set(record.board.chars()),
        score: ActiveValue::Set(record.score),
        word_count: ActiveValue::Set(record.word_count),
        leaderboard_rank: ActiveValue::Set(record.leaderboard_rank),
        name: ActiveValue::Set(record.name.clone()),
        player_uid: ActiveValue::Set(record.player_uid.clone()),
        started_at: ActiveValue::Set(record.started_at),
        ended_at: ActiveValue::Set(record.ended_at),
        ended_and_named: ActiveValue::Set(record.ended_and_named),
        top_word: ActiveValue::Set(record.top_word.clone()),
        top_word_score: ActiveValue::Set(record.top_word_score),
        words: ActiveValue::Set(words),
        assigned_to_player: ActiveValue::Set(record.assigned_to_player),
        missed_opportunity: ActiveValue::Set(record.missed_opportunity.clone()),
        possible_words: ActiveValue::Set(record.possible_words),
        version: ActiveValue::Set(version),
    })
}

/// Write the record only if the stored version still matches
async fn update_if_version<C: ConnectionTrait>(
    conn: &C,
    record: &GameRecord,
    expected_version: i64,
) -> Result<bool, DbErr> {
    let model = record_to_active_model(record, expected_version + 1)?;

    let result = Games::update_many()
        .set(model)
        .filter(games::Column::Id.eq(record.id.as_str()))
        .filter(games::Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<GameRecord>, DbErr> {
        Games::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_record)
            .transpose()
    }

    pub async fn insert(&self, record: &GameRecord) -> Result<(), DbErr> {
        let model = record_to_active_model(record, record.version)?;
        Games::insert(model).exec_without_returning(&self.db).await?;
        Ok(())
    }

    /// Conditional write. Returns false when another writer got there first.
    pub async fn update(&self, record: &GameRecord, expected_version: i64) -> Result<bool, DbErr> {
        update_if_version(&self.db, record, expected_version).await
    }

    /// Conditional write of a finished or newly named game together with the
    /// owning player's top game, in one transaction.
    pub async fn update_with_top_game(
        &self,
        record: &GameRecord,
        expected_version: i64,
        player_uid: Option<&str>,
    ) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        if !update_if_version(&txn, record, expected_version).await? {
            txn.rollback().await?;
            return Ok(false);
        }

        if let Some(uid) = player_uid {
            let updated = set_top_game_if_better(&txn, uid, &record.id, record.score).await?;
            tracing::debug!(
                "Top game of player {} {} by game {}",
                uid,
                if updated { "replaced" } else { "kept" },
                record.id
            );
        }

        txn.commit().await?;
        Ok(true)
    }

    /// Ended and named games scoring at least `score`
    pub async fn count_ranked_at_or_above(&self, score: i32) -> Result<u64, DbErr> {
        Games::find()
            .filter(games::Column::EndedAndNamed.eq(true))
            .filter(games::Column::Score.gte(score))
            .count(&self.db)
            .await
    }

    pub async fn top_games_for_player(
        &self,
        player_uid: &str,
        limit: u64,
    ) -> Result<Vec<GameRecord>, DbErr> {
        Games::find()
            .filter(games::Column::PlayerUid.eq(player_uid))
            .filter(games::Column::EndedAndNamed.eq(true))
            .order_by_desc(games::Column::Score)
            .order_by_asc(games::Column::EndedAt)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_record)
            .collect()
    }

    /// Load several games, returned in the order of `ids`. Missing ids are skipped.
    pub async fn find_many(&self, ids: &[GameId]) -> Result<Vec<GameRecord>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut found: HashMap<String, GameRecord> = Games::find()
            .filter(games::Column::Id.is_in(ids.iter().map(String::as_str)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|model| model_to_record(model).map(|record| (record.id.clone(), record)))
            .collect::<Result<_, _>>()?;

        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }
}
