use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub board: String,
    pub score: i32,
    pub word_count: i32,
    pub leaderboard_rank: Option<i32>,
    pub name: Option<String>,
    pub player_uid: Option<String>,
    pub started_at: i64,
    pub ended_at: Option<i64>,
    pub ended_and_named: bool,
    pub top_word: Option<String>,
    pub top_word_score: i32,
    /// Played words as a JSON array
    #[sea_orm(column_type = "Text")]
    pub words: String,
    pub assigned_to_player: bool,
    pub missed_opportunity: Option<String>,
    pub possible_words: i32,
    pub version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
