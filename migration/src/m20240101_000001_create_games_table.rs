use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Games::Board).string().not_null())
                    .col(ColumnDef::new(Games::Score).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Games::WordCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::LeaderboardRank).integer().null())
                    .col(ColumnDef::new(Games::Name).string().null())
                    .col(ColumnDef::new(Games::PlayerUid).string().null())
                    .col(ColumnDef::new(Games::StartedAt).big_integer().not_null())
                    .col(ColumnDef::new(Games::EndedAt).big_integer().null())
                    .col(
                        ColumnDef::new(Games::EndedAndNamed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Games::TopWord).string().null())
                    .col(
                        ColumnDef::new(Games::TopWordScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::Words).text().not_null())
                    .col(
                        ColumnDef::new(Games::AssignedToPlayer)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Games::MissedOpportunity).string().null())
                    .col(
                        ColumnDef::new(Games::PossibleWords)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Leaderboard rank and listing
        manager
            .create_index(
                Index::create()
                    .name("idx_games_ended_and_named_score")
                    .table(Games::Table)
                    .col(Games::EndedAndNamed)
                    .col(Games::Score)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_player_uid")
                    .table(Games::Table)
                    .col(Games::PlayerUid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    Board,
    Score,
    WordCount,
    LeaderboardRank,
    Name,
    PlayerUid,
    StartedAt,
    EndedAt,
    EndedAndNamed,
    TopWord,
    TopWordScore,
    Words,
    AssignedToPlayer,
    MissedOpportunity,
    PossibleWords,
    Version,
}
