use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Players::Uid).string().not_null().primary_key())
                    .col(ColumnDef::new(Players::Nickname).string().not_null())
                    .col(
                        ColumnDef::new(Players::NicknameLowercase)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Players::TopGameId).string().null())
                    .col(ColumnDef::new(Players::TopGameScore).integer().null())
                    .to_owned(),
            )
            .await?;

        // Player leaderboard
        manager
            .create_index(
                Index::create()
                    .name("idx_players_top_game_score")
                    .table(Players::Table)
                    .col(Players::TopGameScore)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Uid,
    Nickname,
    NicknameLowercase,
    TopGameId,
    TopGameScore,
}
