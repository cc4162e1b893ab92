use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameSnapshots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSnapshots::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GameSnapshots::Lives)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(ColumnDef::new(GameSnapshots::Phase).string().not_null())
                    .col(
                        ColumnDef::new(GameSnapshots::CorrectGuesses)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(GameSnapshots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bookmarks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookmarks::ChampionId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Bookmarks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HighScores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HighScores::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(HighScores::PlayerName).string().not_null())
                    .col(
                        ColumnDef::new(HighScores::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(HighScores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(HighScores::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Leaderboard reads order by score
        manager
            .create_index(
                Index::create()
                    .name("idx_high_scores_score")
                    .table(HighScores::Table)
                    .col(HighScores::Score)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HighScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookmarks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameSnapshots::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameSnapshots {
    Table,
    Id,
    Lives,
    Phase,
    CorrectGuesses,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Bookmarks {
    Table,
    ChampionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum HighScores {
    Table,
    Id,
    PlayerName,
    Score,
    CreatedAt,
    UpdatedAt,
}
