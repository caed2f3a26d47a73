use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    DisplayName,
    PasswordHash,
    CreatedAt,
}

#[derive(Iden)]
enum Sessions {
    Table,
    AuthToken,
    AccountId,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    CreatedAt,
    CompletedAtId,
    NextExpiration,
}

#[derive(Iden)]
enum GamesCompletedAt {
    Table,
    Id,
    GameId,
    CompletedAt,
}

#[derive(Iden)]
enum Turns {
    Table,
    Id,
    AccountId,
    GameId,
    IsComplete,
    IsDrawing,
    Label,
    Drawing,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // accounts
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Accounts::DisplayName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // sessions
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::AuthToken)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sessions::AccountId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_account_id")
                            .from(Sessions::Table, Sessions::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // pruning scans by age
        manager
            .create_index(
                Index::create()
                    .name("idx_sessions_created_at")
                    .table(Sessions::Table)
                    .col(Sessions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Games::CompletedAtId).big_integer().null())
                    .col(
                        ColumnDef::new(Games::NextExpiration)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // games_completed_at: at most one completion record per game
        manager
            .create_table(
                Table::create()
                    .table(GamesCompletedAt::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GamesCompletedAt::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(GamesCompletedAt::GameId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GamesCompletedAt::CompletedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_completed_at_game_id")
                            .from(GamesCompletedAt::Table, GamesCompletedAt::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_games_completed_at_game_id")
                    .table(GamesCompletedAt::Table)
                    .col(GamesCompletedAt::GameId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // SQLite cannot add a constraint to an existing table, so the back-link
        // from games to its completion record is only enforced on Postgres.
        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .create_foreign_key(
                    ForeignKey::create()
                        .name("fk_games_completed_at_id")
                        .from(Games::Table, Games::CompletedAtId)
                        .to(GamesCompletedAt::Table, GamesCompletedAt::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .to_owned(),
                )
                .await?;
        }

        // turns
        manager
            .create_table(
                Table::create()
                    .table(Turns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Turns::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Turns::AccountId).big_integer().not_null())
                    .col(ColumnDef::new(Turns::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Turns::IsComplete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Turns::IsDrawing).boolean().not_null())
                    .col(
                        ColumnDef::new(Turns::Label)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Turns::Drawing).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_account_id")
                            .from(Turns::Table, Turns::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_game_id")
                            .from(Turns::Table, Turns::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // current-turn lookups: MIN(id) over incomplete turns per game
        manager
            .create_index(
                Index::create()
                    .name("idx_turns_game_id_is_complete")
                    .table(Turns::Table)
                    .col(Turns::GameId)
                    .col(Turns::IsComplete)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_turns_account_id")
                    .table(Turns::Table)
                    .col(Turns::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Turns::Table).if_exists().to_owned())
            .await?;

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name("fk_games_completed_at_id")
                        .table(Games::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(
                Table::drop()
                    .table(GamesCompletedAt::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sessions::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
