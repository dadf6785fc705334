use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuraAccount::Table)
                    .if_not_exists()
                    .col(pk_auto(AuraAccount::Id))
                    .col(string(AuraAccount::UserId))
                    .col(string(AuraAccount::Scope))
                    .col(json(AuraAccount::Data))
                    .col(big_integer(AuraAccount::Version).default(0))
                    .col(timestamp_with_time_zone(AuraAccount::CreatedAt))
                    .col(timestamp_with_time_zone(AuraAccount::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // One account per user per scope
        manager
            .create_index(
                Index::create()
                    .name("idx_aura_account_user_scope")
                    .table(AuraAccount::Table)
                    .col(AuraAccount::UserId)
                    .col(AuraAccount::Scope)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Leaderboard scans filter by scope
        manager
            .create_index(
                Index::create()
                    .name("idx_aura_account_scope")
                    .table(AuraAccount::Table)
                    .col(AuraAccount::Scope)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_aura_account_scope")
                    .table(AuraAccount::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_aura_account_user_scope")
                    .table(AuraAccount::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AuraAccount::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuraAccount {
    Table,
    Id,
    UserId,
    Scope,
    Data,
    Version,
    CreatedAt,
    UpdatedAt,
}
