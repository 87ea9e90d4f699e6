use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Agents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Agents::Name).string().not_null())
                    .col(ColumnDef::new(Agents::Email).string().not_null())
                    .col(ColumnDef::new(Agents::Phone).string())
                    .col(ColumnDef::new(Agents::ReferralCode).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Agents::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Agents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Agents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Uniqueness is enforced here, not by the generator's pre-check.
        manager
            .create_index(
                Index::create()
                    .table(Agents::Table)
                    .col(Agents::ReferralCode)
                    .name("idx_agents_referral_code")
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Agents::Table)
                    .col(Agents::Email)
                    .name("idx_agents_email")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Agents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Agents {
    Table,
    Id,
    Name,
    Email,
    Phone,
    ReferralCode,
    Active,
    CreatedAt,
    UpdatedAt,
}
