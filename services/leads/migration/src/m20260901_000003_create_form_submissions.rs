use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FormSubmissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FormSubmissions::FormType).string().not_null())
                    .col(ColumnDef::new(FormSubmissions::FormData).json_binary().not_null())
                    .col(ColumnDef::new(FormSubmissions::UserId).uuid())
                    .col(ColumnDef::new(FormSubmissions::AgentId).uuid())
                    .col(ColumnDef::new(FormSubmissions::ReferralCode).string())
                    .col(
                        ColumnDef::new(FormSubmissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FormSubmissions::Table, FormSubmissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FormSubmissions::Table, FormSubmissions::AgentId)
                            .to(Agents::Table, Agents::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(FormSubmissions::Table)
                    .col(FormSubmissions::AgentId)
                    .name("idx_form_submissions_agent_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(FormSubmissions::Table)
                    .col(FormSubmissions::CreatedAt)
                    .name("idx_form_submissions_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FormSubmissions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FormSubmissions {
    Table,
    Id,
    FormType,
    FormData,
    UserId,
    AgentId,
    ReferralCode,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Agents {
    Table,
    Id,
}
