use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Kind).string().not_null())
                    .col(ColumnDef::new(Documents::Status).string().not_null())
                    .col(ColumnDef::new(Documents::SenderCompanyId).uuid().not_null())
                    .col(ColumnDef::new(Documents::RecipientCompanyId).uuid().null())
                    .col(ColumnDef::new(Documents::RecipientUserId).uuid().null())
                    .col(ColumnDef::new(Documents::AmountCents).big_integer().not_null())
                    .col(ColumnDef::new(Documents::ValuationCapCents).big_integer().null())
                    .col(ColumnDef::new(Documents::DiscountBps).integer().null())
                    .col(
                        ColumnDef::new(Documents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Documents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_sender_company_id")
                            .from(Documents::Table, Documents::SenderCompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_sender_company_id")
                    .table(Documents::Table)
                    .col(Documents::SenderCompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_recipient_company_id")
                    .table(Documents::Table)
                    .col(Documents::RecipientCompanyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Id,
    Kind,
    Status,
    SenderCompanyId,
    RecipientCompanyId,
    RecipientUserId,
    AmountCents,
    ValuationCapCents,
    DiscountBps,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
}
