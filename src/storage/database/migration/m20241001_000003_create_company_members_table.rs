use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompanyMembers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompanyMembers::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(CompanyMembers::UserId).uuid().not_null())
                    .col(ColumnDef::new(CompanyMembers::Role).string().not_null())
                    .col(ColumnDef::new(CompanyMembers::Permission).string().null())
                    .col(ColumnDef::new(CompanyMembers::InviteStatus).string().null())
                    .col(
                        ColumnDef::new(CompanyMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CompanyMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_members_company_id")
                            .from(CompanyMembers::Table, CompanyMembers::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_members_user_id")
                            .from(CompanyMembers::Table, CompanyMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Role lookups are keyed by (company, user, role)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_company_members_lookup")
                    .table(CompanyMembers::Table)
                    .col(CompanyMembers::CompanyId)
                    .col(CompanyMembers::UserId)
                    .col(CompanyMembers::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_company_members_user_id")
                    .table(CompanyMembers::Table)
                    .col(CompanyMembers::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompanyMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CompanyMembers {
    Table,
    Id,
    CompanyId,
    UserId,
    Role,
    Permission,
    InviteStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
