// ABOUTME: Initial migration to create users, acronyms, categories, pivot and tokens tables
// ABOUTME: Pivot rows cascade away with their acronym or category and each pair is unique

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // No cascade from users: an orphaned acronym is left for the caller to notice
        manager
            .create_table(
                Table::create()
                    .table(Acronyms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Acronyms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Acronyms::Short).string().not_null())
                    .col(ColumnDef::new(Acronyms::Long).string().not_null())
                    .col(ColumnDef::new(Acronyms::UserId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_acronyms_user_id")
                            .from(Acronyms::Table, Acronyms::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AcronymCategoryPivot::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcronymCategoryPivot::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AcronymCategoryPivot::AcronymId).integer().not_null())
                    .col(ColumnDef::new(AcronymCategoryPivot::CategoryId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pivot_acronym_id")
                            .from(AcronymCategoryPivot::Table, AcronymCategoryPivot::AcronymId)
                            .to(Acronyms::Table, Acronyms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pivot_category_id")
                            .from(AcronymCategoryPivot::Table, AcronymCategoryPivot::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_acronym_category_unique")
                            .table(AcronymCategoryPivot::Table)
                            .col(AcronymCategoryPivot::AcronymId)
                            .col(AcronymCategoryPivot::CategoryId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tokens::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tokens::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tokens::Value).string().not_null().unique_key())
                    .col(ColumnDef::new(Tokens::UserId).uuid().not_null())
                    .col(ColumnDef::new(Tokens::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tokens_user_id")
                            .from(Tokens::Table, Tokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tokens::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AcronymCategoryPivot::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Acronyms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Username,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Acronyms {
    Table,
    Id,
    Short,
    Long,
    UserId,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum AcronymCategoryPivot {
    Table,
    Id,
    AcronymId,
    CategoryId,
}

#[derive(DeriveIden)]
enum Tokens {
    Table,
    Id,
    Value,
    UserId,
    CreatedAt,
}
