use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_items::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemPrices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ItemPrices::ItemId).integer().not_null())
                    // Stored as written by the collector ("2024-3-7"), not a DATE column
                    .col(ColumnDef::new(ItemPrices::Date).text().not_null())
                    .col(ColumnDef::new(ItemPrices::Price).integer().null())
                    // One price per item per day; also the conflict target for appends
                    .primary_key(
                        Index::create()
                            .col(ItemPrices::ItemId)
                            .col(ItemPrices::Date),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_prices_item_id")
                            .from(ItemPrices::Table, ItemPrices::ItemId)
                            .to(Items::Table, Items::ItemId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemPrices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ItemPrices {
    Table,
    ItemId,
    Date,
    Price,
}
