//! `SeaORM` Entity for the food catalog

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Id assigned by the price API mapping
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i32,
    #[sea_orm(column_type = "Text")]
    pub item_name: String,
    pub heal_amount: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_prices::Entity")]
    ItemPrices,
}

impl Related<super::item_prices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemPrices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
