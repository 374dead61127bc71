//! `SeaORM` Entity prelude

pub use super::item_prices::Entity as ItemPrices;
pub use super::items::Entity as Items;
