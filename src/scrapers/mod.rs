pub mod food_table;
pub mod name_resolver;
