pub mod catalog;
pub mod price;
pub mod wiki;
