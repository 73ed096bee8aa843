pub mod category;
pub mod prices;
