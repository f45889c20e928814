pub mod sale;
pub mod seller;
pub mod stage;
pub mod unit;
