pub mod api;
pub mod models;
pub mod order;

pub use order::OrderNum;
