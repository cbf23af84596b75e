pub mod bidding;
pub mod catalog;
pub mod config;
pub mod database;
pub mod handlers;
pub mod identity;
pub mod query;
pub mod store;
