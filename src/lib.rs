pub mod auth;
pub mod db;
pub mod handlers;
pub mod models;

pub use db::create_pool;
