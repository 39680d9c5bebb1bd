pub mod migrations;
pub mod repository;

pub use repository::Database;
