pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
mod schema;

pub use config::Config;
pub use db::Db;
pub use routes::router;
