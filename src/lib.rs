pub mod db;
pub mod errors;
pub mod models;

pub use db::{classify, config::build_config};
pub use errors::DbError;
pub use models::connections::{DbBackend, PersistenceConfig};
pub use models::options::{Options, TelemetryOptions};
