// Business Directory - Core Library
// Exposes all modules for use in the server binary and tests

pub mod api;
pub mod business;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod service;

// Re-export commonly used types
pub use api::{build_router, AppState, MessageResponse, SearchResponse};
pub use business::{Business, BusinessPayload, NewBusiness, ValidationError};
pub use config::Config;
pub use db::{open_pool, setup_database, DbPool};
pub use error::{DirectoryError, DirectoryResult};
pub use service::BusinessDirectory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
