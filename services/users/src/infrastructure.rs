// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod user_repository;
pub mod user_table;

// Re-exports
pub use config::{DynamoDbConfig, DynamoDbConfigError};
#[cfg(test)]
pub use logging::init_test_logging;
pub use logging::init_logging;
pub use user_repository::{UserRepository, decode_user, encode_user};
pub use user_table::{DynamoUserTable, Item, RepositoryError, UserTable};
