// Domain layer modules
pub mod email_validator;
pub mod user;

// Re-exports
pub use email_validator::EmailValidator;
pub use user::{User, UserLookup};
