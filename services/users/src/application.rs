// アプリケーション層モジュール
pub mod api_response;
pub mod user_handler;
pub mod user_service;

// 再エクスポート
pub use api_response::{ErrorBody, METHOD_NOT_ALLOWED_MESSAGE, api_response};
pub use user_handler::UserHandler;
pub use user_service::{UserService, UserServiceError};
