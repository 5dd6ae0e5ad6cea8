/// ユーザーAPIのリクエストルーティング
///
/// HTTPメソッドからユーザーサービスの操作を選び、
/// 結果とエラーをAPIレスポンスに変換する。
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Error, Request, RequestExt, Response};
use tracing::{error, info};

use crate::application::api_response::{api_response, error_response, method_not_allowed};
use crate::application::user_service::{UserService, UserServiceError};
use crate::infrastructure::UserTable;

/// GET/DELETEでユーザーを指定するクエリパラメータ名
pub const EMAIL_QUERY_PARAM: &str = "email";

/// ユーザーAPIハンドラー
pub struct UserHandler<T>
where
    T: UserTable,
{
    service: UserService<T>,
}

impl<T> UserHandler<T>
where
    T: UserTable,
{
    /// 新しいUserHandlerを作成
    pub fn new(service: UserService<T>) -> Self {
        Self { service }
    }

    /// リクエストをメソッドごとの処理に振り分ける
    ///
    /// | メソッド | 処理 | 成功時 |
    /// |---|---|---|
    /// | GET | `email`指定時は1件取得、なければ一覧 | 200 |
    /// | POST | 作成 | 201 |
    /// | PUT | 更新 | 200 |
    /// | DELETE | 削除 | 200 |
    /// | その他 | - | 405 |
    ///
    /// ユーザーサービスのエラーはすべて400で返す。
    pub async fn handle(&self, request: Request) -> Result<Response<Body>, Error> {
        let method = request.method().clone();
        info!(method = %method, path = %request.uri().path(), "リクエスト受信");

        let response = match method {
            Method::GET => self.get_user(&request).await,
            Method::POST => self.create_user(&request).await,
            Method::PUT => self.update_user(&request).await,
            Method::DELETE => self.delete_user(&request).await,
            _ => method_not_allowed(),
        }?;

        info!(method = %method, status = response.status().as_u16(), "レスポンス送信");
        Ok(response)
    }

    async fn get_user(&self, request: &Request) -> Result<Response<Body>, Error> {
        let email = query_email(request);

        if email.is_empty() {
            return match self.service.fetch_users().await {
                Ok(users) => api_response(StatusCode::OK, &users),
                Err(err) => service_error_response(err),
            };
        }

        match self.service.fetch_user(&email).await {
            // 存在しない場合は空フィールドのユーザーを200で返す
            Ok(lookup) => api_response(StatusCode::OK, &lookup.into_user_or_empty()),
            Err(err) => service_error_response(err),
        }
    }

    async fn create_user(&self, request: &Request) -> Result<Response<Body>, Error> {
        let raw_body = match raw_body(request) {
            Ok(raw_body) => raw_body,
            Err(err) => return service_error_response(err),
        };

        match self.service.create_user(raw_body).await {
            Ok(user) => api_response(StatusCode::CREATED, &user),
            Err(err) => service_error_response(err),
        }
    }

    async fn update_user(&self, request: &Request) -> Result<Response<Body>, Error> {
        let raw_body = match raw_body(request) {
            Ok(raw_body) => raw_body,
            Err(err) => return service_error_response(err),
        };

        match self.service.update_user(raw_body).await {
            Ok(user) => api_response(StatusCode::OK, &user),
            Err(err) => service_error_response(err),
        }
    }

    async fn delete_user(&self, request: &Request) -> Result<Response<Body>, Error> {
        let email = query_email(request);

        match self.service.delete_user(&email).await {
            Ok(()) => api_response(StatusCode::OK, &()),
            Err(err) => service_error_response(err),
        }
    }
}

/// クエリパラメータからemailを取得（なければ空文字列）
fn query_email(request: &Request) -> String {
    request
        .query_string_parameters()
        .first(EMAIL_QUERY_PARAM)
        .unwrap_or_default()
        .to_string()
}

/// リクエストボディをUTF-8文字列として取得
fn raw_body(request: &Request) -> Result<&str, UserServiceError> {
    std::str::from_utf8(request.body().as_ref())
        .map_err(|_| UserServiceError::FailedToUnmarshalRecord)
}

fn service_error_response(err: UserServiceError) -> Result<Response<Body>, Error> {
    error!(error = %err, "リクエスト処理に失敗");
    error_response(err.to_string())
}
