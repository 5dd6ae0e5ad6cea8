/// APIレスポンス生成
///
/// ステータスコードとJSONボディを持つLambda HTTPレスポンスを組み立てる。
use lambda_http::http::StatusCode;
use lambda_http::http::header::{CONTENT_TYPE, HeaderValue};
use lambda_http::{Body, Error, Response};
use serde::{Deserialize, Serialize};

/// 未対応メソッドのレスポンスボディ
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "method not allowed";

/// エラーレスポンスのボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// エラーメッセージ
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// ボディをJSONにシリアライズしてレスポンスを生成
///
/// Content-Typeは常に`application/json`。
pub fn api_response<B>(status: StatusCode, body: &B) -> Result<Response<Body>, Error>
where
    B: Serialize + ?Sized,
{
    let json = serde_json::to_string(body)?;

    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body(Body::Text(json))?;

    Ok(response)
}

/// 400 Bad Requestのエラーレスポンスを生成
pub fn error_response(message: impl Into<String>) -> Result<Response<Body>, Error> {
    api_response(StatusCode::BAD_REQUEST, &ErrorBody::new(message))
}

/// 405 Method Not Allowedのレスポンスを生成
pub fn method_not_allowed() -> Result<Response<Body>, Error> {
    api_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

/// テスト用: レスポンスボディを文字列として取り出す
#[cfg(test)]
pub(crate) fn body_text(response: &Response<Body>) -> String {
    match response.body() {
        Body::Text(text) => text.clone(),
        Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
        Body::Empty => String::new(),
        _ => panic!("予期しないBody型"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_sets_status_and_content_type() {
        let response = api_response(StatusCode::CREATED, &serde_json::json!({"a": 1})).unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_text(&response), r#"{"a":1}"#);
    }

    #[test]
    fn test_api_response_null_body() {
        let response = api_response(StatusCode::OK, &()).unwrap();

        assert_eq!(body_text(&response), "null");
    }

    #[test]
    fn test_error_response() {
        let response = error_response("user already exists.").unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(&response), r#"{"error":"user already exists."}"#);
    }

    #[test]
    fn test_error_body_deserializes() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"invalid email."}"#).unwrap();

        assert_eq!(body, ErrorBody::new("invalid email."));
    }

    #[test]
    fn test_method_not_allowed() {
        let response = method_not_allowed().unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_text(&response), r#""method not allowed""#);
    }
}
