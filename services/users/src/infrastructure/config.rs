/// DynamoDB接続設定
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// ユーザーテーブル名の環境変数名
pub const USERS_TABLE_ENV: &str = "USERS_TABLE";

/// DynamoDB設定のエラー型
#[derive(Debug, Error)]
pub enum DynamoDbConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// テーブル名とクライアントを持つDynamoDB設定
///
/// リージョンと認証情報はaws-configが標準の環境から読み込む。
/// テーブル名は`USERS_TABLE`環境変数で設定する。
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// ユーザーテーブル名
    users_table: String,
}

impl DynamoDbConfig {
    /// 環境からAWS設定とテーブル名を読み込んで新しいDynamoDbConfigを作成
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        let users_table = std::env::var(USERS_TABLE_ENV)
            .map_err(|_| DynamoDbConfigError::MissingEnvVar(USERS_TABLE_ENV.to_string()))?;

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        Ok(Self {
            client: DynamoDbClient::new(&aws_config),
            users_table,
        })
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, users_table: String) -> Self {
        Self {
            client,
            users_table,
        }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// ユーザーテーブル名を取得
    pub fn users_table(&self) -> &str {
        &self.users_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn test_missing_env_var_error_display() {
        let error = DynamoDbConfigError::MissingEnvVar("TEST_VAR".to_string());
        assert_eq!(error.to_string(), "Missing environment variable: TEST_VAR");
    }

    #[tokio::test]
    async fn test_dynamodb_config_new() {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        let config = DynamoDbConfig::new(client, "test-users".to_string());

        assert_eq!(config.users_table(), "test-users");
        let _client_ref = config.client();
    }

    #[tokio::test]
    #[serial(users_env)]
    async fn test_from_env_missing_table() {
        unsafe { remove_env(USERS_TABLE_ENV) };

        let result = DynamoDbConfig::from_env().await;

        match result {
            Err(DynamoDbConfigError::MissingEnvVar(var)) => assert_eq!(var, "USERS_TABLE"),
            Ok(_) => panic!("USERS_TABLEなしで設定が作成された"),
        }
    }

    #[tokio::test]
    #[serial(users_env)]
    async fn test_from_env_reads_table_name() {
        unsafe { set_env(USERS_TABLE_ENV, "LambdaInGoUser") };

        let config = DynamoDbConfig::from_env().await.unwrap();
        assert_eq!(config.users_table(), "LambdaInGoUser");

        unsafe { remove_env(USERS_TABLE_ENV) };
    }
}
