/// ユーザーテーブルへのキーバリューアクセス
///
/// `email`をパーティションキーとする単一テーブルに対して、
/// DynamoDBの属性マップをそのまま読み書きする。
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use thiserror::Error;

/// パーティションキーの属性名
pub const EMAIL_KEY: &str = "email";

/// DynamoDBの属性マップ
pub type Item = HashMap<String, AttributeValue>;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// DynamoDBへの書き込み（put/delete）に失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// ユーザーから属性マップへの変換に失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 属性マップからユーザーへの変換に失敗
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

/// ユーザーテーブル操作用トレイト
///
/// 実際のDynamoDBとテスト用モックを差し替えられるようにする。
/// どの操作も条件なしで1回だけ実行され、再試行はしない。
#[async_trait]
pub trait UserTable: Send + Sync {
    /// emailをキーに1件取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Item))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(RepositoryError::ReadError)`
    async fn get_item(&self, email: &str) -> Result<Option<Item>, RepositoryError>;

    /// テーブル全件をスキャン（フィルター・ページングなし）
    async fn scan(&self) -> Result<Vec<Item>, RepositoryError>;

    /// 属性マップを無条件に書き込む（同じキーのレコードは上書き）
    async fn put_item(&self, item: Item) -> Result<(), RepositoryError>;

    /// emailをキーに無条件に削除
    ///
    /// 存在しないキーの削除も成功として扱う。
    async fn delete_item(&self, email: &str) -> Result<(), RepositoryError>;
}

/// UserTableのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoUserTable {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// ユーザーテーブル名
    table_name: String,
}

impl DynamoUserTable {
    /// 新しいDynamoUserTableを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - ユーザーテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn email_key(email: &str) -> AttributeValue {
        AttributeValue::S(email.to_string())
    }
}

#[async_trait]
impl UserTable for DynamoUserTable {
    async fn get_item(&self, email: &str) -> Result<Option<Item>, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(EMAIL_KEY, Self::email_key(email))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        // 存在しないキーはItemなし（または空の属性マップ）で返る
        Ok(result.item.filter(|item| !item.is_empty()))
    }

    async fn scan(&self) -> Result<Vec<Item>, RepositoryError> {
        // ページングはしない: 1回のScanで返る分がすべて
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.into_service_error().to_string()))?;

        Ok(result.items.unwrap_or_default())
    }

    async fn put_item(&self, item: Item) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn delete_item(&self, email: &str) -> Result<(), RepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(EMAIL_KEY, Self::email_key(email))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }
}
