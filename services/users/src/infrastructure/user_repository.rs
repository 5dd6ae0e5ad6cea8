/// ユーザーとDynamoDB属性マップの相互変換を担うリポジトリ
///
/// 一意性の検証は行わない。putは常に上書きし、deleteは存在しないキーでも成功する。
use crate::domain::User;
use crate::infrastructure::user_table::{Item, RepositoryError, UserTable};

/// UserTable上のユーザーレコードを扱うリポジトリ
#[derive(Debug, Clone)]
pub struct UserRepository<T>
where
    T: UserTable,
{
    table: T,
}

impl<T> UserRepository<T>
where
    T: UserTable,
{
    /// 新しいUserRepositoryを作成
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// emailをキーにユーザーを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(User))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * テーブル読み取り失敗時は`Err(RepositoryError::ReadError)`
    /// * 属性の変換失敗時は`Err(RepositoryError::DeserializationError)`
    pub async fn get_by_key(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        match self.table.get_item(email).await? {
            Some(item) => Ok(Some(decode_user(item)?)),
            None => Ok(None),
        }
    }

    /// 全ユーザーを取得（順序は保証しない）
    pub async fn scan_all(&self) -> Result<Vec<User>, RepositoryError> {
        let items = self.table.scan().await?;
        decode_users(items)
    }

    /// ユーザーを無条件に書き込む
    ///
    /// 変換失敗時は`SerializationError`、書き込み失敗時は`WriteError`を返す。
    pub async fn put(&self, user: &User) -> Result<(), RepositoryError> {
        let item = encode_user(user)?;
        self.table.put_item(item).await
    }

    /// emailをキーにユーザーを無条件に削除
    pub async fn delete_by_key(&self, email: &str) -> Result<(), RepositoryError> {
        self.table.delete_item(email).await
    }
}

/// UserをDynamoDB属性マップに変換
pub fn encode_user(user: &User) -> Result<Item, RepositoryError> {
    serde_dynamo::to_item(user).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

/// DynamoDB属性マップをUserに変換
pub fn decode_user(item: Item) -> Result<User, RepositoryError> {
    serde_dynamo::from_item(item).map_err(|e| RepositoryError::DeserializationError(e.to_string()))
}

fn decode_users(items: Vec<Item>) -> Result<Vec<User>, RepositoryError> {
    serde_dynamo::from_items(items)
        .map_err(|e| RepositoryError::DeserializationError(e.to_string()))
}
