/// ユーザーエンティティとルックアップ結果
use serde::{Deserialize, Deserializer, Serialize};

/// ユーザー
///
/// `email`がパーティションキーであり、レコードの作成後は変更されない。
/// JSON・DynamoDB属性ともにcamelCaseのフィールド名を使用する。
/// 欠落したフィールドと`null`のフィールドは空文字列として扱う。
/// キーは先頭大文字・全小文字・全大文字の表記も受け付ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// メールアドレス（主キー）
    #[serde(alias = "Email", alias = "EMAIL", deserialize_with = "null_as_empty")]
    pub email: String,
    /// 名
    #[serde(
        alias = "FirstName",
        alias = "firstname",
        alias = "FIRSTNAME",
        deserialize_with = "null_as_empty"
    )]
    pub first_name: String,
    /// 姓
    #[serde(
        alias = "LastName",
        alias = "lastname",
        alias = "LASTNAME",
        deserialize_with = "null_as_empty"
    )]
    pub last_name: String,
}

/// `null`を空文字列として読み込む
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    /// 新しいUserを作成
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// 単一ユーザー取得の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    /// レコードが存在する
    Found(User),
    /// レコードが存在しない
    NotFound,
}

impl UserLookup {
    /// レコードが存在するか
    pub fn is_found(&self) -> bool {
        matches!(self, UserLookup::Found(_))
    }

    /// レスポンス用のユーザーに変換
    ///
    /// 存在しない場合は全フィールドが空のユーザーを返す。
    pub fn into_user_or_empty(self) -> User {
        match self {
            UserLookup::Found(user) => user,
            UserLookup::NotFound => User::default(),
        }
    }
}

impl From<Option<User>> for UserLookup {
    /// emailが空のレコードは存在しないものとして扱う
    fn from(value: Option<User>) -> Self {
        match value {
            Some(user) if !user.email.is_empty() => UserLookup::Found(user),
            _ => UserLookup::NotFound,
        }
    }
}
