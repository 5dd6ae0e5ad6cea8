/// ユーザーサービス
///
/// 入力の検証、存在確認、リポジトリ操作を組み合わせて
/// ユーザーの取得・一覧・作成・更新・削除を実装する。
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{EmailValidator, User, UserLookup};
use crate::infrastructure::{RepositoryError, UserRepository, UserTable};

/// ユーザーサービスのエラー型
///
/// メッセージはそのままレスポンスボディに載るため変更しないこと。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserServiceError {
    /// テーブルの読み取り・スキャンに失敗
    #[error("failed to fetch record.")]
    FailedToFetchRecord,
    /// リクエストボディまたは属性をUserに変換できない
    #[error("failed to unmarshal record.")]
    FailedToUnmarshalRecord,
    /// 構造的に不正なユーザーデータ（現在はどの経路からも返さない）
    #[error("invalid user data.")]
    InvalidUserData,
    /// メールアドレスが不正
    #[error("invalid email.")]
    InvalidEmail,
    /// Userを属性マップに変換できない
    #[error("failed to marshal item.")]
    FailedToMarshalItem,
    /// 削除に失敗
    #[error("failed to delete item.")]
    CouldNotDeleteItem,
    /// 書き込みに失敗
    #[error("failed to dynamo put item.")]
    CouldNotDynamoPutItem,
    /// 作成しようとしたユーザーが既に存在する
    #[error("user already exists.")]
    UserAlreadyExists,
    /// 更新しようとしたユーザーが存在しない
    #[error("user does not exist.")]
    UserDoesNotExist,
}

impl UserServiceError {
    /// 読み取り系操作のリポジトリエラーを変換
    fn from_read(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DeserializationError(_) => Self::FailedToUnmarshalRecord,
            _ => Self::FailedToFetchRecord,
        }
    }

    /// 書き込み系操作のリポジトリエラーを変換
    fn from_put(err: RepositoryError) -> Self {
        match err {
            RepositoryError::SerializationError(_) => Self::FailedToMarshalItem,
            _ => Self::CouldNotDynamoPutItem,
        }
    }
}

/// 書き込み前の存在確認の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExistenceRequirement {
    /// 作成: 既に存在していれば拒否
    MustNotExist,
    /// 更新: 存在しなければ拒否
    MustExist,
}

/// ユーザーサービス
///
/// テーブルはコンストラクタで注入する。状態は持たず、
/// 各操作はテーブルを1回ずつ順番に呼び出すだけで再試行はしない。
pub struct UserService<T>
where
    T: UserTable,
{
    repository: UserRepository<T>,
}

impl<T> UserService<T>
where
    T: UserTable,
{
    /// 新しいUserServiceを作成
    pub fn new(repository: UserRepository<T>) -> Self {
        Self { repository }
    }

    /// emailでユーザーを1件取得
    pub async fn fetch_user(&self, email: &str) -> Result<UserLookup, UserServiceError> {
        let user = self.repository.get_by_key(email).await.map_err(|e| {
            warn!(email = email, error = %e, "ユーザー取得に失敗");
            UserServiceError::from_read(e)
        })?;

        Ok(UserLookup::from(user))
    }

    /// 全ユーザーを取得（順序は保証しない）
    pub async fn fetch_users(&self) -> Result<Vec<User>, UserServiceError> {
        let users = self.repository.scan_all().await.map_err(|e| {
            warn!(error = %e, "ユーザー一覧の取得に失敗");
            UserServiceError::from_read(e)
        })?;

        debug!(count = users.len(), "ユーザー一覧を取得");
        Ok(users)
    }

    /// リクエストボディからユーザーを作成
    ///
    /// 同じemailのユーザーが既に存在する場合は`UserAlreadyExists`。
    pub async fn create_user(&self, raw_body: &str) -> Result<User, UserServiceError> {
        let user = Self::parse_user(raw_body)?;
        self.ensure_existence(&user.email, ExistenceRequirement::MustNotExist)
            .await?;
        self.put_user(&user).await?;

        info!(email = %user.email, "ユーザーを作成");
        Ok(user)
    }

    /// リクエストボディでユーザーを更新
    ///
    /// 同じemailのユーザーが存在しない場合は`UserDoesNotExist`。
    pub async fn update_user(&self, raw_body: &str) -> Result<User, UserServiceError> {
        let user = Self::parse_user(raw_body)?;
        self.ensure_existence(&user.email, ExistenceRequirement::MustExist)
            .await?;
        self.put_user(&user).await?;

        info!(email = %user.email, "ユーザーを更新");
        Ok(user)
    }

    /// emailでユーザーを削除
    ///
    /// 存在確認はしないため、存在しないユーザーの削除も成功する。
    pub async fn delete_user(&self, email: &str) -> Result<(), UserServiceError> {
        self.repository.delete_by_key(email).await.map_err(|e| {
            warn!(email = email, error = %e, "ユーザー削除に失敗");
            UserServiceError::CouldNotDeleteItem
        })?;

        info!(email = email, "ユーザーを削除");
        Ok(())
    }

    /// リクエストボディをデコードしてemailを検証
    ///
    /// ボディ全体が`null`の場合は空のユーザーとして扱う（emailの検証で拒否される）。
    fn parse_user(raw_body: &str) -> Result<User, UserServiceError> {
        let user = serde_json::from_str::<Option<User>>(raw_body)
            .map_err(|e| {
                debug!(error = %e, "リクエストボディのデコードに失敗");
                UserServiceError::FailedToUnmarshalRecord
            })?
            .unwrap_or_default();

        if !EmailValidator::is_valid(&user.email) {
            return Err(UserServiceError::InvalidEmail);
        }

        Ok(user)
    }

    /// 書き込み前の存在確認
    ///
    /// 確認とその後のputの間は排他されていないため、並行する呼び出しが
    /// 同じemailを作成・更新しうる（一意性はベストエフォート）。
    /// 確認自体の失敗は握りつぶし、存在しないものとして書き込みへ進む。
    async fn ensure_existence(
        &self,
        email: &str,
        requirement: ExistenceRequirement,
    ) -> Result<(), UserServiceError> {
        let lookup = match self.fetch_user(email).await {
            Ok(lookup) => lookup,
            Err(err) => {
                warn!(email = email, error = %err, "存在確認に失敗したため確認を省略");
                return Ok(());
            }
        };

        match (requirement, lookup.is_found()) {
            (ExistenceRequirement::MustNotExist, true) => Err(UserServiceError::UserAlreadyExists),
            (ExistenceRequirement::MustExist, false) => Err(UserServiceError::UserDoesNotExist),
            _ => Ok(()),
        }
    }

    async fn put_user(&self, user: &User) -> Result<(), UserServiceError> {
        self.repository.put(user).await.map_err(|e| {
            warn!(email = %user.email, error = %e, "ユーザーの書き込みに失敗");
            UserServiceError::from_put(e)
        })
    }
}
