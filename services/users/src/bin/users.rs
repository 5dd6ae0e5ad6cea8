/// ユーザーAPI HTTP Lambdaエントリポイント
///
/// API Gatewayプロキシ統合経由のHTTPリクエストを受け取り、
/// メソッドに応じてユーザーの取得・作成・更新・削除を行う。
use lambda_http::{Error, Request, run, service_fn};
use tracing::{error, info};
use users::application::{UserHandler, UserService};
use users::infrastructure::{DynamoDbConfig, DynamoUserTable, UserRepository, init_logging};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDB設定を環境から読み込み（コールドスタート時に1回だけ）
    let config = DynamoDbConfig::from_env().await.map_err(|err| {
        error!(error = %err, "DynamoDB設定の読み込みに失敗");
        err
    })?;

    info!(table = config.users_table(), "ユーザーAPI Lambda関数を初期化");

    let table = DynamoUserTable::new(config.client().clone(), config.users_table().to_string());
    let handler = UserHandler::new(UserService::new(UserRepository::new(table)));

    // ハンドラーは全呼び出しで共有するが、可変状態は持たない
    run(service_fn(|request: Request| handler.handle(request))).await
}
