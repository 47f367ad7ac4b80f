use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// データベース接続をセットアップします。
/// `Database::connect` はコネクションプールを作成します。
pub async fn set_up_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    tracing::info!("database connected");

    Ok(db)
}
