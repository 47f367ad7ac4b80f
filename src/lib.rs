#[macro_use]
extern crate rocket;

use migration::{Migrator, MigratorTrait};
use rocket::Build;
use sea_orm::{DatabaseConnection, DbErr};

pub mod config;
pub mod controllers;
pub mod db;
pub mod entities;
pub mod errors;
pub mod guards;
pub mod jwt;
pub mod links;
pub mod services;
pub mod validation;

use config::AppConfig;
use jwt::TokenVerifier;

/// 設定からRocketインスタンスを構築します。
/// データベースへ接続し、マイグレーションを適用してからルートを登録します。
pub async fn build_rocket(config: &AppConfig) -> Result<rocket::Rocket<Build>, DbErr> {
    let db = db::set_up_db(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    Ok(rocket_with(db, TokenVerifier::from_config(config)))
}

/// 準備済みの接続と検証器からRocketインスタンスを構築します。
/// テストではインメモリのSQLiteを渡します。
pub fn rocket_with(db: DatabaseConnection, verifier: TokenVerifier) -> rocket::Rocket<Build> {
    rocket::build()
        .manage(db)
        .manage(verifier)
        .mount("/", controllers::home::routes())
        .mount("/", controllers::user::routes())
        .mount("/", controllers::task::routes())
        .mount("/", controllers::checklist::routes())
        .mount("/", controllers::checklist_task::routes())
        .register("/", catchers![errors::default_catcher])
}
