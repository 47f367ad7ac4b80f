#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use migration::{Migrator, MigratorTrait};
use rocket::http::Header;
use rocket::local::asynchronous::Client;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait};

use todolist_api::entities::{prelude::*, checklist_entry, task, user};
use todolist_api::jwt::{Claims, TokenVerifier};
use todolist_api::services::task_service::{today, NewTask, TaskService};
use todolist_api::services::user_service::UserService;

pub const SECRET: &str = "integration-test-secret";

/// マイグレーション済みのインメモリSQLiteを用意する。
/// インメモリDBは接続ごとに別物なので、接続は1本に固定する。
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("sqlite connection");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub async fn create_user(db: &DatabaseConnection, subject: &str) -> user::Model {
    UserService::provision(db, subject, subject)
        .await
        .expect("user provisioned")
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

pub fn days_from(base: NaiveDate, days: i64) -> NaiveDate {
    base + Duration::days(days)
}

/// 開始日をそのまま「今日」として作成する。日付の読み取りは一度だけ。
pub async fn create_task(db: &DatabaseConnection, user_id: i32, name: &str, is_done: bool) -> task::Model {
    let mut new_task = NewTask::new(user_id, name);
    new_task.is_done = is_done;
    let today = new_task.start_date;
    TaskService::create_on(db, new_task, today).await.expect("task created")
}

pub async fn entry_rows(db: &DatabaseConnection) -> Vec<checklist_entry::Model> {
    ChecklistEntry::find().all(db).await.expect("entries")
}

pub async fn user_rows(db: &DatabaseConnection) -> Vec<user::Model> {
    User::find().all(db).await.expect("users")
}

/// 指定した subject の署名済みトークン。
pub fn token_for(subject: &str) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        name: Some(format!("{subject} name")),
        exp: chrono::Utc::now().timestamp() + 3600,
        aud: None,
        iss: None,
    };
    encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).expect("token")
}

pub fn bearer(subject: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {}", token_for(subject)))
}

/// テスト用のクライアントと、同じ接続を返す。
pub async fn setup_client() -> (Client, DatabaseConnection) {
    let db = setup_db().await;
    let rocket = todolist_api::rocket_with(db.clone(), TokenVerifier::new(SECRET.as_bytes(), None, None));
    let client = Client::tracked(rocket).await.expect("valid rocket instance");
    (client, db)
}
