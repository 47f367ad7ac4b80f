use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::entities::user;
use crate::errors::AppError;
use crate::guards::auth::CurrentUser;
use crate::links::{self, Links};
use crate::services::user_service::UserService;

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            links: links::user_links(),
        }
    }
}

#[get("/user")]
pub fn get_current_user(user: CurrentUser) -> Json<UserResponse> {
    Json(user.user.into())
}

/// 自分のアカウントと、すべてのタスク・チェックリストを削除します。
#[delete("/user")]
pub async fn delete_current_user(db: &State<DatabaseConnection>, user: CurrentUser) -> Result<Status, AppError> {
    UserService::delete(db.inner(), &user.user).await?;
    Ok(Status::NoContent)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![get_current_user, delete_current_user]
}
