use chrono::NaiveDate;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::entities::task;
use crate::errors::AppError;
use crate::guards::auth::CurrentUser;
use crate::links::{self, Links};
use crate::services::task_service::{today, NewTask, TaskService};

/// タスクの作成・更新リクエスト。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "today")]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_done: bool,
}

impl TaskRequest {
    fn into_new_task(self, user_id: i32) -> NewTask {
        NewTask {
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            is_done: self.is_done,
            user_id,
        }
    }

    fn into_task(self, id: i32, user_id: i32) -> task::Model {
        task::Model {
            id,
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            is_done: self.is_done,
            user_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_done: bool,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<task::Model> for TaskResponse {
    fn from(task: task::Model) -> Self {
        Self {
            links: links::task_links(task.id),
            id: task.id,
            name: task.name,
            description: task.description,
            start_date: task.start_date,
            end_date: task.end_date,
            is_done: task.is_done,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskCollection {
    pub tasks: Vec<TaskResponse>,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[get("/tasks")]
pub async fn get_tasks(db: &State<DatabaseConnection>, user: CurrentUser) -> Result<Json<TaskCollection>, AppError> {
    let tasks = TaskService::get_all(db.inner(), user.id()).await?;
    Ok(Json(TaskCollection {
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
        links: links::tasks_links(),
    }))
}

#[get("/tasks/<id>")]
pub async fn get_task(db: &State<DatabaseConnection>, user: CurrentUser, id: i32) -> Result<Json<TaskResponse>, AppError> {
    let task = TaskService::get_by_id(db.inner(), user.id(), id).await?;
    Ok(Json(task.into()))
}

#[post("/tasks", format = "json", data = "<request>")]
pub async fn create_task(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
    request: Json<TaskRequest>,
) -> Result<status::Created<Json<TaskResponse>>, AppError> {
    let task = TaskService::create(db.inner(), request.into_inner().into_new_task(user.id())).await?;
    Ok(status::Created::new(links::task_path(task.id)).body(Json(task.into())))
}

#[put("/tasks/<id>", format = "json", data = "<request>")]
pub async fn update_task(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
    id: i32,
    request: Json<TaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let task = TaskService::update(db.inner(), request.into_inner().into_task(id, user.id())).await?;
    Ok(Json(task.into()))
}

#[delete("/tasks/<id>")]
pub async fn delete_task(db: &State<DatabaseConnection>, user: CurrentUser, id: i32) -> Result<Status, AppError> {
    TaskService::delete(db.inner(), user.id(), id).await?;
    Ok(Status::NoContent)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![get_tasks, get_task, create_task, update_task, delete_task]
}
