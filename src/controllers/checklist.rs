use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::controllers::task::TaskResponse;
use crate::errors::AppError;
use crate::guards::auth::CurrentUser;
use crate::links::{self, Links};
use crate::services::checklist_service::{Checklist, ChecklistService, NewChecklist};
use crate::services::task_service::TaskService;

/// チェックリストの作成・更新リクエスト。
/// `tasks` は更新時のみ使い、指定があればタスクの並びを置き換えます。
#[derive(Debug, Deserialize)]
pub struct ChecklistRequest {
    pub name: String,
    #[serde(default)]
    pub tasks: Option<Vec<i32>>,
}

#[derive(Debug, Serialize)]
pub struct ChecklistResponse {
    pub id: i32,
    pub name: String,
    pub tasks: Vec<TaskResponse>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<Checklist> for ChecklistResponse {
    fn from(checklist: Checklist) -> Self {
        Self {
            links: links::checklist_links(checklist.id),
            id: checklist.id,
            name: checklist.name,
            tasks: checklist.tasks.into_iter().map(TaskResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChecklistCollection {
    pub checklists: Vec<ChecklistResponse>,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[get("/checklists")]
pub async fn get_checklists(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
) -> Result<Json<ChecklistCollection>, AppError> {
    let checklists = ChecklistService::get_checklists(db.inner(), user.id()).await?;
    Ok(Json(ChecklistCollection {
        checklists: checklists.into_iter().map(ChecklistResponse::from).collect(),
        links: links::checklists_links(),
    }))
}

#[get("/checklists/<id>")]
pub async fn get_checklist(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
    id: i32,
) -> Result<Json<ChecklistResponse>, AppError> {
    let checklist = ChecklistService::get_checklist(db.inner(), id, user.id()).await?;
    Ok(Json(checklist.into()))
}

#[post("/checklists", format = "json", data = "<request>")]
pub async fn create_checklist(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
    request: Json<ChecklistRequest>,
) -> Result<status::Created<Json<ChecklistResponse>>, AppError> {
    let new_checklist = NewChecklist {
        name: request.into_inner().name,
        user_id: user.id(),
    };
    let checklist = ChecklistService::create(db.inner(), new_checklist).await?;
    Ok(status::Created::new(links::checklist_path(checklist.id)).body(Json(checklist.into())))
}

#[put("/checklists/<id>", format = "json", data = "<request>")]
pub async fn update_checklist(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
    id: i32,
    request: Json<ChecklistRequest>,
) -> Result<Json<ChecklistResponse>, AppError> {
    let request = request.into_inner();
    let current = ChecklistService::get_checklist(db.inner(), id, user.id()).await?;

    let tasks = match request.tasks {
        Some(task_ids) => {
            let mut tasks = Vec::with_capacity(task_ids.len());
            for task_id in task_ids {
                tasks.push(TaskService::get_by_id(db.inner(), user.id(), task_id).await?);
            }
            tasks
        }
        None => current.tasks,
    };

    let checklist = ChecklistService::update(
        db.inner(),
        Checklist {
            id,
            name: request.name,
            user_id: user.id(),
            tasks,
        },
    )
    .await?;
    Ok(Json(checklist.into()))
}

#[delete("/checklists/<id>")]
pub async fn delete_checklist(db: &State<DatabaseConnection>, user: CurrentUser, id: i32) -> Result<Status, AppError> {
    ChecklistService::delete(db.inner(), id, user.id()).await?;
    Ok(Status::NoContent)
}

/// 全タスクが完了したチェックリストを、タスクごと削除します。
#[post("/checklists/<id>/complete")]
pub async fn complete_checklist(db: &State<DatabaseConnection>, user: CurrentUser, id: i32) -> Result<Status, AppError> {
    ChecklistService::complete(db.inner(), id, user.id()).await?;
    Ok(Status::NoContent)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        get_checklists,
        get_checklist,
        create_checklist,
        update_checklist,
        delete_checklist,
        complete_checklist
    ]
}
