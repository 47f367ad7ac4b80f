use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::controllers::checklist::ChecklistResponse;
use crate::errors::AppError;
use crate::guards::auth::CurrentUser;
use crate::links::{self, Links};
use crate::services::checklist_task_service::{ChecklistTask, ChecklistTaskService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationRequest {
    pub checklist_id: i32,
    pub task_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationResponse {
    pub checklist_id: i32,
    pub task_id: i32,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<ChecklistTask> for RelationResponse {
    fn from(relation: ChecklistTask) -> Self {
        Self {
            links: links::relation_links(&relation),
            checklist_id: relation.checklist_id,
            task_id: relation.task_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RelationCollection {
    pub relations: Vec<RelationResponse>,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[get("/checklists/tasks")]
pub async fn get_relations(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
) -> Result<Json<RelationCollection>, AppError> {
    let relations = ChecklistTaskService::get_relations(db.inner(), user.id()).await?;
    Ok(Json(RelationCollection {
        relations: relations.into_iter().map(RelationResponse::from).collect(),
        links: links::relations_links(),
    }))
}

#[put("/checklists/tasks", format = "json", data = "<request>")]
pub async fn add_relation(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
    request: Json<RelationRequest>,
) -> Result<Json<ChecklistResponse>, AppError> {
    let relation = ChecklistTask::new(request.checklist_id, request.task_id, user.id());
    let checklist = ChecklistTaskService::add_task(db.inner(), relation).await?;
    Ok(Json(checklist.into()))
}

#[delete("/checklists/<checklist_id>/tasks/<task_id>")]
pub async fn remove_relation(
    db: &State<DatabaseConnection>,
    user: CurrentUser,
    checklist_id: i32,
    task_id: i32,
) -> Result<Json<ChecklistResponse>, AppError> {
    let relation = ChecklistTask::new(checklist_id, task_id, user.id());
    let checklist = ChecklistTaskService::remove_task(db.inner(), relation).await?;
    Ok(Json(checklist.into()))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![get_relations, add_relation, remove_relation]
}
