use rocket::http::{ContentType, Header, Status};
use serde_json::{json, Value};

mod common;

use common::{bearer, days_from_today};

async fn post_json(client: &rocket::local::asynchronous::Client, uri: &str, subject: &str, body: Value) -> (Status, Value) {
    let response = client
        .post(uri.to_string())
        .header(ContentType::JSON)
        .header(bearer(subject))
        .body(body.to_string())
        .dispatch()
        .await;
    let status = response.status();
    (status, response.into_json::<Value>().await.unwrap_or(Value::Null))
}

#[rocket::async_test]
async fn test_requests_without_token_are_unauthorized() {
    let (client, _db) = common::setup_client().await;

    let response = client.get("/tasks").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["statusCode"], 401);
}

#[rocket::async_test]
async fn test_invalid_token_is_unauthorized() {
    let (client, _db) = common::setup_client().await;

    let response = client
        .get("/tasks")
        .header(Header::new("Authorization", "Bearer not-a-token"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[rocket::async_test]
async fn test_first_request_provisions_user() {
    let (client, db) = common::setup_client().await;

    let response = client.get("/user").header(bearer("auth0|7")).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["username"], "auth0|7 name");
    assert_eq!(body["_links"]["self"]["href"], "/user");

    assert_eq!(common::user_rows(&db).await.len(), 1);
}

#[rocket::async_test]
async fn test_home_links() {
    let (client, _db) = common::setup_client().await;

    let response = client.get("/").header(bearer("alice")).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["_links"]["tasks"]["href"], "/tasks");
    assert_eq!(body["_links"]["relations"]["href"], "/checklists/tasks");
}

#[rocket::async_test]
async fn test_task_lifecycle() {
    let (client, _db) = common::setup_client().await;

    let (status, created) = post_json(
        &client,
        "/tasks",
        "alice",
        json!({ "name": "Buy milk", "endDate": days_from_today(2).to_string() }),
    )
    .await;
    assert_eq!(status, Status::Created);
    assert_eq!(created["isDone"], false);
    assert_eq!(created["description"], "");
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["_links"]["self"]["href"], format!("/tasks/{id}"));

    let response = client
        .put(format!("/tasks/{id}"))
        .header(ContentType::JSON)
        .header(bearer("alice"))
        .body(json!({ "name": "Buy oat milk", "isDone": true }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let updated = response.into_json::<Value>().await.unwrap();
    assert_eq!(updated["name"], "Buy oat milk");
    assert_eq!(updated["isDone"], true);

    let response = client.delete(format!("/tasks/{id}")).header(bearer("alice")).dispatch().await;
    assert_eq!(response.status(), Status::NoContent);

    let response = client.get(format!("/tasks/{id}")).header(bearer("alice")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["description"], "Task could not be found");
}

#[rocket::async_test]
async fn test_invalid_dates_are_unprocessable() {
    let (client, _db) = common::setup_client().await;

    let (status, body) = post_json(
        &client,
        "/tasks",
        "alice",
        json!({ "name": "Buy milk", "endDate": days_from_today(-1).to_string() }),
    )
    .await;
    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(
        body["description"],
        "The date in field 'endDate' must not be before 'startDate'"
    );

    let (status, body) = post_json(
        &client,
        "/tasks",
        "alice",
        json!({ "name": "Too late", "startDate": days_from_today(-1).to_string() }),
    )
    .await;
    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(body["description"], "The date in field 'startDate' must not be before today");
}

#[rocket::async_test]
async fn test_other_users_tasks_are_not_found() {
    let (client, _db) = common::setup_client().await;

    let (_, created) = post_json(&client, "/tasks", "alice", json!({ "name": "Private" })).await;
    let id = created["id"].as_i64().unwrap();

    let response = client.get(format!("/tasks/{id}")).header(bearer("bob")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn test_checklist_relations_and_completion() {
    let (client, _db) = common::setup_client().await;

    let (status, checklist) = post_json(&client, "/checklists", "alice", json!({ "name": "Groceries" })).await;
    assert_eq!(status, Status::Created);
    let checklist_id = checklist["id"].as_i64().unwrap();

    let (_, task) = post_json(&client, "/tasks", "alice", json!({ "name": "Milk" })).await;
    let task_id = task["id"].as_i64().unwrap();

    let response = client
        .put("/checklists/tasks")
        .header(ContentType::JSON)
        .header(bearer("alice"))
        .body(json!({ "checklistId": checklist_id, "taskId": task_id }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["tasks"][0]["id"], task_id);

    let response = client.get("/checklists/tasks").header(bearer("alice")).dispatch().await;
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["relations"][0]["checklistId"], checklist_id);
    assert_eq!(body["relations"][0]["taskId"], task_id);
    assert_eq!(
        body["relations"][0]["_links"]["self"]["href"],
        format!("/checklists/{checklist_id}/tasks/{task_id}")
    );

    let response = client
        .post(format!("/checklists/{checklist_id}/complete"))
        .header(bearer("alice"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(
        body["description"],
        "Failed to complete checklist. Not all tasks are marked done."
    );

    let response = client
        .put(format!("/tasks/{task_id}"))
        .header(ContentType::JSON)
        .header(bearer("alice"))
        .body(json!({ "name": "Milk", "isDone": true }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = client
        .post(format!("/checklists/{checklist_id}/complete"))
        .header(bearer("alice"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NoContent);

    let response = client.get(format!("/checklists/{checklist_id}")).header(bearer("alice")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let response = client.get(format!("/tasks/{task_id}")).header(bearer("alice")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn test_update_checklist_keeps_tasks_unless_given() {
    let (client, _db) = common::setup_client().await;

    let (_, checklist) = post_json(&client, "/checklists", "alice", json!({ "name": "Groceries" })).await;
    let checklist_id = checklist["id"].as_i64().unwrap();
    let (_, task) = post_json(&client, "/tasks", "alice", json!({ "name": "Milk" })).await;
    let task_id = task["id"].as_i64().unwrap();
    client
        .put("/checklists/tasks")
        .header(ContentType::JSON)
        .header(bearer("alice"))
        .body(json!({ "checklistId": checklist_id, "taskId": task_id }).to_string())
        .dispatch()
        .await;

    let response = client
        .put(format!("/checklists/{checklist_id}"))
        .header(ContentType::JSON)
        .header(bearer("alice"))
        .body(json!({ "name": "Weekly" }).to_string())
        .dispatch()
        .await;
    let body = response.into_json::<Value>().await.unwrap();
    assert_eq!(body["name"], "Weekly");
    assert_eq!(body["tasks"].as_array().unwrap().len(), 1);

    let response = client
        .put(format!("/checklists/{checklist_id}"))
        .header(ContentType::JSON)
        .header(bearer("alice"))
        .body(json!({ "name": "Weekly", "tasks": [] }).to_string())
        .dispatch()
        .await;
    let body = response.into_json::<Value>().await.unwrap();
    assert!(body["tasks"].as_array().unwrap().is_empty());
}

#[rocket::async_test]
async fn test_delete_unknown_checklist_is_no_content() {
    let (client, _db) = common::setup_client().await;

    let response = client.delete("/checklists/4242").header(bearer("alice")).dispatch().await;
    assert_eq!(response.status(), Status::NoContent);
}

#[rocket::async_test]
async fn test_delete_account() {
    let (client, db) = common::setup_client().await;

    post_json(&client, "/tasks", "alice", json!({ "name": "Milk" })).await;
    post_json(&client, "/checklists", "alice", json!({ "name": "Groceries" })).await;

    let response = client.delete("/user").header(bearer("alice")).dispatch().await;
    assert_eq!(response.status(), Status::NoContent);
    assert!(common::user_rows(&db).await.is_empty());
}
