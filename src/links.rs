//! ハイパーメディアリンクの組み立て。
//!
//! 固定のルートテンプレートからリンクを作る純粋関数のみを置きます。

use std::collections::BTreeMap;

use serde::Serialize;

use crate::services::checklist_task_service::ChecklistTask;

pub const ROOT: &str = "/";
pub const USER: &str = "/user";
pub const TASKS: &str = "/tasks";
pub const CHECKLISTS: &str = "/checklists";
pub const RELATIONS: &str = "/checklists/tasks";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

/// リレーション名からリンクへの対応 (`_links`)。
pub type Links = BTreeMap<&'static str, Link>;

fn links<const N: usize>(entries: [(&'static str, String); N]) -> Links {
    entries
        .into_iter()
        .map(|(rel, href)| (rel, Link { href }))
        .collect()
}

pub fn task_path(task_id: i32) -> String {
    format!("{TASKS}/{task_id}")
}

pub fn checklist_path(checklist_id: i32) -> String {
    format!("{CHECKLISTS}/{checklist_id}")
}

pub fn relation_path(checklist_id: i32, task_id: i32) -> String {
    format!("{CHECKLISTS}/{checklist_id}/tasks/{task_id}")
}

pub fn home_links() -> Links {
    links([
        ("self", ROOT.to_string()),
        ("user", USER.to_string()),
        ("tasks", TASKS.to_string()),
        ("checklists", CHECKLISTS.to_string()),
        ("relations", RELATIONS.to_string()),
    ])
}

pub fn user_links() -> Links {
    links([("self", USER.to_string()), ("user", USER.to_string())])
}

pub fn task_links(task_id: i32) -> Links {
    links([("self", task_path(task_id)), ("tasks", TASKS.to_string())])
}

pub fn tasks_links() -> Links {
    links([("self", TASKS.to_string())])
}

pub fn checklist_links(checklist_id: i32) -> Links {
    links([
        ("self", checklist_path(checklist_id)),
        ("checklists", CHECKLISTS.to_string()),
        ("complete", format!("{}/complete", checklist_path(checklist_id))),
    ])
}

pub fn checklists_links() -> Links {
    links([
        ("self", CHECKLISTS.to_string()),
        ("relations", RELATIONS.to_string()),
    ])
}

pub fn relation_links(relation: &ChecklistTask) -> Links {
    links([
        ("self", relation_path(relation.checklist_id, relation.task_id)),
        ("checklist", checklist_path(relation.checklist_id)),
        ("task", task_path(relation.task_id)),
        ("relations", RELATIONS.to_string()),
    ])
}

pub fn relations_links() -> Links {
    links([("self", RELATIONS.to_string())])
}
