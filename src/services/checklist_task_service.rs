use sea_orm::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::services::checklist_service::{Checklist, ChecklistService};
use crate::services::task_service::TaskService;

/// 「ユーザー `user_id` のチェックリスト `checklist_id` にタスク `task_id` が含まれる」という関連。
/// 独立した行としては保存せず、チェックリストのタスク一覧から導出します。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChecklistTask {
    pub checklist_id: i32,
    pub task_id: i32,
    pub user_id: i32,
}

impl ChecklistTask {
    pub fn new(checklist_id: i32, task_id: i32, user_id: i32) -> Self {
        Self {
            checklist_id,
            task_id,
            user_id,
        }
    }
}

/// チェックリストとタスクの関連を管理するサービス。
pub struct ChecklistTaskService;

impl ChecklistTaskService {
    /// タスクをチェックリストの末尾に追加します。
    /// 既に含まれていれば何も書き込まずにそのまま返します。
    pub async fn add_task<C>(db: &C, relation: ChecklistTask) -> Result<Checklist, AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let task = TaskService::find(db, relation.task_id, relation.user_id)
            .await?
            .ok_or(AppError::TaskNotFound)?;
        let mut checklist = ChecklistService::find(db, relation.checklist_id, relation.user_id)
            .await?
            .ok_or(AppError::ChecklistNotFound)?;

        if checklist.contains_task(task.id) {
            return Ok(checklist);
        }

        checklist.tasks.push(task);
        debug!(checklist_id = checklist.id, task_id = relation.task_id, "task attached");
        ChecklistService::save(db, &checklist).await
    }

    /// タスクをチェックリストから外します。含まれていなくてもエラーにしない。
    pub async fn remove_task<C>(db: &C, relation: ChecklistTask) -> Result<Checklist, AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let mut checklist = ChecklistService::find(db, relation.checklist_id, relation.user_id)
            .await?
            .ok_or(AppError::ChecklistNotFound)?;

        checklist.tasks.retain(|t| t.id != relation.task_id);
        debug!(checklist_id = checklist.id, task_id = relation.task_id, "task detached");
        ChecklistService::save(db, &checklist).await
    }

    /// ユーザーの全チェックリストからタスクを外し、すべて保存し直します。
    pub async fn remove_task_from_all_checklists<C>(db: &C, task_id: i32, user_id: i32) -> Result<(), AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        let checklists = ChecklistService::get_checklists(&txn, user_id).await?;
        for mut checklist in checklists {
            checklist.tasks.retain(|t| t.id != task_id);
            ChecklistService::save(&txn, &checklist).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// チェックリスト順、各チェックリスト内はタスク順で関連を列挙します。
    pub async fn get_relations<C>(db: &C, user_id: i32) -> Result<Vec<ChecklistTask>, AppError>
    where
        C: ConnectionTrait,
    {
        let checklists = ChecklistService::get_checklists(db, user_id).await?;
        Ok(checklists
            .iter()
            .flat_map(|checklist| {
                checklist
                    .tasks
                    .iter()
                    .map(move |task| ChecklistTask::new(checklist.id, task.id, user_id))
            })
            .collect())
    }
}
