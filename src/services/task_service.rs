use chrono::{Local, NaiveDate};
use sea_orm::*;
use tracing::{debug, info, warn};

use crate::entities::{prelude::*, task};
use crate::errors::AppError;
use crate::services::checklist_task_service::ChecklistTaskService;
use crate::validation::{validate_date_range, validate_new_task};

/// サーバーのローカル日付での「今日」。
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 作成前のタスク。IDはデータベースが採番します。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_done: bool,
    pub user_id: i32,
}

impl NewTask {
    /// 開始日が今日、説明なし、未完了のタスクを作ります。
    pub fn new(user_id: i32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            start_date: today(),
            end_date: None,
            is_done: false,
            user_id,
        }
    }
}

/// タスクの検証とCRUDを担うサービス。
pub struct TaskService;

impl TaskService {
    /// 所有者で絞り込んだ検索。IDだけでは取得しない。
    pub async fn find<C>(db: &C, task_id: i32, user_id: i32) -> Result<Option<task::Model>, AppError>
    where
        C: ConnectionTrait,
    {
        Ok(Task::find_by_id(task_id)
            .filter(task::Column::UserId.eq(user_id))
            .one(db)
            .await?)
    }

    /// 検証してから保存します。期間が逆転していれば `InvalidDateRange`、
    /// 開始日が今日より前なら `StartDateInPast`。
    pub async fn create<C>(db: &C, task: NewTask) -> Result<task::Model, AppError>
    where
        C: ConnectionTrait,
    {
        Self::create_on(db, task, today()).await
    }

    /// `today` を明示して作成します。
    pub async fn create_on<C>(db: &C, task: NewTask, today: NaiveDate) -> Result<task::Model, AppError>
    where
        C: ConnectionTrait,
    {
        if let Err(e) = validate_new_task(task.start_date, task.end_date, today) {
            warn!(user_id = task.user_id, error = %e, "rejected new task");
            return Err(e);
        }

        let created = task::ActiveModel {
            name: Set(task.name),
            description: Set(task.description),
            start_date: Set(task.start_date),
            end_date: Set(task.end_date),
            is_done: Set(task.is_done),
            user_id: Set(task.user_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(task_id = created.id, user_id = created.user_id, "task created");
        Ok(created)
    }

    /// 全項目を置き換えます。更新時は期間のみ再検証し、開始日が過去でも許可します。
    pub async fn update<C>(db: &C, task: task::Model) -> Result<task::Model, AppError>
    where
        C: ConnectionTrait,
    {
        let existing = Self::find(db, task.id, task.user_id)
            .await?
            .ok_or(AppError::TaskNotFound)?;

        validate_date_range(task.start_date, task.end_date)?;

        let mut active_model: task::ActiveModel = existing.into();
        active_model.name = Set(task.name);
        active_model.description = Set(task.description);
        active_model.start_date = Set(task.start_date);
        active_model.end_date = Set(task.end_date);
        active_model.is_done = Set(task.is_done);

        let updated = active_model.update(db).await?;
        debug!(task_id = updated.id, user_id = updated.user_id, "task updated");
        Ok(updated)
    }

    /// ユーザーの全タスク。主キーで一意、ID順。
    pub async fn get_all<C>(db: &C, user_id: i32) -> Result<Vec<task::Model>, AppError>
    where
        C: ConnectionTrait,
    {
        Ok(Task::find()
            .filter(task::Column::UserId.eq(user_id))
            .order_by_asc(task::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get_by_id<C>(db: &C, user_id: i32, task_id: i32) -> Result<task::Model, AppError>
    where
        C: ConnectionTrait,
    {
        Self::find(db, task_id, user_id)
            .await?
            .ok_or(AppError::TaskNotFound)
    }

    /// すべてのチェックリストから外してから削除します。存在しないIDでもエラーにしない。
    pub async fn delete<C>(db: &C, user_id: i32, task_id: i32) -> Result<(), AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        ChecklistTaskService::remove_task_from_all_checklists(&txn, task_id, user_id).await?;
        let result = Task::delete_many()
            .filter(task::Column::Id.eq(task_id))
            .filter(task::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        debug!(task_id, user_id, rows = result.rows_affected, "task deleted");
        Ok(())
    }
}
