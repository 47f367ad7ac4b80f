use std::collections::HashSet;

use sea_orm::*;
use tracing::{debug, info, warn};

use crate::entities::{checklist, checklist_entry, task};
use crate::errors::AppError;
use crate::services::task_service::TaskService;

/// タスクの並びを含むチェックリスト。
/// `tasks` は同じIDを二度含まない。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checklist {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
    pub tasks: Vec<task::Model>,
}

impl Checklist {
    pub fn contains_task(&self, task_id: i32) -> bool {
        self.tasks.iter().any(|t| t.id == task_id)
    }

    /// すべてのタスクが完了していれば完了可能。空のチェックリストも完了可能。
    pub fn is_completable(&self) -> bool {
        self.tasks.iter().all(|t| t.is_done)
    }

    pub fn task_ids(&self) -> Vec<i32> {
        self.tasks.iter().map(|t| t.id).collect()
    }
}

/// 作成前のチェックリスト。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewChecklist {
    pub name: String,
    pub user_id: i32,
}

/// 先に現れたものを残してIDの重複を取り除く。
pub fn dedup_tasks(tasks: Vec<task::Model>) -> Vec<task::Model> {
    let mut seen = HashSet::new();
    tasks.into_iter().filter(|t| seen.insert(t.id)).collect()
}

/// チェックリストのCRUDと完了処理を担うサービス。
pub struct ChecklistService;

impl ChecklistService {
    /// 中間テーブルの `position` 順にタスクを読み込む。
    async fn load<C>(db: &C, model: checklist::Model) -> Result<Checklist, AppError>
    where
        C: ConnectionTrait,
    {
        let tasks = checklist_entry::Entity::find()
            .filter(checklist_entry::Column::ChecklistId.eq(model.id))
            .order_by_asc(checklist_entry::Column::Position)
            .order_by_asc(checklist_entry::Column::Id)
            .find_also_related(task::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(_, task)| task)
            .collect();

        Ok(Checklist {
            id: model.id,
            name: model.name,
            user_id: model.user_id,
            tasks,
        })
    }

    /// 所有者で絞り込んだ検索。
    pub async fn find<C>(db: &C, id: i32, user_id: i32) -> Result<Option<Checklist>, AppError>
    where
        C: ConnectionTrait,
    {
        let model = checklist::Entity::find_by_id(id)
            .filter(checklist::Column::UserId.eq(user_id))
            .one(db)
            .await?;

        match model {
            Some(model) => Ok(Some(Self::load(db, model).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_checklists<C>(db: &C, user_id: i32) -> Result<Vec<Checklist>, AppError>
    where
        C: ConnectionTrait,
    {
        let models = checklist::Entity::find()
            .filter(checklist::Column::UserId.eq(user_id))
            .order_by_asc(checklist::Column::Id)
            .all(db)
            .await?;

        let mut checklists = Vec::with_capacity(models.len());
        for model in models {
            checklists.push(Self::load(db, model).await?);
        }
        Ok(checklists)
    }

    pub async fn get_checklist<C>(db: &C, id: i32, user_id: i32) -> Result<Checklist, AppError>
    where
        C: ConnectionTrait,
    {
        Self::find(db, id, user_id)
            .await?
            .ok_or(AppError::ChecklistNotFound)
    }

    pub async fn create<C>(db: &C, checklist: NewChecklist) -> Result<Checklist, AppError>
    where
        C: ConnectionTrait,
    {
        let created = checklist::ActiveModel {
            name: Set(checklist.name),
            user_id: Set(checklist.user_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(checklist_id = created.id, user_id = created.user_id, "checklist created");
        Self::load(db, created).await
    }

    /// 名前とタスクの並びを置き換えます。
    /// 渡されたタスクは所有者で引き直し、他人のタスクなら `TaskNotFound`。
    pub async fn update<C>(db: &C, checklist: Checklist) -> Result<Checklist, AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let mut existing = Self::find(db, checklist.id, checklist.user_id)
            .await?
            .ok_or(AppError::ChecklistNotFound)?;

        let mut tasks = Vec::with_capacity(checklist.tasks.len());
        for task in dedup_tasks(checklist.tasks) {
            let owned = TaskService::find(db, task.id, checklist.user_id)
                .await?
                .ok_or(AppError::TaskNotFound)?;
            tasks.push(owned);
        }

        existing.name = checklist.name;
        existing.tasks = tasks;
        Self::save(db, &existing).await
    }

    /// 名前を更新し、中間テーブルを現在の並びで書き直します。
    pub async fn save<C>(db: &C, checklist: &Checklist) -> Result<Checklist, AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        checklist::ActiveModel {
            id: Unchanged(checklist.id),
            name: Set(checklist.name.clone()),
            user_id: Unchanged(checklist.user_id),
        }
        .update(&txn)
        .await?;

        checklist_entry::Entity::delete_many()
            .filter(checklist_entry::Column::ChecklistId.eq(checklist.id))
            .exec(&txn)
            .await?;

        let entries: Vec<checklist_entry::ActiveModel> = checklist
            .tasks
            .iter()
            .zip(0..)
            .map(|(task, position)| checklist_entry::ActiveModel {
                checklist_id: Set(checklist.id),
                task_id: Set(task.id),
                position: Set(position),
                ..Default::default()
            })
            .collect();
        if !entries.is_empty() {
            checklist_entry::Entity::insert_many(entries).exec(&txn).await?;
        }

        txn.commit().await?;

        debug!(checklist_id = checklist.id, tasks = checklist.tasks.len(), "checklist saved");
        Ok(checklist.clone())
    }

    /// チェックリストだけを削除します。所属タスクは残り、関連だけが消えます。
    /// 存在しないIDでもエラーにしない。
    pub async fn delete<C>(db: &C, id: i32, user_id: i32) -> Result<(), AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        let existing = checklist::Entity::find_by_id(id)
            .filter(checklist::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        if let Some(model) = existing {
            checklist_entry::Entity::delete_many()
                .filter(checklist_entry::Column::ChecklistId.eq(model.id))
                .exec(&txn)
                .await?;
            model.delete(&txn).await?;
            debug!(checklist_id = id, user_id, "checklist deleted");
        }

        txn.commit().await?;
        Ok(())
    }

    /// 全タスクが完了していれば、タスクとチェックリストをまとめて削除します。
    /// 未完了のタスクがあれば `ChecklistIncomplete` を返し、何も変更しない。
    pub async fn complete<C>(db: &C, id: i32, user_id: i32) -> Result<(), AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        let checklist = Self::get_checklist(&txn, id, user_id).await?;
        if !checklist.is_completable() {
            warn!(checklist_id = id, user_id, "checklist has undone tasks");
            return Err(AppError::ChecklistIncomplete);
        }

        for task_id in checklist.task_ids() {
            TaskService::delete(&txn, user_id, task_id).await?;
        }
        Self::delete(&txn, id, user_id).await?;

        txn.commit().await?;

        info!(checklist_id = id, user_id, tasks = checklist.tasks.len(), "checklist completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: i32, is_done: bool) -> task::Model {
        task::Model {
            id,
            name: format!("task {id}"),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            end_date: None,
            is_done,
            user_id: 1,
        }
    }

    fn checklist(tasks: Vec<task::Model>) -> Checklist {
        Checklist {
            id: 1,
            name: "Groceries".to_string(),
            user_id: 1,
            tasks,
        }
    }

    #[test]
    fn test_empty_checklist_is_completable() {
        assert!(checklist(vec![]).is_completable());
    }

    #[test]
    fn test_completable_only_when_all_done() {
        assert!(checklist(vec![task(1, true), task(2, true)]).is_completable());
        assert!(!checklist(vec![task(1, true), task(2, false)]).is_completable());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let tasks = dedup_tasks(vec![task(3, false), task(1, false), task(3, true), task(2, false)]);
        let ids: Vec<i32> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(!tasks[0].is_done);
    }

    #[test]
    fn test_contains_task() {
        let list = checklist(vec![task(5, false)]);
        assert!(list.contains_task(5));
        assert!(!list.contains_task(6));
    }
}
