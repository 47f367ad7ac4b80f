use sea_orm::*;
use tracing::{error, info};

use crate::entities::{prelude::*, user};
use crate::errors::AppError;
use crate::services::checklist_service::ChecklistService;
use crate::services::task_service::TaskService;

/// ユーザー関連のビジネスロジックを集約するサービス。
pub struct UserService;

impl UserService {
    pub async fn find_by_subject<C>(db: &C, subject: &str) -> Result<Option<user::Model>, AppError>
    where
        C: ConnectionTrait,
    {
        Ok(User::find()
            .filter(user::Column::Subject.eq(subject))
            .one(db)
            .await?)
    }

    /// 認証成功後の処理。`subject` の行が無ければ作成します。
    pub async fn provision<C>(db: &C, subject: &str, username: &str) -> Result<user::Model, AppError>
    where
        C: ConnectionTrait,
    {
        if let Some(user) = Self::find_by_subject(db, subject).await? {
            return Ok(user);
        }

        let new_user = user::ActiveModel {
            subject: Set(subject.to_owned()),
            username: Set(username.to_owned()),
            ..Default::default()
        };

        // 同時に初回ログインした場合は一意制約で失敗するので、作成済みの行を取り直す
        match new_user.insert(db).await {
            Ok(user) => {
                info!(user_id = user.id, "user provisioned");
                Ok(user)
            }
            Err(e) => Self::find_by_subject(db, subject)
                .await?
                .ok_or(AppError::Database(e)),
        }
    }

    /// 認証済みの subject からユーザーを解決します。
    /// 行が無いのはプロビジョニングの不整合であり、業務エラーではない。
    pub async fn resolve_user<C>(db: &C, subject: &str) -> Result<user::Model, AppError>
    where
        C: ConnectionTrait,
    {
        match Self::find_by_subject(db, subject).await? {
            Some(user) => Ok(user),
            None => {
                error!(subject, "authenticated subject has no user row");
                Err(AppError::Internal(format!(
                    "no user provisioned for subject {subject}"
                )))
            }
        }
    }

    /// アカウント削除。チェックリスト、タスク、ユーザー行の順に1トランザクションで削除します。
    pub async fn delete<C>(db: &C, user: &user::Model) -> Result<(), AppError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        let checklists = ChecklistService::get_checklists(&txn, user.id).await?;
        for checklist in &checklists {
            ChecklistService::delete(&txn, checklist.id, user.id).await?;
        }

        let tasks = TaskService::get_all(&txn, user.id).await?;
        for task in &tasks {
            TaskService::delete(&txn, user.id, task.id).await?;
        }

        User::delete_by_id(user.id).exec(&txn).await?;

        txn.commit().await?;

        info!(
            user_id = user.id,
            checklists = checklists.len(),
            tasks = tasks.len(),
            "user deleted"
        );
        Ok(())
    }
}
