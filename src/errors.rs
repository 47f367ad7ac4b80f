use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use sea_orm::DbErr;
use serde::Serialize;

/// アプリケーション全体で使用するエラー型。
/// 業務エラーはすべて呼び出し元へそのまま伝播し、ここでHTTPレスポンスに変換されます。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 所有者に対応するタスクが存在しない (404)
    #[error("Task could not be found")]
    TaskNotFound,
    /// 所有者に対応するチェックリストが存在しない (404)
    #[error("Checklist could not be found")]
    ChecklistNotFound,
    /// 終了日が開始日より前 (422)
    #[error("The date in field 'endDate' must not be before 'startDate'")]
    InvalidDateRange,
    /// 新規タスクの開始日が今日より前 (422)
    #[error("The date in field 'startDate' must not be before today")]
    StartDateInPast,
    /// 未完了のタスクが残っている (400)
    #[error("Failed to complete checklist. Not all tasks are marked done.")]
    ChecklistIncomplete,
    /// 認証エラー (401)
    #[error("Unauthorized")]
    Unauthorized,
    /// データベースエラー (500)
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 内部エラー (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::TaskNotFound | AppError::ChecklistNotFound => Status::NotFound,
            AppError::InvalidDateRange | AppError::StartDateInPast => Status::UnprocessableEntity,
            AppError::ChecklistIncomplete => Status::BadRequest,
            AppError::Unauthorized => Status::Unauthorized,
            AppError::Database(_) | AppError::Internal(_) => Status::InternalServerError,
        }
    }

    /// クライアントに返す説明文。内部エラーの詳細は返さない。
    pub fn description(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

/// エラーレスポンスのJSONボディ。
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub status_code: u16,
    pub name: String,
    pub description: String,
}

impl ApiError {
    pub fn new(status: Status, description: impl Into<String>) -> Self {
        Self {
            status_code: status.code,
            name: status.reason().unwrap_or("Unknown").to_string(),
            description: description.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status == Status::InternalServerError {
            tracing::error!(error = %self, uri = %request.uri(), "request failed");
        }

        status::Custom(status, Json(ApiError::new(status, self.description()))).respond_to(request)
    }
}

/// ガードの失敗やボディの解析失敗など、ハンドラ外で発生したエラーを
/// `ApiError` 形式で返すキャッチャー。
#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> status::Custom<Json<ApiError>> {
    let description = status.reason().unwrap_or("Unknown error");
    status::Custom(status, Json(ApiError::new(status, description)))
}
