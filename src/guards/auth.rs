use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::entities::user;
use crate::errors::AppError;
use crate::jwt::TokenVerifier;
use crate::services::user_service::UserService;

/// 認証済みユーザーを表すリクエストガード。
/// `Authorization: Bearer <token>` を検証し、初回ならユーザー行を作成してから解決します。
pub struct CurrentUser {
    pub user: user::Model,
}

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }
}

fn bearer_token<'r>(request: &'r Request<'_>) -> Option<&'r str> {
    request
        .headers()
        .get_one("Authorization")
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = AppError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let db = match request.guard::<&State<DatabaseConnection>>().await {
            Outcome::Success(db) => db,
            _ => {
                return Outcome::Error((
                    Status::InternalServerError,
                    AppError::Internal("database connection is not managed".into()),
                ))
            }
        };
        let verifier = match request.guard::<&State<TokenVerifier>>().await {
            Outcome::Success(verifier) => verifier,
            _ => {
                return Outcome::Error((
                    Status::InternalServerError,
                    AppError::Internal("token verifier is not managed".into()),
                ))
            }
        };

        let Some(token) = bearer_token(request) else {
            return Outcome::Error((Status::Unauthorized, AppError::Unauthorized));
        };

        let claims = match verifier.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "rejected bearer token");
                return Outcome::Error((Status::Unauthorized, AppError::Unauthorized));
            }
        };

        let resolved = match UserService::provision(db.inner(), &claims.sub, claims.display_name()).await {
            Ok(_) => UserService::resolve_user(db.inner(), &claims.sub).await,
            Err(e) => Err(e),
        };

        match resolved {
            Ok(user) => Outcome::Success(CurrentUser { user }),
            Err(e) => Outcome::Error((e.status(), e)),
        }
    }
}
