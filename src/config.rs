use std::env;

/// 設定読み込み時のエラー。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// アプリケーション設定。
/// HTTPのアドレスやポートは Rocket 自身の設定 (`Rocket.toml` / `ROCKET_*`) に任せます。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// データベース接続URL
    pub database_url: String,
    /// アクセストークン (HS256) の検証鍵
    pub jwt_secret: String,
    /// 期待する `aud` クレーム。未設定なら検証しない
    pub jwt_audience: Option<String>,
    /// 期待する `iss` クレーム。未設定なら検証しない
    pub jwt_issuer: Option<String>,
}

impl AppConfig {
    /// `.env` と環境変数から設定を読み込みます。
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を組み立てます。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };
        let optional = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_audience: optional("JWT_AUDIENCE"),
            jwt_issuer: optional("JWT_ISSUER"),
        })
    }
}
