use todolist_api::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todolist_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let rocket = todolist_api::build_rocket(&config).await?;

    tracing::info!("starting todolist api");
    rocket
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))?;

    tracing::info!("todolist api stopped");
    Ok(())
}
