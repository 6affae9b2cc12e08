use chrono::Utc;

use studyhub_backend::{
    config::Config,
    db::connection::create_pool,
    repositories::{session as session_repo, user as user_repo},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    let pool = create_pool(&config.database_url).await?;
    let now = Utc::now();

    let deleted_sessions = session_repo::delete_expired_sessions(&pool, now).await?;
    if deleted_sessions > 0 {
        tracing::info!("Deleted {} expired sessions", deleted_sessions);
    }

    let cleared_tokens = user_repo::clear_expired_remember_tokens(&pool, now).await?;
    if cleared_tokens > 0 {
        tracing::info!("Cleared {} expired remember-me tokens", cleared_tokens);
    }

    Ok(())
}
