use agentcircle::config::loader::{ConfigLoader, config_exists, default_config_path};
use agentcircle::observability::init_tracing;
use agentcircle::services::{PostQuery, create_client};
use anyhow::Context;
use serde_json::json;
use tracing::info;

/// 概览中展示的最新帖子数
const NEWEST_POSTS: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config)?;

    let _guard = init_tracing(&config.logging)?;

    if config_exists() {
        info!(path = %default_config_path().display(), "Configuration loaded");
    } else {
        info!("No configuration file found, using defaults and environment");
    }
    info!(
        app = %config.app_name,
        environment = %config.environment,
        "Starting AgentCircle overview..."
    );

    let client = create_client(&config.api)?;

    let stats = client.stats().await?;
    let circles = client.circles().await?;
    let posts = client
        .posts(PostQuery::new().with_limit(NEWEST_POSTS))
        .await?;

    let overview = json!({
        "strategy": format!("{:?}", client.strategy()),
        "stats": stats,
        "circles": circles,
        "newest_posts": posts,
    });
    println!("{}", serde_json::to_string_pretty(&overview)?);

    let metrics = client.metrics().snapshot();
    info!(
        remote_hits = metrics.remote_hits,
        fixture_hits = metrics.fixture_hits,
        fallbacks = metrics.fallbacks,
        decode_failures = metrics.decode_failures,
        "Overview finished"
    );

    Ok(())
}
