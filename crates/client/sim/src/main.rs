//! Headless merge battler run.
//!
//! Generates a stage map from a seed, walks one path from the start to the
//! boss and plays every encounter on the way: battles through the turn
//! coordinator, events by taking the first available option. The final run
//! summary is printed as JSON on stdout; logs go to stderr.
mod arena;
mod config;
mod expedition;

use anyhow::{Context, Result};
use merge_content::{ContentBundle, ContentFactory};
use merge_core::{ActionRegistry, RandomSource};
use merge_runtime::StdRandom;
use tracing_subscriber::EnvFilter;

use crate::config::SimConfig;
use crate::expedition::Expedition;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    let registry = ActionRegistry::standard();
    let content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_all(&registry)
            .with_context(|| format!("failed to load content from {}", dir.display()))?,
        None => ContentBundle::embedded(&registry).context("embedded content is invalid")?,
    };

    let seed = config
        .seed
        .unwrap_or_else(|| u64::from(StdRandom::from_entropy().next_u32()));
    tracing::info!(seed, realtime = config.realtime, "starting run");

    let mut expedition = Expedition::new(config, content, registry, seed);
    let report = expedition.play().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to encode run report")?
    );
    Ok(())
}
