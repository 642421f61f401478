//! SceneForge Engine - Main entry point.
//!
//! Speaks JSON lines on stdin/stdout; logs go to stderr.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sceneforge_engine::api;
use sceneforge_engine::infrastructure::{
    catalog_loader::load_catalog,
    clock::SystemClock,
    config::{EngineConfig, SaveTarget},
    persistence::{InMemoryKeyValueStore, SqliteKeyValueStore},
    ports::{ClockPort, KeyValueStore},
};
use sceneforge_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root when run through cargo from `crates/engine`.
    load_dotenv_from_repo_root();

    // Initialize logging. Stdout is the protocol channel.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sceneforge_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting SceneForge Engine");

    let config = EngineConfig::from_env();

    let mut catalog = load_catalog(&config.catalog_path).with_context(|| {
        format!(
            "failed to load scene catalog from {}",
            config.catalog_path.display()
        )
    })?;
    if let Some(route) = config.initial_scene.clone() {
        tracing::info!(route = %route, "INITIAL_SCENE overrides catalog initial route");
        catalog = catalog
            .with_initial_route(route)
            .context("INITIAL_SCENE does not name a scene")?;
    }

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let store: Arc<dyn KeyValueStore> = match &config.save {
        SaveTarget::Sqlite(path) => {
            tracing::info!(path = %path.display(), "Using SQLite save");
            Arc::new(
                SqliteKeyValueStore::new(&path.to_string_lossy(), clock)
                    .await
                    .with_context(|| format!("failed to open save database {}", path.display()))?,
            )
        }
        SaveTarget::Memory => {
            tracing::info!("Using in-memory save, progress is lost on exit");
            Arc::new(InMemoryKeyValueStore::new())
        }
    };

    let app = App::start(catalog, store, &config.locale)
        .await
        .context("failed to start session")?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    api::serve(&app.use_cases.events, stdin, tokio::io::stdout()).await?;

    tracing::info!("SceneForge Engine stopped");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
