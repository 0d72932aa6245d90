//! crudinit - bootstrap a MongoDB database for the CRUD demo.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crudinit_engine::infrastructure::{
    clock::SystemClock,
    config::BootstrapConfig,
    mongo::{self, MongoAdmin},
};
use crudinit_engine::Bootstrap;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crudinit_engine=info,crudinit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BootstrapConfig::from_env()?;
    tracing::info!(
        environment = %config.environment,
        description = config.environment.description(),
        database = %config.database,
        "Starting crudinit"
    );

    let database = mongo::connect(&config).await?;
    let admin = Arc::new(MongoAdmin::new(database));
    let bootstrap = Bootstrap::new(admin, Arc::new(SystemClock::new()));

    let report = bootstrap.execute_baseline(config.database.clone()).await?;
    tracing::info!(
        collections = ?report.collections_created,
        indexes = report.indexes_created,
        documents = report.documents_inserted,
        "Baseline applied"
    );

    let summary = bootstrap.summarize().await?;
    for collection in &summary.collections {
        tracing::info!(
            collection = %collection.name,
            indexes = collection.indexes.len(),
            documents = collection.documents,
            "{}: {}",
            collection.name,
            collection.indexes.join(", ")
        );
    }
    tracing::info!(database = %config.database, "Database bootstrap finished");

    Ok(())
}

/// Load `.env.local` then `.env` from the repository root, falling back to the
/// working directory.
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    let mut loaded = false;
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            loaded |= dotenvy::from_path(path).is_ok();
        }
    }
    if !loaded {
        let _ = dotenvy::dotenv();
    }
}
