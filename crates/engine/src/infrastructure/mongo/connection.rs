//! Client construction and readiness check.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::infrastructure::config::BootstrapConfig;

/// Reported to the server in the connection handshake.
pub const APP_NAME: &str = "crudinit";

/// How long server selection may take before the connection is considered failed.
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect, verify the server answers `ping`, and select the target database.
pub async fn connect(config: &BootstrapConfig) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

    let client = Client::with_options(options)?;

    // Verify connection before handing out the database
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    tracing::info!(
        environment = %config.environment,
        database = %config.database,
        "MongoDB connection established and verified"
    );

    Ok(client.database(config.database.as_str()))
}
