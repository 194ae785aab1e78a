use anyhow::Context;
use gradeloop_secrets::{
    api::{start_api_server, AppState},
    observability::{init_logging, LoggingConfig},
    SecretsClient, ServiceConfig, APP_NAME, VERSION,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists; must happen before any config is read
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let service_config = ServiceConfig::from_env()?;
    let dispatch =
        init_logging(&LoggingConfig::new(&service_config.service_name, &service_config.log_level))?;
    tracing::dispatcher::set_global_default(dispatch)
        .context("Failed to install log dispatcher")?;

    info!(app_name = APP_NAME, version = VERSION, "Starting example service");

    let client = SecretsClient::from_env().await.inspect_err(|e| {
        error!(error = %e, "Failed to initialize secrets client");
    })?;

    let db_config = client.resolve_database_config().await.inspect_err(|e| {
        error!(error = %e, "Failed to resolve database configuration");
    })?;
    let cache_config = client.resolve_cache_config().await.inspect_err(|e| {
        error!(error = %e, "Failed to resolve cache configuration");
    })?;
    let token_config = client.resolve_token_config().await.inspect_err(|e| {
        error!(error = %e, "Failed to resolve token configuration");
    })?;

    info!(
        database_host = %db_config.host,
        database = %db_config.database,
        cache_address = %cache_config.address(),
        jwt_algorithm = %token_config.algorithm,
        "Resolved service configuration"
    );

    // Service-specific secrets are optional
    match client.resolve_named_secret_map(&service_config.service_name).await {
        Ok(secrets) => {
            let keys: Vec<&str> = secrets.keys().collect();
            info!(keys = ?keys, "Loaded service secrets");
        }
        Err(e) => warn!(error = %e, "Service secrets unavailable"),
    }

    info!(host = %db_config.host, port = %db_config.port, "Creating database connection pool");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&db_config.url())
        .await
        .context("Failed to connect to database")?;

    let state = AppState {
        pool,
        service_name: service_config.service_name.clone(),
        vault_addr: client.config().address.clone(),
        vault_status: if client.is_env_only() { "disabled" } else { "connected" },
        jwt_algorithm: token_config.algorithm.clone(),
    };

    let served = start_api_server(&service_config, state).await;

    client.close()?;
    served?;

    info!("Example service shutdown completed");
    Ok(())
}
