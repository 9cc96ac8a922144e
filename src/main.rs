use std::sync::Arc;
use tracing::{error, info};

use estudiantes::{
    config::{Config, LogFormat},
    db::Database,
    messages::Messages,
    AppState,
};

fn init_logging(format: LogFormat) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_logging(config.log_format);

    let messages = Arc::new(Messages::load(&config.messages_path)?);

    let db = Database::new_with_pool_config(
        &config.database_url,
        config.db_max_connections,
        1,
        config.db_acquire_timeout_seconds,
    )
    .await?;

    if config.auto_create_schema {
        match db.ensure_schema().await {
            Ok(()) => info!("{}", messages.database_ready),
            Err(e) => error!("{}: {}", messages.schema_setup_failed, e),
        }
    }

    let state = Arc::new(AppState {
        store: Arc::new(db),
        messages,
        config: config.clone(),
    });

    let app = estudiantes::create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!(
        "Server starting on {} (students under '{}')",
        config.server_address,
        if config.route_prefix.is_empty() { "/" } else { config.route_prefix.as_str() }
    );

    axum::serve(listener, app).await?;

    Ok(())
}
