//! `huddled` — the Huddle server binary.
//!
//! Usage:
//!   huddled [-c <context-name-or-path>] [--listen <addr>]
//!
//! The context name resolves to `/etc/huddled/<name>.toml`. If a path
//! with `/` or `.` is given, it's used directly; with no `-c` the
//! built-in defaults apply.

mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use auth::store::HttpCredentialStore;
use auth::AuthModule;
use events::EventsModule;
use huddle_core::Module;
use rpc::RpcModule;

use config::ServerConfig;

/// Path prefixes served without authentication.
const PUBLIC_PREFIXES: &[&str] = &["/health", "/version", "/rpc"];

/// Huddle server.
#[derive(Parser, Debug)]
#[command(name = "huddled", about = "Huddle server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let mut server_config = match &cli.config {
        Some(name) => {
            let config_path = ServerConfig::resolve_path(name);
            info!("Loading configuration from {}", config_path.display());
            ServerConfig::load(&config_path)?
        }
        None => ServerConfig::default(),
    };
    if let Some(listen) = cli.listen {
        server_config.listen = listen;
    }

    // Initialize storage.
    let data_dir = PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = huddle_core::ServiceConfig {
        data_dir: Some(data_dir),
        sqlite_path: None,
        listen: server_config.listen.clone(),
    };

    // The embedded SQL store, shared by modules via an explicit handle —
    // no ambient global.
    let sql: Arc<dyn huddle_sql::SqlStore> = Arc::new(
        huddle_sql::SqliteStore::open(&core_config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    // The external credential store client. The timeout bounds how long
    // any request may stay suspended on session resolution.
    let credential_store = Arc::new(
        HttpCredentialStore::new(
            &server_config.credentials.base_url,
            Duration::from_secs(server_config.credentials.timeout_secs),
        )
        .map_err(|e| anyhow::anyhow!("failed to build credential store client: {}", e))?,
    );
    info!(
        "Credential store at {}",
        server_config.credentials.base_url
    );

    // ── Initialize modules ──

    let auth_module = AuthModule::new(
        credential_store,
        PUBLIC_PREFIXES.iter().map(|s| s.to_string()).collect(),
    );
    info!("Auth module initialized");

    let events_module = EventsModule::new(Arc::clone(&sql))
        .map_err(|e| anyhow::anyhow!("failed to initialize events module: {}", e))?;
    info!("Events module initialized");

    let rpc_module = RpcModule::new();
    info!("RPC module initialized");

    let module_routes = vec![
        (auth_module.name(), auth_module.routes()),
        (events_module.name(), events_module.routes()),
        (rpc_module.name(), rpc_module.routes()),
    ];

    // Build router with the gate layered over everything.
    let app = routes::build_router(module_routes, auth_module.gate());

    // Start server.
    let listener = tokio::net::TcpListener::bind(&server_config.listen).await?;
    info!("Huddle server listening on {}", server_config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
