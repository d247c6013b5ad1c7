//! directory-server: HTTP front end for the organization directory
//!
//! Loads layered configuration, connects to the database, applies migrations
//! and serves the REST API until interrupted.

mod config;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use directory_service::DirectoryServiceModule;
use sea_orm::{ConnectOptions, Database};
use tokio_util::sync::CancellationToken;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, LoggingConfig};

#[derive(Parser)]
#[command(name = "directory-server")]
#[command(about = "Organization directory REST server")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config/directory.yaml")]
    config: PathBuf,

    /// Listen address (overrides config file)
    #[arg(long)]
    bind: Option<String>,

    /// Database URL (overrides config file)
    #[arg(long)]
    database_url: Option<String>,

    /// Apply migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("invalid logging.level directive")?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

/// Request logging at INFO so the default filter shows every request
fn http_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    init_tracing(&config.logging)?;
    info!(config = %cli.config.display(), "Starting directory-server");

    // sqlx creates the database file with mode=rwc, but not its directory
    let db_file = config.database.sqlite_file();
    if let Some(parent) = db_file
        .as_deref()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut options = ConnectOptions::new(config.database.url.clone());
    options
        .max_connections(config.database.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;

    let module = DirectoryServiceModule::new(config.directory.clone());
    module.migrate(&db).await.context("migrations failed")?;
    if cli.migrate_only {
        info!("Migrations applied, exiting");
        return Ok(());
    }

    module.init(db)?;
    let app = module
        .register_rest(Router::new())?
        .layer(http_trace_layer());

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    info!(addr = %listener.local_addr()?, "Listening");

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("server error")?;

    info!("directory-server stopped");
    Ok(())
}

async fn watch_signals(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("Shutdown signal received");
    token.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_requests_are_logged_at_info() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(LoggingConfig::default().level))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(http_trace_layer());
        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_success());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("finished processing request"), "{output}");
        assert!(output.contains("/ping"), "{output}");
    }
}
