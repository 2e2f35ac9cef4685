use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;
use sync_fixture::config::FixtureConfig;
use sync_fixture::{AppState, create_app};
use tokio::net::TcpSocket;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// HTTP test fixture emulating a device-sync backend
#[derive(Parser, Debug)]
#[command(name = "sync-fixture", version)]
struct Args {
    /// Port to listen on
    #[arg(default_value_t = 8080)]
    port: u16,

    /// Host to bind and advertise in the config document
    #[arg(long)]
    host: Option<String>,

    /// Directory uploads are written to
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Shared secret clients must present in X-API-Key
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing with EnvFilter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sync_fixture=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = FixtureConfig::from_env();
    config.port = args.port;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(dir) = args.upload_dir {
        config.upload_dir = dir;
    }
    if let Some(key) = args.api_key {
        config.api_key = key;
    }

    let state = AppState::new(config.clone());
    state.store.ensure_root().await.with_context(|| {
        format!(
            "failed to create upload directory {}",
            config.upload_dir.display()
        )
    })?;

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.bind_addr()))?;

    // Test runs restart the fixture on the same port in quick succession;
    // reuse the address so a socket lingering in TIME_WAIT does not fail
    // the bind.
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    let listener = socket.listen(1024)?;

    info!("Sync fixture listening on http://{}", addr);
    info!("  GET  http://{}/config?device_id=XXX", addr);
    info!("  POST {}", config.upload_url());
    info!("Upload directory: {}", config.upload_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("SIGTERM received, starting graceful shutdown...");
        },
    }
}
