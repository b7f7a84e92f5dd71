mod app;
mod args;
mod handlers;
mod metrics;
mod state;

use std::sync::Arc;

use clap::Parser;
use savetips_common::random;

use crate::app::{allow_any_origin, build_app};
use crate::args::Args;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let otel_provider = savetips_common::telemetry::init_tracing(
        "savetips-gateway",
        args.otlp_url.as_deref(),
        args.otlp_token.as_deref(),
        args.log_format,
    );

    let random: Arc<dyn random::RandomSource> = random::from_seed(args.seed).into();
    let addr = args.resolve_listen_addr();

    tracing::info!(addr=%addr, random=random.name(), "gateway starting");

    let st = AppState::new(random);
    let app = build_app(st, allow_any_origin());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gateway stopped");
    if let Some(provider) = otel_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error=%e, "failed to flush traces");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error=%e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error=%e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
