pub mod arguments;
pub mod domain;
pub mod infra;

use {
    anyhow::{Context, Result},
    clap::Parser,
    infra::{api::Api, blockchain::Node},
    manifest::Registry,
    std::{future::Future, sync::Arc},
};

/// Entry point of the `curve-api` binary.
pub async fn start(args: impl IntoIterator<Item = String>) {
    let args = arguments::Arguments::parse_from(args);
    observe::tracing::initialize(&args.log_filter, args.use_json_logs);
    tracing::info!("running curve api with validated arguments:\n{args}");
    if let Err(err) = run(args, shutdown_signal()).await {
        tracing::error!(?err, "curve api failed");
        std::process::exit(1);
    }
}

pub async fn run(
    args: arguments::Arguments,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let registry = Registry::load(&args.discovery_manifest, &args.deployment_manifest)
        .context("failed to load curve registry")?;
    Api {
        registry,
        reader: Arc::new(Node::new(args.node_url)),
        addr: args.bind_address,
    }
    .serve(shutdown)
    .await
    .context("server error")
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(?err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(?err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
    tracing::info!("shutting down");
}
