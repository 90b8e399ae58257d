pub mod arguments;
pub mod domain;
pub mod infra;

pub use domain::{CurveError, Severity};
use {
    anyhow::{Context, Result},
    clap::Parser,
    domain::{Deployment, Discovery, Reconstructor},
    manifest::{DeploymentManifest, DiscoveryManifest},
};

/// Entry point of the `discover-curves` binary.
pub async fn discover(args: impl IntoIterator<Item = String>) {
    let args = arguments::Discover::parse_from(args);
    observe::tracing::initialize(&args.logging.log_filter, args.logging.use_json_logs);
    tracing::info!("running curve discovery with validated arguments:\n{args}");
    if let Err(err) = run_discovery(args).await {
        tracing::error!(?err, "curve discovery failed");
        std::process::exit(1);
    }
}

/// Entry point of the `deploy-curves` binary.
pub async fn deploy(args: impl IntoIterator<Item = String>) {
    let args = arguments::Deploy::parse_from(args);
    observe::tracing::initialize(&args.logging.log_filter, args.logging.use_json_logs);
    tracing::info!("running curve deployment with validated arguments:\n{args}");
    if let Err(err) = run_deployment(args).await {
        tracing::error!(?err, "curve deployment failed");
        std::process::exit(1);
    }
}

pub async fn run_discovery(args: arguments::Discover) -> Result<DiscoveryManifest> {
    let registry = infra::Registry::new(infra::chain::provider(args.node_url), args.vault_address);
    let explorer = infra::Explorer::new(
        args.explorer_url,
        args.explorer_api_key,
        args.explorer_chain_id,
    );
    let forge = infra::Forge::new(args.forge);

    let discovered = Discovery {
        registry: &registry,
        explorer: &explorer,
        reconstructor: Reconstructor::new(&forge, &args.contracts_dir),
        request_delay: args.request_delay,
    }
    .run()
    .await?;

    manifest::store(&args.discovery_manifest, &discovered)
        .context("failed to write discovery manifest")?;
    tracing::info!(
        path = %args.discovery_manifest.display(),
        curves = discovered.curves.len(),
        "wrote discovery manifest"
    );
    Ok(discovered)
}

pub async fn run_deployment(args: arguments::Deploy) -> Result<DeploymentManifest> {
    let discovered: DiscoveryManifest = manifest::load(&args.discovery_manifest)
        .context("failed to read discovery manifest")?;
    let compiler = infra::Compiler::new(
        infra::Forge::new(args.forge),
        args.contracts_dir,
        args.artifacts_dir,
    );
    let deployer = infra::Deployer::new(
        args.node_url,
        args.deployer_account,
        args.deployer_private_key,
    );
    tracing::info!(account = %deployer.account(), "deploying curves");

    let deployed = Deployment {
        compiler: &compiler,
        deployer: &deployer,
        network: args.network,
    }
    .run(&discovered)
    .await;

    manifest::store(&args.deployment_manifest, &deployed)
        .context("failed to write deployment manifest")?;
    tracing::info!(
        path = %args.deployment_manifest.display(),
        curves = deployed.len(),
        "wrote deployment manifest"
    );
    Ok(deployed)
}
